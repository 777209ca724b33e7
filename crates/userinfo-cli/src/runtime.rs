// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::sync::mpsc::Sender;
use userinfo_countries::{Client, CountryLoadHandle, spawn_load};
use userinfo_tui::InternalEvent;

/// Feeds the UI from a country endpoint. Without a client every load request
/// reports that lookups are off.
pub struct CountryRuntime {
    client: Option<Client>,
    next_request_id: u64,
    in_flight: Option<CountryLoadHandle>,
}

impl CountryRuntime {
    pub fn new(client: Option<Client>) -> Self {
        Self {
            client,
            next_request_id: 0,
            in_flight: None,
        }
    }
}

impl userinfo_tui::AppRuntime for CountryRuntime {
    fn start_country_load(&mut self, tx: Sender<InternalEvent>) -> Result<Option<u64>> {
        let Some(client) = &self.client else {
            return Ok(None);
        };

        // At most one load is live; a superseded one must not report.
        if let Some(previous) = self.in_flight.take() {
            previous.cancel();
        }

        self.next_request_id += 1;
        let request_id = self.next_request_id;
        let handle = spawn_load(client.clone(), request_id, move |outcome| {
            let _ = tx.send(InternalEvent::Countries(outcome));
        })?;
        self.in_flight = Some(handle);
        Ok(Some(request_id))
    }

    fn cancel_country_load(&mut self) -> Result<()> {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
            tracing::debug!(
                request_id = handle.request_id(),
                finished = handle.is_finished(),
                "country load canceled"
            );
        }
        Ok(())
    }
}
