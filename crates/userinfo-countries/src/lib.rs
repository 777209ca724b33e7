// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Country directory lookup: one blocking GET against a REST Countries style
//! endpoint, run on a worker thread that can be canceled before it reports.

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use url::Url;
use userinfo_app::CountryOption;

pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v3.1/all?fields=name";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Url,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let trimmed = endpoint.trim();
        if trimmed.is_empty() {
            bail!("countries.endpoint must not be empty");
        }
        let endpoint = Url::parse(trimmed).with_context(|| {
            format!("countries.endpoint {trimmed:?} is not an absolute URL")
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!(
                "countries.endpoint must use http or https, got {:?}",
                endpoint.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            endpoint,
            timeout,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fetch_countries(&self) -> Result<Vec<CountryOption>> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|error| connection_error(self.endpoint(), error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let body = response.text().context("read country list")?;
        decode_countries(&body)
    }
}

/// Keeps upstream order and duplicates. Entries without a common name are
/// skipped.
pub fn decode_countries(body: &str) -> Result<Vec<CountryOption>> {
    let entries: Vec<CountryEntry> =
        serde_json::from_str(body).context("decode country list")?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| entry.name)
        .map(|name| name.common)
        .filter(|common| !common.is_empty())
        .map(CountryOption::named)
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryLoadOutcome {
    Loaded {
        request_id: u64,
        countries: Vec<CountryOption>,
    },
    Failed {
        request_id: u64,
        error: String,
    },
}

impl CountryLoadOutcome {
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::Loaded { request_id, .. } | Self::Failed { request_id, .. } => *request_id,
        }
    }
}

/// Handle to an in-flight load. Dropping it detaches the worker; the
/// outcome is still delivered unless [`CountryLoadHandle::cancel`] ran first.
#[derive(Debug)]
pub struct CountryLoadHandle {
    request_id: u64,
    canceled: Arc<Mutex<bool>>,
    worker: JoinHandle<()>,
}

impl CountryLoadHandle {
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    pub fn cancel(&self) {
        *lock_flag(&self.canceled) = true;
    }

    pub fn is_canceled(&self) -> bool {
        *lock_flag(&self.canceled)
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    pub fn join(self) -> Result<()> {
        self.worker
            .join()
            .map_err(|_| anyhow!("country load worker panicked"))
    }
}

/// Runs [`Client::fetch_countries`] on a worker thread and hands the outcome
/// to `on_done`, at most once. The outcome is dropped if the handle was
/// canceled before delivery.
pub fn spawn_load<F>(client: Client, request_id: u64, on_done: F) -> Result<CountryLoadHandle>
where
    F: FnOnce(CountryLoadOutcome) + Send + 'static,
{
    let canceled = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&canceled);

    let worker = thread::Builder::new()
        .name("country-load".to_owned())
        .spawn(move || {
            tracing::info!(request_id, endpoint = client.endpoint(), "loading country directory");
            let outcome = match client.fetch_countries() {
                Ok(countries) => {
                    tracing::info!(request_id, count = countries.len(), "country directory loaded");
                    CountryLoadOutcome::Loaded {
                        request_id,
                        countries,
                    }
                }
                Err(error) => {
                    tracing::warn!(request_id, "country directory unavailable: {error:#}");
                    CountryLoadOutcome::Failed {
                        request_id,
                        error: format!("{error:#}"),
                    }
                }
            };

            // Held across delivery so a concurrent cancel either wins or waits.
            let canceled = lock_flag(&flag);
            if *canceled {
                tracing::debug!(request_id, "country load canceled; dropping result");
                return;
            }
            on_done(outcome);
        })
        .context("spawn country load worker")?;

    Ok(CountryLoadHandle {
        request_id,
        canceled,
        worker,
    })
}

fn lock_flag(flag: &Mutex<bool>) -> MutexGuard<'_, bool> {
    match flag.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn connection_error(endpoint: &str, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!(
            "country lookup at {} timed out -- raise [countries].timeout or run with --offline",
            endpoint
        );
    }
    anyhow!(
        "cannot reach {} -- check the network or set [countries].endpoint ({})",
        endpoint,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(message) = parsed.message
        && !message.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), message);
    }

    if body.len() < 100 && !body.contains('{') && !body.trim().is_empty() {
        return anyhow!("server error ({}): {}", status.as_u16(), body.trim());
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    #[serde(default)]
    name: Option<CountryName>,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    #[serde(default)]
    common: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
}
