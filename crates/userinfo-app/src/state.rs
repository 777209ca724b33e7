// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

use crate::validation::{self, FieldErrors};
use crate::{CountryDirectory, CountryOption, EditCursor, FormField, FormInput, RecordId, RecordList};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub form: FormInput,
    pub selected_country: Option<CountryOption>,
    pub countries: CountryDirectory,
    pub records: RecordList,
    pub edit_cursor: EditCursor,
    pub errors: FieldErrors,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SetField(FormField, String),
    SelectCountry(Option<CountryOption>),
    Submit,
    Edit(RecordId),
    Delete(RecordId),
    CancelEdit,
    CountriesLoaded(Vec<CountryOption>),
    CountriesUnavailable,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    FieldChanged(FormField),
    CountrySelected(Option<String>),
    ValidationFailed(Vec<FormField>),
    RecordAdded(RecordId),
    RecordUpdated(RecordId),
    RecordDeleted(RecordId),
    EditStarted(RecordId),
    EditCanceled,
    FormCleared,
    DirectoryChanged(usize),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SetField(field, value) => {
                self.form.set(field, value);
                vec![AppEvent::FieldChanged(field)]
            }
            AppCommand::SelectCountry(option) => {
                let value = option.as_ref().map(|option| option.value.clone());
                self.selected_country = option;
                vec![AppEvent::CountrySelected(value)]
            }
            AppCommand::Submit => self.submit(OffsetDateTime::now_utc()),
            AppCommand::Edit(id) => self.begin_edit(id),
            AppCommand::Delete(id) => self.delete(id),
            AppCommand::CancelEdit => {
                if !self.edit_cursor.is_editing() {
                    return Vec::new();
                }
                self.edit_cursor = EditCursor::None;
                vec![AppEvent::EditCanceled, self.set_status("edit canceled")]
            }
            AppCommand::CountriesLoaded(options) => {
                let count = options.len();
                self.countries = CountryDirectory::Ready(options);
                vec![AppEvent::DirectoryChanged(count)]
            }
            AppCommand::CountriesUnavailable => {
                self.countries = CountryDirectory::Unavailable;
                vec![AppEvent::DirectoryChanged(0)]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn validate(&self) -> FieldErrors {
        validation::validate(&self.form, self.selected_country.as_ref())
    }

    // The only place `errors` is written; edits leave the last result shown.
    fn submit(&mut self, now: OffsetDateTime) -> Vec<AppEvent> {
        self.errors = self.validate();
        if !self.errors.is_empty() {
            let fields: Vec<FormField> = self.errors.keys().copied().collect();
            let keys: Vec<&str> = fields.iter().map(|field| field.as_str()).collect();
            tracing::debug!(fields = %keys.join(","), "submit rejected");
            return vec![
                AppEvent::ValidationFailed(fields),
                self.set_status("form invalid: fix highlighted fields"),
            ];
        }

        let mut input = std::mem::take(&mut self.form);
        input.country = self
            .selected_country
            .take()
            .map(|option| option.value)
            .unwrap_or_default();

        let mut events = Vec::with_capacity(3);
        match self.edit_cursor {
            EditCursor::None => {
                let id = self.records.push(input, now);
                tracing::debug!(record = id.get(), "record added");
                events.push(AppEvent::RecordAdded(id));
                events.push(AppEvent::FormCleared);
                events.push(self.set_status("record added"));
            }
            EditCursor::Editing(id) => {
                self.edit_cursor = EditCursor::None;
                if !self.records.replace(id, input, now) {
                    // The cursor is cleared on delete, so this only trips if a
                    // caller mutated `records` directly.
                    tracing::warn!(record = id.get(), "edited record vanished before submit");
                    events.push(AppEvent::FormCleared);
                    events.push(self.set_status("record no longer exists"));
                    return events;
                }
                tracing::debug!(record = id.get(), "record updated");
                events.push(AppEvent::RecordUpdated(id));
                events.push(AppEvent::FormCleared);
                events.push(self.set_status("record updated"));
            }
        }
        events
    }

    fn begin_edit(&mut self, id: RecordId) -> Vec<AppEvent> {
        let Some(record) = self.records.get(id) else {
            return vec![self.set_status("record not found")];
        };
        // The country selector is left alone; only the field value is loaded.
        self.form = record.input.clone();
        self.edit_cursor = EditCursor::Editing(id);
        let position = self.records.position(id).map_or(0, |index| index + 1);
        vec![
            AppEvent::EditStarted(id),
            self.set_status(&format!("editing record {position}")),
        ]
    }

    fn delete(&mut self, id: RecordId) -> Vec<AppEvent> {
        if self.records.remove(id).is_none() {
            return vec![self.set_status("record not found")];
        }
        tracing::debug!(record = id.get(), "record deleted");

        let mut events = vec![AppEvent::RecordDeleted(id)];
        if self.edit_cursor == EditCursor::Editing(id) {
            self.edit_cursor = EditCursor::None;
            events.push(AppEvent::EditCanceled);
        }
        events.push(self.set_status("record deleted"));
        events
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
