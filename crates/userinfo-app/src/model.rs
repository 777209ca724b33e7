// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Mobile,
    Address1,
    Address2,
    Country,
    ZipCode,
}

impl FormField {
    pub const ALL: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Mobile,
        Self::Address1,
        Self::Address2,
        Self::Country,
        Self::ZipCode,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::Address1 => "address1",
            Self::Address2 => "address2",
            Self::Country => "country",
            Self::ZipCode => "zipCode",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Mobile => "Mobile Number",
            Self::Address1 => "Address 1",
            Self::Address2 => "Address 2",
            Self::Country => "Country",
            Self::ZipCode => "Zip Code",
        }
    }

    /// Country is picked from the directory rather than typed.
    pub const fn is_text_input(self) -> bool {
        !matches!(self, Self::Country)
    }
}

/// Current values of the form. Every field is free text; rules live in
/// [`crate::validation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub address1: String,
    pub address2: String,
    pub country: String,
    pub zip_code: String,
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Mobile => &self.mobile,
            FormField::Address1 => &self.address1,
            FormField::Address2 => &self.address2,
            FormField::Country => &self.country,
            FormField::ZipCode => &self.zip_code,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Email => &mut self.email,
            FormField::Mobile => &mut self.mobile,
            FormField::Address1 => &mut self.address1,
            FormField::Address2 => &mut self.address2,
            FormField::Country => &mut self.country,
            FormField::ZipCode => &mut self.zip_code,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.get_mut(field) = value.into();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// Identity of a stored record, handed out by [`RecordList`] and never
/// reused within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(i64);

impl RecordId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    pub id: RecordId,
    pub input: FormInput,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountryOption {
    pub value: String,
    pub label: String,
}

impl CountryOption {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            value: name.clone(),
            label: name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CountryDirectory {
    #[default]
    Loading,
    Ready(Vec<CountryOption>),
    Unavailable,
}

impl CountryDirectory {
    pub fn options(&self) -> &[CountryOption] {
        match self {
            Self::Ready(options) => options,
            Self::Loading | Self::Unavailable => &[],
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditCursor {
    #[default]
    None,
    Editing(RecordId),
}

impl EditCursor {
    pub const fn record_id(self) -> Option<RecordId> {
        match self {
            Self::None => None,
            Self::Editing(id) => Some(id),
        }
    }

    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

/// Submitted records in insertion order. Ids are handed out once per list
/// and never reused, so they survive deletes that shift positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordList {
    records: Vec<FormRecord>,
    next_id: i64,
}

impl Default for RecordList {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl RecordList {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&FormRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn get_at(&self, index: usize) -> Option<&FormRecord> {
        self.records.get(index)
    }

    pub fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<RecordId> {
        self.records.get(index).map(|record| record.id)
    }

    pub fn push(&mut self, input: FormInput, now: OffsetDateTime) -> RecordId {
        let id = RecordId::new(self.next_id);
        self.next_id += 1;
        self.records.push(FormRecord {
            id,
            input,
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Overwrites the record in place. Returns false when `id` is unknown.
    pub fn replace(&mut self, id: RecordId, input: FormInput, now: OffsetDateTime) -> bool {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            return false;
        };
        record.input = input;
        record.updated_at = now;
        true
    }

    pub fn remove(&mut self, id: RecordId) -> Option<FormRecord> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }
}

impl<'a> IntoIterator for &'a RecordList {
    type Item = &'a FormRecord;
    type IntoIter = std::slice::Iter<'a, FormRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryDirectory, CountryOption, FormField, FormInput, RecordId, RecordList};
    use time::OffsetDateTime;

    fn named(first: &str) -> FormInput {
        FormInput {
            first_name: first.to_owned(),
            ..FormInput::default()
        }
    }

    #[test]
    fn only_country_is_not_typed() {
        let picked: Vec<_> = FormField::ALL
            .into_iter()
            .filter(|field| !field.is_text_input())
            .collect();
        assert_eq!(picked, vec![FormField::Country]);
    }

    #[test]
    fn form_input_set_and_get_address_the_same_field() {
        let mut input = FormInput::default();
        assert!(input.is_empty());
        input.set(FormField::ZipCode, "02139");
        assert_eq!(input.get(FormField::ZipCode), "02139");
        assert_eq!(input.zip_code, "02139");
        assert!(!input.is_empty());
    }

    #[test]
    fn record_ids_are_not_reused_after_remove() {
        let mut list = RecordList::default();
        let now = OffsetDateTime::UNIX_EPOCH;
        let first = list.push(named("Avery"), now);
        let second = list.push(named("Jordan"), now);
        assert!(list.remove(second).is_some());

        let third = list.push(named("Taylor"), now);
        assert_eq!(first, RecordId::new(1));
        assert_eq!(third, RecordId::new(3));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_shifts_later_positions() {
        let mut list = RecordList::default();
        let now = OffsetDateTime::UNIX_EPOCH;
        let a = list.push(named("Avery"), now);
        let b = list.push(named("Jordan"), now);
        let c = list.push(named("Taylor"), now);

        list.remove(a);
        assert_eq!(list.position(b), Some(0));
        assert_eq!(list.position(c), Some(1));
        assert_eq!(list.id_at(1), Some(c));
        assert!(list.get(a).is_none());
    }

    #[test]
    fn replace_keeps_created_at_and_bumps_updated_at() {
        let mut list = RecordList::default();
        let created = OffsetDateTime::UNIX_EPOCH;
        let later = created + time::Duration::minutes(5);
        let id = list.push(named("Avery"), created);

        assert!(list.replace(id, named("Morgan"), later));
        let record = list.get(id).expect("record exists");
        assert_eq!(record.input.first_name, "Morgan");
        assert_eq!(record.created_at, created);
        assert_eq!(record.updated_at, later);

        assert!(!list.replace(RecordId::new(99), named("Quinn"), later));
    }

    #[test]
    fn unavailable_directory_has_no_options() {
        assert!(CountryDirectory::Unavailable.options().is_empty());
        assert!(CountryDirectory::Loading.is_loading());
        let ready = CountryDirectory::Ready(vec![CountryOption::named("Peru")]);
        assert_eq!(ready.options()[0].label, "Peru");
    }
}
