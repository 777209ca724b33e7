// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::{CountryOption, FormField, FormInput};

pub const MIN_NAME_CHARS: usize = 5;

// Unanchored: any `x@y.z` run inside the value matches.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"));

/// Field name to message, ordered like the form. Empty means acceptable.
pub type FieldErrors = BTreeMap<FormField, String>;

pub fn validate(input: &FormInput, selected_country: Option<&CountryOption>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !is_valid_name(&input.first_name) {
        errors.insert(
            FormField::FirstName,
            "First Name should be at least 5 characters".to_owned(),
        );
    }
    if !is_valid_name(&input.last_name) {
        errors.insert(
            FormField::LastName,
            "Last Name should be at least 5 characters".to_owned(),
        );
    }
    if !is_valid_email(&input.email) {
        errors.insert(FormField::Email, "Invalid Email".to_owned());
    }
    if input.mobile.is_empty() {
        errors.insert(FormField::Mobile, "Mobile Number is required".to_owned());
    }
    if input.address1.is_empty() {
        errors.insert(FormField::Address1, "Address 1 is mandatory".to_owned());
    }
    if selected_country.is_none() {
        errors.insert(FormField::Country, "Select a country".to_owned());
    }
    if !is_valid_zip_code(&input.zip_code) {
        errors.insert(FormField::ZipCode, "Invalid Zip Code".to_owned());
    }

    errors
}

pub fn is_valid_name(value: &str) -> bool {
    value.chars().count() >= MIN_NAME_CHARS
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

pub fn is_valid_zip_code(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}
