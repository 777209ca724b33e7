// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use userinfo_app::{AppCommand, AppEvent, AppState, CountryOption, FormField, FormInput};

// Every name is at least five characters so generated forms validate.
const FIRST_NAMES: [&str; 13] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Quinn", "Parker", "Elliot", "Robin",
    "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 13] = [
    "Walker", "Martin", "Evans", "Lopez", "Young", "Campbell", "Turner", "Flores", "Bennett",
    "Price", "Morris", "Foster", "Brooks",
];

const STREET_NAMES: [&str; 10] = [
    "Elm", "Oak", "Maple", "Cedar", "Pine", "Birch", "Willow", "Aspen", "Spruce", "Juniper",
];
const STREET_SUFFIXES: [&str; 5] = ["St", "Ave", "Rd", "Ln", "Way"];
const UNIT_PREFIXES: [&str; 3] = ["Apt", "Unit", "Suite"];
const MAIL_DOMAINS: [&str; 4] = [
    "example.com",
    "example.org",
    "mail.example.net",
    "inbox.example.io",
];

const COUNTRIES: [&str; 12] = [
    "Argentina",
    "Australia",
    "Canada",
    "Germany",
    "Ghana",
    "India",
    "Japan",
    "Kenya",
    "Mexico",
    "Norway",
    "Peru",
    "United States",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of form data. The same seed always yields the same
/// sequence.
#[derive(Debug, Clone)]
pub struct FormFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl FormFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn country(&mut self) -> CountryOption {
        CountryOption::named(self.pick(&COUNTRIES))
    }

    /// A form that passes validation once a country is selected. `country`
    /// carries the name the selector should be set to.
    pub fn form_input(&mut self) -> FormInput {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&MAIL_DOMAINS);
        let street = self.pick(&STREET_NAMES);
        let suffix = self.pick(&STREET_SUFFIXES);
        let address2 = if self.rng.bool() {
            format!(
                "{} {}",
                self.pick(&UNIT_PREFIXES),
                self.int_range(1, 40)
            )
        } else {
            String::new()
        };

        FormInput {
            first_name: first.to_owned(),
            last_name: last.to_owned(),
            email: format!(
                "{}.{}@{domain}",
                first.to_lowercase(),
                last.to_lowercase()
            ),
            mobile: format!(
                "+1 {:03} {:03} {:04}",
                self.int_range(200, 999),
                self.int_range(200, 999),
                self.int_range(0, 9999)
            ),
            address1: format!("{} {street} {suffix}", self.int_range(1, 9999)),
            address2,
            country: self.pick(&COUNTRIES).to_owned(),
            zip_code: format!("{:05}", self.int_range(501, 99_950)),
        }
    }

    fn pick<'a>(&mut self, values: &'a [&'a str]) -> &'a str {
        values[self.rng.int_n(values.len())]
    }

    fn int_range(&mut self, low: usize, high: usize) -> usize {
        low + self.rng.int_n(high.saturating_sub(low) + 1)
    }
}

/// The fixed directory used when no network lookup happens.
pub fn sample_countries() -> Vec<CountryOption> {
    COUNTRIES.iter().copied().map(CountryOption::named).collect()
}

/// Fills and submits the form `count` times through `dispatch`. Returns the
/// number of records that were accepted.
pub fn seed_demo_records(state: &mut AppState, seed: u64, count: usize) -> usize {
    let mut faker = FormFaker::new(seed);
    let mut added = 0;
    for _ in 0..count {
        fill_form(state, &faker.form_input());
        let events = state.dispatch(AppCommand::Submit);
        if events
            .iter()
            .any(|event| matches!(event, AppEvent::RecordAdded(_)))
        {
            added += 1;
        }
    }
    state.dispatch(AppCommand::ClearStatus);
    added
}

/// Types every field of `input` into the form and selects its country.
pub fn fill_form(state: &mut AppState, input: &FormInput) {
    for field in FormField::ALL {
        if field.is_text_input() {
            state.dispatch(AppCommand::SetField(field, input.get(field).to_owned()));
        }
    }
    let selection = (!input.country.is_empty()).then(|| CountryOption::named(&input.country));
    state.dispatch(AppCommand::SelectCountry(selection));
}
