use std::collections::BTreeMap;
use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;

use super::contact::{ContactForm, Field};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{10,15}$").unwrap()
});

pub const NAME_REQUIRED: &str   = "Name is required";
pub const EMAIL_REQUIRED: &str  = "Email is required";
pub const EMAIL_INVALID: &str   = "Please enter a valid email address";
pub const PHONE_REQUIRED: &str  = "Phone number is required";
pub const PHONE_INVALID: &str   = "Please enter a valid phone number";

pub fn is_valid_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input)
}

pub fn is_valid_phone(input: &str) -> bool {
    PHONE_PATTERN.is_match(input)
}

/// Checks one field, returning the first rule it breaks.
pub fn check(field: Field, value: &str) -> Option<&'static str> {
    match field {
        Field::Name if value.is_empty() => Some(NAME_REQUIRED),
        Field::Name => None,
        Field::Email if value.is_empty() => Some(EMAIL_REQUIRED),
        Field::Email if !is_valid_email(value) => Some(EMAIL_INVALID),
        Field::Email => None,
        Field::Phone if value.is_empty() => Some(PHONE_REQUIRED),
        Field::Phone if !is_valid_phone(value) => Some(PHONE_INVALID),
        Field::Phone => None,
    }
}

pub fn validate(form: &ContactForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        if let Some(msg) = check(field, form.get(field)) {
            errors.insert(field, msg);
        }
    }

    match errors.is_empty() {
        true => Ok(()),
        false => Err(errors),
    }
}

/// Inline messages keyed by field, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, msg: &str) {
        self.0.insert(field, msg.to_string());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(|v| v.as_str())
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &String)> {
        self.0.iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs = self.0.values()
            .map(|v| v.as_str())
            .collect::<Vec<&str>>();
        write!(f, "{}", msgs.join(", "))
    }
}
