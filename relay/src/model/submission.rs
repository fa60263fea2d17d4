use std::collections::HashMap;

use serde_json::Value;

use crate::{
    consts::consts::{
        CONTACT_REQUIRED, FIELD_EMAIL, FIELD_FIRST_NAME, FIELD_FULL_NAME, FIELD_LAST_NAME,
        FIELD_PHONE, FIELD_SOURCE, INVALID_FORM_DATA, NAME_REQUIRED,
    },
    relay::error::RelayError,
};

use super::source::SourceTag;

/// Flat mapping of form field name to value, as captured from a single form at submit time.
///
/// Values are stored trimmed, and a field whose value is empty is treated as absent by every
/// accessor. A submission lives for a single request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Submission {
    fields: HashMap<String, String>,
}

/// First/last name derived once per submission and reused by both CRM payloads
#[derive(Debug, Clone, PartialEq)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    /// Splits on the first run of whitespace, the remainder (which may itself contain spaces)
    /// becomes the last name
    pub fn split_full_name(full_name: &str) -> PersonName {
        let full_name = full_name.trim();

        match full_name.split_once(char::is_whitespace) {
            Some((first, last)) => PersonName {
                first: first.to_string(),
                last: last.trim_start().to_string(),
            },
            None => PersonName {
                first: full_name.to_string(),
                last: String::new(),
            },
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first, self.last).trim().to_string()
    }
}

impl Submission {
    /// Parses a request body. The body must be a non-empty JSON object.
    ///
    /// Strings are kept as is, numbers and booleans are stringified, anything else is dropped.
    pub fn from_json(body: &[u8]) -> Result<Submission, RelayError> {
        let invalid = || RelayError::InvalidInput(INVALID_FORM_DATA.to_string());

        let object = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(object)) if !object.is_empty() => object,
            Ok(_) => return Err(invalid()),
            Err(e) => {
                log::warn!("Unparseable submission body: {}", e);
                return Err(invalid());
            }
        };

        let fields = object
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };

                Some((key, value))
            });

        Ok(Submission::from_fields(fields))
    }

    pub fn from_fields<I, K, V>(fields: I) -> Submission
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        Submission {
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.as_ref().trim().to_string()))
                .collect(),
        }
    }

    /// Returns the field's value, `None` when missing or empty
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|value| value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn source(&self) -> Option<SourceTag> {
        self.get(FIELD_SOURCE).and_then(SourceTag::parse)
    }

    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn phone(&self) -> Option<&str> {
        self.get(FIELD_PHONE)
    }

    pub fn email(&self) -> Option<&str> {
        self.get(FIELD_EMAIL)
    }

    /// Checks the name and contact method requirements, returning the derived name.
    ///
    /// A submission needs `fullName` or both `firstName` and `lastName`, plus `phone` or `email`.
    pub fn validate(&self) -> Result<PersonName, RelayError> {
        let name = match (
            self.get(FIELD_FULL_NAME),
            self.get(FIELD_FIRST_NAME),
            self.get(FIELD_LAST_NAME),
        ) {
            (Some(full_name), _, _) => PersonName::split_full_name(full_name),
            (None, Some(first), Some(last)) => PersonName {
                first: first.to_string(),
                last: last.to_string(),
            },
            _ => return Err(RelayError::InvalidInput(NAME_REQUIRED.to_string())),
        };

        if self.phone().is_none() && self.email().is_none() {
            return Err(RelayError::InvalidInput(CONTACT_REQUIRED.to_string()));
        }

        Ok(name)
    }
}
