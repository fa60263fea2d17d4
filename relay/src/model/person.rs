use chrono::NaiveDateTime;
use serde::Serialize;

use crate::consts::consts::NOTE_DATE_FORMAT;

use super::submission::{PersonName, Submission};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct NameEntry {
    pub first_name: String,
    pub last_name: String,
    pub is_primary: bool,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub enum ContactType {
    Phone,
    Email,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ContactMethod {
    pub contact_type: ContactType,
    pub contact_value: String,
    pub is_primary: bool,
}

/// Body of the CRM contact creation call
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PersonPayload {
    pub names: Vec<NameEntry>,
    pub contact_methods: Vec<ContactMethod>,
    pub note_pad: String,
}

impl PersonPayload {
    /// Phone is the primary contact method whenever one was given, email is only primary
    /// when it is the sole contact method
    pub fn new(
        name: &PersonName,
        submission: &Submission,
        brand: &str,
        submitted_at: NaiveDateTime,
    ) -> Self {
        let mut contact_methods = vec![];

        if let Some(phone) = submission.phone() {
            contact_methods.push(ContactMethod {
                contact_type: ContactType::Phone,
                contact_value: phone.to_string(),
                is_primary: true,
            });
        }

        if let Some(email) = submission.email() {
            contact_methods.push(ContactMethod {
                contact_type: ContactType::Email,
                contact_value: email.to_string(),
                is_primary: submission.phone().is_none(),
            });
        }

        PersonPayload {
            names: vec![NameEntry {
                first_name: name.first.clone(),
                last_name: name.last.clone(),
                is_primary: true,
            }],
            contact_methods,
            note_pad: format!(
                "Lead from {} website - {}",
                brand,
                submitted_at.format(NOTE_DATE_FORMAT)
            ),
        }
    }

    pub fn primary_contact(&self) -> Option<&ContactMethod> {
        self.contact_methods.iter().find(|c| c.is_primary)
    }
}
