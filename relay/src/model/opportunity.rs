use chrono::NaiveDateTime;
use serde::Serialize;

use crate::consts::consts::{
    FIELD_LOAN_AMOUNT, LEAD_STATUS, NOTE_DATE_FORMAT, NOT_SPECIFIED, TRANSACTION_TYPE,
};

use super::{
    source::{SourceTag, FALLBACK_OPPORTUNITY_TYPE},
    submission::{PersonName, Submission},
};

/// Body of the CRM opportunity creation call, linked to the person through `PersonId`
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct OpportunityPayload {
    pub person_id: String,
    pub opportunity_name: String,
    pub opportunity_type: String,
    pub transaction_type: String,
    pub lead_status: String,
    pub note_pad: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<f64>,
}

impl OpportunityPayload {
    pub fn new(
        person_id: String,
        name: &PersonName,
        submission: &Submission,
        brand: &str,
        submitted_at: NaiveDateTime,
    ) -> Self {
        let source = submission.source();

        let opportunity_type = source
            .map(|s| s.opportunity_type())
            .unwrap_or(FALLBACK_OPPORTUNITY_TYPE);

        OpportunityPayload {
            person_id,
            opportunity_name: format!("{} - {}", name.display_name(), opportunity_type),
            opportunity_type: opportunity_type.to_string(),
            transaction_type: TRANSACTION_TYPE.to_string(),
            lead_status: LEAD_STATUS.to_string(),
            note_pad: build_notes(submission, source, brand, submitted_at),
            loan_amount: submission.get(FIELD_LOAN_AMOUNT).and_then(parse_loan_amount),
        }
    }
}

/// Assembles the free text notes, one labelled line per field the source form collects
pub fn build_notes(
    submission: &Submission,
    source: Option<SourceTag>,
    brand: &str,
    submitted_at: NaiveDateTime,
) -> String {
    let mut notes = format!("Website inquiry from {}\n", brand);

    let note_fields = source.map(|s| s.note_fields()).unwrap_or(&[]);

    for note_field in note_fields {
        notes.push_str(&format!(
            "{}: {}\n",
            note_field.label,
            submission.get(note_field.field).unwrap_or(NOT_SPECIFIED)
        ));
    }

    notes.push_str(&format!(
        "\nLoan Amount: {}",
        submission.get(FIELD_LOAN_AMOUNT).unwrap_or(NOT_SPECIFIED)
    ));
    notes.push_str(&format!(
        "\nSubmitted: {}",
        submitted_at.format(NOTE_DATE_FORMAT)
    ));

    notes
}

/// Strips currency symbols, thousands separators and the k/K marker, then reads the leading
/// number. Trailing text is ignored: "450000 AUD" and "450000+" are both 450000.
///
/// The marker is removed, not applied: "50k" is 50. A bare "0" counts as not provided.
pub fn parse_loan_amount(raw: &str) -> Option<f64> {
    if raw.trim() == "0" {
        return None;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | 'k' | 'K'))
        .collect();
    let cleaned = cleaned.trim();

    let prefix = &cleaned[..numeric_prefix_len(cleaned)];
    if prefix.is_empty() {
        return None;
    }

    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Length in bytes of the longest `[+-]digits[.digits][e[+-]digits]` prefix, 0 when there are
/// no digits before the exponent
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut at: usize| {
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };

    let integer_end = digits_from(end);
    let mut has_digits = integer_end > end;
    end = integer_end;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = digits_from(end + 1);
        if fraction_end > end + 1 {
            has_digits = true;
            end = fraction_end;
        } else if has_digits {
            end += 1;
        }
    }

    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+') | Some(b'-')) {
            exponent += 1;
        }

        let exponent_end = digits_from(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    end
}
