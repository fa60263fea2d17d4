use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::consts::consts::{
    FIELD_DEBT_AMOUNT, FIELD_DEBT_TYPES, FIELD_INDUSTRY, FIELD_SERVICE_INTEREST,
    FIELD_SPECIALIZATION, FIELD_YEARS_EMPLOYED,
};

/// Opportunity type used when a submission carries no recognised source tag
pub const FALLBACK_OPPORTUNITY_TYPE: &str = "Home Loan";

/// Identifies the website form a submission came from. Drives both the opportunity type
/// and which optional fields are written into the opportunity notes.
///
/// Tags are the kebab-case names used by the forms' `data-source` attribute, e.g. `self-employed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum SourceTag {
    MedicalProfessionals,
    SelfEmployed,
    DebtConsolidation,
    Contact,
}

/// A labelled line written into the opportunity notes, `Label: <value of field>`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteField {
    pub label: &'static str,
    pub field: &'static str,
}

impl SourceTag {
    /// Parses a raw tag, unknown tags are treated as "no source" rather than an error
    pub fn parse(raw: &str) -> Option<SourceTag> {
        raw.trim().parse().ok()
    }

    pub fn opportunity_type(&self) -> &'static str {
        match self {
            SourceTag::MedicalProfessionals => "Medical Professional Loan",
            SourceTag::SelfEmployed => "Self Employed Loan",
            SourceTag::DebtConsolidation => "Debt Consolidation",
            SourceTag::Contact => "General Inquiry",
        }
    }

    pub fn note_fields(&self) -> &'static [NoteField] {
        match self {
            SourceTag::MedicalProfessionals => &[NoteField {
                label: "Medical Specialization",
                field: FIELD_SPECIALIZATION,
            }],
            SourceTag::SelfEmployed => &[
                NoteField {
                    label: "Industry",
                    field: FIELD_INDUSTRY,
                },
                NoteField {
                    label: "Years Self-Employed",
                    field: FIELD_YEARS_EMPLOYED,
                },
            ],
            SourceTag::DebtConsolidation => &[
                NoteField {
                    label: "Debt Amount",
                    field: FIELD_DEBT_AMOUNT,
                },
                NoteField {
                    label: "Debt Types",
                    field: FIELD_DEBT_TYPES,
                },
            ],
            SourceTag::Contact => &[NoteField {
                label: "Service Interest",
                field: FIELD_SERVICE_INTEREST,
            }],
        }
    }
}
