use relay::{
    consts::consts::{
        FIELD_DEBT_AMOUNT, FIELD_DEBT_TYPES, FIELD_INDUSTRY, FIELD_SPECIALIZATION,
        FIELD_YEARS_EMPLOYED,
    },
    model::source::SourceTag,
};
use serde_json::{Map, Value};

use crate::feedback::Banner;

/// A named form control and its current value
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormField {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitControlState {
    pub enabled: bool,
    pub label: String,
}

/// Everything the capture layer needs from a form on the page.
///
/// Methods take `&self` as page elements are shared handles, implementations use interior
/// mutability for the state they change.
pub trait FormElement {
    /// Stable identity of the element, used to wire each form at most once
    fn key(&self) -> String;

    fn element_id(&self) -> Option<String>;

    /// Value of the `data-source` attribute
    fn data_source(&self) -> Option<String>;

    /// Named controls in document order
    fn fields(&self) -> Vec<FormField>;

    fn reset(&self);

    /// `None` when the form has no submit control
    fn submit_control(&self) -> Option<SubmitControlState>;

    fn set_submit_control(&self, state: SubmitControlState);

    /// Shows `banner` in place of any banner already on the form
    fn show_banner(&self, banner: Banner);
}

/// Source specific field picked up by a "name contains" match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtraFieldRule {
    pub name_contains: &'static str,
    pub field: &'static str,
}

pub fn extra_field_rules(source: Option<SourceTag>) -> &'static [ExtraFieldRule] {
    match source {
        Some(SourceTag::MedicalProfessionals) => &[ExtraFieldRule {
            name_contains: "special",
            field: FIELD_SPECIALIZATION,
        }],
        Some(SourceTag::SelfEmployed) => &[
            ExtraFieldRule {
                name_contains: "industry",
                field: FIELD_INDUSTRY,
            },
            ExtraFieldRule {
                name_contains: "years",
                field: FIELD_YEARS_EMPLOYED,
            },
        ],
        Some(SourceTag::DebtConsolidation) => &[
            ExtraFieldRule {
                name_contains: "debt",
                field: FIELD_DEBT_AMOUNT,
            },
            ExtraFieldRule {
                name_contains: "types",
                field: FIELD_DEBT_TYPES,
            },
        ],
        Some(SourceTag::Contact) | None => &[],
    }
}

/// Flattens the form into the submission mapping.
///
/// Every named field is copied trimmed (a repeated name keeps its last value). Each extra rule
/// then takes the first field, in document order, whose name contains the rule's substring,
/// or an empty value when none does.
pub fn collect_fields(fields: &[FormField], source: Option<SourceTag>) -> Map<String, Value> {
    let mut data = Map::new();

    for field in fields {
        data.insert(
            field.name.clone(),
            Value::String(field.value.trim().to_string()),
        );
    }

    for rule in extra_field_rules(source) {
        let value = fields
            .iter()
            .find(|f| f.name.contains(rule.name_contains))
            .map(|f| f.value.trim().to_string())
            .unwrap_or_default();

        data.insert(rule.field.to_string(), Value::String(value));
    }

    data
}
