use std::collections::HashSet;

use relay::model::source::SourceTag;

use crate::form::FormElement;

/// Forms recognised by element id, their source is implied rather than read from `data-source`
pub const WELL_KNOWN_FORMS: &[(&str, SourceTag)] = &[
    ("medical-form", SourceTag::MedicalProfessionals),
    ("self-employed-form", SourceTag::SelfEmployed),
    ("debt-form", SourceTag::DebtConsolidation),
    ("contactForm", SourceTag::Contact),
];

/// Source tag a form submits under: a well-known element id wins, then the `data-source`
/// attribute. Forms with neither are not wired.
pub fn resolve_source<F: FormElement + ?Sized>(form: &F) -> Option<String> {
    let well_known = form.element_id().and_then(|id| {
        WELL_KNOWN_FORMS
            .iter()
            .find(|(known_id, _)| *known_id == id)
            .map(|(_, tag)| tag.to_string())
    });

    well_known.or_else(|| {
        form.data_source()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct WiredForm {
    pub key: String,
    pub source: String,
}

/// Remembers which forms already have a submit handler, discovery can run any number of times
#[derive(Debug, Default)]
pub struct FormRegistry {
    attached: HashSet<String>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the form's source when it was attached by this call, `None` when it has no
    /// source or was already attached
    pub fn attach<F: FormElement + ?Sized>(&mut self, form: &F) -> Option<WiredForm> {
        let source = resolve_source(form)?;
        let key = form.key();

        if !self.attached.insert(key.clone()) {
            return None;
        }

        log::debug!("Attached submit handler to {} [source: {}]", key, source);

        Some(WiredForm { key, source })
    }

    /// Attaches every form not yet wired, returning the newly wired ones
    pub fn wire<F: FormElement>(&mut self, forms: &[F]) -> Vec<WiredForm> {
        forms.iter().filter_map(|form| self.attach(form)).collect()
    }

    pub fn is_attached(&self, key: &str) -> bool {
        self.attached.contains(key)
    }
}
