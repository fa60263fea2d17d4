use chrono::{Local, NaiveDateTime};

use crate::{
    consts::consts::{DEFAULT_BRAND, PERSON_CREATION_FAILED},
    crm::{CrmApi, CrmResource},
    model::{
        opportunity::OpportunityPayload,
        person::PersonPayload,
        result::RelayResult,
        submission::{PersonName, Submission},
    },
};

use super::error::RelayError;

/// Forwards one submission to the CRM as a person record followed by a linked opportunity.
///
/// The two calls are strictly sequential, the opportunity needs the identifier the CRM assigns
/// to the person. Holds no per request state, a single relay serves every request.
pub struct Relay<C> {
    crm: C,
    brand: String,
}

impl<C: CrmApi> Relay<C> {
    pub fn new(crm: C) -> Self {
        Self {
            crm,
            brand: DEFAULT_BRAND.to_string(),
        }
    }

    /// Business name written into the CRM notes
    pub fn set_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn crm(&self) -> &C {
        &self.crm
    }

    /// Parses a raw request body and relays it
    pub async fn process(&self, body: &[u8]) -> Result<RelayResult, RelayError> {
        let submission = Submission::from_json(body)?;

        self.process_submission(&submission).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn process_submission(
        &self,
        submission: &Submission,
    ) -> Result<RelayResult, RelayError> {
        let name = submission.validate()?;

        log::info!(
            "Processing submission [source: {}, fields: {:?}]",
            submission
                .source()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "none".to_string()),
            submission.field_names()
        );

        let submitted_at = Local::now().naive_local();

        let person_id = self.create_person(&name, submission, submitted_at).await?;

        let opportunity_created = match person_id {
            Some(person_id) => {
                self.create_opportunity(person_id, &name, submission, submitted_at)
                    .await
            }
            None => {
                log::warn!("Person created without an identifier, skipping opportunity");
                false
            }
        };

        Ok(RelayResult::person_created(opportunity_created))
    }

    /// Any failure here fails the whole request, the caller only sees a generic message
    #[tracing::instrument(skip_all)]
    async fn create_person(
        &self,
        name: &PersonName,
        submission: &Submission,
        submitted_at: NaiveDateTime,
    ) -> Result<Option<String>, RelayError> {
        let payload = PersonPayload::new(name, submission, &self.brand, submitted_at);

        let response = match self.crm.post(CrmResource::Contacts, &payload).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Mercury person creation error: {}", e);
                return Err(RelayError::UpstreamFailure(
                    PERSON_CREATION_FAILED.to_string(),
                ));
            }
        };

        if !response.is_success() {
            log::error!(
                "Mercury person creation failed [status: {}]: {}",
                response.status,
                response.raw
            );
            return Err(RelayError::UpstreamFailure(
                PERSON_CREATION_FAILED.to_string(),
            ));
        }

        Ok(response.record_id())
    }

    /// Failures are logged and reported as `false`, they never undo the person record
    #[tracing::instrument(skip_all, fields(person_id = %person_id))]
    async fn create_opportunity(
        &self,
        person_id: String,
        name: &PersonName,
        submission: &Submission,
        submitted_at: NaiveDateTime,
    ) -> bool {
        let payload =
            OpportunityPayload::new(person_id, name, submission, &self.brand, submitted_at);

        match self.crm.post(CrmResource::Opportunities, &payload).await {
            Ok(response) if response.is_success() => true,
            Ok(response) => {
                log::error!(
                    "Mercury opportunity creation failed [status: {}]: {}",
                    response.status,
                    response.raw
                );
                false
            }
            Err(e) => {
                log::error!("Mercury opportunity error: {}", e);
                false
            }
        }
    }
}
