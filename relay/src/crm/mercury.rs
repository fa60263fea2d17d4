use reqwest::Client;
use serde::Serialize;

use super::{options::CrmOptions, CrmApi, CrmError, CrmResource, CrmResponse};

const API_KEY_HEADER: &str = "x-api-key";

/// Mercury REST client. One pooled `reqwest::Client` is shared by every request the relay serves.
pub struct MercuryClient {
    client: Client,
    options: CrmOptions,
}

impl MercuryClient {
    pub fn new(options: CrmOptions) -> Result<Self, CrmError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.timeout)
            .build()?;

        Ok(Self { client, options })
    }

    pub fn options(&self) -> &CrmOptions {
        &self.options
    }
}

impl CrmApi for MercuryClient {
    #[tracing::instrument(skip(self, payload))]
    async fn post<T: Serialize>(
        &self,
        resource: CrmResource,
        payload: &T,
    ) -> Result<CrmResponse, CrmError> {
        let url = self.options.resource_url(resource.as_ref());

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.options.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        log::debug!("Mercury {} responded with {}", resource, status);

        Ok(CrmResponse::new(status.as_u16(), raw))
    }
}
