use serde::Serialize;
use serde_json::Value;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

pub mod mercury;
pub mod options;

/// CRM collections the relay writes to, rendered as the last path segment of the request URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum CrmResource {
    Contacts,
    Opportunities,
}

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("CRM request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Raw outcome of a CRM call. Non-2xx statuses are not errors at this level, the caller decides
/// what a rejected call means.
#[derive(Debug, Clone, PartialEq)]
pub struct CrmResponse {
    pub status: u16,
    pub body: Option<Value>,
    pub raw: String,
}

impl CrmResponse {
    pub fn new(status: u16, raw: String) -> Self {
        CrmResponse {
            status,
            body: serde_json::from_str(&raw).ok(),
            raw,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Identifier the CRM assigned to the created record. The CRM may send it as a string or a number.
    pub fn record_id(&self) -> Option<String> {
        match self.body.as_ref()?.get("Id")? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// The seam between the relay pipeline and the CRM's REST API
#[allow(async_fn_in_trait)]
pub trait CrmApi {
    async fn post<T: Serialize>(
        &self,
        resource: CrmResource,
        payload: &T,
    ) -> Result<CrmResponse, CrmError>;
}
