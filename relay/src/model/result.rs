use serde::{Deserialize, Serialize};

use crate::consts::consts::SUCCESS_MESSAGE;

/// Summary returned to the capture client once the person record exists.
///
/// `opportunity_created = false` alongside `success = true` is a degraded but successful
/// completion, the lead still reached the CRM.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RelayResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub person_created: bool,
    #[serde(default)]
    pub opportunity_created: bool,
}

impl RelayResult {
    pub fn person_created(opportunity_created: bool) -> Self {
        RelayResult {
            success: true,
            message: Some(SUCCESS_MESSAGE.to_string()),
            person_created: true,
            opportunity_created,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RelayErrorBody {
    pub success: bool,
    pub error: String,
}

impl RelayErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        RelayErrorBody {
            success: false,
            error: error.into(),
        }
    }
}
