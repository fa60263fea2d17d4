use thiserror::Error;

use crate::model::result::RelayErrorBody;

/// Failures that end a relay request. Both are reported to the caller as a client error,
/// `UpstreamFailure` carries only a generic message, the upstream detail stays in the server log.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelayError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    UpstreamFailure(String),
}

impl RelayError {
    pub fn to_body(&self) -> RelayErrorBody {
        RelayErrorBody::new(self.to_string())
    }
}
