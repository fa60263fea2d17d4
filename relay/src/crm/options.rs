use std::{fmt, time::Duration};

use crate::consts::consts::{DEFAULT_CRM_BASE_URL, DEFAULT_CRM_TIMEOUT};

#[derive(Clone)]
pub struct CrmOptions {
    pub base_url: String,
    pub account_token: String,
    pub api_key: String,
    pub timeout: Duration,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl CrmOptions {
    pub fn set_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Account scoped path segment placed between the base url and the resource
    pub fn set_account_token(mut self, account_token: impl Into<String>) -> Self {
        self.account_token = account_token.into();
        self
    }

    pub fn set_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Bounds both connecting and waiting for the response, there are no retries
    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.account_token.trim_matches('/'),
            resource
        )
    }
}

impl Default for CrmOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CRM_BASE_URL.to_string(),
            account_token: String::new(),
            api_key: String::new(),
            timeout: DEFAULT_CRM_TIMEOUT,
        }
    }
}

// Credentials must never reach the logs
impl fmt::Debug for CrmOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrmOptions")
            .field("base_url", &self.base_url)
            .field("account_token", &"<redacted>")
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
