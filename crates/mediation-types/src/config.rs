//! Partner configuration supplied by the host at setup time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Credential key under which the partner SDK key is supplied.
pub const SDK_KEY: &str = "sdk_key";

/// The initialization data the host hands to the adapter on `set_up`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerConfiguration {
    /// Partner credentials as delivered by the host dashboard.
    pub credentials: HashMap<String, String>,
}

impl PartnerConfiguration {
    pub fn new(credentials: HashMap<String, String>) -> Self {
        Self { credentials }
    }

    /// Convenience constructor carrying only the SDK key credential.
    pub fn with_sdk_key(key: impl Into<String>) -> Self {
        let mut credentials = HashMap::new();
        credentials.insert(SDK_KEY.to_string(), key.into());
        Self { credentials }
    }

    /// The partner SDK key credential, if present.
    pub fn sdk_key(&self) -> Option<&str> {
        self.credentials.get(SDK_KEY).map(String::as_str)
    }
}
