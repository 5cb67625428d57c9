//! Privacy signals forwarded from the host to the partner SDK.

use serde::{Deserialize, Serialize};

/// GDPR consent status as determined by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GdprConsentStatus {
    /// The host has not determined a consent status.
    #[default]
    Unknown,
    /// The user denied consent.
    Denied,
    /// The user granted consent.
    Granted,
}

/// CCPA consent as supplied by the host.
///
/// The partner stores this inverted, as a do-not-sell flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CcpaConsent {
    /// True if the user has given CCPA consent.
    pub has_given_consent: bool,
    /// The IAB privacy string, if the host supplies one. Carried for the
    /// host contract; this partner only consumes the boolean.
    pub privacy_string: Option<String>,
}
