//! Privacy relay.
//!
//! Stateless forwarding of host-determined privacy signals into the
//! partner's global settings. Each function mirrors the latest value and is
//! idempotent; no validation happens here.

use crate::ports::outbound::PartnerSettings;
use mediation_types::{CcpaConsent, GdprConsentStatus};
use tracing::info;

/// Pushes the merged GDPR signal to the partner.
///
/// The partner only understands a single consent boolean, so consent is
/// pushed only while GDPR applies; when it does not apply the partner's
/// value is left untouched.
pub fn update_gdpr_consent(
    settings: &dyn PartnerSettings,
    applies: bool,
    status: GdprConsentStatus,
) {
    info!(applies, ?status, "relaying GDPR signal");
    if applies {
        settings.set_has_user_consent(status == GdprConsentStatus::Granted);
    }
}

/// Relays COPPA subjectivity as the partner's age-restricted-user flag.
pub fn update_coppa(settings: &dyn PartnerSettings, subject: bool) {
    info!(subject, "relaying COPPA signal");
    settings.set_is_age_restricted_user(subject);
}

/// Relays CCPA consent, stored inverted as the partner's do-not-sell flag.
pub fn update_ccpa(settings: &dyn PartnerSettings, consent: &CcpaConsent) {
    info!(
        has_given_consent = consent.has_given_consent,
        "relaying CCPA signal"
    );
    settings.set_do_not_sell(!consent.has_given_consent);
}
