//! Privacy relay and publisher configuration flows.

use crate::fixtures::{init_tracing, ScriptedPartnerSdk, ScriptedPartnerSdkFactory};
use mediation_adapter::ports::inbound::MediationAdapterApi;
use mediation_adapter::service::{MediationAdapterService, MEDIATION_PROVIDER};
use mediation_types::{CcpaConsent, GdprConsentStatus, PartnerConfiguration};
use std::sync::Arc;

fn service_with_partner() -> (Arc<ScriptedPartnerSdk>, MediationAdapterService) {
    init_tracing();
    let sdk = ScriptedPartnerSdk::new();
    let factory = Arc::new(ScriptedPartnerSdkFactory { sdk: sdk.clone() });
    (sdk, MediationAdapterService::new(factory))
}

fn set_up(service: &MediationAdapterService) {
    let done = Arc::new(parking_lot::Mutex::new(None));
    let slot = done.clone();
    service.set_up(
        PartnerConfiguration::with_sdk_key("integration-key"),
        Box::new(move |result| *slot.lock() = Some(result)),
    );
    assert!(matches!(*done.lock(), Some(Ok(()))));
}

#[test]
fn test_setup_tags_mediation_provider() {
    let (sdk, service) = service_with_partner();
    set_up(&service);
    assert!(sdk
        .calls()
        .contains(&crate::fixtures::PartnerCall::SetMediationProvider(
            MEDIATION_PROVIDER.to_string()
        )));
}

#[test]
fn test_gdpr_consent_only_pushed_while_applicable() {
    let (sdk, service) = service_with_partner();
    set_up(&service);

    service.set_gdpr_consent_status(GdprConsentStatus::Granted);
    // GDPR does not apply yet; nothing reaches the partner.
    assert_eq!(sdk.settings.state.lock().has_user_consent, None);

    service.set_gdpr_applies(true);
    assert_eq!(sdk.settings.state.lock().has_user_consent, Some(true));

    service.set_gdpr_consent_status(GdprConsentStatus::Denied);
    assert_eq!(sdk.settings.state.lock().has_user_consent, Some(false));
}

#[test]
fn test_gdpr_signals_survive_pre_setup_delivery() {
    let (sdk, service) = service_with_partner();

    // Host pushes privacy before the partner exists.
    service.set_gdpr_applies(true);
    service.set_gdpr_consent_status(GdprConsentStatus::Granted);
    assert_eq!(sdk.settings.state.lock().has_user_consent, None);

    set_up(&service);
    assert_eq!(sdk.settings.state.lock().has_user_consent, Some(true));
}

#[test]
fn test_ccpa_is_stored_inverted_as_do_not_sell() {
    let (sdk, service) = service_with_partner();
    set_up(&service);

    service.set_ccpa_consent(CcpaConsent {
        has_given_consent: true,
        privacy_string: Some("1YN-".to_string()),
    });
    assert_eq!(sdk.settings.state.lock().do_not_sell, Some(false));

    service.set_ccpa_consent(CcpaConsent {
        has_given_consent: false,
        privacy_string: None,
    });
    assert_eq!(sdk.settings.state.lock().do_not_sell, Some(true));
}

#[test]
fn test_coppa_forwards_age_restriction() {
    let (sdk, service) = service_with_partner();
    set_up(&service);

    service.set_user_subject_to_coppa(true);
    assert_eq!(sdk.settings.state.lock().age_restricted, Some(true));
}

#[test]
fn test_publisher_toggles_replay_on_setup() {
    let (sdk, service) = service_with_partner();

    // Toggled before setup; the partner sees them once it exists.
    service.configuration().set_test_device_identifier("device-1");
    service.configuration().set_test_mode(true);
    service.configuration().set_verbose_logging(true);
    service.configuration().set_muted(true);
    assert_eq!(sdk.settings.state.lock().verbose_logging, None);

    set_up(&service);
    let state = sdk.settings.state.lock().clone();
    assert_eq!(
        state.test_device_identifiers,
        Some(vec!["device-1".to_string()])
    );
    assert_eq!(state.verbose_logging, Some(true));
    assert_eq!(state.muted, Some(true));
}

#[test]
fn test_disabling_test_mode_clears_partner_device_list() {
    let (sdk, service) = service_with_partner();
    set_up(&service);

    service.configuration().set_test_device_identifier("device-1");
    service.configuration().set_test_mode(true);
    assert_eq!(
        sdk.settings.state.lock().test_device_identifiers,
        Some(vec!["device-1".to_string()])
    );

    service.configuration().set_test_mode(false);
    assert_eq!(
        sdk.settings.state.lock().test_device_identifiers,
        Some(Vec::new())
    );
}
