//! # Mediation Adapter Service
//!
//! The host-facing entry point. Owns the partner SDK handle, the stored
//! GDPR signal, the publisher configuration, and the shim registry, and
//! implements the [`MediationAdapterApi`] driving port.

use crate::adapters::{update_ccpa, update_coppa, update_gdpr_consent, AdapterConfiguration};
use crate::error::AdapterError;
use crate::ports::inbound::{
    AdLifecycleDelegate, BidderInfoCompletion, MediationAdapterApi, SetUpCompletion,
};
use crate::ports::outbound::{
    InlineDispatcher, PartnerSdk, PartnerSdkFactory, PartnerSettings, UiDispatcher,
};
use crate::registry::ShimRegistry;
use crate::shim::{AdShim, LoadCompletion, ShowCompletion};
use mediation_types::{
    AdFormat, CcpaConsent, GdprConsentStatus, LoadRequest, PartnerConfiguration, PreBidRequest,
    PresentationAnchor, RequestId, SDK_KEY,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};

/// Version of this adapter, using the scheme
/// `[host major].[partner major].[partner minor].[partner patch].[adapter]`.
pub const ADAPTER_VERSION: &str = "4.11.3.1.0";

/// Internal name of the partner network.
pub const PARTNER_IDENTIFIER: &str = "zonal";

/// External/official name of the partner network.
pub const PARTNER_DISPLAY_NAME: &str = "Zonal";

/// Provider name tagged onto partner traffic from this integration.
pub const MEDIATION_PROVIDER: &str = "mediation";

#[derive(Default)]
struct ServiceState {
    sdk: Option<Arc<dyn PartnerSdk>>,
    /// The last value given to `set_gdpr_applies`.
    gdpr_applies: bool,
    /// The last value given to `set_gdpr_consent_status`.
    gdpr_status: GdprConsentStatus,
}

/// The mediation adapter.
pub struct MediationAdapterService {
    factory: Arc<dyn PartnerSdkFactory>,
    dispatcher: Arc<dyn UiDispatcher>,
    configuration: AdapterConfiguration,
    registry: ShimRegistry,
    state: Mutex<ServiceState>,
}

impl MediationAdapterService {
    /// Creates the service with the inline UI dispatcher.
    pub fn new(factory: Arc<dyn PartnerSdkFactory>) -> Self {
        Self::with_dispatcher(factory, Arc::new(InlineDispatcher))
    }

    /// Creates the service with a platform UI dispatcher.
    pub fn with_dispatcher(
        factory: Arc<dyn PartnerSdkFactory>,
        dispatcher: Arc<dyn UiDispatcher>,
    ) -> Self {
        Self {
            factory,
            dispatcher,
            configuration: AdapterConfiguration::new(),
            registry: ShimRegistry::new(),
            state: Mutex::new(ServiceState::default()),
        }
    }

    /// The publisher-facing configuration surface.
    pub fn configuration(&self) -> &AdapterConfiguration {
        &self.configuration
    }

    pub fn adapter_version(&self) -> &'static str {
        ADAPTER_VERSION
    }

    pub fn partner_identifier(&self) -> &'static str {
        PARTNER_IDENTIFIER
    }

    pub fn partner_display_name(&self) -> &'static str {
        PARTNER_DISPLAY_NAME
    }

    /// The partner SDK version, once setup has stored an instance.
    pub fn partner_sdk_version(&self) -> Option<String> {
        self.state.lock().sdk.as_ref().map(|sdk| sdk.version())
    }

    fn settings(&self) -> Option<Arc<dyn PartnerSettings>> {
        self.state.lock().sdk.as_ref().map(|sdk| sdk.settings())
    }
}

impl MediationAdapterApi for MediationAdapterService {
    fn set_up(&self, configuration: PartnerConfiguration, completion: SetUpCompletion) {
        info!("partner SDK setup started");

        let sdk_key = match configuration.sdk_key() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                let error = AdapterError::MissingSetUpParameter { key: SDK_KEY };
                warn!(%error, "setup failed");
                completion(Err(error));
                return;
            }
        };

        let Some(sdk) = self.factory.shared_with_key(&sdk_key) else {
            let error = AdapterError::SetUpFailure;
            warn!(%error, "setup failed");
            completion(Err(error));
            return;
        };

        sdk.set_mediation_provider(MEDIATION_PROVIDER);

        let (gdpr_applies, gdpr_status) = {
            let mut state = self.state.lock();
            state.sdk = Some(sdk.clone());
            (state.gdpr_applies, state.gdpr_status)
        };

        // Replay toggles and privacy signals received before setup.
        self.configuration.attach(sdk.settings());
        update_gdpr_consent(sdk.settings().as_ref(), gdpr_applies, gdpr_status);

        sdk.initialize(Box::new(move |result| match result {
            Ok(()) => {
                info!("partner SDK setup succeeded");
                completion(Ok(()));
            }
            Err(reason) => {
                let error = AdapterError::InitializationFailure { reason };
                warn!(%error, "setup failed");
                completion(Err(error));
            }
        }));
    }

    fn fetch_bidder_information(&self, request: &PreBidRequest, completion: BidderInfoCompletion) {
        debug!(
            zone = %request.partner_placement,
            format = %request.format,
            "bidder information fetch"
        );
        // This partner has no programmatic bidding tokens.
        completion(HashMap::new());
    }

    fn set_gdpr_applies(&self, applies: bool) {
        let status = {
            let mut state = self.state.lock();
            state.gdpr_applies = applies;
            state.gdpr_status
        };
        match self.settings() {
            Some(settings) => update_gdpr_consent(settings.as_ref(), applies, status),
            None => debug!(applies, "GDPR applicability stored before setup"),
        }
    }

    fn set_gdpr_consent_status(&self, status: GdprConsentStatus) {
        let applies = {
            let mut state = self.state.lock();
            state.gdpr_status = status;
            state.gdpr_applies
        };
        match self.settings() {
            Some(settings) => update_gdpr_consent(settings.as_ref(), applies, status),
            None => debug!(?status, "GDPR consent status stored before setup"),
        }
    }

    fn set_user_subject_to_coppa(&self, subject: bool) {
        match self.settings() {
            Some(settings) => update_coppa(settings.as_ref(), subject),
            None => debug!(subject, "COPPA signal dropped before setup"),
        }
    }

    fn set_ccpa_consent(&self, consent: CcpaConsent) {
        match self.settings() {
            Some(settings) => update_ccpa(settings.as_ref(), &consent),
            None => debug!("CCPA signal dropped before setup"),
        }
    }

    fn make_ad(
        &self,
        request: LoadRequest,
        delegate: Weak<dyn AdLifecycleDelegate>,
    ) -> Result<Arc<AdShim>, AdapterError> {
        let sdk = self
            .state
            .lock()
            .sdk
            .clone()
            .ok_or(AdapterError::PartnerNotInitialized)?;
        match request.format {
            AdFormat::Banner | AdFormat::Interstitial | AdFormat::Rewarded => {}
            format => return Err(AdapterError::UnsupportedAdFormat(format)),
        }
        Ok(AdShim::new(request, sdk, self.dispatcher.clone(), delegate))
    }

    fn load(
        &self,
        request: LoadRequest,
        delegate: Weak<dyn AdLifecycleDelegate>,
        anchor: Option<PresentationAnchor>,
        completion: LoadCompletion,
    ) {
        match self.make_ad(request, delegate) {
            Ok(shim) => {
                self.registry.insert(shim.clone());
                shim.load(anchor.as_ref(), completion);
            }
            Err(error) => {
                warn!(%error, "load failed");
                completion(Err(error));
            }
        }
    }

    fn show(&self, identifier: RequestId, anchor: PresentationAnchor, completion: ShowCompletion) {
        match self.registry.get(identifier) {
            Some(shim) => shim.show(&anchor, completion),
            None => {
                let error = AdapterError::NoAdReadyToShow { identifier };
                warn!(%error, "show failed");
                completion(Err(error));
            }
        }
    }

    fn invalidate(&self, identifier: RequestId) -> Result<(), AdapterError> {
        match self.registry.remove(identifier) {
            Some(shim) => {
                shim.invalidate();
                info!(request = %identifier, "invalidate succeeded");
                Ok(())
            }
            None => {
                let error = AdapterError::NoAdToInvalidate { identifier };
                warn!(%error, "invalidate failed");
                Err(error)
            }
        }
    }
}
