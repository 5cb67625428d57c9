//! Outbound (Driven) ports for the mediation adapter.
//!
//! These traits define everything the adapter needs from the partner SDK:
//! the shared instance factory, ad fetch/present entry points, the global
//! privacy/settings surface, and a UI-thread dispatch point. The partner SDK
//! is an external collaborator; only its call/callback shape is modeled.

use crate::events::PartnerAdEvent;
use mediation_types::{FixedBannerSize, PartnerAdHandle};
use std::sync::Arc;

/// Completion for the partner SDK's asynchronous initialization.
pub type InitCompletion = Box<dyn FnOnce(Result<(), String>) + Send>;

/// A deferred task handed to a [`UiDispatcher`].
pub type UiTask = Box<dyn FnOnce() + Send>;

/// Which full-screen presentation entry point to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenKind {
    Interstitial,
    Rewarded,
}

/// Receiver for the partner SDK's asynchronous ad callbacks.
///
/// Implemented by the shim. The partner retains the observer strongly for
/// the duration of the operation, so late callbacks always have somewhere
/// to land; the shim turns them into logged no-ops once its pending
/// completion has been consumed.
pub trait PartnerAdObserver: Send + Sync {
    /// Delivers one partner delegate callback as a typed event.
    fn on_ad_event(&self, event: PartnerAdEvent);
}

/// The partner SDK's global privacy/settings surface.
///
/// Every setter mirrors the latest value; all are idempotent.
pub trait PartnerSettings: Send + Sync {
    fn set_has_user_consent(&self, consent: bool);
    fn set_do_not_sell(&self, do_not_sell: bool);
    fn set_is_age_restricted_user(&self, restricted: bool);
    fn set_test_device_identifiers(&self, identifiers: Vec<String>);
    fn set_verbose_logging(&self, enabled: bool);
    fn set_muted(&self, muted: bool);
}

/// One initialized partner SDK instance.
pub trait PartnerSdk: Send + Sync {
    /// Tags traffic from this integration with the mediation provider name.
    fn set_mediation_provider(&self, provider: &str);

    /// Starts asynchronous partner initialization. The completion fires once
    /// the partner is ready to serve ads (or failed to become ready).
    fn initialize(&self, completion: InitCompletion);

    /// Fetches the next full-screen ad for a zone. Results arrive on the
    /// observer as [`PartnerAdEvent::Loaded`] / [`PartnerAdEvent::LoadFailed`].
    fn load_ad(&self, zone: &str, observer: Arc<dyn PartnerAdObserver>);

    /// Creates a banner view of the given fixed size for a zone and fetches
    /// its next ad. The partner displays banner views as soon as they load;
    /// there is no separate show call for this format.
    fn load_banner(&self, zone: &str, size: FixedBannerSize, observer: Arc<dyn PartnerAdObserver>);

    /// Presents a loaded full-screen ad. Display/playback progress arrives
    /// on the observer.
    fn show_fullscreen(
        &self,
        handle: PartnerAdHandle,
        kind: FullscreenKind,
        observer: Arc<dyn PartnerAdObserver>,
    );

    /// The partner's global settings object.
    fn settings(&self) -> Arc<dyn PartnerSettings>;

    /// The partner SDK version string.
    fn version(&self) -> String;
}

/// Produces the shared partner SDK instance for an SDK key.
///
/// Returns `None` when the partner refuses the key, which the adapter
/// surfaces as a setup failure.
pub trait PartnerSdkFactory: Send + Sync {
    fn shared_with_key(&self, sdk_key: &str) -> Option<Arc<dyn PartnerSdk>>;
}

/// UI-thread dispatch point.
///
/// The partner requires UI-API calls (rewarded presentation in particular)
/// to originate on the platform's main thread. Host apps install a platform
/// dispatcher; the default runs tasks inline.
pub trait UiDispatcher: Send + Sync {
    fn dispatch(&self, task: UiTask);
}

/// Dispatcher that runs tasks inline on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatcher;

impl UiDispatcher for InlineDispatcher {
    fn dispatch(&self, task: UiTask) {
        task();
    }
}

/// Recording settings double for testing.
#[cfg(test)]
#[derive(Default)]
pub struct MockPartnerSettings {
    pub state: parking_lot::Mutex<MockSettingsState>,
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MockSettingsState {
    pub has_user_consent: Option<bool>,
    pub do_not_sell: Option<bool>,
    pub age_restricted: Option<bool>,
    pub test_device_identifiers: Option<Vec<String>>,
    pub verbose_logging: Option<bool>,
    pub muted: Option<bool>,
}

#[cfg(test)]
impl PartnerSettings for MockPartnerSettings {
    fn set_has_user_consent(&self, consent: bool) {
        self.state.lock().has_user_consent = Some(consent);
    }

    fn set_do_not_sell(&self, do_not_sell: bool) {
        self.state.lock().do_not_sell = Some(do_not_sell);
    }

    fn set_is_age_restricted_user(&self, restricted: bool) {
        self.state.lock().age_restricted = Some(restricted);
    }

    fn set_test_device_identifiers(&self, identifiers: Vec<String>) {
        self.state.lock().test_device_identifiers = Some(identifiers);
    }

    fn set_verbose_logging(&self, enabled: bool) {
        self.state.lock().verbose_logging = Some(enabled);
    }

    fn set_muted(&self, muted: bool) {
        self.state.lock().muted = Some(muted);
    }
}

/// Calls recorded by [`MockPartnerSdk`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum PartnerCall {
    SetMediationProvider(String),
    Initialize,
    LoadAd { zone: String },
    LoadBanner { zone: String, size: FixedBannerSize },
    ShowFullscreen { kind: FullscreenKind },
}

/// Mock partner SDK for testing.
///
/// Records every call, completes initialization immediately with a
/// configurable result, and keeps the last observer so tests can fire
/// partner events at it.
#[cfg(test)]
pub struct MockPartnerSdk {
    pub settings: Arc<MockPartnerSettings>,
    pub calls: parking_lot::Mutex<Vec<PartnerCall>>,
    pub init_result: parking_lot::Mutex<Result<(), String>>,
    pub last_observer: parking_lot::Mutex<Option<Arc<dyn PartnerAdObserver>>>,
}

#[cfg(test)]
impl MockPartnerSdk {
    pub fn new() -> Self {
        Self {
            settings: Arc::new(MockPartnerSettings::default()),
            calls: parking_lot::Mutex::new(Vec::new()),
            init_result: parking_lot::Mutex::new(Ok(())),
            last_observer: parking_lot::Mutex::new(None),
        }
    }

    pub fn failing_init(reason: &str) -> Self {
        let sdk = Self::new();
        *sdk.init_result.lock() = Err(reason.to_string());
        sdk
    }

    pub fn calls(&self) -> Vec<PartnerCall> {
        self.calls.lock().clone()
    }

    /// Fires a partner event at the observer captured by the last
    /// load/show call.
    pub fn fire(&self, event: PartnerAdEvent) {
        let observer = self
            .last_observer
            .lock()
            .clone()
            .expect("no observer captured");
        observer.on_ad_event(event);
    }
}

#[cfg(test)]
impl PartnerSdk for MockPartnerSdk {
    fn set_mediation_provider(&self, provider: &str) {
        self.calls
            .lock()
            .push(PartnerCall::SetMediationProvider(provider.to_string()));
    }

    fn initialize(&self, completion: InitCompletion) {
        self.calls.lock().push(PartnerCall::Initialize);
        completion(self.init_result.lock().clone());
    }

    fn load_ad(&self, zone: &str, observer: Arc<dyn PartnerAdObserver>) {
        self.calls.lock().push(PartnerCall::LoadAd {
            zone: zone.to_string(),
        });
        *self.last_observer.lock() = Some(observer);
    }

    fn load_banner(&self, zone: &str, size: FixedBannerSize, observer: Arc<dyn PartnerAdObserver>) {
        self.calls.lock().push(PartnerCall::LoadBanner {
            zone: zone.to_string(),
            size,
        });
        *self.last_observer.lock() = Some(observer);
    }

    fn show_fullscreen(
        &self,
        _handle: PartnerAdHandle,
        kind: FullscreenKind,
        observer: Arc<dyn PartnerAdObserver>,
    ) {
        self.calls.lock().push(PartnerCall::ShowFullscreen { kind });
        *self.last_observer.lock() = Some(observer);
    }

    fn settings(&self) -> Arc<dyn PartnerSettings> {
        self.settings.clone()
    }

    fn version(&self) -> String {
        "11.3.1-mock".to_string()
    }
}

/// Factory double returning a preconfigured mock instance, or nothing to
/// exercise the setup-failure path. Records the keys it was asked for.
#[cfg(test)]
pub struct MockPartnerSdkFactory {
    pub sdk: Option<Arc<MockPartnerSdk>>,
    pub requested_keys: parking_lot::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockPartnerSdkFactory {
    pub fn with_sdk(sdk: Arc<MockPartnerSdk>) -> Self {
        Self {
            sdk: Some(sdk),
            requested_keys: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn refusing() -> Self {
        Self {
            sdk: None,
            requested_keys: parking_lot::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl PartnerSdkFactory for MockPartnerSdkFactory {
    fn shared_with_key(&self, sdk_key: &str) -> Option<Arc<dyn PartnerSdk>> {
        self.requested_keys.lock().push(sdk_key.to_string());
        self.sdk.clone().map(|sdk| sdk as Arc<dyn PartnerSdk>)
    }
}
