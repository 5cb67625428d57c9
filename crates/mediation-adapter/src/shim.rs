//! # Ad Instance Shim
//!
//! One shim exists per outstanding load request. It owns the partner ad
//! object, exposes `load`/`show`/`invalidate` to the host, and translates
//! the partner SDK's delegate callbacks into the single-shot completions the
//! host expects.
//!
//! ## Phase machine
//!
//! ```text
//! [CREATED] ──load──→ [LOADING] ──Loaded──→ [LOADED] ──show──→ [SHOWING]
//!                         │                                        │
//!                         └─ LoadFailed ──→ [CREATED]       Displayed
//!                                                                 ▼
//!                                            [DISMISSED] ←── [SHOWN]
//!
//! [INVALIDATED] is reachable from every phase via invalidate().
//! ```
//!
//! ## Callback bookkeeping
//!
//! At most one load completion and one show completion are pending at any
//! time. A completion is taken out of the shim before it is invoked, so a
//! duplicate or late partner callback finds nothing to fire and degrades to
//! a logged no-op. Completions always run outside the state lock.

use crate::domain::{largest_fitting_fixed_size, RewardTracker};
use crate::error::AdapterError;
use crate::events::{PartnerAdEvent, RewardValidation};
use crate::ports::inbound::AdLifecycleDelegate;
use crate::ports::outbound::{FullscreenKind, PartnerAdObserver, PartnerSdk, UiDispatcher};
use mediation_types::{
    AdDetails, AdFormat, FixedBannerSize, LoadRequest, PartnerAdHandle, PresentationAnchor,
};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Result delivered to a load or show completion.
pub type AdCallbackResult = Result<AdDetails, AdapterError>;

/// Single-use completion for a load operation.
pub type LoadCompletion = Box<dyn FnOnce(AdCallbackResult) + Send>;

/// Single-use completion for a show operation.
pub type ShowCompletion = Box<dyn FnOnce(AdCallbackResult) + Send>;

/// Lifecycle phase of one ad instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShimPhase {
    /// Constructed; no partner traffic yet.
    Created,
    /// A partner fetch is in flight.
    Loading,
    /// A partner ad handle is stored and ready to present.
    Loaded,
    /// A partner presentation is in flight.
    Showing,
    /// The ad was rendered on screen.
    Shown,
    /// The ad was dismissed.
    Dismissed,
    /// The shim was discarded; every further event is a logged no-op.
    Invalidated,
}

impl fmt::Display for ShimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Showing => "showing",
            Self::Shown => "shown",
            Self::Dismissed => "dismissed",
            Self::Invalidated => "invalidated",
        };
        f.write_str(name)
    }
}

struct ShimState {
    phase: ShimPhase,
    partner_ad: Option<PartnerAdHandle>,
    load_completion: Option<LoadCompletion>,
    show_completion: Option<ShowCompletion>,
    /// Present for the rewarded format only.
    reward: Option<RewardTracker>,
}

/// Per-request adapter translating one partner ad instance's lifecycle into
/// the host's callback shape.
pub struct AdShim {
    request: LoadRequest,
    sdk: Arc<dyn PartnerSdk>,
    dispatcher: Arc<dyn UiDispatcher>,
    /// The shim does not own the host delegate; a released delegate turns
    /// notifications into logged no-ops.
    delegate: Weak<dyn AdLifecycleDelegate>,
    state: Mutex<ShimState>,
}

impl AdShim {
    pub fn new(
        request: LoadRequest,
        sdk: Arc<dyn PartnerSdk>,
        dispatcher: Arc<dyn UiDispatcher>,
        delegate: Weak<dyn AdLifecycleDelegate>,
    ) -> Arc<Self> {
        let reward = (request.format == AdFormat::Rewarded).then(RewardTracker::new);
        Arc::new(Self {
            request,
            sdk,
            dispatcher,
            delegate,
            state: Mutex::new(ShimState {
                phase: ShimPhase::Created,
                partner_ad: None,
                load_completion: None,
                show_completion: None,
                reward,
            }),
        })
    }

    /// The load request this shim was created for.
    pub fn request(&self) -> &LoadRequest {
        &self.request
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ShimPhase {
        self.state.lock().phase
    }

    /// The loaded banner view handle, for the host to attach inline.
    /// `None` for full-screen formats and before a banner load completes.
    pub fn inline_view(&self) -> Option<PartnerAdHandle> {
        if self.request.format != AdFormat::Banner {
            return None;
        }
        self.state.lock().partner_ad
    }

    /// Starts the partner fetch for this request.
    ///
    /// Valid only from `Created`; at most one load is in flight per shim.
    /// Banner requests resolve their fixed size first and fail without any
    /// partner traffic when nothing fits.
    pub fn load(self: &Arc<Self>, _anchor: Option<&PresentationAnchor>, completion: LoadCompletion) {
        debug!(
            request = %self.request.identifier,
            zone = %self.request.partner_placement,
            format = %self.request.format,
            "load started"
        );

        let banner_size = match self.resolve_banner_size() {
            Ok(size) => size,
            Err(error) => {
                warn!(request = %self.request.identifier, %error, "load failed");
                completion(Err(error));
                return;
            }
        };

        let rejected = {
            let mut state = self.state.lock();
            match state.phase {
                ShimPhase::Created => {
                    state.load_completion = Some(completion);
                    state.phase = ShimPhase::Loading;
                    None
                }
                ShimPhase::Loading => Some((completion, AdapterError::LoadInProgress)),
                phase => Some((
                    completion,
                    AdapterError::InvalidTransition {
                        operation: "load",
                        phase: phase.to_string(),
                    },
                )),
            }
        };
        if let Some((completion, error)) = rejected {
            warn!(request = %self.request.identifier, %error, "load failed");
            completion(Err(error));
            return;
        }

        let observer: Arc<dyn PartnerAdObserver> = self.clone();
        match banner_size {
            Some(size) => self
                .sdk
                .load_banner(&self.request.partner_placement, size, observer),
            None => self.sdk.load_ad(&self.request.partner_placement, observer),
        }
    }

    /// Presents the loaded ad.
    ///
    /// Valid only from `Loaded` with a stored partner handle. Banner ads
    /// display on load, so `show` is a no-op for that format and the host
    /// is not expected to call it.
    pub fn show(self: &Arc<Self>, _anchor: &PresentationAnchor, completion: ShowCompletion) {
        debug!(request = %self.request.identifier, "show started");

        if self.request.format == AdFormat::Banner {
            debug!(request = %self.request.identifier, "show is a no-op for banners");
            completion(Ok(AdDetails::new()));
            return;
        }

        let outcome = {
            let mut state = self.state.lock();
            match (state.phase, state.partner_ad) {
                (ShimPhase::Loaded, Some(handle)) => {
                    state.show_completion = Some(completion);
                    state.phase = ShimPhase::Showing;
                    Ok(handle)
                }
                _ => Err(completion),
            }
        };

        match outcome {
            Err(completion) => {
                warn!(request = %self.request.identifier, "show failed: ad not ready");
                completion(Err(AdapterError::AdNotReady));
            }
            Ok(handle) => {
                let observer: Arc<dyn PartnerAdObserver> = self.clone();
                match self.request.format {
                    AdFormat::Rewarded => {
                        // The partner drives UI APIs from the calling thread,
                        // so rewarded presentation hops to the UI thread.
                        let sdk = self.sdk.clone();
                        self.dispatcher.dispatch(Box::new(move || {
                            sdk.show_fullscreen(handle, FullscreenKind::Rewarded, observer);
                        }));
                    }
                    _ => self
                        .sdk
                        .show_fullscreen(handle, FullscreenKind::Interstitial, observer),
                }
            }
        }
    }

    /// Discards the partner handle and both pending completions without
    /// invoking them, and stops reacting to partner events. Idempotent.
    ///
    /// In-flight partner work is not cancelled; its callbacks will find no
    /// pending completion and be dropped.
    pub fn invalidate(&self) {
        let dropped = {
            let mut state = self.state.lock();
            state.phase = ShimPhase::Invalidated;
            state.partner_ad = None;
            (state.load_completion.take(), state.show_completion.take())
        };
        // Dropped outside the lock, never invoked.
        drop(dropped);
        debug!(request = %self.request.identifier, "invalidated");
    }

    fn resolve_banner_size(&self) -> Result<Option<FixedBannerSize>, AdapterError> {
        if self.request.format != AdFormat::Banner {
            return Ok(None);
        }
        // A request without bounds gets the partner's default banner size.
        let requested = self
            .request
            .size
            .unwrap_or_else(|| FixedBannerSize::Standard.dimensions());
        match largest_fitting_fixed_size(requested) {
            Some(size) => Ok(Some(size)),
            None => Err(AdapterError::InvalidBannerSize {
                width: requested.width,
                height: requested.height,
            }),
        }
    }

    fn notify_delegate(&self, event: &'static str, f: impl FnOnce(&dyn AdLifecycleDelegate)) {
        match self.delegate.upgrade() {
            Some(delegate) => f(delegate.as_ref()),
            None => warn!(request = %self.request.identifier, event, "delegate unavailable"),
        }
    }

    fn on_loaded(&self, handle: PartnerAdHandle) {
        let completion = {
            let mut state = self.state.lock();
            if state.phase == ShimPhase::Invalidated {
                None
            } else {
                state.partner_ad = Some(handle);
                state.phase = ShimPhase::Loaded;
                state.load_completion.take()
            }
        };
        match completion {
            Some(completion) => {
                debug!(request = %self.request.identifier, "load succeeded");
                completion(Ok(AdDetails::new()));
            }
            None => debug!(request = %self.request.identifier, "load result ignored"),
        }
    }

    fn on_load_failed(&self, code: crate::error::PartnerErrorCode) {
        let completion = {
            let mut state = self.state.lock();
            if state.phase != ShimPhase::Invalidated {
                state.phase = ShimPhase::Created;
            }
            state.load_completion.take()
        };
        match completion {
            Some(completion) => {
                warn!(request = %self.request.identifier, %code, "load failed");
                completion(Err(AdapterError::LoadFailure { code }));
            }
            None => debug!(request = %self.request.identifier, "load result ignored"),
        }
    }

    fn on_displayed(&self) {
        if self.request.format == AdFormat::Banner {
            // Banners display on load; the show completion never existed.
            debug!(request = %self.request.identifier, "delegate call ignored");
            return;
        }
        let completion = {
            let mut state = self.state.lock();
            if state.phase == ShimPhase::Showing {
                state.phase = ShimPhase::Shown;
            }
            state.show_completion.take()
        };
        match completion {
            Some(completion) => {
                debug!(request = %self.request.identifier, "show succeeded");
                completion(Ok(AdDetails::new()));
            }
            None => debug!(request = %self.request.identifier, "show result ignored"),
        }
    }

    fn on_hidden(&self) {
        if self.request.format == AdFormat::Banner {
            debug!(request = %self.request.identifier, "delegate call ignored");
            return;
        }
        {
            let mut state = self.state.lock();
            if state.phase == ShimPhase::Invalidated {
                debug!(request = %self.request.identifier, "dismiss ignored after invalidation");
                return;
            }
            state.phase = ShimPhase::Dismissed;
        }
        debug!(request = %self.request.identifier, "did dismiss");
        self.notify_delegate("did_dismiss", |delegate| {
            delegate.did_dismiss(&AdDetails::new(), None);
        });
    }

    fn on_clicked(&self) {
        if self.phase() == ShimPhase::Invalidated {
            debug!(request = %self.request.identifier, "click ignored after invalidation");
            return;
        }
        debug!(request = %self.request.identifier, "did click");
        self.notify_delegate("did_click", |delegate| {
            delegate.did_click(&AdDetails::new());
        });
    }

    fn on_playback_ended(&self, percent_played: u8, fully_watched: bool) {
        enum Outcome {
            Ignored,
            ShowFailed(Option<ShowCompletion>),
            Reward,
            Nothing,
        }

        let outcome = {
            let mut state = self.state.lock();
            if state.phase == ShimPhase::Invalidated {
                Outcome::Ignored
            } else if percent_played == 0 && !fully_watched {
                // The ad never actually played, even if a displayed
                // callback already fired.
                Outcome::ShowFailed(state.show_completion.take())
            } else if state
                .reward
                .as_mut()
                .is_some_and(|tracker| tracker.try_grant(fully_watched))
            {
                Outcome::Reward
            } else {
                Outcome::Nothing
            }
        };

        match outcome {
            Outcome::Ignored => {
                debug!(request = %self.request.identifier, "playback event ignored after invalidation");
            }
            Outcome::ShowFailed(Some(completion)) => {
                warn!(request = %self.request.identifier, "video playback ended at 0% played");
                completion(Err(AdapterError::PlaybackEndedAtZero));
            }
            Outcome::ShowFailed(None) => {
                debug!(request = %self.request.identifier, "show result ignored");
            }
            Outcome::Reward => {
                debug!(request = %self.request.identifier, "did reward");
                self.notify_delegate("did_reward", |delegate| {
                    delegate.did_reward(&mediation_types::Reward::default(), &AdDetails::new());
                });
            }
            Outcome::Nothing => {}
        }
    }

    fn on_reward_validation(&self, outcome: RewardValidation) {
        match outcome {
            RewardValidation::Succeeded => {
                let mut state = self.state.lock();
                match state.reward.as_mut() {
                    Some(tracker) => tracker.mark_eligible(),
                    None => {
                        debug!(request = %self.request.identifier, "reward validation ignored for non-rewarded ad");
                    }
                }
            }
            other => {
                debug!(request = %self.request.identifier, ?other, "reward validation outcome ignored");
            }
        }
    }
}

impl PartnerAdObserver for AdShim {
    fn on_ad_event(&self, event: PartnerAdEvent) {
        match event {
            PartnerAdEvent::Loaded { handle } => self.on_loaded(handle),
            PartnerAdEvent::LoadFailed { code } => self.on_load_failed(code),
            PartnerAdEvent::Displayed => self.on_displayed(),
            PartnerAdEvent::Hidden => self.on_hidden(),
            PartnerAdEvent::Clicked => self.on_clicked(),
            PartnerAdEvent::PlaybackBegan => {
                debug!(request = %self.request.identifier, "video playback began");
            }
            PartnerAdEvent::PlaybackEnded {
                percent_played,
                fully_watched,
            } => self.on_playback_ended(percent_played, fully_watched),
            PartnerAdEvent::RewardValidation { outcome } => self.on_reward_validation(outcome),
        }
    }
}
