//! # Integration Test Flows
//!
//! Drives the adapter the way the host mediation SDK would: set up the
//! partner, load by request, show by identifier, invalidate — while the
//! scripted partner double fires delegate events in realistic and in
//! deliberately hostile orders (duplicates, late arrivals, zero-length
//! playback).

use crate::fixtures::{
    init_tracing, PartnerCall, RecordingDelegate, ResultSink, ScriptedPartnerSdk,
    ScriptedPartnerSdkFactory,
};
use mediation_adapter::ports::inbound::{AdLifecycleDelegate, MediationAdapterApi};
use mediation_adapter::ports::outbound::FullscreenKind;
use mediation_adapter::service::MediationAdapterService;
use mediation_adapter::{
    AdapterError, HostErrorCode, PartnerAdEvent, PartnerErrorCode, RewardValidation,
};
use mediation_types::{
    AdFormat, AdSize, FixedBannerSize, LoadRequest, PartnerAdHandle, PartnerConfiguration,
    PresentationAnchor,
};
use std::sync::{Arc, Weak};

// =============================================================================
// TEST FIXTURES
// =============================================================================

struct Harness {
    sdk: Arc<ScriptedPartnerSdk>,
    service: MediationAdapterService,
    delegate: Arc<RecordingDelegate>,
}

impl Harness {
    /// Sets up a service against the scripted partner and asserts setup
    /// succeeded.
    fn new() -> Self {
        init_tracing();
        let sdk = ScriptedPartnerSdk::new();
        let factory = Arc::new(ScriptedPartnerSdkFactory { sdk: sdk.clone() });
        let service = MediationAdapterService::new(factory);

        let done = Arc::new(parking_lot::Mutex::new(None));
        let slot = done.clone();
        service.set_up(
            PartnerConfiguration::with_sdk_key("integration-key"),
            Box::new(move |result| *slot.lock() = Some(result)),
        );
        assert!(matches!(*done.lock(), Some(Ok(()))));

        Self {
            sdk,
            service,
            delegate: Arc::new(RecordingDelegate::default()),
        }
    }

    fn delegate(&self) -> Weak<dyn AdLifecycleDelegate> {
        let delegate: Arc<dyn AdLifecycleDelegate> = self.delegate.clone();
        let weak: Weak<dyn AdLifecycleDelegate> = Arc::downgrade(&delegate);
        weak
    }

    /// Loads a request and fires the partner's success callback.
    fn load_to_completion(&self, request: LoadRequest) -> ResultSink {
        let sink = ResultSink::default();
        self.service
            .load(request, self.delegate(), None, sink.completion());
        self.sdk.fire(PartnerAdEvent::Loaded {
            handle: PartnerAdHandle::generate(),
        });
        assert!(sink.last_is_ok());
        sink
    }
}

// =============================================================================
// FULL-SCREEN LIFECYCLE
// =============================================================================

#[test]
fn test_interstitial_load_show_dismiss_flow() {
    let harness = Harness::new();
    let request = LoadRequest::new(AdFormat::Interstitial, "zone-int");
    let identifier = request.identifier;

    let load_sink = harness.load_to_completion(request);
    assert_eq!(load_sink.count(), 1);
    assert!(harness.sdk.calls().contains(&PartnerCall::LoadAd {
        zone: "zone-int".to_string()
    }));

    let show_sink = ResultSink::default();
    harness
        .service
        .show(identifier, PresentationAnchor, show_sink.completion());
    assert!(harness.sdk.calls().contains(&PartnerCall::ShowFullscreen {
        kind: FullscreenKind::Interstitial
    }));

    harness.sdk.fire(PartnerAdEvent::Displayed);
    assert_eq!(show_sink.count(), 1);
    assert!(show_sink.last_is_ok());

    harness.sdk.fire(PartnerAdEvent::Clicked);
    harness.sdk.fire(PartnerAdEvent::Hidden);
    assert_eq!(*harness.delegate.clicks.lock(), 1);
    assert_eq!(*harness.delegate.dismissals.lock(), 1);
    // The show completion did not fire a second time on dismissal.
    assert_eq!(show_sink.count(), 1);
}

#[test]
fn test_show_before_load_completion_is_rejected() {
    let harness = Harness::new();
    let request = LoadRequest::new(AdFormat::Interstitial, "zone-int");
    let identifier = request.identifier;

    let load_sink = ResultSink::default();
    harness
        .service
        .load(request, harness.delegate(), None, load_sink.completion());

    // The partner has not answered yet; the shim exists but holds no ad.
    let show_sink = ResultSink::default();
    harness
        .service
        .show(identifier, PresentationAnchor, show_sink.completion());
    assert!(show_sink.last_error_matches(|e| matches!(e, AdapterError::AdNotReady)));
    assert!(!harness
        .sdk
        .calls()
        .iter()
        .any(|call| matches!(call, PartnerCall::ShowFullscreen { .. })));
}

#[test]
fn test_duplicate_and_late_partner_callbacks_are_dropped() {
    let harness = Harness::new();
    let request = LoadRequest::new(AdFormat::Interstitial, "zone-int");

    let sink = ResultSink::default();
    harness
        .service
        .load(request, harness.delegate(), None, sink.completion());

    let handle = PartnerAdHandle::generate();
    harness.sdk.fire(PartnerAdEvent::Loaded { handle });
    // Hostile partner: duplicate success, then a late failure.
    harness.sdk.fire(PartnerAdEvent::Loaded { handle });
    harness.sdk.fire(PartnerAdEvent::LoadFailed {
        code: PartnerErrorCode::NO_FILL,
    });

    assert_eq!(sink.count(), 1);
    assert!(sink.last_is_ok());
}

#[test]
fn test_no_fill_maps_to_host_category() {
    let harness = Harness::new();
    let sink = ResultSink::default();
    harness.service.load(
        LoadRequest::new(AdFormat::Interstitial, "zone-int"),
        harness.delegate(),
        None,
        sink.completion(),
    );
    harness.sdk.fire(PartnerAdEvent::LoadFailed {
        code: PartnerErrorCode::NO_FILL,
    });

    assert!(sink.last_error_matches(|error| {
        error.host_error_code() == Some(HostErrorCode::NoFill)
    }));
}

#[test]
fn test_unmapped_partner_code_leaves_category_to_host() {
    let harness = Harness::new();
    let sink = ResultSink::default();
    harness.service.load(
        LoadRequest::new(AdFormat::Interstitial, "zone-int"),
        harness.delegate(),
        None,
        sink.completion(),
    );
    harness.sdk.fire(PartnerAdEvent::LoadFailed {
        code: PartnerErrorCode(42),
    });

    assert!(sink.last_error_matches(|error| {
        matches!(error, AdapterError::LoadFailure { .. }) && error.host_error_code().is_none()
    }));
}

#[test]
fn test_playback_ended_at_zero_fails_show_after_display() {
    let harness = Harness::new();
    let request = LoadRequest::new(AdFormat::Interstitial, "zone-int");
    let identifier = request.identifier;
    harness.load_to_completion(request);

    let show_sink = ResultSink::default();
    harness
        .service
        .show(identifier, PresentationAnchor, show_sink.completion());

    // No displayed callback yet; playback dies immediately.
    harness.sdk.fire(PartnerAdEvent::PlaybackBegan);
    harness.sdk.fire(PartnerAdEvent::PlaybackEnded {
        percent_played: 0,
        fully_watched: false,
    });
    assert!(show_sink.last_error_matches(|e| matches!(e, AdapterError::PlaybackEndedAtZero)));
    assert_eq!(show_sink.count(), 1);
}

#[test]
fn test_invalidate_discards_pending_show_callback() {
    let harness = Harness::new();
    let request = LoadRequest::new(AdFormat::Interstitial, "zone-int");
    let identifier = request.identifier;
    harness.load_to_completion(request);

    let show_sink = ResultSink::default();
    harness
        .service
        .show(identifier, PresentationAnchor, show_sink.completion());
    assert!(harness.service.invalidate(identifier).is_ok());

    // Partner answers after invalidation; the discarded callback must
    // never fire, with success or failure.
    harness.sdk.fire(PartnerAdEvent::Displayed);
    harness.sdk.fire(PartnerAdEvent::PlaybackEnded {
        percent_played: 0,
        fully_watched: false,
    });
    assert_eq!(show_sink.count(), 0);

    assert!(matches!(
        harness.service.invalidate(identifier),
        Err(AdapterError::NoAdToInvalidate { .. })
    ));
}

// =============================================================================
// REWARDED
// =============================================================================

#[test]
fn test_rewarded_grants_exactly_one_reward() {
    let harness = Harness::new();
    let request = LoadRequest::new(AdFormat::Rewarded, "zone-rew");
    let identifier = request.identifier;
    harness.load_to_completion(request);

    let show_sink = ResultSink::default();
    harness
        .service
        .show(identifier, PresentationAnchor, show_sink.completion());
    assert!(harness.sdk.calls().contains(&PartnerCall::ShowFullscreen {
        kind: FullscreenKind::Rewarded
    }));

    harness.sdk.fire(PartnerAdEvent::Displayed);
    harness.sdk.fire(PartnerAdEvent::RewardValidation {
        outcome: RewardValidation::Succeeded,
    });
    // The partner repeats the completion signal; the reward must not.
    for _ in 0..3 {
        harness.sdk.fire(PartnerAdEvent::PlaybackEnded {
            percent_played: 100,
            fully_watched: true,
        });
    }

    let rewards = harness.delegate.rewards.lock();
    assert_eq!(rewards.len(), 1);
    assert_eq!(rewards[0].amount, 1);
}

#[test]
fn test_rewarded_without_validation_never_rewards() {
    let harness = Harness::new();
    let request = LoadRequest::new(AdFormat::Rewarded, "zone-rew");
    let identifier = request.identifier;
    harness.load_to_completion(request);

    harness
        .service
        .show(identifier, PresentationAnchor, ResultSink::default().completion());
    harness.sdk.fire(PartnerAdEvent::Displayed);
    harness.sdk.fire(PartnerAdEvent::RewardValidation {
        outcome: RewardValidation::Rejected,
    });
    harness.sdk.fire(PartnerAdEvent::PlaybackEnded {
        percent_played: 100,
        fully_watched: true,
    });

    assert!(harness.delegate.rewards.lock().is_empty());
}

// =============================================================================
// BANNER
// =============================================================================

#[test]
fn test_banner_selects_fixed_size_and_displays_on_load() {
    let harness = Harness::new();
    let request =
        LoadRequest::new(AdFormat::Banner, "zone-ban").with_size(AdSize::new(300, 250));

    let sink = ResultSink::default();
    harness
        .service
        .load(request, harness.delegate(), None, sink.completion());
    assert!(harness.sdk.calls().contains(&PartnerCall::LoadBanner {
        zone: "zone-ban".to_string(),
        size: FixedBannerSize::Medium,
    }));

    harness.sdk.fire(PartnerAdEvent::Loaded {
        handle: PartnerAdHandle::generate(),
    });
    assert!(sink.last_is_ok());

    // Clicks reach the host; banner display events stay partner-side.
    harness.sdk.fire(PartnerAdEvent::Displayed);
    harness.sdk.fire(PartnerAdEvent::Clicked);
    harness.sdk.fire(PartnerAdEvent::Hidden);
    assert_eq!(*harness.delegate.clicks.lock(), 1);
    assert_eq!(*harness.delegate.dismissals.lock(), 0);
}

#[test]
fn test_banner_request_narrower_than_standard_is_refused() {
    let harness = Harness::new();
    let calls_before = harness.sdk.calls().len();

    let sink = ResultSink::default();
    harness.service.load(
        LoadRequest::new(AdFormat::Banner, "zone-ban").with_size(AdSize::new(300, 50)),
        harness.delegate(),
        None,
        sink.completion(),
    );

    assert!(sink.last_error_matches(|e| matches!(
        e,
        AdapterError::InvalidBannerSize {
            width: 300,
            height: 50
        }
    )));
    // The refusal happened before any partner traffic.
    assert_eq!(harness.sdk.calls().len(), calls_before);
}
