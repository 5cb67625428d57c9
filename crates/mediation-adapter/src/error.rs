//! Error types for the mediation adapter.
//!
//! All failures are reported synchronously or through the pending completion
//! already registered for the operation — never across an asynchronous
//! boundary. Late or duplicate partner callbacks are logged and dropped, not
//! surfaced as a second result.

use mediation_types::{AdFormat, RequestId};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A raw error code reported by the partner SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerErrorCode(pub i32);

impl PartnerErrorCode {
    /// The partner SDK has been disabled remotely.
    pub const SDK_DISABLED: Self = Self(-22);
    /// No ad was available for the zone.
    pub const NO_FILL: Self = Self(204);
    /// The ad request timed out at the network layer.
    pub const AD_REQUEST_NETWORK_TIMEOUT: Self = Self(-1001);
    /// The device has no network connectivity.
    pub const NOT_CONNECTED_TO_INTERNET: Self = Self(-1009);
    /// The ad markup could not be rendered.
    pub const UNABLE_TO_RENDER_AD: Self = Self(-6);
    /// The ad token in the request was rejected.
    pub const INVALID_AD_TOKEN: Self = Self(-8);
    /// Creative resources could not be precached to disk.
    pub const UNABLE_TO_PRECACHE_RESOURCES: Self = Self(-200);
    /// Image resources could not be precached to disk.
    pub const UNABLE_TO_PRECACHE_IMAGE_RESOURCES: Self = Self(-201);
    /// Video resources could not be precached to disk.
    pub const UNABLE_TO_PRECACHE_VIDEO_RESOURCES: Self = Self(-202);
    /// The ad response could not be parsed.
    pub const INVALID_RESPONSE: Self = Self(-800);
}

impl fmt::Display for PartnerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The host's load/show error taxonomy, as far as this partner's codes map
/// onto it. Codes with no entry map to `None` and the host picks its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostErrorCode {
    /// The partner aborted the request (SDK disabled).
    Aborted,
    /// No ad was available.
    NoFill,
    /// The request timed out.
    Timeout,
    /// No network connectivity.
    NoConnectivity,
    /// The ad markup was unusable.
    InvalidAdMarkup,
    /// The ad request itself was invalid.
    InvalidAdRequest,
    /// Creative assets could not be stored on device.
    OutOfStorage,
    /// The bid/ad response was malformed.
    InvalidBidResponse,
}

/// Maps a partner error code onto the host taxonomy.
///
/// Returns `None` for unrecognized codes so the host can choose its own
/// default category.
pub fn map_partner_error(code: PartnerErrorCode) -> Option<HostErrorCode> {
    match code {
        PartnerErrorCode::SDK_DISABLED => Some(HostErrorCode::Aborted),
        PartnerErrorCode::NO_FILL => Some(HostErrorCode::NoFill),
        PartnerErrorCode::AD_REQUEST_NETWORK_TIMEOUT => Some(HostErrorCode::Timeout),
        PartnerErrorCode::NOT_CONNECTED_TO_INTERNET => Some(HostErrorCode::NoConnectivity),
        PartnerErrorCode::UNABLE_TO_RENDER_AD => Some(HostErrorCode::InvalidAdMarkup),
        PartnerErrorCode::INVALID_AD_TOKEN => Some(HostErrorCode::InvalidAdRequest),
        PartnerErrorCode::UNABLE_TO_PRECACHE_RESOURCES
        | PartnerErrorCode::UNABLE_TO_PRECACHE_IMAGE_RESOURCES
        | PartnerErrorCode::UNABLE_TO_PRECACHE_VIDEO_RESOURCES => {
            Some(HostErrorCode::OutOfStorage)
        }
        PartnerErrorCode::INVALID_RESPONSE => Some(HostErrorCode::InvalidBidResponse),
        _ => None,
    }
}

/// Mediation adapter error type.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A required setup credential is missing or empty.
    #[error("Missing setup parameter: {key}")]
    MissingSetUpParameter { key: &'static str },

    /// The partner SDK instance could not be created for the given key.
    #[error("Partner SDK instance could not be created")]
    SetUpFailure,

    /// The partner SDK reported an initialization failure.
    #[error("Partner SDK initialization failed: {reason}")]
    InitializationFailure { reason: String },

    /// An ad operation was attempted before setup completed.
    #[error("Partner SDK is not initialized")]
    PartnerNotInitialized,

    /// The adapter does not serve the requested format.
    #[error("Unsupported ad format: {0}")]
    UnsupportedAdFormat(AdFormat),

    /// No fixed banner size fits within the requested bounds.
    #[error("No fixed banner size fits requested bounds {width}x{height}")]
    InvalidBannerSize { width: u32, height: u32 },

    /// A load is already in flight on this shim.
    #[error("A load operation is already in progress")]
    LoadInProgress,

    /// The operation is not valid in the shim's current phase.
    #[error("Invalid operation {operation} in phase {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: String,
    },

    /// The partner failed to load the ad.
    #[error("Partner failed to load the ad: code {code}")]
    LoadFailure { code: PartnerErrorCode },

    /// `show` was called before a partner ad handle was stored.
    #[error("Ad is not ready to show")]
    AdNotReady,

    /// No shim is registered for the request identifier given to `show`.
    #[error("No ad ready to show for request {identifier}")]
    NoAdReadyToShow { identifier: RequestId },

    /// No shim is registered for the request identifier given to
    /// `invalidate`.
    #[error("No ad to invalidate for request {identifier}")]
    NoAdToInvalidate { identifier: RequestId },

    /// The partner reported video playback ending at 0% played without a
    /// full watch — the ad never actually showed.
    #[error("Video playback ended at 0% played")]
    PlaybackEndedAtZero,
}

impl AdapterError {
    /// The host error category for this failure, when the partner code maps
    /// onto one.
    pub fn host_error_code(&self) -> Option<HostErrorCode> {
        match self {
            Self::LoadFailure { code } => map_partner_error(*code),
            _ => None,
        }
    }
}
