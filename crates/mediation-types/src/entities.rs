//! # Core Ad Entities
//!
//! Defines the ad-side entities shared across crates.
//!
//! ## Clusters
//!
//! - **Requests**: `LoadRequest`, `RequestId`, `ZoneId`
//! - **Formats & Sizes**: `AdFormat`, `AdSize`, `FixedBannerSize`
//! - **Lifecycle payloads**: `AdDetails`, `Reward`, `PartnerAdHandle`

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Partner-side identifier for an ad slot (placement/zone), supplied by the
/// host's load request.
pub type ZoneId = String;

/// Auxiliary detail map passed along with lifecycle notifications.
///
/// This integration always sends an empty map; the type exists because the
/// host contract carries it.
pub type AdDetails = HashMap<String, String>;

/// Unique identifier correlating a load request with later `show` and
/// `invalidate` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ad formats the host can request.
///
/// `RewardedInterstitial` is recognized but not served by this adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdFormat {
    /// Inline banner view.
    Banner,
    /// Full-screen static or video ad.
    Interstitial,
    /// Full-screen ad granting a reward after a complete watch.
    Rewarded,
    /// Full-screen rewarded ad shown at interstitial opportunities.
    RewardedInterstitial,
}

impl fmt::Display for AdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Banner => "banner",
            Self::Interstitial => "interstitial",
            Self::Rewarded => "rewarded",
            Self::RewardedInterstitial => "rewarded_interstitial",
        };
        f.write_str(name)
    }
}

/// Requested banner bounds in points.
///
/// A height of [`AdSize::ANY_HEIGHT`] means the host accepts any height that
/// fits the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdSize {
    pub width: u32,
    pub height: u32,
}

impl AdSize {
    /// Sentinel height meaning "any height fits".
    pub const ANY_HEIGHT: u32 = 0;

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if the height constraint is the any-height sentinel.
    pub const fn is_any_height(&self) -> bool {
        self.height == Self::ANY_HEIGHT
    }
}

/// The fixed banner sizes the partner SDK supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedBannerSize {
    /// Standard banner, 320x50.
    Standard,
    /// Medium rectangle, 300x250.
    Medium,
    /// Leaderboard, 728x90.
    Leaderboard,
}

impl FixedBannerSize {
    /// Pixel dimensions of this fixed size.
    pub const fn dimensions(self) -> AdSize {
        match self {
            Self::Standard => AdSize::new(320, 50),
            Self::Medium => AdSize::new(300, 250),
            Self::Leaderboard => AdSize::new(728, 90),
        }
    }
}

/// The data associated with one ad load call. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    /// Correlation key for this request; exactly one shim exists per
    /// identifier at any time.
    pub identifier: RequestId,
    /// The requested ad format.
    pub format: AdFormat,
    /// Partner-side placement for the ad.
    pub partner_placement: ZoneId,
    /// Requested size. Only meaningful for banners.
    pub size: Option<AdSize>,
}

impl LoadRequest {
    /// Creates a request with a fresh identifier and no size constraint.
    pub fn new(format: AdFormat, partner_placement: impl Into<ZoneId>) -> Self {
        Self {
            identifier: RequestId::generate(),
            format,
            partner_placement: partner_placement.into(),
            size: None,
        }
    }

    /// Sets the requested banner size.
    pub fn with_size(mut self, size: AdSize) -> Self {
        self.size = Some(size);
        self
    }
}

/// The data associated with a bidder-information request issued before an
/// auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreBidRequest {
    pub format: AdFormat,
    pub partner_placement: ZoneId,
}

/// Opaque token for the host view hierarchy an ad is presented on.
///
/// The partner presents full-screen ads itself, so the adapter only carries
/// this through; it never inspects it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentationAnchor;

/// Opaque handle to an ad object loaded by the partner SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartnerAdHandle(pub Uuid);

impl PartnerAdHandle {
    /// Generates a fresh handle. Used by partner-side implementations when
    /// an ad finishes loading.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Reward granted to the user after a completed rewarded ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub amount: u64,
    pub label: String,
}

impl Default for Reward {
    /// The reward this integration always grants: amount 1, empty label.
    fn default() -> Self {
        Self {
            amount: 1,
            label: String::new(),
        }
    }
}
