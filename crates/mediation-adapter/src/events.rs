//! # Partner Ad Events
//!
//! The partner SDK's delegate callback surface, collapsed into one typed
//! event enum. Every asynchronous signal the partner can emit for an ad
//! instance arrives here and is dispatched into the shim's current phase,
//! instead of being scattered across handler methods.

use crate::error::PartnerErrorCode;
use mediation_types::PartnerAdHandle;
use serde::{Deserialize, Serialize};

/// All events the partner SDK can emit for one ad instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PartnerAdEvent {
    /// The partner fetched an ad for the zone. Carries the loaded ad handle.
    Loaded { handle: PartnerAdHandle },

    /// The partner failed to fetch an ad for the zone.
    LoadFailed { code: PartnerErrorCode },

    /// The ad was rendered on screen.
    Displayed,

    /// The ad was dismissed/hidden.
    Hidden,

    /// The user clicked the ad.
    Clicked,

    /// Video playback started (interstitial/rewarded only).
    PlaybackBegan,

    /// Video playback finished (interstitial/rewarded only).
    ///
    /// `percent_played == 0` without a full watch means the ad never
    /// actually played and is treated as a show failure.
    PlaybackEnded {
        percent_played: u8,
        fully_watched: bool,
    },

    /// Server-side reward validation outcome (rewarded only). Reported on a
    /// separate partner delegate channel, independently of playback.
    RewardValidation { outcome: RewardValidation },
}

/// Outcome of the partner's server-side reward validation.
///
/// Only `Succeeded` grants reward eligibility; the other outcomes are
/// logged no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardValidation {
    /// Validation succeeded; the user is entitled to a reward.
    Succeeded,
    /// The user exceeded the reward quota.
    ExceededQuota,
    /// The validation request was rejected.
    Rejected,
    /// The validation request failed with a partner response code.
    Failed { code: i32 },
}
