//! Fixed banner size selection.
//!
//! The partner only serves banners in a small set of fixed pixel sizes. The
//! adapter picks the largest fixed size that fits within the bounds the host
//! requested, or refuses the load before any partner traffic happens.

use mediation_types::{AdSize, FixedBannerSize};

/// Candidate sizes ordered largest-area first, so the first fit is the
/// largest fit.
const CANDIDATES_LARGEST_FIRST: [FixedBannerSize; 3] = [
    FixedBannerSize::Medium,      // 300x250 = 75000
    FixedBannerSize::Leaderboard, // 728x90  = 65520
    FixedBannerSize::Standard,    // 320x50  = 16000
];

/// Returns the largest fixed banner size that fits the requested bounds.
///
/// A candidate fits when the requested width is at least the candidate width
/// and the requested height is at least the candidate height — unless the
/// requested height is the any-height sentinel, which waives the height
/// constraint. Returns `None` when nothing fits; the caller must fail the
/// load without contacting the partner SDK.
pub fn largest_fitting_fixed_size(requested: AdSize) -> Option<FixedBannerSize> {
    CANDIDATES_LARGEST_FIRST.into_iter().find(|candidate| {
        let dimensions = candidate.dimensions();
        requested.width >= dimensions.width
            && (requested.is_any_height() || requested.height >= dimensions.height)
    })
}
