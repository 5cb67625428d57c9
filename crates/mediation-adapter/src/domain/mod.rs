//! # Domain Layer - Mediation Adapter
//!
//! Pure decision logic with no partner SDK interaction:
//!
//! - `size`: fixed banner size selection (largest fit wins)
//! - `reward`: reward eligibility and at-most-once grant latch

pub mod reward;
pub mod size;

pub use reward::*;
pub use size::*;
