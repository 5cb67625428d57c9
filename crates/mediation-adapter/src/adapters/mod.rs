//! Adapters layer for the mediation adapter crate.
//!
//! Boundary glue with no ad lifecycle logic of its own: the privacy relay
//! into the partner's global settings, and the publisher-facing
//! configuration surface.

pub mod config;
pub mod privacy;

pub use config::AdapterConfiguration;
pub use privacy::{update_ccpa, update_coppa, update_gdpr_consent};
