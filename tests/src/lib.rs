//! # Mediation Adapter Test Suite
//!
//! Unified test crate driving the adapter end-to-end through a scripted
//! partner-SDK double.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures/         # Scripted partner SDK, recording delegate, sinks
//! │
//! └── integration/      # Host-visible lifecycle flows
//!     ├── flows.rs      # load/show/invalidate across all formats
//!     └── privacy.rs    # privacy relay and publisher configuration
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p mediation-tests
//!
//! # By category
//! cargo test -p mediation-tests integration::flows::
//! cargo test -p mediation-tests integration::privacy::
//! ```
