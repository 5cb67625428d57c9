//! Ports layer for the mediation adapter.
//!
//! Defines the hexagonal architecture port traits:
//! - Inbound (Driving) ports: the lifecycle API the host mediation SDK calls
//! - Outbound (Driven) ports: everything consumed from the partner SDK

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
