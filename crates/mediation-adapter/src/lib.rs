//! # Mediation Adapter
//!
//! Translation layer between the host mediation SDK's ad lifecycle contract
//! and the partner ad network SDK. Every operation is a shape translation:
//! the host's `set_up`/`load`/`show`/`invalidate` calls are forwarded to the
//! partner's API, and the partner's delegate-based asynchronous callbacks
//! are folded back into the single-shot completions the host expects.
//!
//! ## Control flow
//!
//! ```text
//! host ──make_ad(format)──→ service ──→ AdShim ──load()──→ partner SDK
//!                                          ▲                   │
//!                                          └── PartnerAdEvent ─┘
//!                                          │
//! host ←───── load/show completion ────────┘
//! host ←───── click/dismiss/reward ──(weak delegate)── AdShim
//! ```
//!
//! ## Callback discipline
//!
//! - At most one pending completion per operation per shim; a completion is
//!   cleared before it fires, so duplicate or late partner callbacks are
//!   logged no-ops, never double results.
//! - Shims hold the host delegate weakly; a released delegate degrades
//!   notifications to logged no-ops.
//! - `invalidate` detaches a shim without cancelling in-flight partner
//!   work; stray callbacks find nothing to complete.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  adapters/ - privacy relay, publisher configuration            │
//! └────────────────────────────────────────────────────────────────┘
//!                        ↑ forwards into ↑
//! ┌────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - MediationAdapterApi, AdLifecycleDelegate  │
//! │  ports/outbound.rs - PartnerSdk, PartnerSettings, UiDispatcher │
//! └────────────────────────────────────────────────────────────────┘
//!                        ↑ uses ↑
//! ┌────────────────────────────────────────────────────────────────┐
//! │  service.rs  - MediationAdapterService (setup, registry)       │
//! │  shim.rs     - AdShim per-request phase machine                │
//! │  domain/     - banner size selection, reward tracking          │
//! └────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod registry;
pub mod service;
pub mod shim;

pub use error::{map_partner_error, AdapterError, HostErrorCode, PartnerErrorCode};
pub use events::{PartnerAdEvent, RewardValidation};
pub use registry::ShimRegistry;
pub use service::{
    MediationAdapterService, ADAPTER_VERSION, MEDIATION_PROVIDER, PARTNER_DISPLAY_NAME,
    PARTNER_IDENTIFIER,
};
pub use shim::{AdCallbackResult, AdShim, LoadCompletion, ShimPhase, ShowCompletion};
