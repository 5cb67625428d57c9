//! # Inbound Port - MediationAdapterApi
//!
//! Primary driving port: the ad lifecycle contract the host mediation SDK
//! calls into, plus the delegate trait the host implements to receive
//! unsolicited lifecycle events (click, dismiss, reward).
//!
//! All completions are single-use and fire exactly once per operation; a
//! result is never thrown across an asynchronous boundary.

use crate::error::AdapterError;
use crate::shim::{AdShim, LoadCompletion, ShowCompletion};
use mediation_types::{
    AdDetails, CcpaConsent, GdprConsentStatus, LoadRequest, PartnerConfiguration, PreBidRequest,
    PresentationAnchor, RequestId, Reward,
};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

/// Completion for `set_up`.
pub type SetUpCompletion = Box<dyn FnOnce(Result<(), AdapterError>) + Send>;

/// Completion for `fetch_bidder_information`. Carries the bidder token map.
pub type BidderInfoCompletion = Box<dyn FnOnce(HashMap<String, String>) + Send>;

/// Host-side receiver for unsolicited ad lifecycle events.
///
/// Shims hold this weakly: the adapter never owns the host delegate, and a
/// delegate released mid-flight degrades every notification into a logged
/// no-op.
pub trait AdLifecycleDelegate: Send + Sync {
    /// The user clicked the ad.
    fn did_click(&self, details: &AdDetails);

    /// The ad was dismissed. `error` is populated when the dismissal was
    /// caused by a partner failure.
    fn did_dismiss(&self, details: &AdDetails, error: Option<AdapterError>);

    /// The user earned a reward (rewarded format only).
    fn did_reward(&self, reward: &Reward, details: &AdDetails);
}

/// Primary API for the mediation adapter.
///
/// # Example
///
/// ```rust,ignore
/// use mediation_adapter::ports::MediationAdapterApi;
///
/// fn example(adapter: &impl MediationAdapterApi, delegate: Weak<dyn AdLifecycleDelegate>) {
///     let request = LoadRequest::new(AdFormat::Interstitial, "zone-1");
///     let identifier = request.identifier;
///     adapter.load(request, delegate, None, Box::new(|result| { /* ... */ }));
///     // later, once the load completion reported success:
///     adapter.show(identifier, PresentationAnchor, Box::new(|result| { /* ... */ }));
/// }
/// ```
pub trait MediationAdapterApi: Send + Sync {
    /// Initializes the partner SDK with the host-supplied configuration.
    ///
    /// # Errors (via completion)
    /// - `MissingSetUpParameter`: the `sdk_key` credential is absent or empty
    /// - `SetUpFailure`: the partner refused to create an instance
    /// - `InitializationFailure`: the partner reported an init failure
    fn set_up(&self, configuration: PartnerConfiguration, completion: SetUpCompletion);

    /// Computes bidder information for a pre-bid request.
    ///
    /// This partner does not support programmatic bidding tokens; the
    /// completion always receives an empty map.
    fn fetch_bidder_information(&self, request: &PreBidRequest, completion: BidderInfoCompletion);

    /// Notifies the adapter of GDPR applicability.
    fn set_gdpr_applies(&self, applies: bool);

    /// Notifies the adapter of the user's GDPR consent status.
    fn set_gdpr_consent_status(&self, status: GdprConsentStatus);

    /// Notifies the adapter of COPPA subjectivity.
    fn set_user_subject_to_coppa(&self, subject: bool);

    /// Notifies the adapter of the user's CCPA consent.
    fn set_ccpa_consent(&self, consent: CcpaConsent);

    /// Constructs the shim for a load request without starting any I/O.
    ///
    /// # Errors
    /// - `UnsupportedAdFormat`: the adapter does not serve the format
    /// - `PartnerNotInitialized`: `set_up` has not completed
    fn make_ad(
        &self,
        request: LoadRequest,
        delegate: Weak<dyn AdLifecycleDelegate>,
    ) -> Result<Arc<AdShim>, AdapterError>;

    /// Constructs, registers and loads the shim for a request.
    fn load(
        &self,
        request: LoadRequest,
        delegate: Weak<dyn AdLifecycleDelegate>,
        anchor: Option<PresentationAnchor>,
        completion: LoadCompletion,
    );

    /// Shows the loaded ad registered under the request identifier.
    ///
    /// Unknown identifiers fail with `NoAdReadyToShow` via the completion.
    fn show(&self, identifier: RequestId, anchor: PresentationAnchor, completion: ShowCompletion);

    /// Discards the shim registered under the request identifier.
    ///
    /// # Errors
    /// - `NoAdToInvalidate`: no shim is registered for the identifier
    fn invalidate(&self, identifier: RequestId) -> Result<(), AdapterError>;
}
