//! Publisher-facing adapter configuration.
//!
//! A small set of toggles publishers can flip at any time, including before
//! setup: partner test mode, verbose partner logging, and audio mute. Values
//! set before the partner SDK exists are replayed by `sync()` once setup
//! stores the settings handle.

use crate::ports::outbound::PartnerSettings;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

/// An advertising identifier that was zeroed out by user privacy settings.
/// Registering it for test mode would match every restricted device.
const ZEROED_ADVERTISING_ID: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Default)]
struct ConfigState {
    test_mode: bool,
    verbose_logging: bool,
    muted: bool,
    test_device_identifier: Option<String>,
    settings: Option<Arc<dyn PartnerSettings>>,
}

/// Externally configurable properties pertaining to the partner SDK.
#[derive(Default)]
pub struct AdapterConfiguration {
    state: Mutex<ConfigState>,
}

impl AdapterConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the partner settings handle and replays every toggle.
    pub fn attach(&self, settings: Arc<dyn PartnerSettings>) {
        self.state.lock().settings = Some(settings);
        self.sync();
    }

    /// The device advertising identifier to register when test mode is on.
    pub fn set_test_device_identifier(&self, identifier: impl Into<String>) {
        self.state.lock().test_device_identifier = Some(identifier.into());
        self.sync_test_mode();
    }

    /// Enables or disables the partner's test mode. Disabled by default.
    pub fn set_test_mode(&self, enabled: bool) {
        self.state.lock().test_mode = enabled;
        self.sync_test_mode();
        info!(enabled, "partner test mode");
    }

    /// Enables or disables the partner's verbose logging. Disabled by
    /// default.
    pub fn set_verbose_logging(&self, enabled: bool) {
        self.state.lock().verbose_logging = enabled;
        self.sync_verbose_logging();
        info!(enabled, "partner verbose logging");
    }

    /// Mutes or unmutes partner ad audio.
    pub fn set_muted(&self, muted: bool) {
        self.state.lock().muted = muted;
        self.sync_muted();
        info!(muted, "partner mute");
    }

    pub fn test_mode(&self) -> bool {
        self.state.lock().test_mode
    }

    pub fn verbose_logging(&self) -> bool {
        self.state.lock().verbose_logging
    }

    pub fn muted(&self) -> bool {
        self.state.lock().muted
    }

    /// Replays every toggle into the partner settings.
    pub fn sync(&self) {
        self.sync_test_mode();
        self.sync_verbose_logging();
        self.sync_muted();
    }

    fn sync_test_mode(&self) {
        let (settings, identifiers) = {
            let state = self.state.lock();
            let Some(settings) = state.settings.clone() else {
                return;
            };
            let identifiers = if state.test_mode {
                match state.test_device_identifier.as_deref() {
                    Some(ZEROED_ADVERTISING_ID) | None => {
                        warn!("invalid advertising identifier for partner test mode; check user privacy settings");
                        Vec::new()
                    }
                    Some(identifier) => vec![identifier.to_string()],
                }
            } else {
                Vec::new()
            };
            (settings, identifiers)
        };
        settings.set_test_device_identifiers(identifiers);
    }

    fn sync_verbose_logging(&self) {
        let (settings, enabled) = {
            let state = self.state.lock();
            let Some(settings) = state.settings.clone() else {
                return;
            };
            (settings, state.verbose_logging)
        };
        settings.set_verbose_logging(enabled);
    }

    fn sync_muted(&self) {
        let (settings, muted) = {
            let state = self.state.lock();
            let Some(settings) = state.settings.clone() else {
                return;
            };
            (settings, state.muted)
        };
        settings.set_muted(muted);
    }
}
