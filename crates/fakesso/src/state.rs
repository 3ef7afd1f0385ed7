//! Shared application state.
//!
//! Cloned for each request handler. Holds the settings handle and the identity
//! store behind its repository trait object.

use std::sync::{Arc, PoisonError, RwLock};

use fakesso_core::settings::{SettingKey, SettingValue, Settings};
use fakesso_core::storage::IdentityRepository;

#[derive(Clone)]
pub struct AppState {
    settings: Arc<RwLock<Settings>>,
    /// Identity store (SQLite in production, in-memory in tests).
    pub identities: Arc<dyn IdentityRepository>,
}

impl AppState {
    pub fn new(settings: Settings, identities: Arc<dyn IdentityRepository>) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            identities,
        }
    }

    /// A copy of the current settings, taken once per request.
    pub fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace one setting on the live handle.
    ///
    /// Requests already in flight keep the snapshot they started with.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn override_setting(&self, key: SettingKey, value: impl Into<SettingValue>) {
        self.settings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(key, value);
    }
}
