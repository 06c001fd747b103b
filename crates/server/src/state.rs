//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::records::RecordService;
use crate::services::AuthService;
use crate::store::DocumentStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the document store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the document store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.inner.store
    }

    /// Build a record service over the shared store.
    #[must_use]
    pub fn records(&self) -> RecordService {
        RecordService::new(self.inner.store.clone())
    }

    /// Build an auth service over the shared store.
    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.inner.store.clone())
    }
}
