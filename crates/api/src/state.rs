#![forbid(unsafe_code)]

use crate::auth::IdentityProvider;
use crate::error::{ApiError, ApiResult};
use cp_core::AgencyType;
use cp_storage::{SqliteStore, StoreError};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy)]
pub struct ApiSettings {
    /// Agencies of this type form the institution statistics dimension.
    pub institution_type: AgencyType,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            institution_type: AgencyType::Central,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<SqliteStore>>,
    pub identity: Arc<IdentityProvider>,
    pub settings: ApiSettings,
}

impl AppState {
    pub fn new(store: SqliteStore, identity: IdentityProvider, settings: ApiSettings) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            identity: Arc::new(identity),
            settings,
        }
    }

    /// Runs one store operation on the blocking pool. The connection is
    /// serialized behind the mutex; each operation owns its transaction.
    pub async fn with_store<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&mut SqliteStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || {
            let mut guard = store
                .lock()
                .map_err(|_| ApiError::internal("store mutex poisoned"))?;
            op(&mut *guard).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::internal(format!("store task failed: {err}")))?
    }
}
