//! Application state for shared services

use std::sync::Arc;

use crate::domain::api_key::ExpiryPolicy;
use crate::domain::store::CredentialStore;
use crate::infrastructure::api_key::KeyGenerator;
use crate::infrastructure::services::{AdminService, IssuanceService, RevocationService};

/// Application state containing shared services
///
/// The store handle is injected at startup; nothing in the request path
/// reaches for process-global state, so tests can assemble a state over an
/// in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub issuance: Arc<IssuanceService>,
    pub revocation: Arc<RevocationService>,
    pub admin: Arc<AdminService>,
    pub generator: Arc<KeyGenerator>,
    pub expiry: ExpiryPolicy,
}

impl AppState {
    /// Assemble the full service graph over a store handle
    pub fn new(
        store: Arc<dyn CredentialStore>,
        generator: KeyGenerator,
        expiry: ExpiryPolicy,
    ) -> Self {
        Self {
            issuance: Arc::new(IssuanceService::new(store.clone(), expiry)),
            revocation: Arc::new(RevocationService::new(store.clone())),
            admin: Arc::new(AdminService::new(store.clone())),
            generator: Arc::new(generator),
            expiry,
            store,
        }
    }
}
