//! covi-keys
//!
//! API key issuance and management service:
//! - Atomic user + first-key issuance with store-enforced uniqueness
//! - Calendar-year expiry with status derived at read time
//! - Cascading revocation of a user and all keys it owns
//! - Admin accounts for auditing and revocation

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::info;

use api::AppState;
use domain::api_key::ExpiryPolicy;
use infrastructure::api_key::KeyGenerator;
use infrastructure::store::{PostgresConfig, PostgresCredentialStore};

/// Create the application state backed by PostgreSQL
///
/// Connects, applies pending migrations, then wires the service graph
/// around the store handle.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pg_config = PostgresConfig::new(config.database_url())
        .with_max_connections(config.database.max_connections);

    info!("Connecting to PostgreSQL...");
    let store = PostgresCredentialStore::connect(&pg_config).await?;
    info!("PostgreSQL connection established");

    store.run_migrations().await?;
    info!("Schema migrations applied");

    Ok(AppState::new(
        Arc::new(store),
        KeyGenerator::new(&config.keys.prefix),
        ExpiryPolicy::with_validity_years(config.keys.validity_years),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::KeyStatus;
    use infrastructure::services::IssuanceRequest;
    use infrastructure::store::InMemoryCredentialStore;

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(InMemoryCredentialStore::new()),
            KeyGenerator::default(),
            ExpiryPolicy::new(),
        )
    }

    #[tokio::test]
    async fn test_issue_list_revoke_scenario() {
        let state = test_state();

        let (user, _) = state
            .issuance
            .issue(IssuanceRequest {
                first_name: "Ada".to_string(),
                last_name: Some("Lovelace".to_string()),
                email: "ada@x.com".to_string(),
                key: "sk-co-vi-abc.XYZ".to_string(),
            })
            .await
            .unwrap();

        let users = state.store.list_users_with_keys().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].api_keys.len(), 1);
        assert_eq!(users[0].api_keys[0].key, "sk-co-vi-abc.XYZ");
        assert_eq!(
            state
                .expiry
                .status(users[0].api_keys[0].expires_at, Utc::now()),
            KeyStatus::Active
        );

        let revocation = state.revocation.revoke_user(user.id()).await.unwrap();
        assert_eq!(revocation.cascade_count, 1);

        assert!(state.store.list_users_with_keys().await.unwrap().is_empty());
        assert!(state
            .store
            .list_api_keys_with_owner_email()
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_generated_keys_can_be_issued() {
        let state = test_state();
        let key = state.generator.generate().unwrap();

        let (_, api_key) = state
            .issuance
            .issue(IssuanceRequest {
                first_name: "Grace".to_string(),
                last_name: None,
                email: "grace@x.com".to_string(),
                key: key.clone(),
            })
            .await
            .unwrap();

        assert_eq!(api_key.key(), key);
    }
}
