//! Admin endpoints: account management, audit listings, revocation

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::AppState;
use super::types::ApiError;
use crate::domain::store::UserWithKeys;
use crate::domain::user::UserId;

/// Request to register or log in an admin
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response after registering an admin
#[derive(Debug, Clone, Serialize)]
pub struct RegisterAdminResponse {
    pub message: String,
    pub id: i64,
}

/// Response after a successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
}

/// One API key row in the audit listing, status derived at read time
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeyListEntry {
    pub id: i64,
    pub key: String,
    /// Expiry instant, kept under its historical field name
    pub out_of_date: DateTime<Utc>,
    pub status: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

/// Response after a cascading user deletion
#[derive(Debug, Clone, Serialize)]
pub struct DeleteUserResponse {
    pub message: String,
    pub deleted_user_id: i64,
    pub cascade_count: u64,
}

/// Register a new admin account
pub async fn register_admin(
    State(state): State<AppState>,
    Json(request): Json<AdminCredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterAdminResponse>), ApiError> {
    let admin = state
        .admin
        .register(&request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterAdminResponse {
            message: "Admin created".to_string(),
            id: admin.id().get(),
        }),
    ))
}

/// Log in an admin account
pub async fn login_admin(
    State(state): State<AppState>,
    Json(request): Json<AdminCredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match state
        .admin
        .login(&request.email, &request.password)
        .await?
    {
        Some(_) => Ok(Json(LoginResponse {
            message: "Admin login successful".to_string(),
        })),
        None => Err(ApiError::unauthorized("Wrong email or password")),
    }
}

/// List all users with the keys they own
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserWithKeys>>, ApiError> {
    let users = state.store.list_users_with_keys().await?;
    Ok(Json(users))
}

/// List all API keys with owner email and derived status
pub async fn list_api_keys(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiKeyListEntry>>, ApiError> {
    let keys = state.store.list_api_keys_with_owner_email().await?;
    let now = Utc::now();

    let entries = keys
        .into_iter()
        .map(|entry| ApiKeyListEntry {
            id: entry.api_key.id().get(),
            key: entry.api_key.key().to_string(),
            out_of_date: entry.api_key.expires_at(),
            status: state
                .expiry
                .status(entry.api_key.expires_at(), now)
                .to_string(),
            user_email: entry.owner_email,
            created_at: entry.api_key.created_at(),
        })
        .collect();

    Ok(Json(entries))
}

/// Delete a user and all API keys it owns
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<DeleteUserResponse>, ApiError> {
    let revocation = state.revocation.revoke_user(UserId::new(user_id)).await?;

    Ok(Json(DeleteUserResponse {
        message: format!(
            "User {} and all owned API keys have been deleted",
            revocation.deleted_user_id
        ),
        deleted_user_id: revocation.deleted_user_id.get(),
        cascade_count: revocation.cascade_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_list_entry_serialization() {
        let now = Utc::now();
        let entry = ApiKeyListEntry {
            id: 1,
            key: "sk-co-vi-a.1".to_string(),
            out_of_date: now,
            status: "active".to_string(),
            user_email: "ada@x.com".to_string(),
            created_at: now,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"out_of_date\""));
        assert!(json.contains("\"status\":\"active\""));
        assert!(json.contains("\"user_email\":\"ada@x.com\""));
    }

    #[test]
    fn test_admin_credentials_missing_fields_default_to_empty() {
        let request: AdminCredentialsRequest = serde_json::from_str("{}").unwrap();

        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
    }
}
