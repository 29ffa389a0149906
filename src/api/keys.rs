//! Public endpoints: key generation and user + key issuance

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::AppState;
use super::types::ApiError;
use crate::infrastructure::services::IssuanceRequest;

/// Response for a freshly generated key string
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedKeyResponse {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// Request to create a user with its first API key
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub api_key: String,
}

/// Response after successful issuance
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResponse {
    pub message: String,
    pub user_id: i64,
    pub api_key_id: i64,
}

/// Generate a key string without persisting anything
///
/// The string only becomes a credential once it is bound to a user via
/// the issuance endpoint.
pub async fn generate_key(
    State(state): State<AppState>,
) -> Result<Json<GeneratedKeyResponse>, ApiError> {
    let api_key = state.generator.generate()?;

    debug!("Generated key string");

    Ok(Json(GeneratedKeyResponse { api_key }))
}

/// Create a user together with its first API key, atomically
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let (user, api_key) = state
        .issuance
        .issue(IssuanceRequest {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            key: request.api_key,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User and API key created".to_string(),
            user_id: user.id().get(),
            api_key_id: api_key.id().get(),
        }),
    ))
}
