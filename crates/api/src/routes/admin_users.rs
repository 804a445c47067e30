//! Admin user management routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{CreateUserRequest, CreatedUser, UserRole};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::{BanError, UserAdministration};

/// Response for operations that mutate user records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserOperationResponse {
    pub success: bool,
    pub message: String,
}

/// Request body for role reassignment.
#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: UserRole,
}

/// Request body for password reset.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// GET /api/admin/v1/users
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let admin = UserAdministration::new(state.pool.clone());
    let users = admin.list_users().await?;
    Ok(Json(users))
}

/// GET /api/admin/v1/users/:user_id
///
/// Role record plus statistics. `stats` is null when the statistics fetch
/// failed, which is distinct from a user with zero activity.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = UserAdministration::new(state.pool.clone());
    match admin.get_user_with_stats(user_id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound("User not found".to_string())),
    }
}

/// Extract the created user from a `create-user` function response.
fn parse_created_user(response: &serde_json::Value) -> Result<CreatedUser, ApiError> {
    let payload = response.get("user").cloned().ok_or_else(|| {
        ApiError::Upstream("create-user answered without a user payload".to_string())
    })?;

    serde_json::from_value(payload)
        .map_err(|e| ApiError::Upstream(format!("Malformed create-user response: {}", e)))
}

/// POST /api/admin/v1/users
///
/// Account creation is delegated to the `create-user` function on the
/// collaborator platform; the role record lives in this store and is written
/// here once the account exists. A failed role write leaves the remote
/// account without a local record and is surfaced to the operator.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let Some(functions) = state.functions_client.clone() else {
        return Err(ApiError::ServiceUnavailable(
            "User creation is not configured".to_string(),
        ));
    };

    let payload = serde_json::json!({
        "email": request.email,
        "password": request.password,
        "fullName": request.full_name,
        "role": request.role,
    });

    let response = functions.invoke("create-user", &payload).await?;
    let user = parse_created_user(&response)?;

    let admin = UserAdministration::new(state.pool.clone());
    if let Err(e) = admin.register_created_user(user.id, request.role).await {
        warn!(user_id = %user.id, error = %e, "Account created remotely, but role record write failed");
        return Err(ApiError::Internal(format!(
            "User {} was created, but recording the role failed: {}",
            user.email, e
        )));
    }

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/admin/v1/users/:user_id/ban
///
/// Two-phase: set the banned flag, then close active sessions. A phase-2
/// failure leaves the flag set and reports which mutation failed.
pub async fn ban_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = UserAdministration::new(state.pool.clone());
    match admin.ban_user(user_id).await {
        Ok(closed) => Ok(Json(UserOperationResponse {
            success: true,
            message: format!("User banned; {} active sessions closed", closed),
        })),
        Err(BanError::UnknownUser) => Err(ApiError::NotFound("User not found".to_string())),
        Err(e @ BanError::RoleUpdate(_)) => Err(ApiError::Internal(e.to_string())),
        Err(e @ BanError::SessionClose(_)) => {
            warn!(user_id = %user_id, error = %e, "Ban left in partial state");
            Err(ApiError::Internal(e.to_string()))
        }
    }
}

/// POST /api/admin/v1/users/:user_id/unban
pub async fn unban_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = UserAdministration::new(state.pool.clone());
    let updated = admin.unban_user(user_id).await?;
    if updated == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    Ok(Json(UserOperationResponse {
        success: true,
        message: "User unbanned".to_string(),
    }))
}

/// PUT /api/admin/v1/users/:user_id/role
pub async fn change_user_role(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<ChangeRoleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let admin = UserAdministration::new(state.pool.clone());
    let updated = admin.change_user_role(user_id, request.role).await?;
    if updated == 0 {
        return Err(ApiError::NotFound("User not found".to_string()));
    }
    Ok(Json(UserOperationResponse {
        success: true,
        message: format!("Role changed to {}", request.role),
    }))
}

/// POST /api/admin/v1/users/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let Some(auth) = state.auth_client.clone() else {
        return Err(ApiError::ServiceUnavailable(
            "Password reset is not configured".to_string(),
        ));
    };

    auth.reset_password_for_email(&request.email).await?;

    Ok(Json(UserOperationResponse {
        success: true,
        message: "Password reset email sent".to_string(),
    }))
}
