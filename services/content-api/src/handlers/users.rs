//! Tier administration handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use contentmux_types::{Tier, UserId};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateTierRequest {
    pub tier: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTierResponse {
    pub user_id: String,
    pub previous_tier: Tier,
    pub new_tier: Tier,
}

/// PUT /api/v1/users/{id}/tier (admin only)
///
/// Update user's tier
#[instrument(skip(state, auth, req), fields(admin_id = %auth.user_id))]
pub async fn update_user_tier(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    auth: AuthUser,
    Json(req): Json<UpdateTierRequest>,
) -> ApiResult<Json<UpdateTierResponse>> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    // Strict parse: an unknown tier here is operator error, not a default
    let new_tier: Tier = req
        .tier
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid tier: {}", req.tier)))?;

    let target = UserId::from(user_id);
    let previous_tier = state.guard.set_tier(&target, new_tier).await?;

    tracing::info!(
        user_id = %user_id,
        previous_tier = %previous_tier,
        new_tier = %new_tier,
        "User tier updated"
    );

    Ok(Json(UpdateTierResponse {
        user_id: user_id.to_string(),
        previous_tier,
        new_tier,
    }))
}
