//! Usage handlers

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::instrument;

use contentmux_core::BillingPeriod;
use contentmux_types::UsageCheck;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::handlers::shared::record_op_duration;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    /// Billing month, `YYYY-MM`
    pub period: String,
    pub period_start: DateTime<Utc>,
    /// When the count resets
    pub resets_at: DateTime<Utc>,
    #[serde(flatten)]
    pub check: UsageCheck,
}

/// GET /api/v1/usage
#[instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn get_usage(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UsageResponse>> {
    let start = Instant::now();

    state
        .guard
        .ensure_user(&auth.user_id, auth.email.as_deref())
        .await?;

    let period = BillingPeriod::current();
    let check = state.guard.check(&auth.user_id, &period).await?;

    record_op_duration("get_usage", start, true);

    Ok(Json(UsageResponse {
        period: period.key(),
        period_start: period.start,
        resets_at: period.end,
        check,
    }))
}
