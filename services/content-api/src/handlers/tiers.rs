//! Pricing handlers
//!
//! Public, read-only views of the tier registry.

use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use contentmux_types::{all_tiers, Tier, TierRecord};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
pub struct TiersResponse {
    pub tiers: &'static [TierRecord],
}

/// GET /api/v1/tiers
pub async fn list_tiers() -> Json<TiersResponse> {
    Json(TiersResponse { tiers: all_tiers() })
}

/// GET /api/v1/tiers/{id}
///
/// Unknown identifiers are rejected here rather than resolved to trial.
pub async fn get_tier(Path(tier_id): Path<String>) -> ApiResult<Json<&'static TierRecord>> {
    let tier: Tier = tier_id
        .parse()
        .map_err(|e: contentmux_types::TierParseError| ApiError::BadRequest(e.to_string()))?;

    Ok(Json(tier.record()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_tiers_is_ordered() {
        let Json(response) = list_tiers().await;
        let ids: Vec<Tier> = response.tiers.iter().map(|r| r.tier).collect();
        assert_eq!(ids, Tier::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_get_tier_is_strict() {
        let Json(record) = get_tier(Path("pro".to_string())).await.unwrap();
        assert_eq!(record.tier, Tier::Pro);

        let err = get_tier(Path("gold".to_string())).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
