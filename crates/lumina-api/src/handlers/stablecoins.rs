use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use lumina_db::LuminaPool;
use lumina_db::models::Stablecoin;

use crate::{
    AppState,
    dto::{ApiResponse, LimitQuery},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/stablecoins",
    tag = "Stablecoins",
    params(LimitQuery),
    responses(
        (status = 200, description = "Stablecoins by circulating supply, largest first", body = ApiResponse<Vec<Stablecoin>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_stablecoins(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit();
    let stablecoins = state
        .pool
        .interact_with_context(
            format!("fetch top {limit} stablecoins by circulating supply"),
            move |conn| Stablecoin::find_top_by_circulating(limit, conn),
        )
        .await?;

    Ok(Json(ApiResponse::ok(stablecoins)))
}
