use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use lumina_db::LuminaPool;
use lumina_db::models::CmcCryptocurrency;

use crate::{
    AppState,
    dto::{ApiResponse, LimitQuery},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/cryptocurrencies",
    tag = "Market",
    params(LimitQuery),
    responses(
        (status = 200, description = "CoinMarketCap listings by rank", body = ApiResponse<Vec<CmcCryptocurrency>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_cryptocurrencies(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit();
    let listings = state
        .pool
        .interact_with_context(format!("fetch top {limit} cryptocurrencies by rank"), move |conn| {
            CmcCryptocurrency::find_top_by_rank(limit, conn)
        })
        .await?;

    Ok(Json(ApiResponse::ok(listings)))
}
