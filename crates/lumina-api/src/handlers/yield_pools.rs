use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use lumina_db::LuminaPool;
use lumina_db::models::YieldPool;

use crate::{
    AppState,
    dto::{ApiResponse, YieldPoolQuery},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/yield-pools",
    tag = "Yields",
    params(YieldPoolQuery),
    responses(
        (status = 200, description = "Yield pools ordered by TVL, highest first", body = ApiResponse<Vec<YieldPool>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_yield_pools(
    State(state): State<AppState>,
    Query(query): Query<YieldPoolQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit();
    let chain = query.chain().map(str::to_string);
    let operation = match &chain {
        Some(chain) => format!("fetch top {limit} yield pools on {chain}"),
        None => format!("fetch top {limit} yield pools"),
    };
    let pools = state
        .pool
        .interact_with_context(operation, move |conn| {
            YieldPool::find_top_by_tvl(chain.as_deref(), limit, conn)
        })
        .await?;

    Ok(Json(ApiResponse::ok(pools)))
}
