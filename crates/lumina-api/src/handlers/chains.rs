use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use lumina_db::LuminaPool;
use lumina_db::models::Chain;

use crate::{
    AppState,
    dto::{ApiResponse, LimitQuery},
    errors::{ApiError, DatabaseErrorExt},
    handlers::required_segment,
};

#[utoipa::path(
    get,
    path = "/chains",
    tag = "Chains",
    params(LimitQuery),
    responses(
        (status = 200, description = "Chains ordered by TVL, highest first", body = ApiResponse<Vec<Chain>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_chains(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit();
    let chains = state
        .pool
        .interact_with_context(format!("fetch top {limit} chains by tvl"), move |conn| {
            Chain::find_top_by_tvl(limit, conn)
        })
        .await?;

    Ok(Json(ApiResponse::ok(chains)))
}

#[utoipa::path(
    get,
    path = "/chains/{name}",
    tag = "Chains",
    params(
        ("name" = String, Path, description = "Chain name as reported by DefiLlama, e.g. Ethereum")
    ),
    responses(
        (status = 200, description = "Chain snapshot", body = ApiResponse<Chain>),
        (status = 400, description = "Blank chain name"),
        (status = 404, description = "Chain not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_chain(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let name = required_segment(&name, "Chain name")?;
    let lookup = name.clone();
    let chain = state
        .pool
        .interact_with_context(format!("find chain {name}"), move |conn| {
            Chain::find_by_name(&lookup, conn)
        })
        .await
        .map_err(|e| e.or_not_found(format!("Chain {name} not found")))?;

    Ok(Json(ApiResponse::ok(chain)))
}
