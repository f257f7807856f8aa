use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use lumina_db::LuminaPool;
use lumina_db::models::Protocol;

use crate::{
    AppState,
    dto::{ApiResponse, LimitQuery},
    errors::{ApiError, DatabaseErrorExt},
    handlers::required_segment,
};

#[utoipa::path(
    get,
    path = "/protocols",
    tag = "Protocols",
    params(LimitQuery),
    responses(
        (status = 200, description = "Protocols ordered by TVL, highest first", body = ApiResponse<Vec<Protocol>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_protocols(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit();
    let protocols = state
        .pool
        .interact_with_context(format!("fetch top {limit} protocols by tvl"), move |conn| {
            Protocol::find_top_by_tvl(limit, conn)
        })
        .await?;

    Ok(Json(ApiResponse::ok(protocols)))
}

#[utoipa::path(
    get,
    path = "/protocols/{protocol_id}",
    tag = "Protocols",
    params(
        ("protocol_id" = String, Path, description = "DefiLlama protocol id")
    ),
    responses(
        (status = 200, description = "Protocol snapshot", body = ApiResponse<Protocol>),
        (status = 400, description = "Blank protocol id"),
        (status = 404, description = "Protocol not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_protocol(
    State(state): State<AppState>,
    Path(protocol_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let protocol_id = required_segment(&protocol_id, "Protocol id")?;
    let lookup = protocol_id.clone();
    let protocol = state
        .pool
        .interact_with_context(format!("find protocol {protocol_id}"), move |conn| {
            Protocol::find_by_protocol_id(&lookup, conn)
        })
        .await
        .map_err(|e| e.or_not_found(format!("Protocol {protocol_id} not found")))?;

    Ok(Json(ApiResponse::ok(protocol)))
}
