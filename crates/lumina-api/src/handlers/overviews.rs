use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use diesel::{PgConnection, QueryResult};
use lumina_db::LuminaPool;
use lumina_db::models::{Chain, DexInfo, FeeInfo, OverviewKind, PerpInfo};

use crate::{
    AppState,
    dto::{ApiResponse, DexOverview, FeeOverview, LimitQuery, PerpOverview},
    errors::{ApiError, DatabaseErrorExt},
    handlers::required_segment,
};

type Loader<I, P> = fn(Option<i32>, i64, &mut PgConnection) -> QueryResult<(I, Vec<P>)>;

/// Resolves the chain, then loads its overview of `kind` with the top protocols.
async fn load_chain_overview<I, P>(
    state: &AppState,
    kind: OverviewKind,
    name: &str,
    limit: i64,
    loader: Loader<I, P>,
) -> Result<(String, I, Vec<P>), ApiError>
where
    I: Send + 'static,
    P: Send + 'static,
{
    let name = required_segment(name, "Chain name")?;
    let lookup = name.clone();
    let chain = state
        .pool
        .interact_with_context(format!("find chain {name}"), move |conn| {
            Chain::find_by_name(&lookup, conn)
        })
        .await
        .map_err(|e| e.or_not_found(format!("Chain {name} not found")))?;

    let (info, protocols) = state
        .pool
        .interact_with_context(format!("load {kind} overview for {name}"), move |conn| {
            loader(Some(chain.idx), limit, conn)
        })
        .await
        .map_err(|e| e.or_not_found(format!("No {kind} overview stored for chain {name}")))?;

    Ok((chain.name, info, protocols))
}

#[utoipa::path(
    get,
    path = "/chains/{name}/dexs",
    tag = "Overviews",
    params(
        ("name" = String, Path, description = "Chain name as reported by DefiLlama"),
        LimitQuery
    ),
    responses(
        (status = 200, description = "Dex volume rollup with protocols by 24h volume", body = ApiResponse<DexOverview>),
        (status = 404, description = "Chain or overview not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_chain_dexs(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (chain, info, protocols) = load_chain_overview(
        &state,
        OverviewKind::Dex,
        &name,
        query.limit(),
        DexInfo::load_with_protocols,
    )
    .await?;

    Ok(Json(ApiResponse::ok(DexOverview {
        chain,
        info,
        protocols,
    })))
}

#[utoipa::path(
    get,
    path = "/chains/{name}/fees",
    tag = "Overviews",
    params(
        ("name" = String, Path, description = "Chain name as reported by DefiLlama"),
        LimitQuery
    ),
    responses(
        (status = 200, description = "Fees rollup with protocols by 24h fees", body = ApiResponse<FeeOverview>),
        (status = 404, description = "Chain or overview not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_chain_fees(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (chain, info, protocols) = load_chain_overview(
        &state,
        OverviewKind::Fee,
        &name,
        query.limit(),
        FeeInfo::load_with_protocols,
    )
    .await?;

    Ok(Json(ApiResponse::ok(FeeOverview {
        chain,
        info,
        protocols,
    })))
}

#[utoipa::path(
    get,
    path = "/perps",
    tag = "Overviews",
    params(LimitQuery),
    responses(
        (status = 200, description = "Global open-interest rollup with protocols", body = ApiResponse<PerpOverview>),
        (status = 404, description = "No open-interest overview stored yet"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_perps(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit();
    let (info, protocols) = state
        .pool
        .interact_with_context("load perp overview".to_string(), move |conn| {
            PerpInfo::load_with_protocols(None, limit, conn)
        })
        .await
        .map_err(|e| e.or_not_found("No open-interest overview stored yet".to_string()))?;

    Ok(Json(ApiResponse::ok(PerpOverview { info, protocols })))
}
