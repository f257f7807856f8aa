use axum::Json;
use utoipa::openapi::ServerBuilder;
use utoipa::{Modify, OpenApi};

use lumina_db::models::{
    Chain, CmcCryptocurrency, DexInfo, DexProtocol, FeeInfo, FeeProtocol, PerpInfo, PerpProtocol,
    Protocol, Stablecoin, YieldPool,
};

use crate::dto::{DexOverview, FeeOverview, PerpOverview, ResponseStatus};
use crate::handlers;

pub struct ServerAddon;

impl Modify for ServerAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.servers = Some(vec![ServerBuilder::new().url("/v1").build()]);
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&ServerAddon),
    paths(
        handlers::chains::list_chains,
        handlers::chains::get_chain,
        handlers::overviews::get_chain_dexs,
        handlers::overviews::get_chain_fees,
        handlers::overviews::get_perps,
        handlers::protocols::list_protocols,
        handlers::protocols::get_protocol,
        handlers::stablecoins::list_stablecoins,
        handlers::yield_pools::list_yield_pools,
        handlers::cryptocurrencies::list_cryptocurrencies,
    ),
    components(schemas(
        ResponseStatus,
        Chain,
        Protocol,
        Stablecoin,
        YieldPool,
        CmcCryptocurrency,
        DexInfo,
        DexProtocol,
        FeeInfo,
        FeeProtocol,
        PerpInfo,
        PerpProtocol,
        DexOverview,
        FeeOverview,
        PerpOverview,
    )),
    tags(
        (name = "Chains", description = "Chain TVL snapshots"),
        (name = "Overviews", description = "Dex volume, fees and open-interest rollups"),
        (name = "Protocols", description = "Protocol TVL snapshots"),
        (name = "Stablecoins", description = "Stablecoin supply snapshots"),
        (name = "Yields", description = "Yield pool snapshots"),
        (name = "Market", description = "CoinMarketCap listings"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/chains",
            "/chains/{name}",
            "/chains/{name}/dexs",
            "/chains/{name}/fees",
            "/perps",
            "/protocols",
            "/protocols/{protocol_id}",
            "/stablecoins",
            "/yield-pools",
            "/cryptocurrencies",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
        assert_eq!(doc.servers.unwrap()[0].url, "/v1");
    }
}
