//! Conversion of API responses into insertable rows.
//!
//! Every mapper is total over the lenient response types: missing values stay
//! `None`, missing arrays become empty. Rows lacking their natural key cannot be
//! upserted and are dropped by the `map_*` functions, which return `None`.

use lumina_db::models::{
    NewChain, NewCmcCryptocurrency, NewProtocol, NewStablecoin, NewYieldPool,
    OverviewInfoRecord, OverviewProtocolRecord, OverviewSnapshot,
};
use lumina_sources::{
    ChainResponse, CmcListing, OverviewProtocolResponse, OverviewResponse, OverviewTotals,
    PeggedAmount, ProtocolResponse, StablecoinResponse, YieldPoolResponse,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

/// Keeps non-blank keys only.
fn natural_key(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn pegged_usd(amount: Option<PeggedAmount>) -> Option<Decimal> {
    amount.and_then(|a| a.pegged_usd)
}

pub fn map_chain(chain: ChainResponse) -> Option<NewChain> {
    Some(NewChain {
        name: natural_key(chain.name)?,
        gecko_id: chain.gecko_id,
        tvl: chain.tvl.unwrap_or(Decimal::ZERO),
        token_symbol: chain.token_symbol,
        cmc_id: chain.cmc_id,
        chain_id: chain.chain_id,
    })
}

pub fn map_protocol(protocol: ProtocolResponse) -> Option<NewProtocol> {
    let protocol_id = natural_key(protocol.id)?;
    Some(NewProtocol {
        name: protocol.name.unwrap_or_else(|| protocol_id.clone()),
        protocol_id,
        symbol: protocol.symbol,
        category: protocol.category,
        chains: protocol.chains,
        tvl: protocol.tvl,
        chain_tvls: protocol
            .chain_tvls
            .unwrap_or_else(|| Value::Object(Map::new())),
        change_1d: protocol.change_1d,
        change_7d: protocol.change_7d,
    })
}

pub fn map_stablecoin(stablecoin: StablecoinResponse) -> Option<NewStablecoin> {
    Some(NewStablecoin {
        symbol: natural_key(stablecoin.symbol)?,
        gecko_id: stablecoin.gecko_id,
        name: stablecoin.name,
        peg_type: stablecoin.peg_type,
        price_source: stablecoin.price_source,
        peg_mechanism: stablecoin.peg_mechanism,
        circulating_pegged_usd: pegged_usd(stablecoin.circulating),
        circulating_prev_day_pegged_usd: pegged_usd(stablecoin.circulating_prev_day),
        circulating_prev_week_pegged_usd: pegged_usd(stablecoin.circulating_prev_week),
        circulating_prev_month_pegged_usd: pegged_usd(stablecoin.circulating_prev_month),
        chain_circulating: stablecoin.chain_circulating,
        chains: stablecoin.chains,
        price: stablecoin.price,
    })
}

pub fn map_yield_pool(pool: YieldPoolResponse) -> Option<NewYieldPool> {
    Some(NewYieldPool {
        pool: natural_key(pool.pool)?,
        chain: pool.chain.unwrap_or_default(),
        project: pool.project.unwrap_or_default(),
        symbol: pool.symbol.unwrap_or_default(),
        tvl_usd: pool.tvl_usd,
        apy_base: pool.apy_base,
        apy_reward: pool.apy_reward,
        apy: pool.apy,
        reward_tokens: pool.reward_tokens,
        apy_pct_1d: pool.apy_pct_1d,
        apy_pct_7d: pool.apy_pct_7d,
        apy_pct_30d: pool.apy_pct_30d,
        stablecoin: pool.stablecoin.unwrap_or(false),
        il_risk: pool.il_risk,
        exposure: pool.exposure,
        predictions: pool.predictions,
        pool_meta: pool.pool_meta,
        mu: pool.mu,
        sigma: pool.sigma,
        observation_count: pool.count,
        outlier: pool.outlier.unwrap_or(false),
        underlying_tokens: pool.underlying_tokens,
        il_7d: pool.il_7d,
        apy_base_7d: pool.apy_base_7d,
        apy_mean_30d: pool.apy_mean_30d,
        volume_usd_1d: pool.volume_usd_1d,
        volume_usd_7d: pool.volume_usd_7d,
        apy_base_inception: pool.apy_base_inception,
    })
}

fn map_overview_info(all_chains: Vec<String>, totals: OverviewTotals) -> OverviewInfoRecord {
    OverviewInfoRecord {
        all_chains,
        total_24h: totals.total_24h,
        total_48h_to_24h: totals.total_48h_to_24h,
        total_7d: totals.total_7d,
        total_14d_to_7d: totals.total_14d_to_7d,
        total_60d_to_30d: totals.total_60d_to_30d,
        total_30d: totals.total_30d,
        total_1y: totals.total_1y,
        total_all_time: totals.total_all_time,
        change_1d: totals.change_1d,
        change_7d: totals.change_7d,
        change_1m: totals.change_1m,
        change_7d_over_7d: totals.change_7d_over_7d,
        change_30d_over_30d: totals.change_30d_over_30d,
        total_7_days_ago: totals.total_7_days_ago,
        total_30_days_ago: totals.total_30_days_ago,
        breakdown_24h: totals.breakdown_24h,
        breakdown_30d: totals.breakdown_30d,
    }
}

pub fn map_overview_protocol(protocol: OverviewProtocolResponse) -> Option<OverviewProtocolRecord> {
    let defillama_id = natural_key(protocol.defillama_id)?;
    let totals = protocol.totals;
    Some(OverviewProtocolRecord {
        name: protocol
            .name
            .or_else(|| protocol.display_name.clone())
            .unwrap_or_else(|| defillama_id.clone()),
        defillama_id,
        display_name: protocol.display_name,
        module: protocol.module,
        category: protocol.category,
        logo: protocol.logo,
        chains: protocol.chains,
        protocol_type: protocol.protocol_type,
        methodology_url: protocol.methodology_url,
        methodology: protocol.methodology,
        parent_protocol: protocol.parent_protocol,
        slug: protocol.slug,
        linked_protocols: protocol.linked_protocols,
        external_id: protocol.id,
        total_24h: totals.total_24h,
        total_48h_to_24h: totals.total_48h_to_24h,
        total_7d: totals.total_7d,
        total_14d_to_7d: totals.total_14d_to_7d,
        total_60d_to_30d: totals.total_60d_to_30d,
        total_30d: totals.total_30d,
        total_1y: totals.total_1y,
        total_all_time: totals.total_all_time,
        average_1y: protocol.average_1y,
        monthly_average_1y: protocol.monthly_average_1y,
        change_1d: totals.change_1d,
        change_7d: totals.change_7d,
        change_1m: totals.change_1m,
        change_7d_over_7d: totals.change_7d_over_7d,
        change_30d_over_30d: totals.change_30d_over_30d,
        total_7_days_ago: totals.total_7_days_ago,
        total_30_days_ago: totals.total_30_days_ago,
        breakdown_24h: totals.breakdown_24h,
        breakdown_30d: totals.breakdown_30d,
    })
}

/// Builds the snapshot written for one overview response.
///
/// `requested_chain` is the chain the overview was fetched for, `None` for the
/// global open-interest overview. A chain-scoped snapshot is keyed by the chain
/// name echoed in the response, falling back to the requested one.
pub fn map_overview(requested_chain: Option<&str>, response: OverviewResponse) -> OverviewSnapshot {
    let chain = requested_chain
        .map(|requested| natural_key(response.chain).unwrap_or_else(|| requested.to_string()));
    OverviewSnapshot {
        chain,
        info: map_overview_info(response.all_chains, response.totals),
        protocols: response
            .protocols
            .into_iter()
            .filter_map(map_overview_protocol)
            .collect(),
    }
}

pub fn map_cmc_listing(listing: CmcListing) -> NewCmcCryptocurrency {
    NewCmcCryptocurrency {
        cmc_id: listing.cmc_id,
        name: listing.name,
        symbol: listing.symbol,
        slug: listing.slug,
        num_market_pairs: listing.num_market_pairs,
        date_added: listing.date_added,
        tags: listing.tags,
        max_supply: listing.max_supply,
        circulating_supply: listing.circulating_supply,
        total_supply: listing.total_supply,
        infinite_supply: listing.infinite_supply,
        platform: listing.platform,
        cmc_rank: listing.cmc_rank,
        self_reported_circulating_supply: listing.self_reported_circulating_supply,
        self_reported_market_cap: listing.self_reported_market_cap,
        tvl_ratio: listing.tvl_ratio,
        last_updated: listing.last_updated,
        quote: listing.quote,
    }
}

/// Maps a whole batch, returning the rows and how many entries were dropped.
pub fn map_all<T, R>(items: Vec<T>, mapper: impl Fn(T) -> Option<R>) -> (Vec<R>, usize) {
    let total = items.len();
    let rows: Vec<R> = items.into_iter().filter_map(mapper).collect();
    let dropped = total - rows.len();
    (rows, dropped)
}
