use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

/// Entry of `GET /v2/chains`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResponse {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub name: Option<String>,
    #[serde(default, rename = "gecko_id", deserialize_with = "lenient::string_opt")]
    pub gecko_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub tvl: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub token_symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub cmc_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub chain_id: Option<String>,
}

/// Entry of `GET /protocols`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolResponse {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub chains: Vec<String>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub tvl: Option<f64>,
    #[serde(default, deserialize_with = "lenient::json_opt")]
    pub chain_tvls: Option<Value>,
    #[serde(default, rename = "change_1d", deserialize_with = "lenient::f64_opt")]
    pub change_1d: Option<f64>,
    #[serde(default, rename = "change_7d", deserialize_with = "lenient::f64_opt")]
    pub change_7d: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeggedAmount {
    #[serde(default, rename = "peggedUSD", deserialize_with = "lenient::decimal_opt")]
    pub pegged_usd: Option<Decimal>,
}

/// Entry of the `peggedAssets` list of `GET /stablecoins`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StablecoinResponse {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub gecko_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub peg_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub price_source: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub peg_mechanism: Option<String>,
    #[serde(default)]
    pub circulating: Option<PeggedAmount>,
    #[serde(default)]
    pub circulating_prev_day: Option<PeggedAmount>,
    #[serde(default)]
    pub circulating_prev_week: Option<PeggedAmount>,
    #[serde(default)]
    pub circulating_prev_month: Option<PeggedAmount>,
    #[serde(default, deserialize_with = "lenient::json_opt")]
    pub chain_circulating: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub chains: Vec<String>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StablecoinsEnvelope {
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub pegged_assets: Vec<StablecoinResponse>,
}

/// Entry of the `data` list of `GET /pools` on the yields API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPoolResponse {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub pool: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub chain: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub tvl_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub apy_base: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub apy_reward: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub apy: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string_vec_opt")]
    pub reward_tokens: Option<Vec<String>>,
    #[serde(default, rename = "apyPct1D", deserialize_with = "lenient::f64_opt")]
    pub apy_pct_1d: Option<f64>,
    #[serde(default, rename = "apyPct7D", deserialize_with = "lenient::f64_opt")]
    pub apy_pct_7d: Option<f64>,
    #[serde(default, rename = "apyPct30D", deserialize_with = "lenient::f64_opt")]
    pub apy_pct_30d: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub stablecoin: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub il_risk: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub exposure: Option<String>,
    #[serde(default, deserialize_with = "lenient::json_opt")]
    pub predictions: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub pool_meta: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub mu: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub sigma: Option<f64>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub count: Option<i32>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub outlier: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string_vec_opt")]
    pub underlying_tokens: Option<Vec<String>>,
    #[serde(default, rename = "il7d", deserialize_with = "lenient::f64_opt")]
    pub il_7d: Option<f64>,
    #[serde(default, rename = "apyBase7d", deserialize_with = "lenient::f64_opt")]
    pub apy_base_7d: Option<f64>,
    #[serde(default, rename = "apyMean30d", deserialize_with = "lenient::f64_opt")]
    pub apy_mean_30d: Option<f64>,
    #[serde(default, rename = "volumeUsd1d", deserialize_with = "lenient::decimal_opt")]
    pub volume_usd_1d: Option<Decimal>,
    #[serde(default, rename = "volumeUsd7d", deserialize_with = "lenient::decimal_opt")]
    pub volume_usd_7d: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub apy_base_inception: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct YieldPoolsEnvelope {
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub data: Vec<YieldPoolResponse>,
}

/// Time-windowed totals and changes shared by overviews and their protocols.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewTotals {
    #[serde(default, rename = "total24h", deserialize_with = "lenient::decimal_opt")]
    pub total_24h: Option<Decimal>,
    #[serde(default, rename = "total48hto24h", deserialize_with = "lenient::decimal_opt")]
    pub total_48h_to_24h: Option<Decimal>,
    #[serde(default, rename = "total7d", deserialize_with = "lenient::decimal_opt")]
    pub total_7d: Option<Decimal>,
    #[serde(default, rename = "total14dto7d", deserialize_with = "lenient::decimal_opt")]
    pub total_14d_to_7d: Option<Decimal>,
    #[serde(default, rename = "total60dto30d", deserialize_with = "lenient::decimal_opt")]
    pub total_60d_to_30d: Option<Decimal>,
    #[serde(default, rename = "total30d", deserialize_with = "lenient::decimal_opt")]
    pub total_30d: Option<Decimal>,
    #[serde(default, rename = "total1y", deserialize_with = "lenient::decimal_opt")]
    pub total_1y: Option<Decimal>,
    #[serde(default, rename = "totalAllTime", deserialize_with = "lenient::decimal_opt")]
    pub total_all_time: Option<Decimal>,
    #[serde(default, rename = "change_1d", deserialize_with = "lenient::f64_opt")]
    pub change_1d: Option<f64>,
    #[serde(default, rename = "change_7d", deserialize_with = "lenient::f64_opt")]
    pub change_7d: Option<f64>,
    #[serde(default, rename = "change_1m", deserialize_with = "lenient::f64_opt")]
    pub change_1m: Option<f64>,
    #[serde(default, rename = "change_7dover7d", deserialize_with = "lenient::f64_opt")]
    pub change_7d_over_7d: Option<f64>,
    #[serde(default, rename = "change_30dover30d", deserialize_with = "lenient::f64_opt")]
    pub change_30d_over_30d: Option<f64>,
    #[serde(default, rename = "total7DaysAgo", deserialize_with = "lenient::decimal_opt")]
    pub total_7_days_ago: Option<Decimal>,
    #[serde(default, rename = "total30DaysAgo", deserialize_with = "lenient::decimal_opt")]
    pub total_30_days_ago: Option<Decimal>,
    #[serde(default, rename = "breakdown24h", deserialize_with = "lenient::json_opt")]
    pub breakdown_24h: Option<Value>,
    #[serde(default, rename = "breakdown30d", deserialize_with = "lenient::json_opt")]
    pub breakdown_30d: Option<Value>,
}

/// Protocol entry of a dex, fee or open-interest overview.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewProtocolResponse {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub defillama_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub module: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub chains: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub protocol_type: Option<String>,
    #[serde(default, rename = "methodologyURL", deserialize_with = "lenient::string_opt")]
    pub methodology_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::json_opt")]
    pub methodology: Option<Value>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub parent_protocol: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_vec_opt")]
    pub linked_protocols: Option<Vec<String>>,
    #[serde(default, rename = "average1y", deserialize_with = "lenient::decimal_opt")]
    pub average_1y: Option<Decimal>,
    #[serde(default, rename = "monthlyAverage1y", deserialize_with = "lenient::decimal_opt")]
    pub monthly_average_1y: Option<Decimal>,
    #[serde(flatten)]
    pub totals: OverviewTotals,
}

/// Body of `GET /overview/{dexs,fees}/{chain}` and `GET /overview/open-interest`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub chain: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_vec")]
    pub all_chains: Vec<String>,
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub protocols: Vec<OverviewProtocolResponse>,
    #[serde(flatten)]
    pub totals: OverviewTotals,
}
