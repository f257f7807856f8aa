use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::lenient;

/// Sort orders accepted by the listings endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ListingSort {
    Name,
    Symbol,
    DateAdded,
    #[default]
    MarketCap,
    MarketCapStrict,
    Price,
    CirculatingSupply,
    TotalSupply,
    MaxSupply,
    NumMarketPairs,
    #[strum(serialize = "volume_24h")]
    Volume24h,
    #[strum(serialize = "percent_change_1h")]
    PercentChange1h,
    #[strum(serialize = "percent_change_24h")]
    PercentChange24h,
    #[strum(serialize = "percent_change_7d")]
    PercentChange7d,
    MarketCapByTotalSupplyStrict,
    #[strum(serialize = "volume_7d")]
    Volume7d,
    #[strum(serialize = "volume_30d")]
    Volume30d,
}

/// Entry of `GET /v1/cryptocurrency/listings/latest`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmcListing {
    #[serde(default, rename = "id", deserialize_with = "lenient::i32_opt")]
    pub cmc_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub num_market_pairs: Option<i32>,
    #[serde(default, deserialize_with = "lenient::datetime_opt")]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::string_vec_opt")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub max_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub circulating_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub total_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub infinite_supply: Option<bool>,
    #[serde(default, deserialize_with = "lenient::json_opt")]
    pub platform: Option<Value>,
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub cmc_rank: Option<i32>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub self_reported_circulating_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal_opt")]
    pub self_reported_market_cap: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub tvl_ratio: Option<f64>,
    #[serde(default, deserialize_with = "lenient::datetime_opt")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::json_opt")]
    pub quote: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmcStatus {
    #[serde(default, deserialize_with = "lenient::i32_opt")]
    pub error_code: Option<i32>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmcListingsEnvelope {
    #[serde(default, deserialize_with = "lenient::skip_invalid")]
    pub data: Vec<CmcListing>,
    #[serde(default)]
    pub status: Option<CmcStatus>,
}
