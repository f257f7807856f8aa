use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::cmc_cryptocurrencies;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = cmc_cryptocurrencies)]
#[diesel(primary_key(idx))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CmcCryptocurrency {
    pub idx: i32,
    pub cmc_id: Option<i32>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub slug: Option<String>,
    pub num_market_pairs: Option<i32>,
    pub date_added: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub max_supply: Option<Decimal>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub infinite_supply: Option<bool>,
    pub platform: Option<serde_json::Value>,
    pub cmc_rank: Option<i32>,
    pub self_reported_circulating_supply: Option<Decimal>,
    pub self_reported_market_cap: Option<Decimal>,
    pub tvl_ratio: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Quotes keyed by convert currency (`USD`, ...).
    pub quote: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = cmc_cryptocurrencies)]
#[diesel(treat_none_as_null = true)]
pub struct NewCmcCryptocurrency {
    pub cmc_id: Option<i32>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub slug: Option<String>,
    pub num_market_pairs: Option<i32>,
    pub date_added: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub max_supply: Option<Decimal>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub infinite_supply: Option<bool>,
    pub platform: Option<serde_json::Value>,
    pub cmc_rank: Option<i32>,
    pub self_reported_circulating_supply: Option<Decimal>,
    pub self_reported_market_cap: Option<Decimal>,
    pub tvl_ratio: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub quote: Option<serde_json::Value>,
}

/// How an incoming listing row is matched against stored rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmcLookupKey<'a> {
    CmcId(i32),
    SymbolSlug { symbol: &'a str, slug: &'a str },
    None,
}

impl NewCmcCryptocurrency {
    /// `cmc_id` when present, otherwise the `symbol`+`slug` pair.
    pub fn lookup_key(&self) -> CmcLookupKey<'_> {
        match (self.cmc_id, self.symbol.as_deref(), self.slug.as_deref()) {
            (Some(id), _, _) => CmcLookupKey::CmcId(id),
            (None, Some(symbol), Some(slug)) => CmcLookupKey::SymbolSlug { symbol, slug },
            _ => CmcLookupKey::None,
        }
    }
}

impl CmcCryptocurrency {
    pub fn find_by_cmc_id(cmc_id: i32, conn: &mut PgConnection) -> QueryResult<Self> {
        cmc_cryptocurrencies::table
            .filter(cmc_cryptocurrencies::cmc_id.eq(cmc_id))
            .select(Self::as_select())
            .first(conn)
    }

    pub fn find_by_symbol_and_slug(
        symbol: &str,
        slug: &str,
        conn: &mut PgConnection,
    ) -> QueryResult<Self> {
        cmc_cryptocurrencies::table
            .filter(cmc_cryptocurrencies::symbol.eq(symbol))
            .filter(cmc_cryptocurrencies::slug.eq(slug))
            .select(Self::as_select())
            .first(conn)
    }

    /// Listings ordered by CMC rank, unranked rows last.
    pub fn find_top_by_rank(limit: i64, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        cmc_cryptocurrencies::table
            .order(cmc_cryptocurrencies::cmc_rank.asc().nulls_last())
            .limit(limit)
            .select(Self::as_select())
            .load(conn)
    }

    pub fn upsert(new: &NewCmcCryptocurrency, conn: &mut PgConnection) -> QueryResult<Self> {
        let existing = match new.lookup_key() {
            CmcLookupKey::CmcId(id) => Self::find_by_cmc_id(id, conn),
            CmcLookupKey::SymbolSlug { symbol, slug } => {
                Self::find_by_symbol_and_slug(symbol, slug, conn)
            }
            CmcLookupKey::None => Err(diesel::result::Error::NotFound),
        };

        match existing {
            Ok(existing) => diesel::update(cmc_cryptocurrencies::table.find(existing.idx))
                .set((new, cmc_cryptocurrencies::updated_at.eq(Utc::now())))
                .returning(Self::as_returning())
                .get_result(conn),
            Err(diesel::result::Error::NotFound) => {
                diesel::insert_into(cmc_cryptocurrencies::table)
                    .values(new)
                    .returning(Self::as_returning())
                    .get_result(conn)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(cmc_id: Option<i32>, symbol: Option<&str>, slug: Option<&str>) -> NewCmcCryptocurrency {
        NewCmcCryptocurrency {
            cmc_id,
            name: None,
            symbol: symbol.map(str::to_string),
            slug: slug.map(str::to_string),
            num_market_pairs: None,
            date_added: None,
            tags: None,
            max_supply: None,
            circulating_supply: None,
            total_supply: None,
            infinite_supply: None,
            platform: None,
            cmc_rank: None,
            self_reported_circulating_supply: None,
            self_reported_market_cap: None,
            tvl_ratio: None,
            last_updated: None,
            quote: None,
        }
    }

    #[test]
    fn test_lookup_key_prefers_cmc_id() {
        let row = listing(Some(1), Some("BTC"), Some("bitcoin"));
        assert_eq!(row.lookup_key(), CmcLookupKey::CmcId(1));
    }

    #[test]
    fn test_lookup_key_falls_back_to_symbol_and_slug() {
        let row = listing(None, Some("BTC"), Some("bitcoin"));
        assert_eq!(
            row.lookup_key(),
            CmcLookupKey::SymbolSlug {
                symbol: "BTC",
                slug: "bitcoin"
            }
        );
    }

    #[test]
    fn test_lookup_key_none_without_full_pair() {
        assert_eq!(listing(None, Some("BTC"), None).lookup_key(), CmcLookupKey::None);
        assert_eq!(listing(None, None, None).lookup_key(), CmcLookupKey::None);
    }
}
