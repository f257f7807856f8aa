use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::yield_pools;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = yield_pools)]
#[diesel(primary_key(idx))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct YieldPool {
    pub idx: i32,
    pub pool: String,
    pub chain: String,
    pub project: String,
    pub symbol: String,
    pub tvl_usd: Option<Decimal>,
    pub apy_base: Option<f64>,
    pub apy_reward: Option<f64>,
    pub apy: Option<f64>,
    pub reward_tokens: Option<Vec<String>>,
    pub apy_pct_1d: Option<f64>,
    pub apy_pct_7d: Option<f64>,
    pub apy_pct_30d: Option<f64>,
    pub stablecoin: bool,
    pub il_risk: Option<String>,
    pub exposure: Option<String>,
    pub predictions: Option<serde_json::Value>,
    pub pool_meta: Option<String>,
    pub mu: Option<f64>,
    pub sigma: Option<f64>,
    pub observation_count: Option<i32>,
    pub outlier: bool,
    pub underlying_tokens: Option<Vec<String>>,
    pub il_7d: Option<f64>,
    pub apy_base_7d: Option<f64>,
    pub apy_mean_30d: Option<f64>,
    pub volume_usd_1d: Option<Decimal>,
    pub volume_usd_7d: Option<Decimal>,
    pub apy_base_inception: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = yield_pools)]
#[diesel(treat_none_as_null = true)]
pub struct NewYieldPool {
    pub pool: String,
    pub chain: String,
    pub project: String,
    pub symbol: String,
    pub tvl_usd: Option<Decimal>,
    pub apy_base: Option<f64>,
    pub apy_reward: Option<f64>,
    pub apy: Option<f64>,
    pub reward_tokens: Option<Vec<String>>,
    pub apy_pct_1d: Option<f64>,
    pub apy_pct_7d: Option<f64>,
    pub apy_pct_30d: Option<f64>,
    pub stablecoin: bool,
    pub il_risk: Option<String>,
    pub exposure: Option<String>,
    pub predictions: Option<serde_json::Value>,
    pub pool_meta: Option<String>,
    pub mu: Option<f64>,
    pub sigma: Option<f64>,
    pub observation_count: Option<i32>,
    pub outlier: bool,
    pub underlying_tokens: Option<Vec<String>>,
    pub il_7d: Option<f64>,
    pub apy_base_7d: Option<f64>,
    pub apy_mean_30d: Option<f64>,
    pub volume_usd_1d: Option<Decimal>,
    pub volume_usd_7d: Option<Decimal>,
    pub apy_base_inception: Option<f64>,
}

/// Escapes LIKE wildcards so `value` only matches itself.
pub(crate) fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl YieldPool {
    pub fn find_by_pool(pool: &str, conn: &mut PgConnection) -> QueryResult<Self> {
        yield_pools::table
            .filter(yield_pools::pool.eq(pool))
            .select(Self::as_select())
            .first(conn)
    }

    /// Pools ordered by TVL, optionally restricted to one chain (case-insensitive).
    pub fn find_top_by_tvl(
        chain: Option<&str>,
        limit: i64,
        conn: &mut PgConnection,
    ) -> QueryResult<Vec<Self>> {
        let mut query = yield_pools::table
            .order(yield_pools::tvl_usd.desc().nulls_last())
            .limit(limit)
            .select(Self::as_select())
            .into_boxed();

        if let Some(chain) = chain {
            query = query.filter(yield_pools::chain.ilike(escape_like(chain)));
        }

        query.load(conn)
    }

    pub fn upsert_by_pool(new: &NewYieldPool, conn: &mut PgConnection) -> QueryResult<Self> {
        match Self::find_by_pool(&new.pool, conn) {
            Ok(existing) => diesel::update(yield_pools::table.find(existing.idx))
                .set((new, yield_pools::updated_at.eq(Utc::now())))
                .returning(Self::as_returning())
                .get_result(conn),
            Err(diesel::result::Error::NotFound) => diesel::insert_into(yield_pools::table)
                .values(new)
                .returning(Self::as_returning())
                .get_result(conn),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("Base"), "Base");
        assert_eq!(escape_like("%"), "\\%");
        assert_eq!(escape_like("B_se"), "B\\_se");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
