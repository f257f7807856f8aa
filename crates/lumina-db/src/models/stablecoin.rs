use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::stablecoins;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = stablecoins)]
#[diesel(primary_key(idx))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Stablecoin {
    pub idx: i32,
    pub symbol: String,
    pub gecko_id: Option<String>,
    pub name: Option<String>,
    pub peg_type: Option<String>,
    pub price_source: Option<String>,
    pub peg_mechanism: Option<String>,
    pub circulating_pegged_usd: Option<Decimal>,
    pub circulating_prev_day_pegged_usd: Option<Decimal>,
    pub circulating_prev_week_pegged_usd: Option<Decimal>,
    pub circulating_prev_month_pegged_usd: Option<Decimal>,
    pub chain_circulating: Option<serde_json::Value>,
    pub chains: Vec<String>,
    pub price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = stablecoins)]
#[diesel(treat_none_as_null = true)]
pub struct NewStablecoin {
    pub symbol: String,
    pub gecko_id: Option<String>,
    pub name: Option<String>,
    pub peg_type: Option<String>,
    pub price_source: Option<String>,
    pub peg_mechanism: Option<String>,
    pub circulating_pegged_usd: Option<Decimal>,
    pub circulating_prev_day_pegged_usd: Option<Decimal>,
    pub circulating_prev_week_pegged_usd: Option<Decimal>,
    pub circulating_prev_month_pegged_usd: Option<Decimal>,
    pub chain_circulating: Option<serde_json::Value>,
    pub chains: Vec<String>,
    pub price: Option<Decimal>,
}

impl Stablecoin {
    pub fn find_by_symbol(symbol: &str, conn: &mut PgConnection) -> QueryResult<Self> {
        stablecoins::table
            .filter(stablecoins::symbol.eq(symbol))
            .select(Self::as_select())
            .first(conn)
    }

    /// Stablecoins ordered by circulating supply, largest first.
    pub fn find_top_by_circulating(limit: i64, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        stablecoins::table
            .order(stablecoins::circulating_pegged_usd.desc().nulls_last())
            .limit(limit)
            .select(Self::as_select())
            .load(conn)
    }

    pub fn upsert_by_symbol(new: &NewStablecoin, conn: &mut PgConnection) -> QueryResult<Self> {
        match Self::find_by_symbol(&new.symbol, conn) {
            Ok(existing) => diesel::update(stablecoins::table.find(existing.idx))
                .set((new, stablecoins::updated_at.eq(Utc::now())))
                .returning(Self::as_returning())
                .get_result(conn),
            Err(diesel::result::Error::NotFound) => diesel::insert_into(stablecoins::table)
                .values(new)
                .returning(Self::as_returning())
                .get_result(conn),
            Err(e) => Err(e),
        }
    }
}
