use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::chains;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = chains)]
#[diesel(primary_key(idx))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Chain {
    pub idx: i32,
    pub name: String,
    pub gecko_id: Option<String>,
    pub tvl: Decimal,
    pub token_symbol: Option<String>,
    pub cmc_id: Option<String>,
    pub chain_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = chains)]
#[diesel(treat_none_as_null = true)]
pub struct NewChain {
    pub name: String,
    pub gecko_id: Option<String>,
    pub tvl: Decimal,
    pub token_symbol: Option<String>,
    pub cmc_id: Option<String>,
    pub chain_id: Option<String>,
}

impl Chain {
    pub fn find_by_name(name: &str, conn: &mut PgConnection) -> QueryResult<Self> {
        chains::table
            .filter(chains::name.eq(name))
            .select(Self::as_select())
            .first(conn)
    }

    pub fn find_all(conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        chains::table
            .order(chains::name.asc())
            .select(Self::as_select())
            .load(conn)
    }

    /// Chains ordered by TVL, highest first.
    pub fn find_top_by_tvl(limit: i64, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        chains::table
            .order((chains::tvl.desc(), chains::name.asc()))
            .limit(limit)
            .select(Self::as_select())
            .load(conn)
    }

    /// Overwrites every mutable column of the chain named `new.name`, inserting it if unseen.
    pub fn upsert_by_name(new: &NewChain, conn: &mut PgConnection) -> QueryResult<Self> {
        match Self::find_by_name(&new.name, conn) {
            Ok(existing) => diesel::update(chains::table.find(existing.idx))
                .set((new, chains::updated_at.eq(Utc::now())))
                .returning(Self::as_returning())
                .get_result(conn),
            Err(diesel::result::Error::NotFound) => diesel::insert_into(chains::table)
                .values(new)
                .returning(Self::as_returning())
                .get_result(conn),
            Err(e) => Err(e),
        }
    }
}
