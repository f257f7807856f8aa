use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema::protocols;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
#[diesel(table_name = protocols)]
#[diesel(primary_key(idx))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Protocol {
    pub idx: i32,
    pub protocol_id: String,
    pub name: String,
    pub symbol: Option<String>,
    pub category: Option<String>,
    pub chains: Vec<String>,
    pub tvl: Option<f64>,
    /// TVL per chain, keyed by chain name.
    pub chain_tvls: serde_json::Value,
    pub change_1d: Option<f64>,
    pub change_7d: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Insertable, AsChangeset)]
#[diesel(table_name = protocols)]
#[diesel(treat_none_as_null = true)]
pub struct NewProtocol {
    pub protocol_id: String,
    pub name: String,
    pub symbol: Option<String>,
    pub category: Option<String>,
    pub chains: Vec<String>,
    pub tvl: Option<f64>,
    pub chain_tvls: serde_json::Value,
    pub change_1d: Option<f64>,
    pub change_7d: Option<f64>,
}

impl Protocol {
    pub fn find_by_protocol_id(protocol_id: &str, conn: &mut PgConnection) -> QueryResult<Self> {
        protocols::table
            .filter(protocols::protocol_id.eq(protocol_id))
            .select(Self::as_select())
            .first(conn)
    }

    pub fn find_top_by_tvl(limit: i64, conn: &mut PgConnection) -> QueryResult<Vec<Self>> {
        protocols::table
            .filter(protocols::tvl.is_not_null())
            .order(protocols::tvl.desc())
            .limit(limit)
            .select(Self::as_select())
            .load(conn)
    }

    pub fn upsert_by_protocol_id(new: &NewProtocol, conn: &mut PgConnection) -> QueryResult<Self> {
        match Self::find_by_protocol_id(&new.protocol_id, conn) {
            Ok(existing) => diesel::update(protocols::table.find(existing.idx))
                .set((new, protocols::updated_at.eq(Utc::now())))
                .returning(Self::as_returning())
                .get_result(conn),
            Err(diesel::result::Error::NotFound) => diesel::insert_into(protocols::table)
                .values(new)
                .returning(Self::as_returning())
                .get_result(conn),
            Err(e) => Err(e),
        }
    }
}
