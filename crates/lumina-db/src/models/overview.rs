//! Volume, fee and open-interest overviews.
//!
//! The three families share one shape: an info row holding the aggregate rollup
//! for a chain (or the global perp overview, whose `chain_idx` is NULL) and one
//! protocol row per contributing protocol pointing at it. `overview_models!`
//! generates the diesel models for each family from that shared shape, and
//! `save_snapshot` writes an info row with its protocols in a single transaction.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::DatabaseError;
use crate::models::Chain;
use crate::schema::{dex_infos, dex_protocols, fee_infos, fee_protocols, perp_infos, perp_protocols};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OverviewKind {
    Dex,
    Fee,
    Perp,
}

/// Aggregate rollup of an overview, independent of the table it lands in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewInfoRecord {
    pub all_chains: Vec<String>,
    pub total_24h: Option<Decimal>,
    pub total_48h_to_24h: Option<Decimal>,
    pub total_7d: Option<Decimal>,
    pub total_14d_to_7d: Option<Decimal>,
    pub total_60d_to_30d: Option<Decimal>,
    pub total_30d: Option<Decimal>,
    pub total_1y: Option<Decimal>,
    pub total_all_time: Option<Decimal>,
    pub change_1d: Option<f64>,
    pub change_7d: Option<f64>,
    pub change_1m: Option<f64>,
    pub change_7d_over_7d: Option<f64>,
    pub change_30d_over_30d: Option<f64>,
    pub total_7_days_ago: Option<Decimal>,
    pub total_30_days_ago: Option<Decimal>,
    pub breakdown_24h: Option<serde_json::Value>,
    pub breakdown_30d: Option<serde_json::Value>,
}

/// One protocol entry of an overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewProtocolRecord {
    pub defillama_id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub module: Option<String>,
    pub category: Option<String>,
    pub logo: Option<String>,
    pub chains: Vec<String>,
    pub protocol_type: Option<String>,
    pub methodology_url: Option<String>,
    pub methodology: Option<serde_json::Value>,
    pub parent_protocol: Option<String>,
    pub slug: Option<String>,
    pub linked_protocols: Option<Vec<String>>,
    pub external_id: Option<String>,
    pub total_24h: Option<Decimal>,
    pub total_48h_to_24h: Option<Decimal>,
    pub total_7d: Option<Decimal>,
    pub total_14d_to_7d: Option<Decimal>,
    pub total_60d_to_30d: Option<Decimal>,
    pub total_30d: Option<Decimal>,
    pub total_1y: Option<Decimal>,
    pub total_all_time: Option<Decimal>,
    pub average_1y: Option<Decimal>,
    pub monthly_average_1y: Option<Decimal>,
    pub change_1d: Option<f64>,
    pub change_7d: Option<f64>,
    pub change_1m: Option<f64>,
    pub change_7d_over_7d: Option<f64>,
    pub change_30d_over_30d: Option<f64>,
    pub total_7_days_ago: Option<Decimal>,
    pub total_30_days_ago: Option<Decimal>,
    pub breakdown_24h: Option<serde_json::Value>,
    pub breakdown_30d: Option<serde_json::Value>,
}

/// An overview as written atomically: `chain` is `None` for the global perp overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewSnapshot {
    pub chain: Option<String>,
    pub info: OverviewInfoRecord,
    pub protocols: Vec<OverviewProtocolRecord>,
}

/// Resolves a chain name to its `idx`, `None` meaning the global overview.
fn resolve_chain_idx(
    chain: Option<&str>,
    conn: &mut PgConnection,
) -> Result<Option<i32>, DatabaseError> {
    let Some(name) = chain else {
        return Ok(None);
    };
    Chain::find_by_name(name, conn)
        .map(|chain| Some(chain.idx))
        .map_err(|e| DatabaseError::from(e).with_operation(format!("resolve chain '{name}'")))
}

macro_rules! overview_models {
    (
        $info:ident, $new_info:ident, $info_table:ident,
        $protocol:ident, $new_protocol:ident, $protocol_table:ident, $info_fk:ident
    ) => {
        #[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
        #[diesel(table_name = $info_table)]
        #[diesel(primary_key(idx))]
        #[diesel(check_for_backend(diesel::pg::Pg))]
        pub struct $info {
            pub idx: i32,
            pub chain_idx: Option<i32>,
            pub all_chains: Vec<String>,
            pub total_24h: Option<Decimal>,
            pub total_48h_to_24h: Option<Decimal>,
            pub total_7d: Option<Decimal>,
            pub total_14d_to_7d: Option<Decimal>,
            pub total_60d_to_30d: Option<Decimal>,
            pub total_30d: Option<Decimal>,
            pub total_1y: Option<Decimal>,
            pub total_all_time: Option<Decimal>,
            pub change_1d: Option<f64>,
            pub change_7d: Option<f64>,
            pub change_1m: Option<f64>,
            pub change_7d_over_7d: Option<f64>,
            pub change_30d_over_30d: Option<f64>,
            pub total_7_days_ago: Option<Decimal>,
            pub total_30_days_ago: Option<Decimal>,
            pub breakdown_24h: Option<serde_json::Value>,
            pub breakdown_30d: Option<serde_json::Value>,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        #[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
        #[diesel(table_name = $info_table)]
        #[diesel(treat_none_as_null = true)]
        pub struct $new_info {
            pub chain_idx: Option<i32>,
            pub all_chains: Vec<String>,
            pub total_24h: Option<Decimal>,
            pub total_48h_to_24h: Option<Decimal>,
            pub total_7d: Option<Decimal>,
            pub total_14d_to_7d: Option<Decimal>,
            pub total_60d_to_30d: Option<Decimal>,
            pub total_30d: Option<Decimal>,
            pub total_1y: Option<Decimal>,
            pub total_all_time: Option<Decimal>,
            pub change_1d: Option<f64>,
            pub change_7d: Option<f64>,
            pub change_1m: Option<f64>,
            pub change_7d_over_7d: Option<f64>,
            pub change_30d_over_30d: Option<f64>,
            pub total_7_days_ago: Option<Decimal>,
            pub total_30_days_ago: Option<Decimal>,
            pub breakdown_24h: Option<serde_json::Value>,
            pub breakdown_30d: Option<serde_json::Value>,
        }

        impl $new_info {
            pub fn from_record(chain_idx: Option<i32>, record: &OverviewInfoRecord) -> Self {
                Self {
                    chain_idx,
                    all_chains: record.all_chains.clone(),
                    total_24h: record.total_24h,
                    total_48h_to_24h: record.total_48h_to_24h,
                    total_7d: record.total_7d,
                    total_14d_to_7d: record.total_14d_to_7d,
                    total_60d_to_30d: record.total_60d_to_30d,
                    total_30d: record.total_30d,
                    total_1y: record.total_1y,
                    total_all_time: record.total_all_time,
                    change_1d: record.change_1d,
                    change_7d: record.change_7d,
                    change_1m: record.change_1m,
                    change_7d_over_7d: record.change_7d_over_7d,
                    change_30d_over_30d: record.change_30d_over_30d,
                    total_7_days_ago: record.total_7_days_ago,
                    total_30_days_ago: record.total_30_days_ago,
                    breakdown_24h: record.breakdown_24h.clone(),
                    breakdown_30d: record.breakdown_30d.clone(),
                }
            }
        }

        #[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable, ToSchema)]
        #[diesel(table_name = $protocol_table)]
        #[diesel(primary_key(idx))]
        #[diesel(check_for_backend(diesel::pg::Pg))]
        pub struct $protocol {
            pub idx: i32,
            pub $info_fk: i32,
            pub defillama_id: String,
            pub name: String,
            pub display_name: Option<String>,
            pub module: Option<String>,
            pub category: Option<String>,
            pub logo: Option<String>,
            pub chains: Vec<String>,
            pub protocol_type: Option<String>,
            pub methodology_url: Option<String>,
            pub methodology: Option<serde_json::Value>,
            pub parent_protocol: Option<String>,
            pub slug: Option<String>,
            pub linked_protocols: Option<Vec<String>>,
            pub external_id: Option<String>,
            pub total_24h: Option<Decimal>,
            pub total_48h_to_24h: Option<Decimal>,
            pub total_7d: Option<Decimal>,
            pub total_14d_to_7d: Option<Decimal>,
            pub total_60d_to_30d: Option<Decimal>,
            pub total_30d: Option<Decimal>,
            pub total_1y: Option<Decimal>,
            pub total_all_time: Option<Decimal>,
            pub average_1y: Option<Decimal>,
            pub monthly_average_1y: Option<Decimal>,
            pub change_1d: Option<f64>,
            pub change_7d: Option<f64>,
            pub change_1m: Option<f64>,
            pub change_7d_over_7d: Option<f64>,
            pub change_30d_over_30d: Option<f64>,
            pub total_7_days_ago: Option<Decimal>,
            pub total_30_days_ago: Option<Decimal>,
            pub breakdown_24h: Option<serde_json::Value>,
            pub breakdown_30d: Option<serde_json::Value>,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        #[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
        #[diesel(table_name = $protocol_table)]
        #[diesel(treat_none_as_null = true)]
        pub struct $new_protocol {
            pub $info_fk: i32,
            pub defillama_id: String,
            pub name: String,
            pub display_name: Option<String>,
            pub module: Option<String>,
            pub category: Option<String>,
            pub logo: Option<String>,
            pub chains: Vec<String>,
            pub protocol_type: Option<String>,
            pub methodology_url: Option<String>,
            pub methodology: Option<serde_json::Value>,
            pub parent_protocol: Option<String>,
            pub slug: Option<String>,
            pub linked_protocols: Option<Vec<String>>,
            pub external_id: Option<String>,
            pub total_24h: Option<Decimal>,
            pub total_48h_to_24h: Option<Decimal>,
            pub total_7d: Option<Decimal>,
            pub total_14d_to_7d: Option<Decimal>,
            pub total_60d_to_30d: Option<Decimal>,
            pub total_30d: Option<Decimal>,
            pub total_1y: Option<Decimal>,
            pub total_all_time: Option<Decimal>,
            pub average_1y: Option<Decimal>,
            pub monthly_average_1y: Option<Decimal>,
            pub change_1d: Option<f64>,
            pub change_7d: Option<f64>,
            pub change_1m: Option<f64>,
            pub change_7d_over_7d: Option<f64>,
            pub change_30d_over_30d: Option<f64>,
            pub total_7_days_ago: Option<Decimal>,
            pub total_30_days_ago: Option<Decimal>,
            pub breakdown_24h: Option<serde_json::Value>,
            pub breakdown_30d: Option<serde_json::Value>,
        }

        impl $new_protocol {
            pub fn from_record(info_idx: i32, record: &OverviewProtocolRecord) -> Self {
                Self {
                    $info_fk: info_idx,
                    defillama_id: record.defillama_id.clone(),
                    name: record.name.clone(),
                    display_name: record.display_name.clone(),
                    module: record.module.clone(),
                    category: record.category.clone(),
                    logo: record.logo.clone(),
                    chains: record.chains.clone(),
                    protocol_type: record.protocol_type.clone(),
                    methodology_url: record.methodology_url.clone(),
                    methodology: record.methodology.clone(),
                    parent_protocol: record.parent_protocol.clone(),
                    slug: record.slug.clone(),
                    linked_protocols: record.linked_protocols.clone(),
                    external_id: record.external_id.clone(),
                    total_24h: record.total_24h,
                    total_48h_to_24h: record.total_48h_to_24h,
                    total_7d: record.total_7d,
                    total_14d_to_7d: record.total_14d_to_7d,
                    total_60d_to_30d: record.total_60d_to_30d,
                    total_30d: record.total_30d,
                    total_1y: record.total_1y,
                    total_all_time: record.total_all_time,
                    average_1y: record.average_1y,
                    monthly_average_1y: record.monthly_average_1y,
                    change_1d: record.change_1d,
                    change_7d: record.change_7d,
                    change_1m: record.change_1m,
                    change_7d_over_7d: record.change_7d_over_7d,
                    change_30d_over_30d: record.change_30d_over_30d,
                    total_7_days_ago: record.total_7_days_ago,
                    total_30_days_ago: record.total_30_days_ago,
                    breakdown_24h: record.breakdown_24h.clone(),
                    breakdown_30d: record.breakdown_30d.clone(),
                }
            }
        }

        impl $info {
            pub fn find_by_chain_idx(
                chain_idx: Option<i32>,
                conn: &mut PgConnection,
            ) -> QueryResult<Self> {
                let query = $info_table::table.select(Self::as_select()).into_boxed();
                let query = match chain_idx {
                    Some(chain_idx) => query.filter($info_table::chain_idx.eq(chain_idx)),
                    None => query.filter($info_table::chain_idx.is_null()),
                };
                query.first(conn)
            }

            pub fn upsert_for_chain(
                chain_idx: Option<i32>,
                record: &OverviewInfoRecord,
                conn: &mut PgConnection,
            ) -> QueryResult<Self> {
                let new = $new_info::from_record(chain_idx, record);
                match Self::find_by_chain_idx(chain_idx, conn) {
                    Ok(existing) => diesel::update($info_table::table.find(existing.idx))
                        .set((&new, $info_table::updated_at.eq(Utc::now())))
                        .returning(Self::as_returning())
                        .get_result(conn),
                    Err(diesel::result::Error::NotFound) => diesel::insert_into($info_table::table)
                        .values(&new)
                        .returning(Self::as_returning())
                        .get_result(conn),
                    Err(e) => Err(e),
                }
            }

            /// Writes the info row and all of its protocols, or nothing at all.
            ///
            /// Fails with `NotFound` when `snapshot.chain` names a chain that was never stored.
            pub fn save_snapshot(
                snapshot: &OverviewSnapshot,
                conn: &mut PgConnection,
            ) -> Result<(Self, usize), DatabaseError> {
                conn.transaction(|conn| {
                    let chain_idx = resolve_chain_idx(snapshot.chain.as_deref(), conn)?;
                    let info = Self::upsert_for_chain(chain_idx, &snapshot.info, conn)?;
                    for protocol in &snapshot.protocols {
                        $protocol::upsert_by_defillama_id(info.idx, protocol, conn)?;
                    }
                    Ok((info, snapshot.protocols.len()))
                })
            }

            /// The overview of a chain (or the global one) with its protocols by 24h total.
            pub fn load_with_protocols(
                chain_idx: Option<i32>,
                limit: i64,
                conn: &mut PgConnection,
            ) -> QueryResult<(Self, Vec<$protocol>)> {
                let info = Self::find_by_chain_idx(chain_idx, conn)?;
                let protocols = $protocol::find_by_info(info.idx, limit, conn)?;
                Ok((info, protocols))
            }
        }

        impl $protocol {
            pub fn find_by_defillama_id(
                defillama_id: &str,
                conn: &mut PgConnection,
            ) -> QueryResult<Self> {
                $protocol_table::table
                    .filter($protocol_table::defillama_id.eq(defillama_id))
                    .select(Self::as_select())
                    .first(conn)
            }

            pub fn find_by_info(
                info_idx: i32,
                limit: i64,
                conn: &mut PgConnection,
            ) -> QueryResult<Vec<Self>> {
                $protocol_table::table
                    .filter($protocol_table::$info_fk.eq(info_idx))
                    .order($protocol_table::total_24h.desc().nulls_last())
                    .limit(limit)
                    .select(Self::as_select())
                    .load(conn)
            }

            pub fn upsert_by_defillama_id(
                info_idx: i32,
                record: &OverviewProtocolRecord,
                conn: &mut PgConnection,
            ) -> QueryResult<Self> {
                let new = $new_protocol::from_record(info_idx, record);
                match Self::find_by_defillama_id(&record.defillama_id, conn) {
                    Ok(existing) => diesel::update($protocol_table::table.find(existing.idx))
                        .set((&new, $protocol_table::updated_at.eq(Utc::now())))
                        .returning(Self::as_returning())
                        .get_result(conn),
                    Err(diesel::result::Error::NotFound) => {
                        diesel::insert_into($protocol_table::table)
                            .values(&new)
                            .returning(Self::as_returning())
                            .get_result(conn)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    };
}

overview_models!(
    DexInfo, NewDexInfo, dex_infos,
    DexProtocol, NewDexProtocol, dex_protocols, dex_info_idx
);
overview_models!(
    FeeInfo, NewFeeInfo, fee_infos,
    FeeProtocol, NewFeeProtocol, fee_protocols, fee_info_idx
);
overview_models!(
    PerpInfo, NewPerpInfo, perp_infos,
    PerpProtocol, NewPerpProtocol, perp_protocols, perp_info_idx
);
