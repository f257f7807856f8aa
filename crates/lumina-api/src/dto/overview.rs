use lumina_db::models::{DexInfo, DexProtocol, FeeInfo, FeeProtocol, PerpInfo, PerpProtocol};
use serde::Serialize;
use utoipa::ToSchema;

/// Dex volume overview of a chain.
#[derive(Debug, Serialize, ToSchema)]
pub struct DexOverview {
    pub chain: String,
    pub info: DexInfo,
    pub protocols: Vec<DexProtocol>,
}

/// Fees overview of a chain.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeeOverview {
    pub chain: String,
    pub info: FeeInfo,
    pub protocols: Vec<FeeProtocol>,
}

/// Global open-interest overview.
#[derive(Debug, Serialize, ToSchema)]
pub struct PerpOverview {
    pub info: PerpInfo,
    pub protocols: Vec<PerpProtocol>,
}
