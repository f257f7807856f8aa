pub mod cmc;
pub mod defillama;

pub use cmc::CmcIngestor;
pub use defillama::DefiLlamaIngestor;
