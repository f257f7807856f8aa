pub mod cmc;
pub mod defillama;
pub mod error;
pub mod http;
pub mod lenient;
pub mod traits;

pub use cmc::CmcClient;
pub use cmc::types::{CmcListing, ListingSort};
pub use defillama::types::{
    ChainResponse, OverviewProtocolResponse, OverviewResponse, OverviewTotals, PeggedAmount,
    ProtocolResponse, StablecoinResponse, YieldPoolResponse,
};
pub use defillama::{DefiLlamaClient, SourceUrls};
pub use error::SourceError;
pub use traits::{DefiLlamaSource, MarketDataSource};
