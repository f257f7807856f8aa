pub mod chain;
pub mod cmc_cryptocurrency;
pub mod overview;
pub mod protocol;
pub mod stablecoin;
pub mod yield_pool;

pub use chain::{Chain, NewChain};
pub use cmc_cryptocurrency::{CmcCryptocurrency, CmcLookupKey, NewCmcCryptocurrency};
pub use overview::{
    DexInfo, DexProtocol, FeeInfo, FeeProtocol, NewDexInfo, NewDexProtocol, NewFeeInfo,
    NewFeeProtocol, NewPerpInfo, NewPerpProtocol, OverviewInfoRecord, OverviewKind,
    OverviewProtocolRecord, OverviewSnapshot, PerpInfo, PerpProtocol,
};
pub use protocol::{NewProtocol, Protocol};
pub use stablecoin::{NewStablecoin, Stablecoin};
pub use yield_pool::{NewYieldPool, YieldPool};
