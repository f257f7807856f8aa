pub mod chains;
pub mod cryptocurrencies;
pub mod overviews;
pub mod protocols;
pub mod stablecoins;
pub mod yield_pools;

pub use chains::{get_chain, list_chains};
pub use cryptocurrencies::list_cryptocurrencies;
pub use overviews::{get_chain_dexs, get_chain_fees, get_perps};
pub use protocols::{get_protocol, list_protocols};
pub use stablecoins::list_stablecoins;
pub use yield_pools::list_yield_pools;

use crate::errors::ApiError;

/// Trimmed path segment, rejected when blank.
pub(crate) fn required_segment(value: &str, what: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_segment() {
        assert_eq!(required_segment(" Base ", "Chain name").unwrap(), "Base");
        assert!(matches!(
            required_segment("  ", "Chain name"),
            Err(ApiError::BadRequest(msg)) if msg == "Chain name must not be empty"
        ));
    }
}
