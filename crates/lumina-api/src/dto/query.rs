use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 500;

/// `?limit=` accepted by every list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LimitQuery {
    /// Number of rows to return (default 50, at most 500)
    pub limit: Option<i64>,
}

impl LimitQuery {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YieldPoolQuery {
    /// Restrict to one chain, case-insensitive
    pub chain: Option<String>,
    /// Number of rows to return (default 50, at most 500)
    pub limit: Option<i64>,
}

impl YieldPoolQuery {
    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    pub fn chain(&self) -> Option<&str> {
        self.chain.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 50);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-4)), 1);
        assert_eq!(clamp_limit(Some(120)), 120);
        assert_eq!(clamp_limit(Some(10_000)), 500);
    }

    #[test]
    fn test_blank_chain_filter_is_ignored() {
        let query = YieldPoolQuery {
            chain: Some(" ".into()),
            limit: None,
        };
        assert_eq!(query.chain(), None);
        assert_eq!(query.limit(), 50);

        let query = YieldPoolQuery {
            chain: Some("Base".into()),
            limit: Some(3),
        };
        assert_eq!(query.chain(), Some("Base"));
    }
}
