//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Maximum page size for list endpoints.
pub const MAX_LIMIT: i64 = 100;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 50;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Effective limit, defaulted and capped.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_defaulted_and_capped() {
        let params = PaginationParams { limit: None, offset: None };
        assert_eq!(params.limit(), DEFAULT_LIMIT);

        let params = PaginationParams { limit: Some(1000), offset: None };
        assert_eq!(params.limit(), MAX_LIMIT);

        let params = PaginationParams { limit: Some(0), offset: None };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn offset_is_never_negative() {
        let params = PaginationParams { limit: None, offset: Some(-5) };
        assert_eq!(params.offset(), 0);
    }
}
