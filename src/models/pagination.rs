use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Common `page`/`per_page` query parameters shared by every list endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    /// Resolve defaults and bounds: `page >= 1`, `1 <= per_page <= 100`.
    pub fn resolve(&self) -> Result<(i64, i64), AppError> {
        let page = self.page.unwrap_or(1);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);
        if page < 1 {
            return Err(AppError::Validation("page must be >= 1".to_string()));
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(AppError::Validation(format!(
                "per_page must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }
        Ok((page, per_page))
    }

    /// Saturates instead of overflowing so an absurdly large `page` yields an
    /// offset past the last row rather than a panic or a negative OFFSET.
    pub fn offset(page: i64, per_page: i64) -> i64 {
        page.saturating_sub(1).saturating_mul(per_page)
    }
}

/// List response envelope: `total` counts all rows matching the filters,
/// ignoring pagination.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_page_one_twenty_per_page() {
        let params = PageParams {
            page: None,
            per_page: None,
        };
        assert_eq!(params.resolve().unwrap(), (1, 20));
    }

    #[test]
    fn out_of_bounds_values_are_rejected() {
        let params = PageParams {
            page: Some(0),
            per_page: None,
        };
        assert!(params.resolve().is_err());

        let params = PageParams {
            page: Some(1),
            per_page: Some(101),
        };
        assert!(params.resolve().is_err());

        let params = PageParams {
            page: Some(1),
            per_page: Some(0),
        };
        assert!(params.resolve().is_err());
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(PageParams::offset(1, 10), 0);
        assert_eq!(PageParams::offset(2, 10), 10);
        assert_eq!(PageParams::offset(3, 25), 50);
    }

    #[test]
    fn huge_page_numbers_never_produce_a_negative_offset() {
        let params = PageParams {
            page: Some(i64::MAX),
            per_page: Some(100),
        };
        let (page, per_page) = params.resolve().unwrap();
        let offset = PageParams::offset(page, per_page);
        assert!(offset >= 0);
        assert_eq!(offset, i64::MAX);
    }
}
