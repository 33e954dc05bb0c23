//! Offset pagination primitives shared by Grace backend endpoints.
//!
//! List queries in the store layer are offset-paginated with a fixed
//! ordering, so repeated calls with the same [`PageRequest`] are stable
//! absent concurrent writes. This crate owns the request bounds and their
//! validation so every adapter applies the same limits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: u32 = 20;

/// Largest page a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Validation errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// A page must contain at least one row.
    #[error("page limit must be at least 1")]
    ZeroLimit,
    /// The requested page exceeds [`MAX_LIMIT`].
    #[error("page limit must be at most {max}, got {requested}")]
    LimitTooLarge {
        /// Requested limit.
        requested: u32,
        /// Maximum accepted limit.
        max: u32,
    },
}

/// Bounded `LIMIT`/`OFFSET` pair for list queries.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let first = PageRequest::new(2, 0).expect("valid page");
/// let second = first.next();
/// assert_eq!(second.offset(), 2);
/// assert_eq!(second.limit(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageRequest", into = "RawPageRequest")]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `limit` is zero or above
    /// [`MAX_LIMIT`].
    pub const fn new(limit: u32, offset: u32) -> Result<Self, PageRequestError> {
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        if limit > MAX_LIMIT {
            return Err(PageRequestError::LimitTooLarge {
                requested: limit,
                max: MAX_LIMIT,
            });
        }
        Ok(Self { limit, offset })
    }

    /// First page with the given limit.
    ///
    /// # Errors
    ///
    /// Same as [`PageRequest::new`].
    pub const fn first(limit: u32) -> Result<Self, PageRequestError> {
        Self::new(limit, 0)
    }

    /// Maximum number of rows in the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows skipped before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// `LIMIT` value in the width SQL drivers bind.
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::from(self.limit)
    }

    /// `OFFSET` value in the width SQL drivers bind.
    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::from(self.offset)
    }

    /// The page immediately after this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawPageRequest {
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    offset: u32,
}

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.limit, value.offset)
    }
}

impl From<PageRequest> for RawPageRequest {
    fn from(value: PageRequest) -> Self {
        Self {
            limit: value.limit,
            offset: value.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Bounds and serde coverage for page requests.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 0)]
    #[case(MAX_LIMIT, 40)]
    fn accepts_limits_within_bounds(#[case] limit: u32, #[case] offset: u32) {
        let page = PageRequest::new(limit, offset).expect("page should be valid");
        assert_eq!(page.limit(), limit);
        assert_eq!(page.offset(), offset);
    }

    #[rstest]
    fn rejects_zero_limit() {
        assert_eq!(PageRequest::new(0, 0), Err(PageRequestError::ZeroLimit));
    }

    #[rstest]
    fn rejects_oversized_limit() {
        let err = PageRequest::new(MAX_LIMIT + 1, 0).expect_err("limit too large");
        assert_eq!(
            err,
            PageRequestError::LimitTooLarge {
                requested: MAX_LIMIT + 1,
                max: MAX_LIMIT,
            }
        );
        assert!(err.to_string().contains("at most 100"));
    }

    #[rstest]
    fn next_advances_by_limit() {
        let page = PageRequest::new(2, 2).expect("valid page").next();
        assert_eq!(page.offset(), 4);
        assert_eq!(page.sql_offset(), 4);
        assert_eq!(page.sql_limit(), 2);
    }

    #[rstest]
    fn next_saturates_at_the_end_of_the_range() {
        let page = PageRequest::new(10, u32::MAX - 3).expect("valid page").next();
        assert_eq!(page.offset(), u32::MAX);
    }

    #[rstest]
    fn deserialises_with_defaults() {
        let page: PageRequest = serde_json::from_str("{}").expect("defaults apply");
        assert_eq!(page, PageRequest::default());
    }

    #[rstest]
    fn deserialisation_rejects_invalid_limits() {
        let result = serde_json::from_str::<PageRequest>(r#"{"limit":0}"#);
        assert!(result.is_err());
    }
}
