//! Pagination for list endpoints.
//!
//! List endpoints return every match unless the client asks for a window.
//! A window is requested with `limit` plus either `offset` or `page`:
//!
//! - `limit`: items per window, clamped to [1, 100]
//! - `offset`: items to skip (ignored when `page` is set)
//! - `page`: 1-indexed page number; implies a limit of 10 when `limit` is absent
//!
//! ```ignore
//! // GET /api/classes/{id}/students?limit=10&page=2
//! let page = params.to_page();
//! assert_eq!(page.limit, Some(10));
//! assert_eq!(page.offset, 10);
//! ```

use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Empty query values (`?limit=`) are treated as absent.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Hash, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

/// A resolved window over a result set. `limit: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: i64,
}

impl Page {
    pub const fn all() -> Self {
        Self {
            limit: None,
            offset: 0,
        }
    }

    /// Applies the window to an already materialized list.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = usize::try_from(self.offset).unwrap_or(0).min(items.len());
        let end = match self.limit {
            Some(limit) => start
                .saturating_add(usize::try_from(limit).unwrap_or(0))
                .min(items.len()),
            None => items.len(),
        };
        items[start..end].to_vec()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::all()
    }
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> Option<i64> {
        match (self.limit, self.page) {
            (Some(limit), _) => Some(limit.clamp(1, MAX_PAGE_SIZE)),
            (None, Some(_)) => Some(DEFAULT_PAGE_SIZE),
            (None, None) => None,
        }
    }

    /// Saturates instead of overflowing; a page far past the end is just empty.
    #[must_use]
    pub fn offset(&self) -> i64 {
        match (self.page, self.limit()) {
            (Some(page), Some(limit)) => (page.max(1) - 1).saturating_mul(limit),
            _ => self.offset.unwrap_or(0).max(0),
        }
    }

    #[must_use]
    pub fn to_page(&self) -> Page {
        Page {
            limit: self.limit(),
            offset: self.offset(),
        }
    }
}
