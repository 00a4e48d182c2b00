//! Page-based pagination for list endpoints.
//!
//! `limit` (default 10) and `page` (default 1) are read from the raw query
//! parameters. Values that are missing, non-numeric or not positive fall back
//! to the default. Once the total row count is known the requested page is
//! clamped to the last page, so a request past the end returns the final page.
//!
//! # Invariants
//!
//! - `limit >= 1` and `page >= 1`
//! - `offset == (page - 1) * limit`
//! - `total_pages == ceil(total_items / limit)`, and never less than 1
//! - `page <= total_pages`
//!
//! # Example
//!
//! ```ignore
//! use pokeapi_core::pagination::paginate;
//!
//! let (window, pagination) = paginate(&params, sort, || count_rows(&db, &filters)).await?;
//! let rows = fetch_page(&db, &filters, &window).await?;
//! ```

use std::future::Future;

use serde::Serialize;

use crate::filter::QueryParams;
use crate::sort::SortClause;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_PAGE: i64 = 1;

/// The page a client asked for, before the total count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub page: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

fn positive_or(raw: Option<&String>, default: i64) -> i64 {
    raw.and_then(|v| v.parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

impl PageRequest {
    pub fn from_params(params: &QueryParams) -> Self {
        Self {
            limit: positive_or(params.get("limit"), DEFAULT_LIMIT),
            page: positive_or(params.get("page"), DEFAULT_PAGE),
        }
    }
}

/// Pagination bookkeeping returned to the client alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub limit: i64,
    pub page: i64,
    pub offset: i64,
    pub total_items: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationState {
    #[must_use]
    pub fn compute(request: PageRequest, total_items: i64) -> Self {
        let limit = request.limit.max(1);
        let total_items = total_items.max(0);
        let total_pages = (total_items / limit + i64::from(total_items % limit != 0)).max(1);
        let page = request.page.clamp(1, total_pages);
        let offset = (page - 1) * limit;

        Self {
            limit,
            page,
            offset,
            total_items,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }
}

/// Bounds for the data fetch: how many rows, from where, in what order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub limit: i64,
    pub offset: i64,
    pub sort: Option<SortClause>,
}

impl FetchWindow {
    pub fn new(pagination: &PaginationState, sort: Option<SortClause>) -> Self {
        Self {
            limit: pagination.limit,
            offset: pagination.offset,
            sort,
        }
    }
}

/// Counts the rows in scope and derives the fetch window and pagination state.
///
/// `count_rows` must count the same (already filtered) scope that the page
/// fetch will read. Its error is passed through untouched.
pub async fn paginate<F, Fut, E>(
    params: &QueryParams,
    sort: Option<SortClause>,
    count_rows: F,
) -> Result<(FetchWindow, PaginationState), E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<i64, E>>,
{
    let request = PageRequest::from_params(params);
    let total_items = count_rows().await?;
    let pagination = PaginationState::compute(request, total_items);

    Ok((FetchWindow::new(&pagination, sort), pagination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_page_request_defaults() {
        assert_eq!(PageRequest::from_params(&params(&[])), PageRequest::default());
    }

    #[test]
    fn test_page_request_invalid_values_fall_back() {
        let test_cases = vec![
            (("abc", "xyz"), (10, 1)),
            (("0", "0"), (10, 1)),
            (("-5", "-1"), (10, 1)),
            (("", ""), (10, 1)),
            (("25", "3"), (25, 3)),
        ];

        for ((limit, page), (expected_limit, expected_page)) in test_cases {
            let request = PageRequest::from_params(&params(&[("limit", limit), ("page", page)]));
            assert_eq!(request.limit, expected_limit);
            assert_eq!(request.page, expected_page);
        }
    }

    #[test]
    fn test_zero_items_single_page() {
        let state = PaginationState::compute(PageRequest { limit: 10, page: 4 }, 0);
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.page, 1);
        assert_eq!(state.offset, 0);
        assert!(!state.has_next_page);
        assert!(!state.has_previous_page);
    }

    #[test]
    fn test_page_clamped_to_last_page() {
        let state = PaginationState::compute(PageRequest { limit: 10, page: 5 }, 25);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.page, 3);
        assert_eq!(state.offset, 20);
        assert!(!state.has_next_page);
        assert!(state.has_previous_page);
    }

    #[test]
    fn test_middle_page() {
        let state = PaginationState::compute(PageRequest { limit: 5, page: 2 }, 12);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.page, 2);
        assert_eq!(state.offset, 5);
        assert_eq!(state.total_items, 12);
        assert!(state.has_next_page);
        assert!(state.has_previous_page);
    }

    #[test]
    fn test_exact_multiple_of_limit() {
        let state = PaginationState::compute(PageRequest { limit: 10, page: 1 }, 30);
        assert_eq!(state.total_pages, 3);
        assert!(state.has_next_page);
    }

    #[test]
    fn test_huge_limit_is_one_page() {
        let state = PaginationState::compute(
            PageRequest {
                limit: i64::MAX,
                page: 3,
            },
            12,
        );
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.page, 1);
        assert_eq!(state.offset, 0);
        assert!(!state.has_next_page);

        let request = PageRequest::from_params(&params(&[("limit", "9223372036854775807")]));
        assert_eq!(request.limit, i64::MAX);
        assert_eq!(PaginationState::compute(request, 12).total_pages, 1);
    }

    #[test]
    fn test_offset_invariant_holds() {
        for total in [0, 1, 9, 10, 11, 99, 100, 101] {
            for limit in [1, 3, 10] {
                for page in [1, 2, 7, 50] {
                    let state = PaginationState::compute(PageRequest { limit, page }, total);
                    assert!(state.page >= 1 && state.page <= state.total_pages);
                    assert_eq!(state.offset, (state.page - 1) * state.limit);
                    assert!(state.total_pages >= 1);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_paginate_uses_count() {
        let sort = Some(SortClause {
            column: "name",
            direction: SortDirection::Desc,
        });
        let (window, state) = paginate(&params(&[("page", "2"), ("limit", "5")]), sort, || async {
            Ok::<_, std::convert::Infallible>(12)
        })
        .await
        .unwrap();

        assert_eq!(window.limit, 5);
        assert_eq!(window.offset, 5);
        assert_eq!(window.sort, sort);
        assert_eq!(state.page, 2);
        assert_eq!(state.total_pages, 3);
    }

    #[tokio::test]
    async fn test_paginate_propagates_count_error() {
        let result = paginate(&params(&[]), None, || async { Err::<i64, _>("storage down") }).await;
        assert_eq!(result.unwrap_err(), "storage down");
    }
}
