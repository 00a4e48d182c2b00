//! Allow-listed sorting for list endpoints.
//!
//! The requested column comes from `sort_by` and must appear in the
//! endpoint's sortable allow-list; otherwise no sort is applied and the fetch
//! keeps its default order. The direction comes from `order` and must be
//! exactly `asc` or `desc`; anything else means `asc`.

use serde::Serialize;

use crate::filter::QueryParams;

pub const SORT_BY_PARAM: &str = "sort_by";
pub const ORDER_PARAM: &str = "order";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortClause {
    pub column: &'static str,
    pub direction: SortDirection,
}

impl SortClause {
    /// Resolves the requested sort against `allowed`. Returns `None` when no
    /// column was requested or the column is not allow-listed.
    pub fn resolve(params: &QueryParams, allowed: &[&'static str]) -> Option<Self> {
        let requested = params.get(SORT_BY_PARAM)?;
        let column = allowed.iter().copied().find(|c| *c == requested.as_str())?;
        let direction = SortDirection::parse(params.get(ORDER_PARAM).map(String::as_str));

        Some(Self { column, direction })
    }
}
