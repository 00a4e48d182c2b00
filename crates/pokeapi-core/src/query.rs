//! Combines filtering and sorting into one description of a list query.

use crate::filter::{FilterSet, FilterSpec, QueryParams, apply_filters};
use crate::sort::SortClause;

/// Filter predicates and optional sort for one list request. The pagination
/// window is derived separately once the filtered row count is known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryShape {
    pub filters: FilterSet,
    pub sort: Option<SortClause>,
}

/// Translates raw query parameters through an endpoint's filter and sort allow-lists.
pub fn shape_query(
    params: &QueryParams,
    filter_spec: &FilterSpec,
    sort_spec: &[&'static str],
) -> QueryShape {
    QueryShape {
        filters: apply_filters(params, filter_spec),
        sort: SortClause::resolve(params, sort_spec),
    }
}
