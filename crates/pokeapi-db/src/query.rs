//! SQL rendering for shaped list queries.
//!
//! Column names only ever come from the `'static` allow-lists declared by the
//! handlers; every user-supplied value is bound as a parameter. The count query
//! and the page query share the same WHERE clause so pagination totals always
//! describe the rows being paged.

use pokeapi_core::filter::{FilterSet, FilterSpec, Predicate, QueryParams};
use pokeapi_core::pagination::{FetchWindow, PaginationState, paginate};
use pokeapi_core::query::shape_query;
use pokeapi_core::sort::SortClause;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

/// Ordering used when no allow-listed sort was requested, and the tie-breaker
/// after one that was.
const DEFAULT_ORDER: &str = "id DESC";

fn push_column(builder: &mut QueryBuilder<'_, Postgres>, column: &str) {
    builder.push("\"").push(column).push("\"");
}

pub fn push_where(builder: &mut QueryBuilder<'_, Postgres>, filters: &FilterSet) {
    for (i, predicate) in filters.predicates.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        push_column(builder, predicate.column());

        match predicate {
            Predicate::Contains { pattern, .. } => {
                builder.push(" ILIKE ").push_bind(pattern.clone());
            }
            Predicate::IntEquals { value, .. } => {
                builder.push(" = ").push_bind(*value);
            }
            Predicate::BoolEquals { value, .. } => {
                builder.push(" = ").push_bind(*value);
            }
            Predicate::AtLeast { value, .. } => {
                builder
                    .push(" >= ")
                    .push_bind(value.clone())
                    .push("::timestamptz");
            }
            Predicate::AtMost { value, .. } => {
                builder
                    .push(" <= ")
                    .push_bind(value.clone())
                    .push("::timestamptz");
            }
        }
    }
}

pub fn push_order(builder: &mut QueryBuilder<'_, Postgres>, sort: Option<SortClause>) {
    builder.push(" ORDER BY ");
    if let Some(sort) = sort {
        push_column(builder, sort.column);
        builder.push(" ").push(sort.direction.as_sql()).push(", ");
    }
    builder.push(DEFAULT_ORDER);
}

pub fn push_window(builder: &mut QueryBuilder<'_, Postgres>, window: &FetchWindow) {
    push_order(builder, window.sort);
    builder
        .push(" LIMIT ")
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);
}

/// A filtered scope over one table.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery<'f> {
    pub table: &'static str,
    /// Comma-separated select list for the page query.
    pub columns: &'static str,
    pub filters: &'f FilterSet,
}

impl<'f> ListQuery<'f> {
    pub fn new(table: &'static str, columns: &'static str, filters: &'f FilterSet) -> Self {
        Self {
            table,
            columns,
            filters,
        }
    }

    pub fn count_builder(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", self.table));
        push_where(&mut builder, self.filters);
        builder
    }

    pub fn page_builder(&self, window: &FetchWindow) -> QueryBuilder<'static, Postgres> {
        let mut builder =
            QueryBuilder::new(format!("SELECT {} FROM {}", self.columns, self.table));
        push_where(&mut builder, self.filters);
        push_window(&mut builder, window);
        builder
    }
}

#[tracing::instrument(skip(pool, query), fields(table = query.table))]
pub async fn count_rows(pool: &PgPool, query: &ListQuery<'_>) -> Result<i64, sqlx::Error> {
    query
        .count_builder()
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await
}

#[tracing::instrument(skip(pool, query), fields(table = query.table))]
pub async fn fetch_page<T>(
    pool: &PgPool,
    query: &ListQuery<'_>,
    window: &FetchWindow,
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    query
        .page_builder(window)
        .build_query_as::<T>()
        .fetch_all(pool)
        .await
}

/// Declarative description of a list endpoint: where it reads from and
/// which parameters it honours.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub table: &'static str,
    pub columns: &'static str,
    pub filters: &'static FilterSpec,
    pub sortable: &'static [&'static str],
}

/// Shapes `params` through `spec`, counts the filtered scope and fetches the
/// requested page of it.
pub async fn list_rows<T>(
    pool: &PgPool,
    spec: &ListSpec,
    params: &QueryParams,
) -> Result<(Vec<T>, PaginationState), sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let shape = shape_query(params, spec.filters, spec.sortable);
    let query = ListQuery::new(spec.table, spec.columns, &shape.filters);

    let (window, pagination) = paginate(params, shape.sort, || count_rows(pool, &query)).await?;
    let items = fetch_page(pool, &query, &window).await?;

    Ok((items, pagination))
}
