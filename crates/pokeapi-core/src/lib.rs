//! # PokeAPI Core
//!
//! Core types, errors, and the query-shaping engine for the PokeAPI backend.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`response`]: The `{success, code, message, data}` response envelope
//! - [`password`]: Password hashing and verification
//! - [`filter`]: Allow-list driven filter predicates
//! - [`sort`]: Allow-listed sort clause
//! - [`pagination`]: Page/limit bookkeeping and the fetch window
//! - [`query`]: Filter + sort composition for list endpoints
//!
//! # Example
//!
//! ```ignore
//! use pokeapi_core::{paginate, shape_query};
//!
//! let shape = shape_query(&params, POKEMON_FILTERS, POKEMON_SORTABLE);
//! let (window, pagination) = paginate(&params, shape.sort, || count(&db, &shape)).await?;
//! ```

pub mod errors;
pub mod filter;
pub mod pagination;
pub mod password;
pub mod query;
pub mod response;
pub mod sort;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use filter::{
    FilterField, FilterKind, FilterOutcome, FilterSet, FilterSpec, Predicate, QueryParams,
    apply_filters,
};
pub use pagination::{FetchWindow, PageRequest, PaginationState, paginate};
pub use password::{hash_password, verify_password};
pub use query::{QueryShape, shape_query};
pub use response::{ApiResponse, DataResponse};
pub use sort::{SortClause, SortDirection};
