//! Allow-list driven filtering for list endpoints.
//!
//! Each handler declares the fields it accepts as a [`FilterSpec`]. Only those
//! fields are read from the raw query parameters; anything else is ignored.
//! Filtering is fail-open: an empty value counts as absent, and a value that
//! does not parse for its declared kind is skipped instead of failing the
//! request. The skip is still reported in [`FilterSet::skipped`].
//!
//! # Example
//!
//! ```ignore
//! use pokeapi_core::filter::{FilterField, FilterKind, apply_filters};
//!
//! const PRODUCT_FILTERS: &[FilterField] = &[
//!     FilterField::new("name", FilterKind::String),
//!     FilterField::new("price", FilterKind::Integer),
//! ];
//!
//! let filters = apply_filters(&params, PRODUCT_FILTERS);
//! ```

use std::collections::HashMap;

/// Raw query-string parameters as received by a list handler.
pub type QueryParams = HashMap<String, String>;

/// Declared value kind of a filterable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Case-insensitive substring match.
    String,
    /// Exact equality on an `i64`.
    Integer,
    /// Exact equality on a boolean literal.
    Boolean,
    /// Inclusive lower bound (`>=`), compared against the raw value.
    DateFrom,
    /// Inclusive upper bound (`<=`), compared against the raw value.
    DateTo,
}

/// A filterable field: the query parameter it is read from, the column it
/// constrains and how the value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub param: &'static str,
    pub column: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    /// Field whose query parameter and column share a name.
    pub const fn new(name: &'static str, kind: FilterKind) -> Self {
        Self {
            param: name,
            column: name,
            kind,
        }
    }

    /// Field read from `param` but applied to `column`, e.g. `created_from` on `created_at`.
    pub const fn on_column(param: &'static str, column: &'static str, kind: FilterKind) -> Self {
        Self {
            param,
            column,
            kind,
        }
    }
}

/// The allow-list of filterable fields for one endpoint.
pub type FilterSpec = [FilterField];

/// A single condition on a column. Predicates in a set combine with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `column ILIKE pattern`, where `pattern` is already wrapped in `%`.
    Contains { column: &'static str, pattern: String },
    IntEquals { column: &'static str, value: i64 },
    BoolEquals { column: &'static str, value: bool },
    AtLeast { column: &'static str, value: String },
    AtMost { column: &'static str, value: String },
}

impl Predicate {
    pub fn column(&self) -> &'static str {
        match self {
            Predicate::Contains { column, .. }
            | Predicate::IntEquals { column, .. }
            | Predicate::BoolEquals { column, .. }
            | Predicate::AtLeast { column, .. }
            | Predicate::AtMost { column, .. } => *column,
        }
    }
}

/// Result of evaluating one raw value against its declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Applied(Predicate),
    /// No value, or an empty one.
    Absent,
    /// A value was given but does not parse for the declared kind.
    Unparsable,
}

impl FilterKind {
    pub fn evaluate(self, column: &'static str, raw: Option<&str>) -> FilterOutcome {
        let value = match raw {
            Some(v) if !v.is_empty() => v,
            _ => return FilterOutcome::Absent,
        };

        let predicate = match self {
            FilterKind::String => Some(Predicate::Contains {
                column,
                pattern: format!("%{}%", value),
            }),
            FilterKind::Integer => value
                .parse::<i64>()
                .ok()
                .map(|value| Predicate::IntEquals { column, value }),
            FilterKind::Boolean => {
                parse_bool(value).map(|value| Predicate::BoolEquals { column, value })
            }
            FilterKind::DateFrom => Some(Predicate::AtLeast {
                column,
                value: value.to_string(),
            }),
            FilterKind::DateTo => Some(Predicate::AtMost {
                column,
                value: value.to_string(),
            }),
        };

        match predicate {
            Some(p) => FilterOutcome::Applied(p),
            None => FilterOutcome::Unparsable,
        }
    }
}

/// Accepts the same literals as the usual `1/t/true` family.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Predicates produced from one request, plus the parameters that were
/// present but could not be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub predicates: Vec<Predicate>,
    pub skipped: Vec<&'static str>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Builds the predicate set for `params` restricted to the fields in `spec`.
pub fn apply_filters(params: &QueryParams, spec: &FilterSpec) -> FilterSet {
    let mut set = FilterSet::default();

    for field in spec {
        let raw = params.get(field.param).map(String::as_str);
        match field.kind.evaluate(field.column, raw) {
            FilterOutcome::Applied(predicate) => set.predicates.push(predicate),
            FilterOutcome::Unparsable => {
                tracing::debug!(param = field.param, "Skipping unparsable filter value");
                set.skipped.push(field.param);
            }
            FilterOutcome::Absent => {}
        }
    }

    set
}
