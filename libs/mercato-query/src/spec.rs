//! Wire-format filter and sort specs.
//!
//! Both specs arrive as JSON-encoded arrays in string query parameters:
//!
//! ```text
//! filter=[{"model":"Segment","field":"title","op":"ilike","value":"%pet%"}]
//! sort=[{"model":"Segment","field":"id","direction":"desc"}]
//! ```
//!
//! `model` is optional in both; when present it must name the entity the
//! endpoint queries, otherwise the clause fails with `FieldNotFound`.

use serde::Deserialize;

use crate::error::QueryError;

/// One declarative filter clause.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterClause {
    #[serde(default)]
    pub model: Option<String>,
    pub field: String,
    pub op: String,
    /// Clause operand; `Null` for operand-less operators (`is_null`)
    #[serde(default)]
    pub value: serde_json::Value,
}

impl FilterClause {
    /// Build a clause programmatically (used by endpoints that append
    /// scoping predicates to caller-supplied specs).
    pub fn new(field: impl Into<String>, op: FilterOp, value: serde_json::Value) -> Self {
        Self {
            model: None,
            field: field.into(),
            op: op.as_str().to_owned(),
            value,
        }
    }

    /// Shorthand for an equality clause.
    pub fn eq(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::new(field, FilterOp::Eq, value.into())
    }
}

/// One declarative sort clause.
#[derive(Debug, Clone, Deserialize)]
pub struct SortClause {
    #[serde(default)]
    pub model: Option<String>,
    pub field: String,
    /// `asc` (default) or `desc`
    #[serde(default)]
    pub direction: Option<String>,
}

impl SortClause {
    pub fn new(field: impl Into<String>, direction: SortDir) -> Self {
        Self {
            model: None,
            field: field.into(),
            direction: Some(direction.as_str().to_owned()),
        }
    }
}

/// The closed operator set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    In,
    Like,
    Ilike,
    IsNull,
    IsNotNull,
}

impl FilterOp {
    /// Resolve an operator symbol; anything outside the closed set is a
    /// contract violation.
    ///
    /// # Errors
    /// `QueryError::BadFilterFormat` for an unrecognized symbol.
    pub fn parse(op: &str) -> Result<Self, QueryError> {
        Ok(match op {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "gt" => Self::Gt,
            "ge" => Self::Ge,
            "lt" => Self::Lt,
            "le" => Self::Le,
            "in" => Self::In,
            "like" => Self::Like,
            "ilike" => Self::Ilike,
            "is_null" => Self::IsNull,
            "is_not_null" => Self::IsNotNull,
            other => {
                return Err(QueryError::BadFilterFormat(format!(
                    "operator `{other}` not valid"
                )))
            }
        })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::In => "in",
            Self::Like => "like",
            Self::Ilike => "ilike",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// # Errors
    /// `QueryError::BadSortFormat` for anything but `asc`/`desc`.
    pub fn parse(direction: &str) -> Result<Self, QueryError> {
        match direction {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(QueryError::BadSortFormat(format!(
                "direction `{other}` not valid"
            ))),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Common listing query parameters, shared by every paginated endpoint.
///
/// `filter` and `sort` arrive as JSON-encoded strings and are decoded on
/// demand; `page` defaults to 1 and `items_per_page` to the configured
/// default at the call site.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default, alias = "itemsPerPage")]
    pub items_per_page: Option<i64>,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl PageQuery {
    /// # Errors
    /// `QueryError::BadFilterFormat` when the `filter` parameter is present
    /// but undecodable.
    pub fn filter_spec(&self) -> Result<Vec<FilterClause>, QueryError> {
        match self.filter.as_deref() {
            Some(raw) => parse_filter_spec(raw),
            None => Ok(Vec::new()),
        }
    }

    /// # Errors
    /// `QueryError::BadSortFormat` when the `sort` parameter is present but
    /// undecodable.
    pub fn sort_spec(&self) -> Result<Vec<SortClause>, QueryError> {
        match self.sort.as_deref() {
            Some(raw) => parse_sort_spec(raw),
            None => Ok(Vec::new()),
        }
    }
}

/// Decode the `filter` query parameter.
///
/// # Errors
/// `QueryError::BadFilterFormat` if the parameter is not a JSON array of
/// clause objects.
pub fn parse_filter_spec(raw: &str) -> Result<Vec<FilterClause>, QueryError> {
    serde_json::from_str(raw).map_err(|e| QueryError::BadFilterFormat(e.to_string()))
}

/// Decode the `sort` query parameter.
///
/// # Errors
/// `QueryError::BadSortFormat` if the parameter is not a JSON array of
/// clause objects.
pub fn parse_sort_spec(raw: &str) -> Result<Vec<SortClause>, QueryError> {
    serde_json::from_str(raw).map_err(|e| QueryError::BadSortFormat(e.to_string()))
}
