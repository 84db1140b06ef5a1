//! Per-entity field registry.
//!
//! Clause interpretation resolves string field names through an explicit
//! registry built once at startup, never through runtime reflection. Each
//! entity exposes an [`EntitySchema`]: its API model name plus a [`FieldMap`]
//! from field names to typed sea-orm columns.

use std::collections::HashMap;
use std::fmt;

use sea_orm::EntityTrait;

use crate::error::QueryError;

/// Logical field types, driving JSON value coercion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    I64,
    F64,
    Bool,
    Date,
    DateTimeUtc,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::I64 => write!(f, "integer"),
            FieldKind::F64 => write!(f, "float"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Date => write!(f, "date"),
            FieldKind::DateTimeUtc => write!(f, "datetime"),
        }
    }
}

/// A filterable/sortable column.
#[derive(Clone)]
pub struct Field<E: EntityTrait> {
    pub col: E::Column,
    pub kind: FieldKind,
}

/// Map from API field names to columns for one entity.
#[derive(Clone)]
#[must_use]
pub struct FieldMap<E: EntityTrait> {
    map: HashMap<String, Field<E>>,
}

impl<E: EntityTrait> Default for FieldMap<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> FieldMap<E> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn insert(mut self, api_name: impl Into<String>, col: E::Column, kind: FieldKind) -> Self {
        self.map
            .insert(api_name.into().to_lowercase(), Field { col, kind });
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field<E>> {
        self.map.get(&name.to_lowercase())
    }
}

/// A registered entity: API model name plus its field map.
#[derive(Clone)]
pub struct EntitySchema<E: EntityTrait> {
    name: &'static str,
    fields: FieldMap<E>,
}

impl<E: EntityTrait> EntitySchema<E> {
    pub fn new(name: &'static str, fields: FieldMap<E>) -> Self {
        Self { name, fields }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve a clause's model/field pair.
    ///
    /// A clause naming a different model never silently matches this entity;
    /// both a wrong model and a missing field fail the same way.
    ///
    /// # Errors
    /// `QueryError::FieldNotFound` when the pair does not resolve.
    pub fn resolve(&self, model: Option<&str>, field: &str) -> Result<&Field<E>, QueryError> {
        if let Some(model) = model {
            if model != self.name {
                return Err(QueryError::FieldNotFound {
                    model: model.to_owned(),
                    field: field.to_owned(),
                });
            }
        }
        self.fields.get(field).ok_or_else(|| QueryError::FieldNotFound {
            model: self.name.to_owned(),
            field: field.to_owned(),
        })
    }
}

/// Coerce a JSON operand to a sea-orm value of the field's kind.
///
/// # Errors
/// `QueryError::BadFilterFormat` on a shape mismatch.
pub fn coerce(kind: FieldKind, value: &serde_json::Value, field: &str) -> Result<sea_orm::Value, QueryError> {
    use serde_json::Value as J;

    let mismatch = || {
        QueryError::BadFilterFormat(format!(
            "expected {kind} value for field `{field}`, got {value}"
        ))
    };

    Ok(match (kind, value) {
        (FieldKind::String, J::String(s)) => sea_orm::Value::String(Some(Box::new(s.clone()))),

        (FieldKind::I64, J::Number(n)) => {
            sea_orm::Value::BigInt(Some(n.as_i64().ok_or_else(mismatch)?))
        }

        (FieldKind::F64, J::Number(n)) => {
            sea_orm::Value::Double(Some(n.as_f64().ok_or_else(mismatch)?))
        }

        (FieldKind::Bool, J::Bool(b)) => sea_orm::Value::Bool(Some(*b)),

        (FieldKind::Date, J::String(s)) => {
            let date = s.parse::<chrono::NaiveDate>().map_err(|_| mismatch())?;
            sea_orm::Value::ChronoDate(Some(Box::new(date)))
        }

        (FieldKind::DateTimeUtc, J::String(s)) => {
            let dt = chrono::DateTime::parse_from_rfc3339(s)
                .map_err(|_| mismatch())?
                .with_timezone(&chrono::Utc);
            sea_orm::Value::ChronoDateTimeUtc(Some(Box::new(dt)))
        }

        _ => return Err(mismatch()),
    })
}
