//! Filter spec interpreter: clauses → sea-orm predicates.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, Select};

use crate::error::QueryError;
use crate::fields::{coerce, EntitySchema, Field, FieldKind};
use crate::spec::{FilterClause, FilterOp};

/// Narrow a query with a filter spec.
///
/// Clauses combine with logical AND across the whole list. Interpretation is
/// fail-fast: the first invalid clause aborts the call and the input query is
/// returned to the caller untouched (builders are consumed and rebuilt, never
/// mutated in place).
///
/// # Errors
/// `FieldNotFound` for an unresolvable model/field pair, `BadFilterFormat`
/// for an unknown operator or an operand of the wrong shape.
pub fn apply_filters<E>(
    select: Select<E>,
    spec: &[FilterClause],
    schema: &EntitySchema<E>,
) -> Result<Select<E>, QueryError>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    let mut condition = Condition::all();
    for clause in spec {
        condition = condition.add(clause_condition(clause, schema)?);
    }
    Ok(select.filter(condition))
}

fn clause_condition<E>(
    clause: &FilterClause,
    schema: &EntitySchema<E>,
) -> Result<Condition, QueryError>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    use serde_json::Value as J;

    let field = schema.resolve(clause.model.as_deref(), &clause.field)?;
    let op = FilterOp::parse(&clause.op)?;
    let col = field.col;

    // Null operands turn equality into null checks, everything else is a
    // format violation.
    if matches!(clause.value, J::Null) && !matches!(op, FilterOp::IsNull | FilterOp::IsNotNull) {
        return match op {
            FilterOp::Eq => Ok(Condition::all().add(col.is_null())),
            FilterOp::Ne => Ok(Condition::all().add(col.is_not_null())),
            _ => Err(QueryError::BadFilterFormat(format!(
                "operator `{}` requires a value for field `{}`",
                clause.op, clause.field
            ))),
        };
    }

    Ok(match op {
        FilterOp::Eq => Condition::all().add(col.eq(coerce(field.kind, &clause.value, &clause.field)?)),
        FilterOp::Ne => Condition::all().add(col.ne(coerce(field.kind, &clause.value, &clause.field)?)),
        FilterOp::Gt => Condition::all().add(col.gt(coerce(field.kind, &clause.value, &clause.field)?)),
        FilterOp::Ge => Condition::all().add(col.gte(coerce(field.kind, &clause.value, &clause.field)?)),
        FilterOp::Lt => Condition::all().add(col.lt(coerce(field.kind, &clause.value, &clause.field)?)),
        FilterOp::Le => Condition::all().add(col.lte(coerce(field.kind, &clause.value, &clause.field)?)),

        FilterOp::In => {
            let J::Array(items) = &clause.value else {
                return Err(QueryError::BadFilterFormat(format!(
                    "operator `in` requires an array value for field `{}`",
                    clause.field
                )));
            };
            let values = items
                .iter()
                .map(|item| coerce(field.kind, item, &clause.field))
                .collect::<Result<Vec<_>, _>>()?;
            if values.is_empty() {
                // IN () matches nothing
                Condition::all().add(Expr::cust("1=0"))
            } else {
                Condition::all().add(col.is_in(values))
            }
        }

        FilterOp::Like => {
            let pattern = string_pattern(field, &clause.value, &clause.field)?;
            Condition::all().add(col.like(pattern))
        }

        FilterOp::Ilike => {
            // lower(col) LIKE lower(pattern): identical behavior on sqlite
            // and Postgres without a dialect-specific ILIKE
            let pattern = string_pattern(field, &clause.value, &clause.field)?;
            Condition::all().add(
                Expr::expr(Func::lower(Expr::col(col))).like(pattern.to_lowercase()),
            )
        }

        FilterOp::IsNull => Condition::all().add(col.is_null()),
        FilterOp::IsNotNull => Condition::all().add(col.is_not_null()),
    })
}

/// Pattern operators only apply to string fields; `%` wildcards are caller
/// supplied and passed through verbatim.
fn string_pattern<E>(
    field: &Field<E>,
    value: &serde_json::Value,
    name: &str,
) -> Result<String, QueryError>
where
    E: EntityTrait,
{
    if field.kind != FieldKind::String {
        return Err(QueryError::BadFilterFormat(format!(
            "pattern match requires a string field, `{name}` is {}",
            field.kind
        )));
    }
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        other => Err(QueryError::BadFilterFormat(format!(
            "expected string pattern for field `{name}`, got {other}"
        ))),
    }
}
