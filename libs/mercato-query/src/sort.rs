//! Sort spec interpreter: clauses → composite ordering.

use sea_orm::{ColumnTrait, EntityTrait, Order, QueryOrder, Select};

use crate::error::QueryError;
use crate::fields::EntitySchema;
use crate::spec::{SortClause, SortDir};

/// Order a query by a sort spec.
///
/// Clauses apply left to right: the first is the primary key of the composite
/// sort, later clauses break ties. A missing direction defaults to ascending.
///
/// No implicit primary-key tie-breaker is appended; callers wanting stable
/// pages across equal sort keys include an id clause themselves.
///
/// # Errors
/// `FieldNotFound` for an unresolvable model/field pair, `BadSortFormat` for
/// an invalid direction.
pub fn apply_sort<E>(
    select: Select<E>,
    spec: &[SortClause],
    schema: &EntitySchema<E>,
) -> Result<Select<E>, QueryError>
where
    E: EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    let mut select = select;
    for clause in spec {
        let field = schema.resolve(clause.model.as_deref(), &clause.field)?;
        let direction = match clause.direction.as_deref() {
            Some(raw) => SortDir::parse(raw)?,
            None => SortDir::default(),
        };
        select = select.order_by(
            field.col,
            match direction {
                SortDir::Asc => Order::Asc,
                SortDir::Desc => Order::Desc,
            },
        );
    }
    Ok(select)
}
