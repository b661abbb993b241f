//! Fluent statement builders.
//!
//! Each builder owns the clause record for its statement kind and is consumed
//! by every chained call (`mut self -> Self`). Names, conditions and rows are
//! checked as they are attached; the first failure is kept and returned by
//! the terminal [`SqlQuery::render`] / [`SqlQuery::placeholder_pair`] call.
//!
//! # Example
//!
//! ```ignore
//! use recordsql::prelude::*;
//!
//! let [name, age] = cols(["name", "age"]);
//! let (sql, params) = select([&name, &age])
//!     .from("users")
//!     .where_(age.gt(18))
//!     .order_by_str(&age, "DESC")
//!     .limit(10)
//!     .placeholder_pair()?;
//! assert_eq!(sql, r#"SELECT name, age FROM "users" WHERE age > ? ORDER BY age DESC LIMIT 10"#);
//! ```

mod delete;
mod exists;
mod insert;
mod select;
mod traits;
mod update;
mod with;

#[cfg(test)]
mod tests;

pub use delete::DeleteQuery;
pub use exists::ExistsQuery;
pub use insert::{InsertQuery, IntoRow, OnConflictBuilder, OnConflictUpdateBuilder};
pub use select::SelectQuery;
pub use traits::SqlQuery;
pub use update::UpdateQuery;
pub use with::{IntoCte, OuterQuery, WithQuery};

use crate::error::SqlError;
use crate::expr::{Expr, IntoColumnExpr, LogicalOp, count_star};
use crate::ident::IntoIdent;

/// `SELECT <columns> ...`. An empty column list renders `SELECT *`.
pub fn select<I>(columns: I) -> SelectQuery
where
    I: IntoIterator,
    I::Item: IntoColumnExpr,
{
    SelectQuery::new().columns(columns)
}

/// `SELECT * ...`
pub fn select_all() -> SelectQuery {
    SelectQuery::new()
}

/// `SELECT COUNT(*) ...`
pub fn count() -> SelectQuery {
    SelectQuery::new().column(count_star())
}

/// `SELECT COUNT(<column>) ...`
pub fn count_column(column: impl IntoColumnExpr) -> SelectQuery {
    SelectQuery::new().column(crate::expr::count(column))
}

/// `INSERT INTO ... (<columns>) ...`; set the table with [`InsertQuery::into_table`].
pub fn insert<I>(columns: I) -> InsertQuery
where
    I: IntoIterator,
    I::Item: IntoIdent,
{
    InsertQuery::new().columns(columns)
}

/// `INSERT INTO "<table>" ...`; set columns with [`InsertQuery::columns`].
pub fn insert_into(table: impl IntoIdent) -> InsertQuery {
    InsertQuery::new().into_table(table)
}

/// `UPDATE "<table>" ...`
pub fn update(table: impl IntoIdent) -> UpdateQuery {
    UpdateQuery::new(table)
}

/// `DELETE FROM ...`; set the table with [`DeleteQuery::from`].
pub fn delete() -> DeleteQuery {
    DeleteQuery::new()
}

/// `DELETE FROM "<table>" ...`
pub fn delete_from(table: impl IntoIdent) -> DeleteQuery {
    DeleteQuery::new().from(table)
}

/// `SELECT EXISTS (SELECT 1 FROM ...)`
pub fn exists() -> ExistsQuery {
    ExistsQuery::new()
}

/// `WITH <cte> ...`, followed by an outer statement.
pub fn with(cte: impl IntoCte) -> WithQuery {
    WithQuery::new().cte(cte)
}

/// Keep the first construction error.
pub(crate) fn record_error(slot: &mut Option<SqlError>, err: SqlError) {
    if slot.is_none() {
        tracing::debug!(target: "recordsql.build", error = %err, "statement construction error");
        *slot = Some(err);
    }
}

/// Validate an expression as it is attached, recording any failure.
pub(crate) fn checked(slot: &mut Option<SqlError>, expr: Expr) -> Expr {
    if let Err(err) = expr.validate() {
        record_error(slot, err);
    }
    expr
}

/// Combine `cond` into an optional existing condition with AND or OR.
pub(crate) fn merge_condition(existing: Option<Expr>, cond: Expr, op: LogicalOp) -> Expr {
    match (existing, op) {
        (None, _) => cond,
        (Some(prev), LogicalOp::And) => prev & cond,
        (Some(prev), LogicalOp::Or) => prev | cond,
    }
}
