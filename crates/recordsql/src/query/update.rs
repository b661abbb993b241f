//! UPDATE builder.

use super::{SqlQuery, checked, merge_condition, record_error};
use crate::clause::{Assignment, Returning, Statement, StatementKind, UpdateClauses};
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, IntoColumnExpr, LogicalOp};
use crate::ident::IntoIdent;
use crate::render::render_update;
use crate::sql::Rendered;

/// UPDATE statement builder.
#[derive(Debug, Clone, Default)]
pub struct UpdateQuery {
    clauses: UpdateClauses,
    build_error: Option<SqlError>,
}

impl UpdateQuery {
    /// Create a builder for `table`.
    pub fn new(table: impl IntoIdent) -> Self {
        let mut query = Self::default();
        match table.into_ident() {
            Ok(name) => query.clauses.table = Some(name),
            Err(e) => record_error(&mut query.build_error, e),
        }
        query
    }

    /// `column = ?`, or `column = <expr>` for expressions such as `col("n") + 1`.
    ///
    /// A NULL value binds as a parameter (`column = ?`).
    pub fn set(mut self, column: impl IntoIdent, value: impl Into<Expr>) -> Self {
        let value = checked(&mut self.build_error, value.into());
        match column.into_ident() {
            Ok(column) => self.clauses.set.push(Assignment { column, value }),
            Err(e) => record_error(&mut self.build_error, e),
        }
        self
    }

    /// Several `column = ?` assignments, in iteration order.
    pub fn set_values<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: IntoIdent,
        V: Into<Expr>,
    {
        pairs
            .into_iter()
            .fold(self, |query, (column, value)| query.set(column, value))
    }

    /// Set the WHERE condition, replacing any previous one.
    pub fn where_(mut self, cond: Expr) -> Self {
        self.clauses.where_ = Some(checked(&mut self.build_error, cond));
        self
    }

    /// AND `cond` into the WHERE condition.
    pub fn and_where(mut self, cond: Expr) -> Self {
        let cond = checked(&mut self.build_error, cond);
        self.clauses.where_ = Some(merge_condition(self.clauses.where_.take(), cond, LogicalOp::And));
        self
    }

    /// OR `cond` into the WHERE condition.
    pub fn or_where(mut self, cond: Expr) -> Self {
        let cond = checked(&mut self.build_error, cond);
        self.clauses.where_ = Some(merge_condition(self.clauses.where_.take(), cond, LogicalOp::Or));
        self
    }

    /// `RETURNING <columns>`
    pub fn returning<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoColumnExpr,
    {
        let exprs = columns
            .into_iter()
            .map(|c| checked(&mut self.build_error, c.into_column_expr()))
            .collect();
        self.clauses.returning = Some(Returning::Columns(exprs));
        self
    }

    /// `RETURNING *`
    pub fn returning_all(mut self) -> Self {
        self.clauses.returning = Some(Returning::All);
        self
    }

    pub fn clauses(&self) -> &UpdateClauses {
        &self.clauses
    }
}

impl SqlQuery for UpdateQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn validate(&self) -> SqlResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        self.clauses.validate()
    }

    fn build(&self) -> Rendered {
        render_update(&self.clauses)
    }

    fn into_statement(self) -> SqlResult<Statement> {
        self.validate()?;
        Ok(Statement::Update(self.clauses))
    }
}
