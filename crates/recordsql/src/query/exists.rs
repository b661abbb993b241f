//! EXISTS builder.

use super::{SqlQuery, checked, merge_condition, record_error};
use crate::clause::{ExistsClauses, Join, JoinKind, Statement, StatementKind, TableRef};
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, IntoColumnExpr, LogicalOp};
use crate::ident::IntoIdent;
use crate::render::render_exists;
use crate::sql::Rendered;

/// `SELECT EXISTS (SELECT 1 FROM ...)` builder.
#[derive(Debug, Clone, Default)]
pub struct ExistsQuery {
    clauses: ExistsClauses,
    build_error: Option<SqlError>,
}

impl ExistsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, table: impl IntoIdent) -> Self {
        match table.into_ident() {
            Ok(name) => self.clauses.from = Some(TableRef::new(name)),
            Err(e) => record_error(&mut self.build_error, e),
        }
        self
    }

    pub fn join(mut self, kind: JoinKind, table: impl IntoIdent, on: Expr) -> Self {
        let on = checked(&mut self.build_error, on);
        match table.into_ident() {
            Ok(name) => self.clauses.joins.push(Join {
                kind,
                table: TableRef::new(name),
                on,
            }),
            Err(e) => record_error(&mut self.build_error, e),
        }
        self
    }

    pub fn where_(mut self, cond: Expr) -> Self {
        self.clauses.where_ = Some(checked(&mut self.build_error, cond));
        self
    }

    pub fn and_where(mut self, cond: Expr) -> Self {
        let cond = checked(&mut self.build_error, cond);
        self.clauses.where_ = Some(merge_condition(self.clauses.where_.take(), cond, LogicalOp::And));
        self
    }

    pub fn or_where(mut self, cond: Expr) -> Self {
        let cond = checked(&mut self.build_error, cond);
        self.clauses.where_ = Some(merge_condition(self.clauses.where_.take(), cond, LogicalOp::Or));
        self
    }

    pub fn group_by<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoColumnExpr,
    {
        for column in columns {
            let expr = checked(&mut self.build_error, column.into_column_expr());
            self.clauses.group_by.push(expr);
        }
        self
    }

    pub fn having(mut self, cond: Expr) -> Self {
        self.clauses.having = Some(checked(&mut self.build_error, cond));
        self
    }

    pub fn clauses(&self) -> &ExistsClauses {
        &self.clauses
    }
}

impl SqlQuery for ExistsQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Exists
    }

    fn validate(&self) -> SqlResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        self.clauses.validate()
    }

    fn build(&self) -> Rendered {
        render_exists(&self.clauses)
    }

    fn into_statement(self) -> SqlResult<Statement> {
        self.validate()?;
        Ok(Statement::Exists(self.clauses))
    }
}
