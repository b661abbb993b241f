//! DELETE builder.

use super::{SqlQuery, checked, merge_condition, record_error};
use crate::clause::{DeleteClauses, Statement, StatementKind};
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, LogicalOp};
use crate::ident::IntoIdent;
use crate::render::render_delete;
use crate::sql::Rendered;

/// DELETE statement builder. A missing WHERE deletes every row.
#[derive(Debug, Clone, Default)]
pub struct DeleteQuery {
    clauses: DeleteClauses,
    build_error: Option<SqlError>,
}

impl DeleteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, table: impl IntoIdent) -> Self {
        match table.into_ident() {
            Ok(name) => self.clauses.table = Some(name),
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

    pub fn clauses(&self) -> &DeleteClauses {
        &self.clauses
    }
}

impl SqlQuery for DeleteQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn validate(&self) -> SqlResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        self.clauses.validate()
    }

    fn build(&self) -> Rendered {
        render_delete(&self.clauses)
    }

    fn into_statement(self) -> SqlResult<Statement> {
        self.validate()?;
        Ok(Statement::Delete(self.clauses))
    }
}
