//! SELECT builder (also backs COUNT).

use super::{SqlQuery, checked, merge_condition, record_error};
use crate::clause::{Direction, Join, JoinKind, OrderBy, SelectClauses, Statement, StatementKind, TableRef};
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, IntoColumnExpr, LogicalOp};
use crate::ident::IntoIdent;
use crate::render::render_select;
use crate::sql::Rendered;

/// SELECT statement builder.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    clauses: SelectClauses,
    build_error: Option<SqlError>,
}

impl SelectQuery {
    /// Create an empty builder (`SELECT *` until columns are added).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append select items. Strings name columns.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoColumnExpr,
    {
        for column in columns {
            let expr = checked(&mut self.build_error, column.into_column_expr());
            self.clauses.columns.push(expr);
        }
        self
    }

    /// Append one select item.
    pub fn column(self, column: impl IntoColumnExpr) -> Self {
        self.columns([column])
    }

    /// Set the FROM table (or CTE name).
    pub fn from(mut self, table: impl IntoIdent) -> Self {
        match table.into_ident() {
            Ok(name) => self.clauses.from = Some(TableRef::new(name)),
            Err(e) => record_error(&mut self.build_error, e),
        }
        self
    }

    /// Set the FROM table with an alias: `FROM "users" AS u`.
    pub fn from_as(mut self, table: impl IntoIdent, alias: impl IntoIdent) -> Self {
        match (table.into_ident(), alias.into_ident()) {
            (Ok(name), Ok(alias)) => self.clauses.from = Some(TableRef::new(name).with_alias(alias)),
            (Err(e), _) | (_, Err(e)) => record_error(&mut self.build_error, e),
        }
        self
    }

    /// Add a JOIN.
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

    pub fn inner_join(self, table: impl IntoIdent, on: Expr) -> Self {
        self.join(JoinKind::Inner, table, on)
    }

    pub fn left_join(self, table: impl IntoIdent, on: Expr) -> Self {
        self.join(JoinKind::Left, table, on)
    }

    pub fn right_join(self, table: impl IntoIdent, on: Expr) -> Self {
        self.join(JoinKind::Right, table, on)
    }

    pub fn full_join(self, table: impl IntoIdent, on: Expr) -> Self {
        self.join(JoinKind::Full, table, on)
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

    /// Append GROUP BY items.
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

    /// Set the HAVING condition.
    pub fn having(mut self, cond: Expr) -> Self {
        self.clauses.having = Some(checked(&mut self.build_error, cond));
        self
    }

    /// Append an ORDER BY item.
    pub fn order_by(mut self, column: impl IntoColumnExpr, direction: Direction) -> Self {
        let expr = checked(&mut self.build_error, column.into_column_expr());
        self.clauses.order_by.push(OrderBy { expr, direction });
        self
    }

    /// Append an ORDER BY item with the direction given as `"ASC"` / `"DESC"`.
    pub fn order_by_str(mut self, column: impl IntoColumnExpr, direction: &str) -> Self {
        match direction.parse::<Direction>() {
            Ok(direction) => self.order_by(column, direction),
            Err(e) => {
                record_error(&mut self.build_error, e);
                self
            }
        }
    }

    pub fn asc(self, column: impl IntoColumnExpr) -> Self {
        self.order_by(column, Direction::Asc)
    }

    pub fn desc(self, column: impl IntoColumnExpr) -> Self {
        self.order_by(column, Direction::Desc)
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.clauses.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.clauses.offset = Some(n);
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        let size = per_page.max(1);
        self.clauses.limit = Some(size);
        self.clauses.offset = Some((page - 1).saturating_mul(size));
        self
    }

    /// The clause record built so far.
    pub fn clauses(&self) -> &SelectClauses {
        &self.clauses
    }
}

impl SqlQuery for SelectQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn validate(&self) -> SqlResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        self.clauses.validate()
    }

    fn build(&self) -> Rendered {
        render_select(&self.clauses)
    }

    fn into_statement(self) -> SqlResult<Statement> {
        self.validate()?;
        Ok(Statement::Select(self.clauses))
    }
}
