//! WITH (CTE) builder.
//!
//! ```ignore
//! let [name, age] = cols(["name", "age"]);
//! let adults = select([&name, &age]).from("users").where_(age.gt(18));
//!
//! let query = with(adults.as_cte("adults"))
//!     .select([&name])
//!     .from("adults");
//! // WITH adults AS (SELECT name, age FROM "users" WHERE age > ?) SELECT name FROM "adults"
//! ```
//!
//! Clause methods are forwarded to the outer statement. A clause the outer
//! statement kind does not accept records an `UnsupportedOperation` error.

use super::{
    DeleteQuery, ExistsQuery, InsertQuery, IntoRow, SelectQuery, SqlQuery, UpdateQuery,
    record_error,
};
use crate::clause::{Cte, Direction, JoinKind, OnConflict, Statement, StatementKind, WithClauses};
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, IntoColumnExpr, count_star};
use crate::ident::IntoIdent;
use crate::render::render_with;
use crate::sql::Rendered;

/// Inputs accepted as a CTE binding.
pub trait IntoCte {
    fn into_cte(self) -> SqlResult<Cte>;
}

impl IntoCte for Cte {
    fn into_cte(self) -> SqlResult<Cte> {
        Ok(self)
    }
}

impl IntoCte for SqlResult<Cte> {
    fn into_cte(self) -> SqlResult<Cte> {
        self
    }
}

/// The statement that follows the CTE list.
#[derive(Debug, Clone)]
pub enum OuterQuery {
    Select(SelectQuery),
    Insert(InsertQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
    Exists(ExistsQuery),
}

impl OuterQuery {
    fn as_query(&self) -> &dyn SqlQuery {
        match self {
            OuterQuery::Select(q) => q,
            OuterQuery::Insert(q) => q,
            OuterQuery::Update(q) => q,
            OuterQuery::Delete(q) => q,
            OuterQuery::Exists(q) => q,
        }
    }

    fn kind(&self) -> StatementKind {
        self.as_query().kind()
    }

    /// Clone the clauses into a statement without validating them.
    fn statement(&self) -> Statement {
        match self {
            OuterQuery::Select(q) => Statement::Select(q.clauses().clone()),
            OuterQuery::Insert(q) => Statement::Insert(q.clauses().clone()),
            OuterQuery::Update(q) => Statement::Update(q.clauses().clone()),
            OuterQuery::Delete(q) => Statement::Delete(q.clauses().clone()),
            OuterQuery::Exists(q) => Statement::Exists(q.clauses().clone()),
        }
    }

    fn into_statement(self) -> SqlResult<Statement> {
        match self {
            OuterQuery::Select(q) => q.into_statement(),
            OuterQuery::Insert(q) => q.into_statement(),
            OuterQuery::Update(q) => q.into_statement(),
            OuterQuery::Delete(q) => q.into_statement(),
            OuterQuery::Exists(q) => q.into_statement(),
        }
    }
}

macro_rules! impl_outer_from {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for OuterQuery {
                fn from(q: $ty) -> Self {
                    OuterQuery::$variant(q)
                }
            }
        )+
    };
}

impl_outer_from!(
    Select(SelectQuery),
    Insert(InsertQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
    Exists(ExistsQuery),
);

/// Forward a clause call to the outer statement kinds that accept it.
macro_rules! forward {
    ($self:ident, $clause:literal, { $($variant:ident($q:ident) => $body:expr),+ $(,)? }) => {{
        let mut this = $self;
        match this.outer.take() {
            $(Some(OuterQuery::$variant($q)) => this.outer = Some(OuterQuery::$variant($body)),)+
            Some(other) => {
                let err = SqlError::unsupported(format!(
                    "{} is not valid on a WITH ... {} statement",
                    $clause,
                    other.kind()
                ));
                record_error(&mut this.build_error, err);
                this.outer = Some(other);
            }
            None => {
                let err = SqlError::validation(format!(
                    "WITH requires an outer statement before {}",
                    $clause
                ));
                record_error(&mut this.build_error, err);
            }
        }
        this
    }};
}

/// WITH statement builder.
#[derive(Debug, Clone, Default)]
pub struct WithQuery {
    recursive: bool,
    ctes: Vec<Cte>,
    outer: Option<OuterQuery>,
    build_error: Option<SqlError>,
}

impl WithQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a CTE binding. Bindings render in the order they are added.
    pub fn cte(mut self, cte: impl IntoCte) -> Self {
        match cte.into_cte() {
            Ok(cte) => self.ctes.push(cte),
            Err(e) => record_error(&mut self.build_error, e),
        }
        self
    }

    /// `WITH RECURSIVE`
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Set the outer statement from an existing builder.
    pub fn body(mut self, query: impl Into<OuterQuery>) -> Self {
        if let Some(existing) = &self.outer {
            let err = SqlError::unsupported(format!(
                "WITH already has an outer {} statement",
                existing.kind()
            ));
            record_error(&mut self.build_error, err);
            return self;
        }
        self.outer = Some(query.into());
        self
    }

    /// Outer `SELECT <columns>`.
    pub fn select<I>(self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoColumnExpr,
    {
        self.body(SelectQuery::new().columns(columns))
    }

    /// Outer `SELECT *`.
    pub fn select_all(self) -> Self {
        self.body(SelectQuery::new())
    }

    /// Outer `SELECT COUNT(*)`.
    pub fn count(self) -> Self {
        self.body(SelectQuery::new().column(count_star()))
    }

    /// Outer `INSERT (<columns>)`.
    pub fn insert<I>(self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoIdent,
    {
        self.body(InsertQuery::new().columns(columns))
    }

    /// Outer `UPDATE "<table>"`.
    pub fn update(self, table: impl IntoIdent) -> Self {
        self.body(UpdateQuery::new(table))
    }

    /// Outer `DELETE`.
    pub fn delete(self) -> Self {
        self.body(DeleteQuery::new())
    }

    /// Outer `SELECT EXISTS (...)`.
    pub fn exists(self) -> Self {
        self.body(ExistsQuery::new())
    }

    pub fn from(self, table: impl IntoIdent) -> Self {
        forward!(self, "FROM", {
            Select(q) => q.from(table),
            Delete(q) => q.from(table),
            Exists(q) => q.from(table),
        })
    }

    pub fn join(self, kind: JoinKind, table: impl IntoIdent, on: Expr) -> Self {
        forward!(self, "JOIN", {
            Select(q) => q.join(kind, table, on),
            Exists(q) => q.join(kind, table, on),
        })
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

    pub fn where_(self, cond: Expr) -> Self {
        forward!(self, "WHERE", {
            Select(q) => q.where_(cond),
            Update(q) => q.where_(cond),
            Delete(q) => q.where_(cond),
            Exists(q) => q.where_(cond),
        })
    }

    pub fn and_where(self, cond: Expr) -> Self {
        forward!(self, "WHERE", {
            Select(q) => q.and_where(cond),
            Update(q) => q.and_where(cond),
            Delete(q) => q.and_where(cond),
            Exists(q) => q.and_where(cond),
        })
    }

    pub fn or_where(self, cond: Expr) -> Self {
        forward!(self, "WHERE", {
            Select(q) => q.or_where(cond),
            Update(q) => q.or_where(cond),
            Delete(q) => q.or_where(cond),
            Exists(q) => q.or_where(cond),
        })
    }

    pub fn group_by<I>(self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoColumnExpr,
    {
        forward!(self, "GROUP BY", {
            Select(q) => q.group_by(columns),
            Exists(q) => q.group_by(columns),
        })
    }

    pub fn having(self, cond: Expr) -> Self {
        forward!(self, "HAVING", {
            Select(q) => q.having(cond),
            Exists(q) => q.having(cond),
        })
    }

    pub fn order_by(self, column: impl IntoColumnExpr, direction: Direction) -> Self {
        forward!(self, "ORDER BY", { Select(q) => q.order_by(column, direction) })
    }

    pub fn order_by_str(self, column: impl IntoColumnExpr, direction: &str) -> Self {
        forward!(self, "ORDER BY", { Select(q) => q.order_by_str(column, direction) })
    }

    pub fn asc(self, column: impl IntoColumnExpr) -> Self {
        self.order_by(column, Direction::Asc)
    }

    pub fn desc(self, column: impl IntoColumnExpr) -> Self {
        self.order_by(column, Direction::Desc)
    }

    pub fn limit(self, n: u64) -> Self {
        forward!(self, "LIMIT", { Select(q) => q.limit(n) })
    }

    pub fn offset(self, n: u64) -> Self {
        forward!(self, "OFFSET", { Select(q) => q.offset(n) })
    }

    pub fn paginate(self, page: u64, per_page: u64) -> Self {
        forward!(self, "LIMIT/OFFSET", { Select(q) => q.paginate(page, per_page) })
    }

    pub fn into_table(self, table: impl IntoIdent) -> Self {
        forward!(self, "INTO", { Insert(q) => q.into_table(table) })
    }

    pub fn values(self, row: impl IntoRow) -> Self {
        forward!(self, "VALUES", { Insert(q) => q.values(row) })
    }

    pub fn rows<I>(self, rows: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoRow,
    {
        forward!(self, "VALUES", { Insert(q) => q.rows(rows) })
    }

    pub fn on_conflict(self, on_conflict: OnConflict) -> Self {
        forward!(self, "ON CONFLICT", { Insert(q) => q.set_on_conflict(on_conflict) })
    }

    pub fn set(self, column: impl IntoIdent, value: impl Into<Expr>) -> Self {
        forward!(self, "SET", { Update(q) => q.set(column, value) })
    }

    pub fn returning<I>(self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoColumnExpr,
    {
        forward!(self, "RETURNING", {
            Insert(q) => q.returning(columns),
            Update(q) => q.returning(columns),
        })
    }

    pub fn returning_all(self) -> Self {
        forward!(self, "RETURNING", {
            Insert(q) => q.returning_all(),
            Update(q) => q.returning_all(),
        })
    }

    fn clauses(&self) -> Option<WithClauses> {
        let outer = self.outer.as_ref()?;
        Some(WithClauses {
            recursive: self.recursive,
            ctes: self.ctes.clone(),
            body: Box::new(outer.statement()),
        })
    }
}

impl SqlQuery for WithQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::With
    }

    fn validate(&self) -> SqlResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        if self.ctes.is_empty() {
            return Err(SqlError::validation("WITH requires at least one CTE"));
        }
        match &self.outer {
            Some(outer) => outer.as_query().validate(),
            None => Err(SqlError::validation("WITH requires an outer statement")),
        }
    }

    fn build(&self) -> Rendered {
        match self.clauses() {
            Some(clauses) => render_with(&clauses),
            None => Rendered::new(String::new(), Vec::new()),
        }
    }

    fn into_statement(self) -> SqlResult<Statement> {
        self.validate()?;
        let body = match self.outer {
            Some(outer) => outer.into_statement()?,
            None => return Err(SqlError::validation("WITH requires an outer statement")),
        };
        Ok(Statement::With(WithClauses {
            recursive: self.recursive,
            ctes: self.ctes,
            body: Box::new(body),
        }))
    }
}
