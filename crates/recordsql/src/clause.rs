//! Clause containers.
//!
//! Each statement kind has a `*Clauses` record holding its clauses in their
//! SQL order. Absent clauses are `None` or empty and render as nothing. The
//! records do not enforce which clauses a statement kind may carry; the query
//! builders do that. `validate` on each record checks the clauses a statement
//! cannot be rendered without.

use crate::error::{SqlError, SqlResult};
use crate::expr::Expr;
use crate::ident::Ident;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// A FROM or JOIN target: a table or CTE name with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: Ident,
    pub alias: Option<Ident>,
}

impl TableRef {
    pub fn new(name: Ident) -> Self {
        Self { name, alias: None }
    }

    pub fn with_alias(mut self, alias: Ident) -> Self {
        self.alias = Some(alias);
        self
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

/// `<KIND> JOIN "<table>" ON <condition>`
#[derive(Debug, Clone)]
pub struct Join {
    pub kind: JoinKind,
    pub table: TableRef,
    pub on: Expr,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = SqlError;

    /// Parses `ASC`/`DESC` case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(SqlError::validation(format!(
                "invalid sort direction '{s}', expected ASC or DESC"
            )))
        }
    }
}

/// One ORDER BY item.
#[derive(Debug, Clone)]
pub struct OrderBy {
    pub expr: Expr,
    pub direction: Direction,
}

/// `column = <expr>` in SET lists.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub column: Ident,
    pub value: Expr,
}

/// ON CONFLICT action.
#[derive(Debug, Clone)]
pub enum ConflictAction {
    /// DO NOTHING
    Nothing,
    /// DO UPDATE SET ... [WHERE ...]
    Update {
        set: Vec<Assignment>,
        where_: Option<Expr>,
    },
}

/// `ON CONFLICT (cols) DO ...`
#[derive(Debug, Clone)]
pub struct OnConflict {
    pub columns: Vec<Ident>,
    pub action: ConflictAction,
}

/// RETURNING list.
#[derive(Debug, Clone)]
pub enum Returning {
    All,
    Columns(Vec<Expr>),
}

/// A named sub-statement of a WITH clause.
#[derive(Debug, Clone)]
pub struct Cte {
    pub name: Ident,
    /// Optional column list: `name(a, b) AS (...)`.
    pub columns: Vec<Ident>,
    pub query: Box<Statement>,
}

impl Cte {
    pub fn new(name: Ident, query: Statement) -> Self {
        Self {
            name,
            columns: Vec::new(),
            query: Box::new(query),
        }
    }

    pub fn with_columns(mut self, columns: Vec<Ident>) -> Self {
        self.columns = columns;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SelectClauses {
    /// Empty renders `*`.
    pub columns: Vec<Expr>,
    pub from: Option<TableRef>,
    pub joins: Vec<Join>,
    pub where_: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectClauses {
    pub fn validate(&self) -> SqlResult<()> {
        if self.from.is_none() {
            return Err(SqlError::validation("SELECT requires FROM"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InsertClauses {
    pub table: Option<Ident>,
    pub columns: Vec<Ident>,
    /// Row-major values, each row as long as `columns`.
    pub rows: Vec<Vec<Value>>,
    pub on_conflict: Option<OnConflict>,
    pub returning: Option<Returning>,
}

impl InsertClauses {
    pub fn validate(&self) -> SqlResult<()> {
        if self.table.is_none() {
            return Err(SqlError::validation("INSERT requires INTO <table>"));
        }
        if self.columns.is_empty() {
            return Err(SqlError::validation("INSERT requires at least one column"));
        }
        if self.rows.is_empty() {
            return Err(SqlError::validation("INSERT requires VALUES"));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(SqlError::validation(format!(
                    "VALUES row {} has {} values but {} columns were given",
                    i + 1,
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        if let Some(OnConflict {
            action: ConflictAction::Update { set, .. },
            ..
        }) = &self.on_conflict
            && set.is_empty()
        {
            return Err(SqlError::validation(
                "ON CONFLICT DO UPDATE requires at least one SET assignment",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateClauses {
    pub table: Option<Ident>,
    pub set: Vec<Assignment>,
    pub where_: Option<Expr>,
    pub returning: Option<Returning>,
}

impl UpdateClauses {
    pub fn validate(&self) -> SqlResult<()> {
        if self.table.is_none() {
            return Err(SqlError::validation("UPDATE requires a table"));
        }
        if self.set.is_empty() {
            return Err(SqlError::validation("UPDATE requires SET"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeleteClauses {
    pub table: Option<Ident>,
    pub where_: Option<Expr>,
}

impl DeleteClauses {
    pub fn validate(&self) -> SqlResult<()> {
        if self.table.is_none() {
            return Err(SqlError::validation("DELETE requires FROM"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExistsClauses {
    pub from: Option<TableRef>,
    pub joins: Vec<Join>,
    pub where_: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
}

impl ExistsClauses {
    pub fn validate(&self) -> SqlResult<()> {
        if self.from.is_none() {
            return Err(SqlError::validation("EXISTS requires FROM"));
        }
        Ok(())
    }
}

/// `WITH [RECURSIVE] cte, ... <body>`
#[derive(Debug, Clone)]
pub struct WithClauses {
    pub recursive: bool,
    pub ctes: Vec<Cte>,
    pub body: Box<Statement>,
}

impl WithClauses {
    pub fn validate(&self) -> SqlResult<()> {
        if self.ctes.is_empty() {
            return Err(SqlError::validation("WITH requires at least one CTE"));
        }
        for cte in &self.ctes {
            cte.query.validate()?;
        }
        self.body.validate()
    }
}

/// Statement kind, used in logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Exists,
    With,
}

impl StatementKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Exists => "EXISTS",
            StatementKind::With => "WITH",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete statement.
#[derive(Debug, Clone)]
pub enum Statement {
    Select(SelectClauses),
    Insert(InsertClauses),
    Update(UpdateClauses),
    Delete(DeleteClauses),
    Exists(ExistsClauses),
    With(WithClauses),
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Select(_) => StatementKind::Select,
            Statement::Insert(_) => StatementKind::Insert,
            Statement::Update(_) => StatementKind::Update,
            Statement::Delete(_) => StatementKind::Delete,
            Statement::Exists(_) => StatementKind::Exists,
            Statement::With(_) => StatementKind::With,
        }
    }

    /// Check that every clause the statement requires is present.
    pub fn validate(&self) -> SqlResult<()> {
        match self {
            Statement::Select(c) => c.validate(),
            Statement::Insert(c) => c.validate(),
            Statement::Update(c) => c.validate(),
            Statement::Delete(c) => c.validate(),
            Statement::Exists(c) => c.validate(),
            Statement::With(c) => c.validate(),
        }
    }

    /// Attach an ON CONFLICT clause. Only INSERT (or a WITH whose body is an
    /// INSERT) accepts one.
    pub fn set_on_conflict(&mut self, on_conflict: OnConflict) -> SqlResult<()> {
        match self {
            Statement::Insert(c) => {
                c.on_conflict = Some(on_conflict);
                Ok(())
            }
            Statement::With(w) => w.body.set_on_conflict(on_conflict),
            other => Err(SqlError::unsupported(format!(
                "ON CONFLICT is only valid on INSERT, not {}",
                other.kind()
            ))),
        }
    }
}
