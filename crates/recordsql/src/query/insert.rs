//! INSERT builder, including ON CONFLICT.

use super::{SqlQuery, checked, record_error};
use crate::clause::{
    Assignment, ConflictAction, InsertClauses, OnConflict, Returning, Statement, StatementKind,
};
use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, IntoColumnExpr, col};
use crate::ident::{Ident, IntoIdent, parse_idents};
use crate::render::render_insert;
use crate::sql::Rendered;
use crate::value::Value;

/// A VALUES row: tuples, arrays and vectors of values.
pub trait IntoRow {
    fn into_row(self) -> Vec<Value>;
}

impl<V: Into<Value>> IntoRow for Vec<V> {
    fn into_row(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<V: Into<Value>, const N: usize> IntoRow for [V; N] {
    fn into_row(self) -> Vec<Value> {
        self.into_iter().map(Into::into).collect()
    }
}

macro_rules! impl_into_row_for_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Value>),+> IntoRow for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_row(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_into_row_for_tuple!(A);
impl_into_row_for_tuple!(A, B);
impl_into_row_for_tuple!(A, B, C);
impl_into_row_for_tuple!(A, B, C, D);
impl_into_row_for_tuple!(A, B, C, D, E);
impl_into_row_for_tuple!(A, B, C, D, E, F);
impl_into_row_for_tuple!(A, B, C, D, E, F, G);
impl_into_row_for_tuple!(A, B, C, D, E, F, G, H);
impl_into_row_for_tuple!(A, B, C, D, E, F, G, H, I);
impl_into_row_for_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_into_row_for_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_into_row_for_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

/// INSERT statement builder.
#[derive(Debug, Clone, Default)]
pub struct InsertQuery {
    clauses: InsertClauses,
    build_error: Option<SqlError>,
}

impl InsertQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append target columns.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoIdent,
    {
        match parse_idents(columns) {
            Ok(idents) => self.clauses.columns.extend(idents),
            Err(e) => record_error(&mut self.build_error, e),
        }
        self
    }

    /// Set the target table.
    pub fn into_table(mut self, table: impl IntoIdent) -> Self {
        match table.into_ident() {
            Ok(name) => self.clauses.table = Some(name),
            Err(e) => record_error(&mut self.build_error, e),
        }
        self
    }

    /// Append one VALUES row. Its length must match the column list.
    pub fn values(mut self, row: impl IntoRow) -> Self {
        self.clauses.rows.push(row.into_row());
        self
    }

    /// Append several VALUES rows.
    pub fn rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoRow,
    {
        self.clauses.rows.extend(rows.into_iter().map(IntoRow::into_row));
        self
    }

    /// Start an ON CONFLICT clause on the given columns (empty for no target).
    pub fn on_conflict<I>(mut self, columns: I) -> OnConflictBuilder
    where
        I: IntoIterator,
        I::Item: IntoIdent,
    {
        let columns = match parse_idents(columns) {
            Ok(idents) => idents,
            Err(e) => {
                record_error(&mut self.build_error, e);
                Vec::new()
            }
        };
        OnConflictBuilder {
            query: self,
            columns,
        }
    }

    /// Attach a prepared ON CONFLICT clause.
    pub fn set_on_conflict(mut self, on_conflict: OnConflict) -> Self {
        if let ConflictAction::Update { set, where_ } = &on_conflict.action {
            for expr in set.iter().map(|a| &a.value).chain(where_.as_ref()) {
                if let Err(e) = expr.validate() {
                    record_error(&mut self.build_error, e);
                }
            }
        }
        self.clauses.on_conflict = Some(on_conflict);
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

    /// The rows as `(column, value)` pairs, one list per row, in column order.
    pub fn column_values(&self) -> Vec<Vec<(String, Value)>> {
        self.clauses
            .rows
            .iter()
            .map(|row| {
                self.clauses
                    .columns
                    .iter()
                    .map(Ident::name)
                    .map(str::to_string)
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }

    /// The clause record built so far.
    pub fn clauses(&self) -> &InsertClauses {
        &self.clauses
    }
}

impl SqlQuery for InsertQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn validate(&self) -> SqlResult<()> {
        if let Some(err) = &self.build_error {
            return Err(err.clone());
        }
        self.clauses.validate()
    }

    fn build(&self) -> Rendered {
        render_insert(&self.clauses)
    }

    fn into_statement(self) -> SqlResult<Statement> {
        self.validate()?;
        Ok(Statement::Insert(self.clauses))
    }
}

/// Builder for the action of an ON CONFLICT clause.
#[derive(Debug)]
pub struct OnConflictBuilder {
    query: InsertQuery,
    columns: Vec<Ident>,
}

impl OnConflictBuilder {
    /// DO NOTHING.
    pub fn do_nothing(mut self) -> InsertQuery {
        self.query.clauses.on_conflict = Some(OnConflict {
            columns: self.columns,
            action: ConflictAction::Nothing,
        });
        self.query
    }

    /// DO UPDATE - returns a builder for the SET list, finished with `finish()`.
    pub fn do_update(self) -> OnConflictUpdateBuilder {
        OnConflictUpdateBuilder {
            query: self.query,
            columns: self.columns,
            set: Vec::new(),
            where_: None,
        }
    }
}

/// Builder for ON CONFLICT DO UPDATE.
#[derive(Debug)]
pub struct OnConflictUpdateBuilder {
    query: InsertQuery,
    columns: Vec<Ident>,
    set: Vec<Assignment>,
    where_: Option<Expr>,
}

impl OnConflictUpdateBuilder {
    /// `column = <value or expression>`
    pub fn set(mut self, column: impl IntoIdent, value: impl Into<Expr>) -> Self {
        let value = checked(&mut self.query.build_error, value.into());
        match column.into_ident() {
            Ok(column) => self.set.push(Assignment { column, value }),
            Err(e) => record_error(&mut self.query.build_error, e),
        }
        self
    }

    /// `column = EXCLUDED.column`
    pub fn set_excluded(mut self, column: impl IntoIdent) -> Self {
        match column.into_ident() {
            Ok(column) => {
                let value = col(format!("EXCLUDED.{}", column.to_sql())).into();
                self.set.push(Assignment { column, value });
            }
            Err(e) => record_error(&mut self.query.build_error, e),
        }
        self
    }

    /// Only update rows matching `cond`.
    pub fn where_(mut self, cond: Expr) -> Self {
        self.where_ = Some(checked(&mut self.query.build_error, cond));
        self
    }

    /// Attach the clause and return to the INSERT builder.
    pub fn finish(mut self) -> InsertQuery {
        self.query.clauses.on_conflict = Some(OnConflict {
            columns: self.columns,
            action: ConflictAction::Update {
                set: self.set,
                where_: self.where_,
            },
        });
        self.query
    }
}
