use super::Expr;
use crate::error::SqlResult;
use crate::ident::Ident;
use crate::sql::Sql;

/// A column reference such as `age`, `users.id` or `*`.
///
/// The name is checked when the expression it belongs to is attached to a
/// statement; rendering writes it as given, without quotes.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// `table.column`
    pub fn qualified(table: &str, column: &str) -> Self {
        Self::new(format!("{table}.{column}"))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `column AS alias`
    pub fn alias(&self, alias: impl Into<String>) -> Expr {
        Expr::from(self.clone()).alias(alias)
    }

    comparison_methods!();

    pub(crate) fn validate(&self) -> SqlResult<()> {
        if self.name == "*" {
            return Ok(());
        }
        match self.name.strip_suffix(".*") {
            Some(table) => Ident::parse(table).map(|_| ()),
            None => Ident::parse(&self.name).map(|_| ()),
        }
    }

    pub(crate) fn write(&self, out: &mut Sql) {
        out.push(&self.name);
    }
}

/// Column reference.
pub fn col(name: impl Into<String>) -> Column {
    Column::new(name)
}

/// Several column references at once.
///
/// ```ignore
/// let [name, age] = cols(["name", "age"]);
/// ```
pub fn cols<const N: usize>(names: [&str; N]) -> [Column; N] {
    names.map(Column::new)
}

/// Items accepted where a column is expected: SELECT lists, GROUP BY, ORDER BY.
///
/// Strings are taken as column names, not as text values.
pub trait IntoColumnExpr {
    fn into_column_expr(self) -> Expr;
}

impl IntoColumnExpr for Expr {
    fn into_column_expr(self) -> Expr {
        self
    }
}

impl IntoColumnExpr for Column {
    fn into_column_expr(self) -> Expr {
        Expr::Column(self)
    }
}

impl IntoColumnExpr for &Column {
    fn into_column_expr(self) -> Expr {
        Expr::Column(self.clone())
    }
}

impl IntoColumnExpr for &str {
    fn into_column_expr(self) -> Expr {
        Expr::Column(Column::new(self))
    }
}

impl IntoColumnExpr for String {
    fn into_column_expr(self) -> Expr {
        Expr::Column(Column::new(self))
    }
}

impl IntoColumnExpr for &String {
    fn into_column_expr(self) -> Expr {
        Expr::Column(Column::new(self.as_str()))
    }
}
