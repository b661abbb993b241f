use super::Expr;
use crate::sql::Sql;
use crate::value::{Numeric, Value};

/// A bound literal.
///
/// `DateTime`, `Date` and `Time` wrap their text in the matching SQL
/// function, e.g. `DATETIME(?)`, with the text as the bound value.
#[derive(Debug, Clone)]
pub enum Literal {
    Value(Value),
    DateTime(String),
    Date(String),
    Time(String),
}

impl Literal {
    /// The bound value of this literal.
    pub fn value(&self) -> Value {
        match self {
            Literal::Value(v) => v.clone(),
            Literal::DateTime(s) | Literal::Date(s) | Literal::Time(s) => Value::Text(s.clone()),
        }
    }

    comparison_methods!();

    pub(crate) fn write(&self, out: &mut Sql) {
        let func = match self {
            Literal::Value(v) => {
                out.push_bind(v.clone());
                return;
            }
            Literal::DateTime(_) => "DATETIME",
            Literal::Date(_) => "DATE",
            Literal::Time(_) => "TIME",
        };
        out.push(func).push("(").push_bind(self.value()).push(")");
    }
}

/// A text literal. Binds as [`Value::Text`] unless converted with
/// [`datetime`](Text::datetime), [`date`](Text::date) or [`time`](Text::time).
#[derive(Debug, Clone)]
pub struct Text(String);

impl Text {
    /// `DATETIME(?)`
    pub fn datetime(self) -> Literal {
        Literal::DateTime(self.0)
    }

    /// `DATE(?)`
    pub fn date(self) -> Literal {
        Literal::Date(self.0)
    }

    /// `TIME(?)`
    pub fn time(self) -> Literal {
        Literal::Time(self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    comparison_methods!();
}

impl From<Text> for Literal {
    fn from(t: Text) -> Self {
        Literal::Value(Value::Text(t.0))
    }
}

/// Text literal.
pub fn text(value: impl Into<String>) -> Text {
    Text(value.into())
}

/// Numeric literal.
pub fn num(value: impl Numeric) -> Literal {
    Literal::Value(value.into())
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<Text> for Expr {
    fn from(t: Text) -> Self {
        Expr::Literal(t.into())
    }
}
