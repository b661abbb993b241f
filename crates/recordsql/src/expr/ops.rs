//! Conversions into [`Expr`] and the operator overloads.
//!
//! `+ - * /` build arithmetic nodes, `&` and `|` build AND/OR groups and `!`
//! negates. `&`/`|` flatten runs of the same connective, so
//! `a & b & c` is a single three-child AND group.

use super::{ArithOp, Column, Expr, Literal, LogicalOp, combine};
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime};
use std::ops::{Add, BitAnd, BitOr, Div, Mul, Not, Sub};
use uuid::Uuid;

impl From<Column> for Expr {
    fn from(c: Column) -> Self {
        Expr::Column(c)
    }
}

impl From<&Column> for Expr {
    fn from(c: &Column) -> Self {
        Expr::Column(c.clone())
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Literal(Literal::Value(v))
    }
}

macro_rules! impl_expr_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(v: $ty) -> Self {
                    Expr::Literal(Literal::Value(Value::from(v)))
                }
            }
        )*
    };
}

impl_expr_from_value!(
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    bool,
    &str,
    String,
    &String,
    NaiveDate,
    NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    Uuid,
    serde_json::Value,
);

impl<T: Into<Value>> From<Option<T>> for Expr {
    fn from(v: Option<T>) -> Self {
        Expr::Literal(Literal::Value(Value::from(v)))
    }
}

macro_rules! impl_arith_ops {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<R: Into<Expr>> Add<R> for $ty {
                type Output = Expr;
                fn add(self, rhs: R) -> Expr {
                    Expr::arith(self, ArithOp::Add, rhs)
                }
            }

            impl<R: Into<Expr>> Sub<R> for $ty {
                type Output = Expr;
                fn sub(self, rhs: R) -> Expr {
                    Expr::arith(self, ArithOp::Sub, rhs)
                }
            }

            impl<R: Into<Expr>> Mul<R> for $ty {
                type Output = Expr;
                fn mul(self, rhs: R) -> Expr {
                    Expr::arith(self, ArithOp::Mul, rhs)
                }
            }

            impl<R: Into<Expr>> Div<R> for $ty {
                type Output = Expr;
                fn div(self, rhs: R) -> Expr {
                    Expr::arith(self, ArithOp::Div, rhs)
                }
            }
        )*
    };
}

impl_arith_ops!(Expr, Column, &Column, Literal);

impl<R: Into<Expr>> BitAnd<R> for Expr {
    type Output = Expr;
    fn bitand(self, rhs: R) -> Expr {
        combine(LogicalOp::And, self, rhs.into())
    }
}

impl<R: Into<Expr>> BitOr<R> for Expr {
    type Output = Expr;
    fn bitor(self, rhs: R) -> Expr {
        combine(LogicalOp::Or, self, rhs.into())
    }
}

impl Not for Expr {
    type Output = Expr;
    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}
