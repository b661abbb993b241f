//! SQL function calls.

use super::{Expr, IntoColumnExpr};

/// `NAME(arg, ...)`. The name must be a plain identifier.
pub fn func(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Func {
        name: name.into(),
        args: args.into_iter().collect(),
    }
}

/// `COUNT(*)`
pub fn count_star() -> Expr {
    func("COUNT", [Expr::star()])
}

/// `COUNT(expr)`. A string argument names a column.
pub fn count(expr: impl IntoColumnExpr) -> Expr {
    func("COUNT", [expr.into_column_expr()])
}

pub fn sum(expr: impl IntoColumnExpr) -> Expr {
    func("SUM", [expr.into_column_expr()])
}

pub fn avg(expr: impl IntoColumnExpr) -> Expr {
    func("AVG", [expr.into_column_expr()])
}

pub fn min(expr: impl IntoColumnExpr) -> Expr {
    func("MIN", [expr.into_column_expr()])
}

pub fn max(expr: impl IntoColumnExpr) -> Expr {
    func("MAX", [expr.into_column_expr()])
}

pub fn lower(expr: impl IntoColumnExpr) -> Expr {
    func("LOWER", [expr.into_column_expr()])
}

pub fn upper(expr: impl IntoColumnExpr) -> Expr {
    func("UPPER", [expr.into_column_expr()])
}

/// `COALESCE(a, b, ...)`
pub fn coalesce(args: impl IntoIterator<Item = Expr>) -> Expr {
    func("COALESCE", args)
}
