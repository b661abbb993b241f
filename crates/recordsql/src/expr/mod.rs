//! Expression tree for conditions, arithmetic and select items.
//!
//! This module provides the [`Expr`] enum which supports:
//! - column references and bound literals
//! - comparisons (`=`, `!=`, `<`, `<=`, `>`, `>=`, `LIKE`), with NULL folded into `IS [NOT] NULL`
//! - arithmetic (`+`, `-`, `*`, `/`), always parenthesized
//! - AND/OR groups and NOT, parenthesized where precedence requires it
//! - function calls, `IN` sets, `BETWEEN`, aliases, templates and raw fragments
//!
//! Expressions are built with methods and operators instead of parsing strings:
//!
//! ```ignore
//! use recordsql::expr::{col, text};
//!
//! let [age, active] = recordsql::cols(["age", "active"]);
//! let cond = (age.gt(18) & active.eq(true)) | col("role").eq("admin");
//! let late = (col("signup_date") - col("CURRENT_TIMESTAMP")).gt(text("1 year").datetime());
//! ```
//!
//! [`Expr::write`] appends the fragment to a [`Sql`] accumulator, so the
//! parameters of every node come out in the order its placeholders appear.

/// Generates the comparison/predicate builder methods shared by [`Column`],
/// [`Literal`], [`Text`] and [`Expr`].
macro_rules! comparison_methods {
    () => {
        /// `self = rhs`. Against NULL this renders `IS NULL` and binds nothing.
        pub fn eq(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Expr {
            $crate::expr::Expr::compare(self.clone(), $crate::expr::CompareOp::Eq, rhs)
        }

        /// `self != rhs`. Against NULL this renders `IS NOT NULL` and binds nothing.
        pub fn ne(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Expr {
            $crate::expr::Expr::compare(self.clone(), $crate::expr::CompareOp::Ne, rhs)
        }

        /// `self > rhs`
        pub fn gt(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Expr {
            $crate::expr::Expr::compare(self.clone(), $crate::expr::CompareOp::Gt, rhs)
        }

        /// `self >= rhs`
        pub fn gte(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Expr {
            $crate::expr::Expr::compare(self.clone(), $crate::expr::CompareOp::Gte, rhs)
        }

        /// `self < rhs`
        pub fn lt(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Expr {
            $crate::expr::Expr::compare(self.clone(), $crate::expr::CompareOp::Lt, rhs)
        }

        /// `self <= rhs`
        pub fn lte(&self, rhs: impl Into<$crate::expr::Expr>) -> $crate::expr::Expr {
            $crate::expr::Expr::compare(self.clone(), $crate::expr::CompareOp::Lte, rhs)
        }

        /// `self LIKE pattern`
        pub fn like(&self, pattern: impl Into<$crate::expr::Expr>) -> $crate::expr::Expr {
            $crate::expr::Expr::compare(self.clone(), $crate::expr::CompareOp::Like, pattern)
        }

        /// `self NOT LIKE pattern`
        pub fn not_like(&self, pattern: impl Into<$crate::expr::Expr>) -> $crate::expr::Expr {
            $crate::expr::Expr::compare(self.clone(), $crate::expr::CompareOp::NotLike, pattern)
        }

        /// `self IS NULL`
        pub fn is_null(&self) -> $crate::expr::Expr {
            self.eq($crate::value::Value::Null)
        }

        /// `self IS NOT NULL`
        pub fn is_not_null(&self) -> $crate::expr::Expr {
            self.ne($crate::value::Value::Null)
        }

        /// `self IN (?, ?, ...)`. An empty set renders `1=0`.
        pub fn isin<V: Into<$crate::value::Value>>(
            &self,
            values: impl IntoIterator<Item = V>,
        ) -> $crate::expr::Expr {
            $crate::expr::Expr::in_set(self.clone(), values, false)
        }

        /// `self NOT IN (?, ?, ...)`. An empty set renders `1=1`.
        pub fn not_in<V: Into<$crate::value::Value>>(
            &self,
            values: impl IntoIterator<Item = V>,
        ) -> $crate::expr::Expr {
            $crate::expr::Expr::in_set(self.clone(), values, true)
        }

        /// `self BETWEEN low AND high`
        pub fn between(
            &self,
            low: impl Into<$crate::expr::Expr>,
            high: impl Into<$crate::expr::Expr>,
        ) -> $crate::expr::Expr {
            $crate::expr::Expr::range(self.clone(), low, high, false)
        }

        /// `self NOT BETWEEN low AND high`
        pub fn not_between(
            &self,
            low: impl Into<$crate::expr::Expr>,
            high: impl Into<$crate::expr::Expr>,
        ) -> $crate::expr::Expr {
            $crate::expr::Expr::range(self.clone(), low, high, true)
        }
    };
}

mod column;
mod func;
mod literal;
mod ops;


pub use column::{Column, IntoColumnExpr, col, cols};
pub use func::{avg, coalesce, count, count_star, func, lower, max, min, sum, upper};
pub use literal::{Literal, Text, num, text};

use crate::error::{SqlError, SqlResult};
use crate::ident::Ident;
use crate::sql::Sql;
use crate::value::Value;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
}

impl CompareOp {
    /// SQL spelling of the operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Like => "LIKE",
            CompareOp::NotLike => "NOT LIKE",
        }
    }

    /// Only `=` and `!=` have a NULL form (`IS NULL` / `IS NOT NULL`).
    pub const fn accepts_null(self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::Ne)
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// Expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Column reference, rendered bare.
    Column(Column),

    /// Bound value or typed text literal.
    Literal(Literal),

    /// `left op right`
    Compare {
        left: Box<Expr>,
        op: CompareOp,
        right: Box<Expr>,
    },

    /// `(left op right)`
    Arith {
        left: Box<Expr>,
        op: ArithOp,
        right: Box<Expr>,
    },

    /// Children joined by AND/OR.
    Logical { op: LogicalOp, children: Vec<Expr> },

    /// `NOT (inner)`
    Not(Box<Expr>),

    /// `NAME(arg, ...)`
    Func { name: String, args: Vec<Expr> },

    /// `expr [NOT] IN (?, ...)`
    InSet {
        expr: Box<Expr>,
        values: Vec<Value>,
        negated: bool,
    },

    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// `expr AS alias`, for select lists.
    Alias { expr: Box<Expr>, alias: String },

    /// SQL with `?` placeholders and one value per placeholder.
    Template { sql: String, params: Vec<Value> },

    /// Raw SQL fragment without parameters.
    Raw(String),
}

impl Expr {
    /// Create a comparison.
    pub fn compare(left: impl Into<Expr>, op: CompareOp, right: impl Into<Expr>) -> Self {
        Expr::Compare {
            left: Box::new(left.into()),
            op,
            right: Box::new(right.into()),
        }
    }

    /// Create an arithmetic node.
    pub fn arith(left: impl Into<Expr>, op: ArithOp, right: impl Into<Expr>) -> Self {
        Expr::Arith {
            left: Box::new(left.into()),
            op,
            right: Box::new(right.into()),
        }
    }

    /// Create an AND group from a list of expressions.
    pub fn and(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Logical {
            op: LogicalOp::And,
            children: exprs.into_iter().collect(),
        }
    }

    /// Create an OR group from a list of expressions.
    pub fn or(exprs: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Logical {
            op: LogicalOp::Or,
            children: exprs.into_iter().collect(),
        }
    }

    /// Create a NOT expression.
    pub fn not(expr: impl Into<Expr>) -> Self {
        Expr::Not(Box::new(expr.into()))
    }

    /// Create an IN / NOT IN set.
    pub fn in_set<V: Into<Value>>(
        expr: impl Into<Expr>,
        values: impl IntoIterator<Item = V>,
        negated: bool,
    ) -> Self {
        Expr::InSet {
            expr: Box::new(expr.into()),
            values: values.into_iter().map(Into::into).collect(),
            negated,
        }
    }

    /// Create a BETWEEN / NOT BETWEEN range check.
    pub fn range(
        expr: impl Into<Expr>,
        low: impl Into<Expr>,
        high: impl Into<Expr>,
        negated: bool,
    ) -> Self {
        Expr::Between {
            expr: Box::new(expr.into()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated,
        }
    }

    /// Create a template expression with `?` placeholders.
    ///
    /// # Example
    /// ```ignore
    /// Expr::template("a = ? OR b = ?", [1, 2])
    /// ```
    pub fn template<V: Into<Value>>(
        sql: impl Into<String>,
        params: impl IntoIterator<Item = V>,
    ) -> Self {
        Expr::Template {
            sql: sql.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a raw SQL fragment. It must not contain `?`.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// `*`, as in `SELECT *` or `COUNT(*)`.
    pub fn star() -> Self {
        Expr::Raw("*".to_string())
    }

    /// `self AS alias`
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Expr::Alias {
            expr: Box::new(self),
            alias: alias.into(),
        }
    }

    comparison_methods!();

    /// Combine with another expression using AND, flattening nested AND groups.
    pub fn and_also(self, other: impl Into<Expr>) -> Self {
        combine(LogicalOp::And, self, other.into())
    }

    /// Combine with another expression using OR, flattening nested OR groups.
    pub fn or_else(self, other: impl Into<Expr>) -> Self {
        combine(LogicalOp::Or, self, other.into())
    }

    /// Whether this node is the NULL literal.
    pub fn is_null_literal(&self) -> bool {
        matches!(self, Expr::Literal(Literal::Value(Value::Null)))
    }

    fn is_bool_literal(&self) -> bool {
        matches!(self, Expr::Literal(Literal::Value(Value::Bool(_))))
    }

    /// Check the tree for constructs that cannot be rendered into valid SQL.
    ///
    /// Builders call this when an expression is attached, so a malformed tree is
    /// reported while the statement is being constructed.
    pub fn validate(&self) -> SqlResult<()> {
        match self {
            Expr::Column(c) => c.validate(),
            Expr::Literal(_) => Ok(()),
            Expr::Compare { left, op, right } => {
                left.validate()?;
                right.validate()?;
                if left.is_null_literal() {
                    return Err(SqlError::validation(
                        "NULL must be the right-hand operand of a comparison",
                    ));
                }
                if right.is_null_literal() && !op.accepts_null() {
                    return Err(SqlError::validation(format!(
                        "cannot compare with NULL using '{}'; use eq/ne (IS NULL / IS NOT NULL)",
                        op.as_str()
                    )));
                }
                Ok(())
            }
            Expr::Arith { left, op, right } => {
                left.validate()?;
                right.validate()?;
                for side in [left, right] {
                    if side.is_null_literal() || side.is_bool_literal() {
                        return Err(SqlError::validation(format!(
                            "arithmetic '{}' is not defined for a {} operand",
                            op.as_str(),
                            if side.is_null_literal() { "NULL" } else { "boolean" }
                        )));
                    }
                }
                Ok(())
            }
            Expr::Logical { op, children } => {
                if children.is_empty() {
                    return Err(SqlError::validation(format!(
                        "empty {} group",
                        op.as_str()
                    )));
                }
                children.iter().try_for_each(Expr::validate)
            }
            Expr::Not(inner) => inner.validate(),
            Expr::Func { name, args } => {
                validate_function_name(name)?;
                args.iter().try_for_each(Expr::validate)
            }
            Expr::InSet { expr, .. } => expr.validate(),
            Expr::Between { expr, low, high, .. } => {
                expr.validate()?;
                low.validate()?;
                high.validate()?;
                if low.is_null_literal() || high.is_null_literal() {
                    return Err(SqlError::validation("BETWEEN bounds cannot be NULL"));
                }
                Ok(())
            }
            Expr::Alias { expr, alias } => {
                expr.validate()?;
                Ident::parse(alias).map(|_| ())
            }
            Expr::Template { sql, params } => {
                let placeholders = sql.matches('?').count();
                if placeholders != params.len() {
                    return Err(SqlError::validation(format!(
                        "template '{sql}' has {placeholders} placeholders but {} params",
                        params.len()
                    )));
                }
                Ok(())
            }
            Expr::Raw(sql) => {
                if sql.trim().is_empty() {
                    return Err(SqlError::validation("raw SQL fragment cannot be empty"));
                }
                if sql.contains('?') {
                    return Err(SqlError::validation(format!(
                        "raw SQL '{sql}' cannot contain '?'; use Expr::template to bind values"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Render into a standalone `(sql, params)` pair.
    pub fn to_rendered(&self) -> crate::sql::Rendered {
        let mut out = Sql::empty();
        self.write(&mut out);
        out.finish()
    }

    /// Append this expression's SQL and parameters to `out`.
    pub fn write(&self, out: &mut Sql) {
        match self {
            Expr::Column(c) => c.write(out),
            Expr::Literal(lit) => lit.write(out),
            Expr::Compare { left, op, right } => {
                write_operand(left, out);
                if right.is_null_literal() && op.accepts_null() {
                    out.push(if *op == CompareOp::Eq {
                        " IS NULL"
                    } else {
                        " IS NOT NULL"
                    });
                    return;
                }
                out.push(" ").push(op.as_str()).push(" ");
                write_operand(right, out);
            }
            Expr::Arith { left, op, right } => {
                out.push("(");
                write_operand(left, out);
                out.push(" ").push(op.as_str()).push(" ");
                write_operand(right, out);
                out.push(")");
            }
            Expr::Logical { op, children } => match children.as_slice() {
                // Identity elements keep the output valid SQL.
                [] => {
                    out.push(if *op == LogicalOp::And { "1=1" } else { "1=0" });
                }
                [only] => only.write(out),
                _ => {
                    for (i, child) in children.iter().enumerate() {
                        if i > 0 {
                            out.push(" ").push(op.as_str()).push(" ");
                        }
                        if child.needs_parens_in(*op) {
                            out.push("(");
                            child.write(out);
                            out.push(")");
                        } else {
                            child.write(out);
                        }
                    }
                }
            },
            Expr::Not(inner) => {
                out.push("NOT (");
                inner.write(out);
                out.push(")");
            }
            Expr::Func { name, args } => {
                out.push(name).push("(");
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push(", ");
                    }
                    arg.write(out);
                }
                out.push(")");
            }
            Expr::InSet {
                expr,
                values,
                negated,
            } => {
                if values.is_empty() {
                    out.push(if *negated { "1=1" } else { "1=0" });
                    return;
                }
                write_operand(expr, out);
                out.push(if *negated { " NOT IN (" } else { " IN (" });
                out.push_bind_list(values);
                out.push(")");
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                write_operand(expr, out);
                out.push(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                write_operand(low, out);
                out.push(" AND ");
                write_operand(high, out);
            }
            Expr::Alias { expr, alias } => {
                expr.write(out);
                out.push(" AS ").push(alias);
            }
            Expr::Template { sql, params } => write_template(sql, params, out),
            Expr::Raw(sql) => {
                out.push(sql);
            }
        }
    }

    /// The node a single-child group renders as.
    fn innermost(&self) -> &Expr {
        match self {
            Expr::Logical { children, .. } if children.len() == 1 => children[0].innermost(),
            _ => self,
        }
    }

    /// Whether this node must be parenthesized as a child of an `op` group.
    fn needs_parens_in(&self, op: LogicalOp) -> bool {
        match self.innermost() {
            Expr::Logical { op: inner, children } => *inner != op && children.len() > 1,
            Expr::Template { .. } => true,
            _ => false,
        }
    }

    /// Whether this node must be parenthesized as a comparison/arithmetic operand.
    fn needs_parens_as_operand(&self) -> bool {
        match self.innermost() {
            Expr::Compare { .. }
            | Expr::Not(_)
            | Expr::InSet { .. }
            | Expr::Between { .. }
            | Expr::Template { .. } => true,
            Expr::Logical { children, .. } => children.len() > 1,
            _ => false,
        }
    }
}

fn write_operand(expr: &Expr, out: &mut Sql) {
    if expr.needs_parens_as_operand() {
        out.push("(");
        expr.write(out);
        out.push(")");
    } else {
        expr.write(out);
    }
}

/// Interleave the template's text with its bound values.
///
/// A template that failed validation still renders one value per `?`
/// (missing values bind NULL, surplus values are dropped).
fn write_template(sql: &str, params: &[Value], out: &mut Sql) {
    let mut values = params.iter();
    for (i, piece) in sql.split('?').enumerate() {
        if i > 0 {
            out.push_bind(values.next().cloned().unwrap_or(Value::Null));
        }
        out.push(piece);
    }
}

pub(crate) fn combine(op: LogicalOp, left: Expr, right: Expr) -> Expr {
    let mut children = Vec::new();
    for side in [left, right] {
        match side {
            Expr::Logical {
                op: inner,
                children: nested,
            } if inner == op => children.extend(nested),
            other => children.push(other),
        }
    }
    Expr::Logical { op, children }
}

fn validate_function_name(name: &str) -> SqlResult<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first == '_' || first.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(SqlError::validation(format!(
            "invalid function name '{name}'"
        )))
    }
}
