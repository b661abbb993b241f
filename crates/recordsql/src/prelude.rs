//! Convenient imports for typical `recordsql` usage.
//!
//! ```ignore
//! use recordsql::prelude::*;
//! ```

pub use crate::expr::{
    Column, Expr, avg, coalesce, col, cols, count_star, func, lower, max, min, num, sum, text,
    upper,
};
pub use crate::query::{
    SqlQuery, count, count_column, delete, delete_from, exists, insert, insert_into, select,
    select_all, update, with,
};
pub use crate::{Direction, JoinKind, Rendered, RenderConfig, SqlError, SqlResult, Value};
