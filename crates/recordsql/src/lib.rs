//! # recordsql
//!
//! A fluent builder for parameterized SQL statements.
//!
//! ## Features
//!
//! - **Placeholder pairs**: every statement renders to SQL text with `?` placeholders plus the ordered parameters
//! - **Expression tree**: comparisons, AND/OR/NOT, arithmetic, functions, `IN`, `BETWEEN`, built with methods and operators
//! - **Correct grouping**: AND/OR children and comparison operands are parenthesized where precedence requires it
//! - **NULL aware**: `eq(NULL)` renders `IS NULL` and binds nothing
//! - **Typed parameters**: `true` stays a boolean, never the integer `1`
//! - **No panics**: construction errors are recorded on the builder and returned by `render`
//! - **Render logging**: `tracing` events per rendered statement, configured through [`RenderConfig`]
//!
//! ## Statements
//!
//! ```ignore
//! use recordsql::prelude::*;
//!
//! // SELECT
//! let [name, age] = cols(["name", "age"]);
//! let (sql, params) = select([&name, &age])
//!     .from("users")
//!     .where_(age.gt(18) & col("active").eq(true))
//!     .placeholder_pair()?;
//! // SELECT name, age FROM "users" WHERE age > ? AND active = ?
//!
//! // INSERT
//! let (sql, params) = insert(["name", "age"])
//!     .into_table("users")
//!     .rows([("Alice", 28), ("Bob", 32)])
//!     .returning(["id"])
//!     .placeholder_pair()?;
//! // INSERT INTO "users" (name, age) VALUES (?, ?), (?, ?) RETURNING id
//!
//! // UPDATE
//! let (sql, params) = update("users")
//!     .set("status", "inactive")
//!     .where_(col("id").eq(7))
//!     .placeholder_pair()?;
//!
//! // DELETE
//! let (sql, params) = delete_from("orders")
//!     .where_(col("status").ne("cancelled"))
//!     .placeholder_pair()?;
//!
//! // WITH
//! let adults = select([&name]).from("users").where_(age.gt(18));
//! let (sql, params) = with(adults.as_cte("adults"))
//!     .select([&name])
//!     .from("adults")
//!     .placeholder_pair()?;
//! // WITH adults AS (SELECT name FROM "users" WHERE age > ?) SELECT name FROM "adults"
//! ```

pub mod clause;
pub mod config;
pub mod error;
pub mod expr;
pub mod ident;
pub mod prelude;
pub mod query;
pub mod render;
pub mod sql;
pub mod value;

pub use clause::{Direction, JoinKind, Statement, StatementKind};
pub use config::RenderConfig;
pub use error::{SqlError, SqlResult};
pub use expr::{Column, Expr, Literal, col, cols, func, num, text};
pub use ident::{Ident, IntoIdent};
pub use query::{
    DeleteQuery, ExistsQuery, InsertQuery, SelectQuery, SqlQuery, UpdateQuery, WithQuery, count,
    count_column, delete, delete_from, exists, insert, insert_into, select, select_all, update,
    with,
};
pub use sql::{Rendered, Sql};
pub use value::Value;
