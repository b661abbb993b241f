//! Trait shared by the statement builders.

use crate::clause::{Cte, Statement, StatementKind};
use crate::config::RenderConfig;
use crate::error::SqlResult;
use crate::ident::{IntoIdent, parse_idents};
use crate::sql::Rendered;
use crate::value::Value;
use tracing::Level;

/// Base trait for all statement builders.
///
/// Builders record the first construction error instead of panicking; the
/// terminal calls here hand it back.
pub trait SqlQuery {
    /// Statement kind, for logs and error messages.
    fn kind(&self) -> StatementKind;

    /// Return the first recorded construction error, or a missing required clause.
    fn validate(&self) -> SqlResult<()>;

    /// Render the accumulated clauses without validating them.
    fn build(&self) -> Rendered;

    /// Consume the builder into a validated [`Statement`].
    fn into_statement(self) -> SqlResult<Statement>
    where
        Self: Sized;

    /// Validate and render, emitting a `recordsql.render` event per `config`.
    fn render_with(&self, config: &RenderConfig) -> SqlResult<Rendered> {
        self.validate()?;
        let rendered = self.build();
        log_render(config, self.kind(), &rendered);
        Ok(rendered)
    }

    /// Validate and render with the default [`RenderConfig`].
    fn render(&self) -> SqlResult<Rendered> {
        self.render_with(&RenderConfig::default())
    }

    /// Validate and render into `(sql, params)`.
    fn placeholder_pair(&self) -> SqlResult<(String, Vec<Value>)> {
        self.render().map(Rendered::into_pair)
    }

    /// Debug helper: the SQL text, without validation.
    ///
    /// The output can differ from a validated render: a template with too few
    /// values binds NULL for the missing ones and ignores any extra values.
    fn to_sql(&self) -> String {
        self.build().sql
    }

    /// Name this statement for use in a WITH clause.
    fn as_cte(self, name: impl IntoIdent) -> SqlResult<Cte>
    where
        Self: Sized,
    {
        let name = name.into_ident()?;
        Ok(Cte::new(name, self.into_statement()?))
    }

    /// Like [`as_cte`](SqlQuery::as_cte), with a column list: `name(a, b) AS (...)`.
    fn as_cte_with_columns<I>(self, name: impl IntoIdent, columns: I) -> SqlResult<Cte>
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: IntoIdent,
    {
        let columns = parse_idents(columns)?;
        Ok(self.as_cte(name)?.with_columns(columns))
    }
}

fn log_render(config: &RenderConfig, kind: StatementKind, rendered: &Rendered) {
    if !config.log_enabled {
        return;
    }

    macro_rules! emit_at_level {
        ($level:expr, $($field:tt)*) => {
            match $level {
                Level::ERROR => tracing::error!($($field)*),
                Level::WARN  => tracing::warn!($($field)*),
                Level::INFO  => tracing::info!($($field)*),
                Level::DEBUG => tracing::debug!($($field)*),
                Level::TRACE => tracing::trace!($($field)*),
            }
        };
    }

    let sql = config.truncate_sql(&rendered.sql);
    let param_count = rendered.params.len();
    if config.log_params {
        emit_at_level!(
            config.log_level,
            target: "recordsql.render",
            statement = %kind,
            param_count,
            sql = %sql,
            params = ?rendered.params,
            "rendered statement"
        );
    } else {
        emit_at_level!(
            config.log_level,
            target: "recordsql.render",
            statement = %kind,
            param_count,
            sql = %sql,
            "rendered statement"
        );
    }
}
