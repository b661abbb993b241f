use tracing::Level;

/// Configuration for the `tracing` events emitted while rendering.
///
/// The config never changes the produced SQL or parameters.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether a `recordsql.render` event is emitted per rendered statement.
    pub log_enabled: bool,
    /// Tracing event level to emit at.
    pub log_level: Level,
    /// Truncate logged SQL (in bytes, on a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
    /// Include bind parameters in the event. Off by default since values may be sensitive.
    pub log_params: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            log_enabled: true,
            log_level: Level::DEBUG,
            max_sql_length: Some(200),
            log_params: false,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Include bind parameters in render events.
    pub fn log_params(mut self, enabled: bool) -> Self {
        self.log_params = enabled;
        self
    }

    /// Stop emitting render events.
    pub fn disable_logging(mut self) -> Self {
        self.log_enabled = false;
        self
    }

    pub(crate) fn truncate_sql<'a>(&self, sql: &'a str) -> std::borrow::Cow<'a, str> {
        match self.max_sql_length {
            Some(max) if sql.len() > max => {
                format!("{}...", truncate_sql_bytes(sql, max)).into()
            }
            _ => sql.into(),
        }
    }
}

/// Cut `sql` to at most `max_bytes`, backing off to the previous char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
