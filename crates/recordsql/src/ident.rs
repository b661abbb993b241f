//! SQL identifier handling.
//!
//! [`Ident`] is a validated table/column/CTE name with optional dotted
//! qualification (`schema.table`, `table.column`). Identifiers render in two
//! ways:
//!
//! - **bare** (`users.id`): SELECT lists, GROUP BY, ORDER BY, RETURNING, CTE names
//! - **quoted** (`"public"."users"`): FROM, INTO, UPDATE and JOIN targets
//!
//! Unquoted parts are validated against `[A-Za-z_][A-Za-z0-9_$]*`. Quoted parts
//! (`"Camel Case"`) allow any character except NUL and `?`, and escape `"` as `""`.
//! `?` is rejected everywhere because it is the placeholder token.

use crate::error::{SqlError, SqlResult};

/// A part of a SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    /// Unquoted identifier: must match `[A-Za-z_][A-Za-z0-9_$]*`.
    Unquoted(String),
    /// Quoted identifier: allows any characters except NUL and `?`.
    Quoted(String),
}

impl IdentPart {
    fn name(&self) -> &str {
        match self {
            IdentPart::Unquoted(s) | IdentPart::Quoted(s) => s,
        }
    }
}

/// A SQL identifier (column, table, schema or CTE name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// Create a single quoted identifier part from an arbitrary name.
    pub fn quoted(name: &str) -> SqlResult<Self> {
        if name.is_empty() {
            return Err(SqlError::validation("Empty quoted identifier"));
        }
        check_forbidden_chars(name)?;
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Parse an identifier string, supporting dotted and quoted forms.
    ///
    /// - Dotted: `schema.table.column`
    /// - Quoted: `"CamelCase"."UserTable"`
    /// - Mixed: `public."UserTable".id`
    pub fn parse(s: &str) -> SqlResult<Self> {
        if s.is_empty() {
            return Err(SqlError::validation("Identifier cannot be empty"));
        }
        check_forbidden_chars(s)?;

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') => {
                        if chars.peek().is_none() {
                            return Err(SqlError::validation(format!(
                                "Trailing '.' in identifier '{s}'"
                            )));
                        }
                    }
                    Some(c) => {
                        return Err(SqlError::validation(format!(
                            "Expected '.' between identifier parts in '{s}', got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            if chars.peek() == Some(&'"') {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('"') => {
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                name.push('"');
                            } else {
                                break;
                            }
                        }
                        Some(c) => name.push(c),
                        None => {
                            return Err(SqlError::validation(format!(
                                "Unclosed quoted identifier '{s}'"
                            )));
                        }
                    }
                }
                if name.is_empty() {
                    return Err(SqlError::validation("Empty quoted identifier"));
                }
                parts.push(IdentPart::Quoted(name));
                continue;
            }

            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c == '.' {
                    break;
                }
                let ok = if name.is_empty() {
                    c == '_' || c.is_ascii_alphabetic()
                } else {
                    c == '_' || c == '$' || c.is_ascii_alphanumeric()
                };
                if !ok {
                    return Err(SqlError::validation(format!(
                        "Invalid character '{c}' in identifier '{s}'"
                    )));
                }
                name.push(c);
                chars.next();
            }
            if name.is_empty() {
                return Err(SqlError::validation(format!(
                    "Empty identifier segment in '{s}'"
                )));
            }
            parts.push(IdentPart::Unquoted(name));
        }

        if parts.is_empty() {
            return Err(SqlError::validation("Empty identifier"));
        }

        Ok(Self { parts })
    }

    /// The last part's name, without quotes.
    pub fn name(&self) -> &str {
        self.parts.last().map(IdentPart::name).unwrap_or_default()
    }

    /// Render as written: unquoted parts stay bare.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_bare(&mut out);
        out
    }

    /// Render with every part double-quoted.
    pub fn to_quoted_sql(&self) -> String {
        let mut out = String::new();
        self.write_quoted(&mut out);
        out
    }

    pub(crate) fn write_bare(&self, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(s) => out.push_str(s),
                IdentPart::Quoted(s) => push_quoted(out, s),
            }
        }
    }

    pub(crate) fn write_quoted(&self, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            push_quoted(out, part.name());
        }
    }
}

fn push_quoted(out: &mut String, name: &str) {
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

fn check_forbidden_chars(s: &str) -> SqlResult<()> {
    if s.contains('\0') {
        return Err(SqlError::validation(
            "Identifier cannot contain NUL character",
        ));
    }
    if s.contains('?') {
        return Err(SqlError::validation(format!(
            "Identifier '{s}' cannot contain the placeholder character '?'"
        )));
    }
    Ok(())
}

/// Convert an input into an [`Ident`].
///
/// This is mainly for ergonomics in builder APIs.
pub trait IntoIdent {
    fn into_ident(self) -> SqlResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> SqlResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> SqlResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(self)
    }
}

/// Parse a list of identifiers, stopping at the first invalid one.
pub(crate) fn parse_idents<I>(items: I) -> SqlResult<Vec<Ident>>
where
    I: IntoIterator,
    I::Item: IntoIdent,
{
    items.into_iter().map(IntoIdent::into_ident).collect()
}
