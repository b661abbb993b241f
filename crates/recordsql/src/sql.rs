//! SQL text and bind parameters written in lock-step.
//!
//! [`Sql`] is the accumulator every renderer writes into. Placeholders are only
//! ever produced by [`Sql::push_bind`], which appends the `?` and its value in
//! the same call, so the parameter list always matches the placeholders'
//! left-to-right order. Raw text pushed through [`Sql::push`] comes from
//! identifiers and keywords that are validated to contain no `?`.

use crate::ident::Ident;
use crate::value::Value;
use serde::Serialize;

/// The placeholder pair: SQL text with `?` placeholders and the ordered parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Rendered {
    /// Create a new rendered statement.
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// Number of `?` tokens in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// Split into `(sql, params)`.
    pub fn into_pair(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

impl From<Rendered> for (String, Vec<Value>) {
    fn from(r: Rendered) -> Self {
        r.into_pair()
    }
}

/// Incremental SQL writer.
#[derive(Debug, Clone, Default)]
pub struct Sql {
    text: String,
    params: Vec<Value>,
}

impl Sql {
    /// Create an empty builder.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a builder starting with a raw fragment.
    pub fn new(initial_sql: &str) -> Self {
        let mut sql = Self::empty();
        sql.push(initial_sql);
        sql
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.text.push_str(sql);
        self
    }

    /// Append a `?` placeholder and bind its value.
    pub fn push_bind(&mut self, value: Value) -> &mut Self {
        self.text.push('?');
        self.params.push(value);
        self
    }

    /// Append `?, ?, ...` for each value, in order.
    pub fn push_bind_list<'a>(&mut self, values: impl IntoIterator<Item = &'a Value>) -> &mut Self {
        for (i, v) in values.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_bind(v.clone());
        }
        self
    }

    /// Append another fragment, consuming it.
    pub fn push_sql(&mut self, other: Sql) -> &mut Self {
        self.text.push_str(&other.text);
        self.params.extend(other.params);
        self
    }

    /// Append an identifier as written (`users.id`).
    pub fn push_ident(&mut self, ident: &Ident) -> &mut Self {
        ident.write_bare(&mut self.text);
        self
    }

    /// Append an identifier with every part double-quoted (`"users"`).
    pub fn push_quoted_ident(&mut self, ident: &Ident) -> &mut Self {
        ident.write_quoted(&mut self.text);
        self
    }

    /// Append identifiers joined with `, `.
    pub fn push_ident_list(&mut self, idents: &[Ident]) -> &mut Self {
        for (i, ident) in idents.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_ident(ident);
        }
        self
    }

    /// Append an unsigned integer inline (LIMIT/OFFSET).
    pub fn push_u64(&mut self, n: u64) -> &mut Self {
        self.text.push_str(&n.to_string());
        self
    }

    /// The SQL text written so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of parameters bound so far.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Finish into the placeholder pair.
    pub fn finish(self) -> Rendered {
        Rendered::new(self.text, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_writes_placeholder_and_value() {
        let mut sql = Sql::new("age > ");
        sql.push_bind(Value::Int(18));
        let r = sql.finish();
        assert_eq!(r.sql, "age > ?");
        assert_eq!(r.params, vec![Value::Int(18)]);
        assert_eq!(r.placeholder_count(), 1);
    }

    #[test]
    fn bind_list() {
        let values = vec![Value::Int(1), Value::Int(2), Value::Int(3)];
        let mut sql = Sql::new("id IN (");
        sql.push_bind_list(&values).push(")");
        let (text, params) = sql.finish().into_pair();
        assert_eq!(text, "id IN (?, ?, ?)");
        assert_eq!(params, values);
    }

    #[test]
    fn push_sql_appends_params_in_order() {
        let mut a = Sql::new("a = ");
        a.push_bind(Value::from("x"));
        let mut b = Sql::new(" AND b = ");
        b.push_bind(Value::from("y"));
        a.push_sql(b);
        let r = a.finish();
        assert_eq!(r.sql, "a = ? AND b = ?");
        assert_eq!(r.params, vec![Value::from("x"), Value::from("y")]);
    }

    #[test]
    fn idents_bare_and_quoted() {
        let ident = Ident::parse("public.users").unwrap();
        let mut sql = Sql::empty();
        sql.push_quoted_ident(&ident).push(" ").push_ident(&ident);
        assert_eq!(sql.as_str(), r#""public"."users" public.users"#);
    }
}
