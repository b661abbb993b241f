//! Statement renderers.
//!
//! One function per statement kind turns its clause record into a
//! [`Rendered`] pair. Clauses are written in SQL grammar order and absent
//! clauses are skipped. Parameters come out in the order their clauses are
//! written, since every fragment goes through the same [`Sql`] accumulator.
//!
//! Rendering is infallible. Required-clause checks live in
//! [`Statement::validate`] and the query builders run them first.

use crate::clause::{
    Assignment, ConflictAction, Cte, DeleteClauses, ExistsClauses, InsertClauses, Join,
    OnConflict, OrderBy, Returning, SelectClauses, Statement, TableRef, UpdateClauses,
    WithClauses,
};
use crate::expr::Expr;
use crate::sql::{Rendered, Sql};

/// `SELECT cols FROM ... JOIN ... WHERE ... GROUP BY ... HAVING ... ORDER BY ... LIMIT ... OFFSET ...`
pub fn render_select(clauses: &SelectClauses) -> Rendered {
    finish(|out| write_select(clauses, out))
}

/// `INSERT INTO "t" (cols) VALUES (...), ... ON CONFLICT ... RETURNING ...`
pub fn render_insert(clauses: &InsertClauses) -> Rendered {
    finish(|out| write_insert(clauses, out))
}

/// `UPDATE "t" SET ... WHERE ... RETURNING ...`
pub fn render_update(clauses: &UpdateClauses) -> Rendered {
    finish(|out| write_update(clauses, out))
}

/// `DELETE FROM "t" WHERE ...`
pub fn render_delete(clauses: &DeleteClauses) -> Rendered {
    finish(|out| write_delete(clauses, out))
}

/// `SELECT EXISTS (SELECT 1 FROM "t" WHERE ... GROUP BY ... HAVING ...)`
pub fn render_exists(clauses: &ExistsClauses) -> Rendered {
    finish(|out| write_exists(clauses, out))
}

/// `WITH name AS (inner), ... <outer>`. Every CTE's params precede the outer
/// statement's params.
pub fn render_with(clauses: &WithClauses) -> Rendered {
    finish(|out| write_with(clauses, out))
}

/// Render any statement kind.
pub fn render_statement(statement: &Statement) -> Rendered {
    finish(|out| write_statement(statement, out))
}

fn finish(write: impl FnOnce(&mut Sql)) -> Rendered {
    let mut out = Sql::empty();
    write(&mut out);
    out.finish()
}

pub(crate) fn write_statement(statement: &Statement, out: &mut Sql) {
    match statement {
        Statement::Select(c) => write_select(c, out),
        Statement::Insert(c) => write_insert(c, out),
        Statement::Update(c) => write_update(c, out),
        Statement::Delete(c) => write_delete(c, out),
        Statement::Exists(c) => write_exists(c, out),
        Statement::With(c) => write_with(c, out),
    }
}

fn write_select(c: &SelectClauses, out: &mut Sql) {
    out.push("SELECT ");
    if c.columns.is_empty() {
        out.push("*");
    } else {
        write_expr_list(&c.columns, out);
    }
    write_from(c.from.as_ref(), out);
    write_joins(&c.joins, out);
    write_where(c.where_.as_ref(), out);
    write_group_by(&c.group_by, out);
    write_having(c.having.as_ref(), out);
    write_order_by(&c.order_by, out);
    if let Some(limit) = c.limit {
        out.push(" LIMIT ").push_u64(limit);
    }
    if let Some(offset) = c.offset {
        out.push(" OFFSET ").push_u64(offset);
    }
}

fn write_insert(c: &InsertClauses, out: &mut Sql) {
    out.push("INSERT INTO ");
    if let Some(table) = &c.table {
        out.push_quoted_ident(table);
    }
    out.push(" (").push_ident_list(&c.columns).push(")");
    if !c.rows.is_empty() {
        out.push(" VALUES ");
        for (i, row) in c.rows.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            out.push("(").push_bind_list(row).push(")");
        }
    }
    if let Some(on_conflict) = &c.on_conflict {
        write_on_conflict(on_conflict, out);
    }
    write_returning(c.returning.as_ref(), out);
}

fn write_update(c: &UpdateClauses, out: &mut Sql) {
    out.push("UPDATE ");
    if let Some(table) = &c.table {
        out.push_quoted_ident(table);
    }
    if !c.set.is_empty() {
        out.push(" SET ");
        write_assignments(&c.set, out);
    }
    write_where(c.where_.as_ref(), out);
    write_returning(c.returning.as_ref(), out);
}

fn write_delete(c: &DeleteClauses, out: &mut Sql) {
    out.push("DELETE FROM ");
    if let Some(table) = &c.table {
        out.push_quoted_ident(table);
    }
    write_where(c.where_.as_ref(), out);
}

fn write_exists(c: &ExistsClauses, out: &mut Sql) {
    out.push("SELECT EXISTS (SELECT 1");
    write_from(c.from.as_ref(), out);
    write_joins(&c.joins, out);
    write_where(c.where_.as_ref(), out);
    write_group_by(&c.group_by, out);
    write_having(c.having.as_ref(), out);
    out.push(")");
}

fn write_with(c: &WithClauses, out: &mut Sql) {
    out.push(if c.recursive { "WITH RECURSIVE " } else { "WITH " });
    for (i, cte) in c.ctes.iter().enumerate() {
        if i > 0 {
            out.push(", ");
        }
        write_cte(cte, out);
    }
    out.push(" ");
    write_statement(&c.body, out);
}

fn write_cte(cte: &Cte, out: &mut Sql) {
    out.push_ident(&cte.name);
    if !cte.columns.is_empty() {
        out.push("(").push_ident_list(&cte.columns).push(")");
    }
    out.push(" AS (");
    write_statement(&cte.query, out);
    out.push(")");
}

fn write_from(from: Option<&TableRef>, out: &mut Sql) {
    if let Some(table) = from {
        out.push(" FROM ");
        write_table_ref(table, out);
    }
}

fn write_table_ref(table: &TableRef, out: &mut Sql) {
    out.push_quoted_ident(&table.name);
    if let Some(alias) = &table.alias {
        out.push(" AS ").push_ident(alias);
    }
}

fn write_joins(joins: &[Join], out: &mut Sql) {
    for join in joins {
        out.push(" ").push(join.kind.as_str()).push(" ");
        write_table_ref(&join.table, out);
        out.push(" ON ");
        join.on.write(out);
    }
}

fn write_where(cond: Option<&Expr>, out: &mut Sql) {
    if let Some(cond) = cond {
        out.push(" WHERE ");
        cond.write(out);
    }
}

fn write_group_by(group_by: &[Expr], out: &mut Sql) {
    if !group_by.is_empty() {
        out.push(" GROUP BY ");
        write_expr_list(group_by, out);
    }
}

fn write_having(cond: Option<&Expr>, out: &mut Sql) {
    if let Some(cond) = cond {
        out.push(" HAVING ");
        cond.write(out);
    }
}

fn write_order_by(order_by: &[OrderBy], out: &mut Sql) {
    if order_by.is_empty() {
        return;
    }
    out.push(" ORDER BY ");
    for (i, item) in order_by.iter().enumerate() {
        if i > 0 {
            out.push(", ");
        }
        item.expr.write(out);
        out.push(" ").push(item.direction.as_str());
    }
}

fn write_on_conflict(on_conflict: &OnConflict, out: &mut Sql) {
    out.push(" ON CONFLICT");
    if !on_conflict.columns.is_empty() {
        out.push(" (").push_ident_list(&on_conflict.columns).push(")");
    }
    match &on_conflict.action {
        ConflictAction::Nothing => {
            out.push(" DO NOTHING");
        }
        ConflictAction::Update { set, where_ } => {
            out.push(" DO UPDATE SET ");
            write_assignments(set, out);
            write_where(where_.as_ref(), out);
        }
    }
}

fn write_assignments(set: &[Assignment], out: &mut Sql) {
    for (i, assignment) in set.iter().enumerate() {
        if i > 0 {
            out.push(", ");
        }
        out.push_ident(&assignment.column).push(" = ");
        assignment.value.write(out);
    }
}

fn write_returning(returning: Option<&Returning>, out: &mut Sql) {
    match returning {
        Some(Returning::All) => {
            out.push(" RETURNING *");
        }
        Some(Returning::Columns(columns)) if !columns.is_empty() => {
            out.push(" RETURNING ");
            write_expr_list(columns, out);
        }
        _ => {}
    }
}

fn write_expr_list(exprs: &[Expr], out: &mut Sql) {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            out.push(", ");
        }
        expr.write(out);
    }
}
