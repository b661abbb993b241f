//! Rendering properties that hold for every statement kind.
//!
//! - the number of `?` in the SQL equals the number of params
//! - params follow the left-to-right order of their placeholders
//! - comparisons with NULL bind nothing
//! - booleans stay booleans
//! - AND/OR grouping survives rendering
//! - rendering the same builder twice gives the same pair

use recordsql::prelude::*;

fn sample_statements() -> Vec<Rendered> {
    let [name, age, city] = cols(["name", "age", "city"]);
    let deep = (age.gt(1) & (city.eq("a") | (name.like("b%") & !age.between(3, 4))))
        | (col("score") * 2).gte(col("limit") + num(0.5));

    vec![
        select([&name]).from("users").where_(deep.clone()).render().unwrap(),
        count().from("users").where_(age.isin([1, 2, 3])).render().unwrap(),
        insert(["name", "age"])
            .into_table("users")
            .rows([("a", 1), ("b", 2), ("c", 3)])
            .on_conflict(["name"])
            .do_update()
            .set("age", 9)
            .where_(col("age").lt(100))
            .finish()
            .render()
            .unwrap(),
        update("users")
            .set("age", col("age") + 1)
            .where_(deep.clone())
            .render()
            .unwrap(),
        delete_from("users").where_(deep.clone()).render().unwrap(),
        exists().from("users").where_(deep.clone()).render().unwrap(),
        with(select([&name]).from("users").where_(deep.clone()).as_cte("x"))
            .select_all()
            .from("x")
            .where_(Expr::template("coalesce(?, ?) = 1", [Value::Null, Value::Int(1)]))
            .render()
            .unwrap(),
    ]
}

#[test]
fn placeholder_count_matches_params() {
    for r in sample_statements() {
        assert_eq!(r.placeholder_count(), r.params.len(), "{}", r.sql);
    }
}

#[test]
fn params_follow_placeholder_order() {
    let r = select(["a"])
        .from("t")
        .inner_join("u", col("u.k").eq(1))
        .where_(col("b").eq(2) & col("c").isin([3, 4]) & col("d").between(5, 6))
        .group_by(["a"])
        .having(sum("e").gt(7))
        .render()
        .unwrap();
    let expected: Vec<Value> = (1..=7).map(Value::Int).collect();
    assert_eq!(r.params, expected);
}

#[test]
fn null_comparisons_bind_nothing() {
    let r = select_all()
        .from("t")
        .where_(col("x").eq(Value::Null) & col("y").ne(None::<i32>))
        .render()
        .unwrap();
    assert_eq!(r.sql, r#"SELECT * FROM "t" WHERE x IS NULL AND y IS NOT NULL"#);
    assert!(r.params.is_empty());
}

#[test]
fn booleans_are_not_integers() {
    let r = select_all().from("t").where_(col("active").eq(true)).render().unwrap();
    assert_eq!(r.params, vec![Value::Bool(true)]);
    assert_ne!(r.params[0], Value::Int(1));
}

#[test]
fn grouping_follows_construction() {
    let [a, b, c] = cols(["a", "b", "c"]);
    let r = select_all()
        .from("t")
        .where_((a.eq(1) & b.eq(2)) | c.eq(3))
        .render()
        .unwrap();
    assert!(r.sql.ends_with("WHERE (a = ? AND b = ?) OR c = ?"));

    let r = select_all()
        .from("t")
        .where_(a.eq(1) & (b.eq(2) | c.eq(3)))
        .render()
        .unwrap();
    assert!(r.sql.ends_with("WHERE a = ? AND (b = ? OR c = ?)"));
}

#[test]
fn rendering_is_idempotent() {
    let q = select(["a"])
        .from("t")
        .where_(col("a").gt(1) | col("b").isin(["x", "y"]))
        .order_by("a", Direction::Desc);
    let first = q.render().unwrap();
    let second = q.render().unwrap();
    assert_eq!(first, second);
    assert_eq!(q.to_sql(), first.sql);
}

#[test]
fn grouping_survives_single_child_groups() {
    let [a, b, x] = cols(["a", "b", "x"]);
    let with_operators = x.eq(0) & (a.eq(1) | b.eq(2));
    let with_constructors = Expr::and([
        x.eq(0),
        Expr::and([Expr::or([a.eq(1), b.eq(2)])]),
    ]);
    for cond in [with_operators, with_constructors] {
        let r = select_all().from("t").where_(cond).render().unwrap();
        assert_eq!(r.sql, r#"SELECT * FROM "t" WHERE x = ? AND (a = ? OR b = ?)"#);
        assert_eq!(r.placeholder_count(), r.params.len());
    }

    let r = select_all()
        .from("t")
        .where_(Expr::or([Expr::and([a.eq(1) | b.eq(2)])]).eq(true))
        .render()
        .unwrap();
    assert_eq!(r.sql, r#"SELECT * FROM "t" WHERE (a = ? OR b = ?) = ?"#);
    assert_eq!(r.params, vec![Value::Int(1), Value::Int(2), Value::Bool(true)]);
}
