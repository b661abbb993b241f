//! SELECT statements built through the public API.

use recordsql::prelude::*;

#[test]
fn filters_users_by_age() {
    let (sql, params) = select_all()
        .from("users")
        .where_(col("age").gt(18))
        .placeholder_pair()
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "users" WHERE age > ?"#);
    assert_eq!(params, vec![Value::Int(18)]);
}

#[test]
fn full_clause_order() {
    let [department, salary, age] = cols(["department", "salary", "age"]);
    let r = select([Expr::from(&department), avg(&salary).alias("avg_salary")])
        .from("employees")
        .where_(age.gte(21) & salary.is_not_null())
        .group_by([&department])
        .having(avg(&salary).gt(num(4200.5)))
        .desc("avg_salary")
        .limit(5)
        .offset(10)
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        "SELECT department, AVG(salary) AS avg_salary FROM \"employees\" \
         WHERE age >= ? AND salary IS NOT NULL \
         GROUP BY department HAVING AVG(salary) > ? \
         ORDER BY avg_salary DESC LIMIT 5 OFFSET 10"
    );
    assert_eq!(r.params, vec![Value::Int(21), Value::Float(4200.5)]);
}

#[test]
fn in_like_between() {
    let r = select(["id"])
        .from("products")
        .where_(
            col("category").isin(["books", "music"])
                & col("title").like("%rust%")
                & col("price").between(10, 20),
        )
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"SELECT id FROM "products" WHERE category IN (?, ?) AND title LIKE ? AND price BETWEEN ? AND ?"#
    );
    assert_eq!(
        r.params,
        vec![
            Value::from("books"),
            Value::from("music"),
            Value::from("%rust%"),
            Value::Int(10),
            Value::Int(20),
        ]
    );
}

#[test]
fn empty_in_is_false_and_empty_not_in_is_true() {
    let none: Vec<i64> = Vec::new();
    let r = select_all().from("t").where_(col("id").isin(none.clone())).render().unwrap();
    assert_eq!(r.sql, r#"SELECT * FROM "t" WHERE 1=0"#);
    assert!(r.params.is_empty());

    let r = select_all().from("t").where_(col("id").not_in(none)).render().unwrap();
    assert_eq!(r.sql, r#"SELECT * FROM "t" WHERE 1=1"#);
}

#[test]
fn negation_and_functions() {
    let r = select([lower("email")])
        .from("users")
        .where_(!(col("banned").eq(true) | col("deleted_at").is_not_null()))
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"SELECT LOWER(email) FROM "users" WHERE NOT (banned = ? OR deleted_at IS NOT NULL)"#
    );
    assert_eq!(r.params, vec![Value::Bool(true)]);
}

#[test]
fn typed_text_literals() {
    let r = select(["id"])
        .from("events")
        .where_(col("starts_at").gte(text("2024-01-01").date()) & col("at").lt(text("12:00").time()))
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"SELECT id FROM "events" WHERE starts_at >= DATE(?) AND at < TIME(?)"#
    );
    assert_eq!(r.params, vec![Value::from("2024-01-01"), Value::from("12:00")]);
}

#[test]
fn template_condition() {
    let r = select(["id"])
        .from("docs")
        .where_(col("owner").eq(7) & Expr::template("tags @> ?", ["x"]))
        .render()
        .unwrap();
    assert_eq!(r.sql, r#"SELECT id FROM "docs" WHERE owner = ? AND (tags @> ?)"#);
    assert_eq!(r.params, vec![Value::Int(7), Value::from("x")]);
}

#[test]
fn invalid_names_surface_at_render() {
    let err = select(["id"]).from("bad table").render().unwrap_err();
    assert!(err.is_validation());

    let err = select(["id"]).from("t").where_(col("a?").eq(1)).render().unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn ordering_against_null_is_rejected() {
    let err = select_all()
        .from("t")
        .where_(col("age").lt(Value::Null))
        .render()
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn schema_qualified_table_is_quoted_per_part() {
    let r = select(["id"]).from("public.users").render().unwrap();
    assert_eq!(r.sql, r#"SELECT id FROM "public"."users""#);
}
