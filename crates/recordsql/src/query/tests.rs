use super::*;
use crate::clause::{ConflictAction, Direction, OnConflict};
use crate::config::RenderConfig;
use crate::expr::{col, cols, num, sum, text};
use crate::ident::Ident;
use crate::value::Value;

// ==================== SELECT ====================

#[test]
fn select_where_binds_params() {
    let (sql, params) = select(["name", "age"])
        .from("users")
        .where_(col("age").gt(18))
        .placeholder_pair()
        .unwrap();
    assert_eq!(sql, r#"SELECT name, age FROM "users" WHERE age > ?"#);
    assert_eq!(params, vec![Value::Int(18)]);
}

#[test]
fn select_all_without_columns() {
    let r = select_all().from("users").render().unwrap();
    assert_eq!(r.sql, r#"SELECT * FROM "users""#);
    assert!(r.params.is_empty());
}

#[test]
fn select_requires_from() {
    let err = select(["a"]).render().unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("FROM"));
}

#[test]
fn select_order_limit_offset_inline() {
    let r = select(["name"])
        .from("users")
        .order_by_str("created_at", "DESC")
        .limit(10)
        .offset(5)
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"SELECT name FROM "users" ORDER BY created_at DESC LIMIT 10 OFFSET 5"#
    );
    assert!(r.params.is_empty());
}

#[test]
fn select_bad_direction_is_recorded() {
    let err = select_all()
        .from("users")
        .order_by_str("age", "UP")
        .render()
        .unwrap_err();
    assert!(err.to_string().contains("invalid sort direction"));
}

#[test]
fn first_error_wins() {
    let err = select(["bad name"])
        .from("1users")
        .where_(col("a").gt(Value::Null))
        .render()
        .unwrap_err();
    assert!(err.to_string().contains("bad name"));
}

#[test]
fn and_where_or_where_merge() {
    let r = select_all()
        .from("users")
        .where_(col("a").eq(1))
        .and_where(col("b").eq(2))
        .or_where(col("c").eq(3))
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"SELECT * FROM "users" WHERE (a = ? AND b = ?) OR c = ?"#
    );
    assert_eq!(r.params, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);

    let r = select_all().from("users").and_where(col("a").eq(1)).render().unwrap();
    assert_eq!(r.sql, r#"SELECT * FROM "users" WHERE a = ?"#);
}

#[test]
fn paginate_clamps_and_computes_offset() {
    let r = select_all().from("t").paginate(3, 20).render().unwrap();
    assert!(r.sql.ends_with("LIMIT 20 OFFSET 40"));
    let r = select_all().from("t").paginate(0, 0).render().unwrap();
    assert!(r.sql.ends_with("LIMIT 1 OFFSET 0"));
}

#[test]
fn select_group_by_having() {
    let r = select([Expr::from(col("department")), sum("salary").alias("total")])
        .from("employees")
        .group_by(["department"])
        .having(sum("salary").gt(100_000))
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"SELECT department, SUM(salary) AS total FROM "employees" GROUP BY department HAVING SUM(salary) > ?"#
    );
    assert_eq!(r.params, vec![Value::Int(100_000)]);
}

#[test]
fn select_joins_in_call_order() {
    let r = select(["users.name", "orders.total"])
        .from("users")
        .inner_join("orders", col("users.id").eq(col("orders.user_id")))
        .left_join("payments", col("orders.id").eq(col("payments.order_id")))
        .where_(col("orders.total").gt(num(99.5)))
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        "SELECT users.name, orders.total FROM \"users\" \
         INNER JOIN \"orders\" ON users.id = orders.user_id \
         LEFT JOIN \"payments\" ON orders.id = payments.order_id \
         WHERE orders.total > ?"
    );
    assert_eq!(r.params, vec![Value::Float(99.5)]);
}

#[test]
fn from_as_renders_alias() {
    let r = select(["u.name"]).from_as("users", "u").render().unwrap();
    assert_eq!(r.sql, r#"SELECT u.name FROM "users" AS u"#);
}

// ==================== COUNT ====================

#[test]
fn count_star_and_column() {
    let r = count().from("users").where_(col("age").gt(18)).render().unwrap();
    assert_eq!(r.sql, r#"SELECT COUNT(*) FROM "users" WHERE age > ?"#);

    let r = count_column("id").from("users").render().unwrap();
    assert_eq!(r.sql, r#"SELECT COUNT(id) FROM "users""#);
}

// ==================== INSERT ====================

#[test]
fn insert_single_row() {
    let (sql, params) = insert(["name", "age"])
        .into_table("users")
        .values(("John", 25))
        .placeholder_pair()
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "users" (name, age) VALUES (?, ?)"#);
    assert_eq!(params, vec![Value::from("John"), Value::Int(25)]);
}

#[test]
fn insert_into_then_columns() {
    let r = insert_into("users")
        .columns(["email"])
        .values(["a@example.com"])
        .render()
        .unwrap();
    assert_eq!(r.sql, r#"INSERT INTO "users" (email) VALUES (?)"#);
}

#[test]
fn insert_requires_values_and_matching_rows() {
    let err = insert(["a"]).into_table("t").render().unwrap_err();
    assert!(err.to_string().contains("VALUES"));

    let err = insert(["a", "b"]).into_table("t").values((1,)).render().unwrap_err();
    assert!(err.is_validation());

    let err = insert(["a"]).values((1,)).render().unwrap_err();
    assert!(err.to_string().contains("INTO"));
}

#[test]
fn insert_on_conflict_do_nothing() {
    let r = insert(["email", "name"])
        .into_table("users")
        .values(("user@example.com", "User"))
        .on_conflict(["email"])
        .do_nothing()
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"INSERT INTO "users" (email, name) VALUES (?, ?) ON CONFLICT (email) DO NOTHING"#
    );
    assert_eq!(r.params.len(), 2);
}

#[test]
fn insert_on_conflict_do_update_with_where() {
    let r = insert(["col1", "col2"])
        .into_table("table_name")
        .values((1, 2))
        .on_conflict(["col1"])
        .do_update()
        .set("col2", 10)
        .set_excluded("col1")
        .where_(col("col1").eq(1))
        .finish()
        .returning_all()
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        "INSERT INTO \"table_name\" (col1, col2) VALUES (?, ?) \
         ON CONFLICT (col1) DO UPDATE SET col2 = ?, col1 = EXCLUDED.col1 WHERE col1 = ? \
         RETURNING *"
    );
    assert_eq!(
        r.params,
        vec![Value::Int(1), Value::Int(2), Value::Int(10), Value::Int(1)]
    );
}

#[test]
fn insert_on_conflict_update_requires_set() {
    let err = insert(["a"])
        .into_table("t")
        .values((1,))
        .on_conflict(["a"])
        .do_update()
        .finish()
        .render()
        .unwrap_err();
    assert!(err.to_string().contains("SET"));
}

#[test]
fn insert_column_values() {
    let q = insert(["name", "age"])
        .into_table("users")
        .rows([("Alice", 28), ("Bob", 32)]);
    let rows = q.column_values();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        vec![
            ("name".to_string(), Value::from("Alice")),
            ("age".to_string(), Value::Int(28)),
        ]
    );
    assert_eq!(rows[1][0].1, Value::from("Bob"));
}

// ==================== UPDATE ====================

#[test]
fn update_set_where_returning() {
    let r = update("users")
        .set("name", "Jane")
        .set("last_login", None::<String>)
        .where_(col("id").eq(1))
        .returning(["id", "name"])
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"UPDATE "users" SET name = ?, last_login = ? WHERE id = ? RETURNING id, name"#
    );
    assert_eq!(r.params, vec![Value::from("Jane"), Value::Null, Value::Int(1)]);
}

#[test]
fn update_set_expression() {
    let r = update("counters")
        .set("hits", col("hits") + 1)
        .where_(col("id").eq(9))
        .render()
        .unwrap();
    assert_eq!(r.sql, r#"UPDATE "counters" SET hits = (hits + ?) WHERE id = ?"#);
    assert_eq!(r.params, vec![Value::Int(1), Value::Int(9)]);
}

#[test]
fn update_requires_set() {
    let err = update("users").where_(col("id").eq(1)).render().unwrap_err();
    assert_eq!(err.to_string(), "Validation error: UPDATE requires SET");
}

#[test]
fn update_set_values_keeps_order() {
    let r = update("users")
        .set_values([("a", 1), ("b", 2)])
        .render()
        .unwrap();
    assert_eq!(r.sql, r#"UPDATE "users" SET a = ?, b = ?"#);
}

// ==================== DELETE / EXISTS ====================

#[test]
fn delete_with_and_without_where() {
    let r = delete()
        .from("orders")
        .where_(col("status").ne("cancelled"))
        .render()
        .unwrap();
    assert_eq!(r.sql, r#"DELETE FROM "orders" WHERE status != ?"#);
    assert_eq!(r.params, vec![Value::from("cancelled")]);

    let r = delete_from("users").render().unwrap();
    assert_eq!(r.sql, r#"DELETE FROM "users""#);

    assert!(delete().render().unwrap_err().is_validation());
}

#[test]
fn exists_wraps_subquery() {
    let r = exists()
        .from("employees")
        .where_(col("age").gt(30))
        .group_by(["department"])
        .having(col("salary").gt(50_000))
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"SELECT EXISTS (SELECT 1 FROM "employees" WHERE age > ? GROUP BY department HAVING salary > ?)"#
    );
    assert_eq!(r.params, vec![Value::Int(30), Value::Int(50_000)]);
}

// ==================== WITH ====================

#[test]
fn with_cte_params_come_first() {
    let [name, age, city] = cols(["name", "age", "city"]);
    let inner = select([&name, &age, &city]).from("users").where_(age.gt(18));
    let r = with(inner.as_cte("adults"))
        .select([&name])
        .from("adults")
        .where_(city.eq("New York"))
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        "WITH adults AS (SELECT name, age, city FROM \"users\" WHERE age > ?) \
         SELECT name FROM \"adults\" WHERE city = ?"
    );
    assert_eq!(r.params, vec![Value::Int(18), Value::from("New York")]);
}

#[test]
fn with_recursive_and_columns() {
    let seed = select([Expr::raw("1")]).from("dual");
    let r = with(seed.as_cte_with_columns("nums", ["n"]))
        .recursive()
        .select_all()
        .from("nums")
        .render()
        .unwrap();
    assert_eq!(
        r.sql,
        r#"WITH RECURSIVE nums(n) AS (SELECT 1 FROM "dual") SELECT * FROM "nums""#
    );
}

#[test]
fn with_several_ctes() {
    let a = select(["id"]).from("users").where_(col("active").eq(true));
    let b = select(["user_id"]).from("orders").where_(col("total").gt(10));
    let r = with(a.as_cte("a"))
        .cte(b.as_cte("b"))
        .select(["a.id"])
        .from("a")
        .inner_join("b", col("a.id").eq(col("b.user_id")))
        .render()
        .unwrap();
    assert!(r.sql.starts_with("WITH a AS (SELECT id FROM \"users\" WHERE active = ?), b AS ("));
    assert_eq!(r.params, vec![Value::Bool(true), Value::Int(10)]);
}

#[test]
fn with_outer_insert_accepts_on_conflict() {
    let src = select(["email"]).from("staging");
    let r = with(src.as_cte("incoming"))
        .insert(["email"])
        .into_table("users")
        .values(["x@example.com"])
        .on_conflict(OnConflict {
            columns: vec![Ident::parse("email").unwrap()],
            action: ConflictAction::Nothing,
        })
        .render()
        .unwrap();
    assert!(r.sql.ends_with(r#"INSERT INTO "users" (email) VALUES (?) ON CONFLICT (email) DO NOTHING"#));
}

#[test]
fn with_rejects_clause_for_wrong_outer_kind() {
    let inner = select(["id"]).from("users");
    let err = with(inner.as_cte("u"))
        .select_all()
        .from("u")
        .values((1,))
        .render()
        .unwrap_err();
    assert!(err.is_unsupported());
    assert!(err.to_string().contains("VALUES"));

    let inner = select(["id"]).from("users");
    let err = with(inner.as_cte("u"))
        .update("users")
        .set("a", 1)
        .limit(3)
        .render()
        .unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn with_requires_cte_and_outer() {
    let err = WithQuery::new().select_all().from("t").render().unwrap_err();
    assert!(err.to_string().contains("at least one CTE"));

    let inner = select(["id"]).from("users");
    let err = with(inner.as_cte("u")).render().unwrap_err();
    assert!(err.to_string().contains("outer statement"));

    let inner = select(["id"]).from("users");
    let err = with(inner.as_cte("u")).from("u").render().unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn with_propagates_inner_errors() {
    let broken = select(["id"]).where_(col("a").eq(1));
    let err = with(broken.as_cte("x")).select_all().from("x").render().unwrap_err();
    assert!(err.to_string().contains("SELECT requires FROM"));

    let fine = select(["id"]).from("t");
    let err = with(fine.as_cte("bad name")).select_all().from("x").render().unwrap_err();
    assert!(err.is_validation());
}

// ==================== Rendering ====================

#[test]
fn render_with_config_does_not_change_output() {
    let q = select(["a"]).from("t").where_(col("d").gt(text("1 day").datetime()));
    let quiet = q.render_with(&RenderConfig::new().disable_logging()).unwrap();
    let loud = q
        .render_with(
            &RenderConfig::new()
                .with_log_level(tracing::Level::INFO)
                .log_params(true)
                .with_max_sql_length(5),
        )
        .unwrap();
    assert_eq!(quiet, loud);
    assert_eq!(quiet.sql, r#"SELECT a FROM "t" WHERE d > DATETIME(?)"#);
}

#[test]
fn to_sql_skips_validation() {
    assert_eq!(select(["a"]).to_sql(), "SELECT a");
}

#[test]
fn order_by_direction_enum() {
    let r = select_all()
        .from("t")
        .order_by("a", Direction::Asc)
        .desc("b")
        .render()
        .unwrap();
    assert!(r.sql.ends_with("ORDER BY a ASC, b DESC"));
}

#[test]
fn build_differs_from_render_for_short_template() {
    let q = select(["a"])
        .from("t")
        .where_(Expr::template("a = ? AND b = ?", [1]));
    let built = q.build();
    assert_eq!(built.sql, r#"SELECT a FROM "t" WHERE a = ? AND b = ?"#);
    assert_eq!(built.params, vec![Value::Int(1), Value::Null]);
    assert!(q.render().unwrap_err().is_validation());
}
