//! Example demonstrating recordsql's statement builders.
//!
//! Run with:
//!   cargo run --example sql_builder -p recordsql

use recordsql::prelude::*;

#[derive(Debug)]
struct Filters {
    status: Option<String>,
    search: Option<String>,
    roles_any_of: Vec<String>,
    include_deleted: bool,
    page: u64,
    per_page: u64,
    sort_by: Option<String>,
}

fn build_list_users(filters: &Filters) -> SqlResult<Rendered> {
    let mut q = select(["id", "name", "status", "role", "created_at"])
        .from("users")
        .where_(col("id").is_not_null());

    if let Some(status) = &filters.status {
        q = q.and_where(col("status").eq(status.as_str()));
    }
    if let Some(search) = &filters.search {
        q = q.and_where(col("name").like(format!("%{search}%")));
    }
    if !filters.roles_any_of.is_empty() {
        q = q.and_where(col("role").isin(filters.roles_any_of.iter().map(String::as_str)));
    }
    if !filters.include_deleted {
        q = q.and_where(col("deleted_at").is_null());
    }

    // Sort column names are validated when rendered.
    q = q.desc("created_at");
    if let Some(sort_by) = &filters.sort_by {
        q = q.asc(sort_by.as_str());
    }

    q.paginate(filters.page, filters.per_page).render()
}

fn print(label: &str, rendered: &Rendered) {
    println!("{label}:\n  {}\n  params = {:?}\n", rendered.sql, rendered.params);
}

fn main() -> SqlResult<()> {
    let filters = Filters {
        status: Some("active".to_string()),
        search: Some("a".to_string()),
        roles_any_of: vec!["admin".to_string(), "owner".to_string()],
        include_deleted: false,
        page: 1,
        per_page: 10,
        sort_by: Some("id".to_string()),
    };
    print("list users", &build_list_users(&filters)?);

    let upsert = insert(["email", "name"])
        .into_table("users")
        .rows([("ann@example.com", "Ann"), ("bob@example.com", "Bob")])
        .on_conflict(["email"])
        .do_update()
        .set_excluded("name")
        .finish()
        .returning(["id"])
        .render()?;
    print("upsert", &upsert);

    let [name, age, city] = cols(["name", "age", "city"]);
    let adults = select([&name, &age, &city]).from("users").where_(age.gt(18));
    let report = with(adults.as_cte("adults"))
        .select([Expr::from(&city), count_star().alias("n")])
        .from("adults")
        .group_by([&city])
        .having(count_star().gte(5))
        .render()?;
    print("adults per city", &report);

    let touched = update("users")
        .set("visits", col("visits") + 1)
        .set("last_seen", text("2024-05-01 12:00:00").datetime())
        .where_(col("id").eq(42))
        .render()?;
    print("touch", &touched);

    let taken = exists().from("users").where_(col("email").eq("ann@example.com")).render()?;
    print("email taken", &taken);

    // Construction errors surface at render time.
    if let Err(e) = delete().where_(col("id").eq(1)).render() {
        println!("rejected: {e}");
    }

    Ok(())
}
