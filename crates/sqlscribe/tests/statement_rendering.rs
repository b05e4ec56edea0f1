//! End-to-end statement rendering against a prefixed database handle.

use sqlscribe::{
    ConditionGroup, Database, Dialect, Error, Fragment, Join, OrderDirection, Value,
};

fn app_db() -> Database {
    Database::new("app", Dialect::Ansi, "app_")
}

#[test]
fn prefixed_select_with_alias_ordering_and_limit() {
    let query = app_db()
        .select()
        .from(["users AS u"])
        .columns(["u.id", "u.name"])
        .filter_value("u.active", true)
        .order_by("u.id", OrderDirection::Desc)
        .limit(10);

    assert_eq!(
        query.sql_statement().unwrap(),
        "SELECT \"u\".\"id\", \"u\".\"name\"\n\
         FROM \"app_users\" AS \"u\"\n\
         WHERE \"u\".\"active\" = ?\n\
         ORDER BY \"u\".\"id\" DESC\n\
         LIMIT 10"
    );
    assert_eq!(query.parameters(), vec![Value::Bool(true)]);
}

#[test]
fn statement_renders_identically_twice() {
    let query = app_db()
        .select()
        .from(["users AS u"])
        .filter_value("u.active", true);
    let first = query.sql_statement().unwrap();
    let second = query.sql_statement().unwrap();
    assert_eq!(first, second);
}

#[test]
fn union_query_places_order_by_once_after_union_block() {
    let db = app_db();
    let archived = db.select().from(["archived_users"]).columns(["id"]);
    let query = db
        .select()
        .from(["users"])
        .columns(["id"])
        .union_all(archived)
        .order_by("id", OrderDirection::Asc)
        .limit(5);

    let sql = query.sql_statement().unwrap();
    assert_eq!(
        sql,
        "SELECT \"id\"\n\
         FROM \"app_users\"\n\
         UNION ALL\n\
         (SELECT \"id\"\n\
         FROM \"app_archived_users\")\n\
         ORDER BY \"id\" ASC\n\
         LIMIT 5"
    );
    assert_eq!(sql.matches("ORDER BY").count(), 1);
    assert!(sql.find("UNION ALL").unwrap() < sql.find("ORDER BY").unwrap());
}

#[test]
fn grouped_conditions_and_in_lists_bind_in_order() {
    let query = app_db()
        .select()
        .from(["orders AS o"])
        .filter_value("o.status", "paid")
        .filter_group(|group: ConditionGroup| {
            group
                .filter_value(
                    "o.region",
                    vec![
                        Value::Text("eu".into()),
                        Value::Text("us".into()),
                        Value::Text("apac".into()),
                    ],
                )
                .or_filter("o.total", ">", 10_000)
        });

    assert_eq!(
        query.sql_statement().unwrap(),
        "SELECT *\n\
         FROM \"app_orders\" AS \"o\"\n\
         WHERE \"o\".\"status\" = ? AND (\"o\".\"region\" IN (?, ?, ?) OR \"o\".\"total\" > ?)"
    );
    assert_eq!(query.parameters().len(), 5);
}

#[test]
fn joined_select_resolves_aliases_in_every_clause() {
    let query = app_db()
        .select()
        .from(["users AS u"])
        .columns(["u.id", "t.name AS team"])
        .join(
            Join::left("teams AS t")
                .on("t.id", "u.team_id")
                .on_where("t.active", "=", true),
        )
        .filter("u.age", ">=", 21)
        .group_by(["t.name"])
        .having("COUNT(*)", ">", 2);

    assert_eq!(
        query.sql_statement().unwrap(),
        "SELECT \"u\".\"id\", \"t\".\"name\" AS \"team\"\n\
         FROM \"app_users\" AS \"u\"\n\
         LEFT JOIN \"app_teams\" AS \"t\" ON \"t\".\"id\" = \"u\".\"team_id\" AND \"t\".\"active\" = ?\n\
         WHERE \"u\".\"age\" >= ?\n\
         GROUP BY \"t\".\"name\"\n\
         HAVING COUNT(*) > ?"
    );
    assert_eq!(
        query.parameters(),
        vec![Value::Bool(true), Value::Int(21), Value::Int(2)]
    );
}

#[test]
fn full_crud_round_against_one_database() {
    let db = app_db();

    let insert = db
        .insert("users")
        .columns(["name", "email"])
        .values([Value::Text("ada".into()), Value::Text("ada@example.com".into())]);
    assert_eq!(
        insert.sql_statement().unwrap(),
        "INSERT INTO \"app_users\" (\"name\", \"email\")\nVALUES (?, ?)"
    );

    let update = db
        .update("users")
        .set("name", "ada lovelace")
        .set_fragment("version", Fragment::expression("version + 1"))
        .filter_value("id", 7);
    assert_eq!(
        update.sql_statement().unwrap(),
        "UPDATE \"app_users\"\nSET \"name\" = ?, \"version\" = \"version\" + 1\nWHERE \"id\" = ?"
    );
    assert_eq!(
        update.parameters(),
        vec![Value::Text("ada lovelace".into()), Value::Int(7)]
    );

    let delete = db.delete("users").filter_value("id", 7);
    assert_eq!(
        delete.sql_statement().unwrap(),
        "DELETE FROM \"app_users\"\nWHERE \"id\" = ?"
    );
}

#[test]
fn sub_select_inherits_outer_aliases() {
    let db = app_db();
    let latest = db
        .select()
        .from(["orders"])
        .columns(["MAX(orders.id)"])
        .filter_fragment(Fragment::expression("orders.user_id = u.id"));
    let query = db
        .select()
        .from(["users AS u"])
        .filter("u.last_order", "=", latest);

    // `u` resolves inside the sub-select because the nested statement is
    // compiled against the same compiler instance.
    assert_eq!(
        query.sql_statement().unwrap(),
        "SELECT *\n\
         FROM \"app_users\" AS \"u\"\n\
         WHERE \"u\".\"last_order\" = (SELECT MAX(\"app_orders\".\"id\")\n\
         FROM \"app_orders\"\n\
         WHERE \"app_orders\".\"user_id\" = \"u\".\"id\")"
    );
}

#[test]
fn mysql_dialect_quotes_with_backticks_and_validates_offset() {
    let db = Database::new("app", Dialect::MySql, "");
    let query = db.select().from(["users"]).columns(["id"]).offset(10);
    assert_eq!(
        query.sql_statement(),
        Err(Error::OffsetWithoutLimit { dialect: "mysql" })
    );

    let query = db.select().from(["users"]).columns(["id"]).limit(5).offset(10);
    assert_eq!(
        query.sql_statement().unwrap(),
        "SELECT `id`\nFROM `users`\nLIMIT 5 OFFSET 10"
    );
}

#[test]
fn pagination_derives_limit_and_offset() {
    let query = app_db().select().from(["users"]).page(4, 20);
    assert!(query.sql_statement().unwrap().ends_with("LIMIT 20 OFFSET 60"));
}

#[test]
fn count_variant_for_paginated_query() {
    let query = app_db()
        .select()
        .from(["users"])
        .filter_value("active", true)
        .order_by("name", OrderDirection::Asc)
        .page(4, 20);
    assert_eq!(
        query.count().sql_statement().unwrap(),
        "SELECT COUNT(*)\nFROM \"app_users\"\nWHERE \"active\" = ?"
    );
}
