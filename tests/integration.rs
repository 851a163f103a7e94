//! Integration tests for sql-edit-core
//!
//! Exercise the public API end to end: validation, query building, previews
//! and statement splitting across all four dialects.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use sql_edit_core::{
    BuiltQuery, ColumnChange, ColumnRef, Dialect, EditContext, EditOperation, PrimaryKeyValue,
    QueryOptions, Row, SQL_PARSER_CONFIGS, build_batch_queries, build_preview_sql, build_query,
    create_statement_splitter, split_statements, try_build_batch_queries, validate_operation,
};

fn users() -> EditContext {
    EditContext::new("public", "users")
        .with_primary_keys(["id"])
        .with_columns(vec![
            ColumnRef::new("id", "integer"),
            ColumnRef::new("name", "varchar"),
            ColumnRef::new("email", "varchar"),
            ColumnRef::new("age", "integer"),
            ColumnRef::new("settings", "jsonb"),
        ])
}

fn john_to_jane() -> EditOperation {
    EditOperation::update(
        vec![PrimaryKeyValue::new("id", 1, "integer")],
        vec![
            ColumnChange::new("name", "John", "Jane", "varchar"),
            ColumnChange::new("age", 30, 31, "integer"),
        ],
    )
}

fn insert_bob() -> EditOperation {
    let mut values = Row::new();
    values.insert("name".into(), json!("Bob"));
    values.insert("age".into(), json!(30));
    EditOperation::insert(
        values,
        vec![
            ColumnRef::new("name", "varchar"),
            ColumnRef::new("email", "varchar"),
            ColumnRef::new("age", "integer"),
        ],
    )
}

/// Count of dialect placeholder tokens in a statement
fn placeholder_count(sql: &str, dialect: Dialect) -> usize {
    match dialect {
        Dialect::Postgresql => sql.matches('$').count(),
        Dialect::Mysql | Dialect::Sqlite => sql.matches('?').count(),
        Dialect::Mssql => sql.matches("@p").count(),
    }
}

// ==================== Scenario Tests ====================

#[test]
fn test_update_scenario_postgres() {
    let query = build_query(&john_to_jane(), &users(), Dialect::Postgresql);

    assert_eq!(
        query,
        BuiltQuery {
            sql: r#"UPDATE "users" SET "name" = $1, "age" = $2 WHERE "id" = $3 RETURNING *"#
                .to_string(),
            params: vec![json!("Jane"), json!(31), json!(1)],
        }
    );
}

#[test]
fn test_update_scenario_mysql() {
    let query = build_query(&john_to_jane(), &users(), Dialect::Mysql);

    assert_eq!(
        query.sql,
        "UPDATE `users` SET `name` = ?, `age` = ? WHERE `id` = ?"
    );
    assert_eq!(query.params, vec![json!("Jane"), json!(31), json!(1)]);
}

#[test]
fn test_mysql_database_name_is_kept() {
    let query = build_query(
        &john_to_jane(),
        &EditContext::new("shop", "users"),
        Dialect::Mysql,
    );

    assert_eq!(
        query.sql,
        "UPDATE `shop`.`users` SET `name` = ?, `age` = ? WHERE `id` = ?"
    );
}

#[test]
fn test_insert_scenario_drops_undefined_email() {
    let query = build_query(&insert_bob(), &users(), Dialect::Postgresql);

    assert_eq!(
        query.sql,
        r#"INSERT INTO "users" ("name", "age") VALUES ($1, $2) RETURNING *"#
    );
    assert_eq!(query.params, vec![json!("Bob"), json!(30)]);
}

#[test]
fn test_split_scenarios() {
    assert_eq!(
        split_statements("SELECT 1;;; SELECT 2", Dialect::Postgresql),
        vec!["SELECT 1", "SELECT 2"]
    );
    assert_eq!(
        split_statements("SELECT $$ a; b $$", Dialect::Postgresql),
        vec!["SELECT $$ a; b $$"]
    );
    assert_eq!(
        split_statements("SELECT $$ a; b $$", Dialect::Mysql),
        vec!["SELECT $$ a", "b $$"]
    );
}

// ==================== Parameter Count Properties ====================

#[test]
fn test_param_counts_match_operation_shape() {
    let delete_op = EditOperation::delete(vec![
        PrimaryKeyValue::new("org", 3, "integer"),
        PrimaryKeyValue::new("id", 9, "integer"),
    ]);

    for dialect in Dialect::ALL {
        let update = build_query(&john_to_jane(), &users(), dialect);
        assert_eq!(update.params.len(), 2 + 1);
        assert_eq!(placeholder_count(&update.sql, dialect), 3);

        let insert = build_query(&insert_bob(), &users(), dialect);
        assert_eq!(insert.params.len(), 2);
        assert_eq!(placeholder_count(&insert.sql, dialect), 2);

        let delete = build_query(&delete_op, &users(), dialect);
        assert_eq!(delete.params.len(), 2);
        assert_eq!(placeholder_count(&delete.sql, dialect), 2);
    }
}

#[test]
fn test_mssql_placeholders_are_numbered() {
    let query = build_query(
        &john_to_jane(),
        &EditContext::new("dbo", "users"),
        Dialect::Mssql,
    );

    assert_eq!(
        query.sql,
        "UPDATE [users] SET [name] = @p1, [age] = @p2 WHERE [id] = @p3"
    );
}

// ==================== Preview Properties ====================

#[test]
fn test_preview_inlines_params_positionally() {
    let op = EditOperation::update(
        vec![PrimaryKeyValue::new("id", 42, "integer")],
        vec![
            ColumnChange::new("name", "x", "O'Brien", "varchar"),
            ColumnChange::new("settings", Value::Null, json!({"theme": "dark"}), "jsonb"),
            ColumnChange::new("email", "a@b.c", Value::Null, "varchar"),
        ],
    );

    let query = build_query(&op, &users(), Dialect::Postgresql);
    assert_eq!(
        query.params,
        vec![
            json!("O'Brien"),
            json!(r#"{"theme":"dark"}"#),
            Value::Null,
            json!(42)
        ]
    );

    let preview = build_preview_sql(&op, &users(), Dialect::Postgresql);
    assert_eq!(
        preview,
        r#"UPDATE "users" SET "name" = 'O''Brien', "settings" = '{"theme":"dark"}', "email" = NULL WHERE "id" = 42 RETURNING *"#
    );
}

#[test]
fn test_preview_contains_no_placeholders_in_any_dialect() {
    let ops = vec![john_to_jane(), insert_bob()];
    for dialect in Dialect::ALL {
        for op in &ops {
            let preview = build_preview_sql(op, &users(), dialect);
            assert_eq!(placeholder_count(&preview, dialect), 0, "{}", preview);
        }
    }
}

#[test]
fn test_preview_booleans() {
    let op = EditOperation::update(
        vec![PrimaryKeyValue::new("id", 1, "integer")],
        vec![ColumnChange::new("active", true, false, "boolean")],
    );

    assert_eq!(
        build_preview_sql(&op, &EditContext::new("", "flags"), Dialect::Sqlite),
        r#"UPDATE "flags" SET "active" = FALSE WHERE "id" = 1 RETURNING *"#
    );
    assert_eq!(
        build_query(&op, &EditContext::new("", "flags"), Dialect::Sqlite).params[0],
        json!(false)
    );
}

// ==================== Validation Flow ====================

#[test]
fn test_validation_gates_builder() {
    let ops = vec![
        john_to_jane(),
        EditOperation::update(vec![PrimaryKeyValue::new("id", 1, "integer")], vec![]),
        EditOperation::delete(vec![]),
        EditOperation::insert(Row::new(), vec![]),
        insert_bob(),
    ];

    let valid: Vec<EditOperation> = ops
        .into_iter()
        .filter(|op| validate_operation(op).valid)
        .collect();
    assert_eq!(valid.len(), 2);

    let queries = build_batch_queries(&valid, &users(), Dialect::Sqlite);
    assert!(queries[0].sql.starts_with("UPDATE"));
    assert!(queries[1].sql.starts_with("INSERT"));
}

#[test]
fn test_json_payload_round_trip() {
    let op = EditOperation::from_json(
        r#"{
            "type": "delete",
            "id": "del-1",
            "primaryKeys": [{"column": "id", "value": 5, "dataType": "integer"}]
        }"#,
    )
    .unwrap();
    let ctx = EditContext::from_json(r#"{"schema": "sales", "table": "orders"}"#).unwrap();

    let options = QueryOptions::new("postgresql".parse().unwrap());
    let queries = try_build_batch_queries(&[op], &ctx, &options).unwrap();

    assert_eq!(
        queries[0].sql,
        r#"DELETE FROM "sales"."orders" WHERE "id" = $1 RETURNING *"#
    );
    let encoded = serde_json::to_value(&queries[0]).unwrap();
    assert_eq!(encoded["params"], json!([5]));
}

// ==================== Splitter Properties ====================

#[test]
fn test_split_empty_and_single_across_dialects() {
    for (dialect, _) in &SQL_PARSER_CONFIGS {
        assert!(split_statements("", *dialect).is_empty());
        assert!(split_statements("   \n\t ", *dialect).is_empty());
        assert_eq!(
            split_statements("\n  SELECT *\n  FROM t  \n", *dialect),
            vec!["SELECT *\n  FROM t"]
        );
    }
}

#[test]
fn test_split_follows_dialect_flags() {
    let cases = [
        ("SELECT `a;b`", "backtick"),
        ("SELECT [a;b]", "bracket"),
        ("SELECT 1 # a;b", "hash"),
        ("SELECT $q$ a;b $q$", "dollar"),
    ];

    for (dialect, config) in &SQL_PARSER_CONFIGS {
        for (script, feature) in cases {
            let enabled = match feature {
                "backtick" => config.backtick_identifiers,
                "bracket" => config.bracket_identifiers,
                "hash" => config.hash_line_comment,
                _ => config.dollar_quotes,
            };
            let expected = if enabled { 1 } else { 2 };
            assert_eq!(
                split_statements(script, *dialect).len(),
                expected,
                "{} with {}",
                feature,
                dialect
            );
        }
    }
}

#[test]
fn test_realistic_postgres_migration() {
    let script = r#"
-- create the table; carefully
CREATE TABLE "odd;name" (id serial PRIMARY KEY, note text DEFAULT 'a;b');

/* helper /* nested; */ still comment; */
CREATE FUNCTION touch() RETURNS trigger AS $fn$
BEGIN
    NEW.note := 'touched;';
    RETURN NEW;
END;
$fn$ LANGUAGE plpgsql;

INSERT INTO "odd;name" (note) VALUES ($1);
"#;

    let statements = split_statements(script, Dialect::Postgresql);

    assert_eq!(statements.len(), 3);
    assert!(statements[0].starts_with("-- create the table; carefully\nCREATE TABLE"));
    assert!(statements[1].starts_with("/* helper"));
    assert!(statements[1].ends_with("$fn$ LANGUAGE plpgsql"));
    assert_eq!(statements[2], r#"INSERT INTO "odd;name" (note) VALUES ($1)"#);
}

#[test]
fn test_realistic_mysql_dump() {
    let script = "# dump header; v1\nINSERT INTO `t;1` VALUES ('it\\'s; ok', \"x\");\nINSERT INTO `t;1` VALUES ('b');";
    let split = create_statement_splitter(Dialect::Mysql);

    assert_eq!(
        split(script),
        vec![
            "# dump header; v1\nINSERT INTO `t;1` VALUES ('it\\'s; ok', \"x\")",
            "INSERT INTO `t;1` VALUES ('b')"
        ]
    );
}
