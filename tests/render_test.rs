//! Integration tests for fixture rendering.

use fixturegen::render::FIXTURE_IMPORT;
use fixturegen::{generate, render, FixtureError, RenderOptions, TableResult, Value};

fn user_columns() -> Vec<String> {
    vec!["id".to_string(), "name".to_string()]
}

fn user_rows() -> Vec<Vec<Value>> {
    vec![
        vec![Value::Int(1), Value::from("first")],
        vec![Value::Int(2), Value::from("second")],
        vec![Value::Int(3), Value::from("third")],
    ]
}

fn one_row() -> Vec<Vec<Value>> {
    vec![vec![Value::Int(1), Value::from("first")]]
}

fn naming(columns: &[&str]) -> RenderOptions {
    RenderOptions {
        row_naming_columns: Some(columns.iter().map(|c| c.to_string()).collect()),
        ..Default::default()
    }
}

#[test]
fn test_generator_defaults() {
    let result = generate("user", &user_columns(), &user_rows(), &RenderOptions::default())
        .unwrap();
    assert!(result.contains(FIXTURE_IMPORT));
    assert!(result.contains("class UserData(DataSet):"));
    assert!(result.contains("class user_1:"));
    assert!(result.contains("id = 1"));
    assert!(result.contains("name = 'first'"));
    assert!(result.contains("class user_3:"));
}

#[test]
fn test_rows_keep_order() {
    let mut rows = user_rows();
    rows.reverse();
    let result = generate("user", &user_columns(), &rows, &RenderOptions::default()).unwrap();
    let third = result.find("class user_3:").unwrap();
    let first = result.find("class user_1:").unwrap();
    assert!(third < first);
}

#[test]
fn test_id_row_class_naming() {
    let result = generate("user", &user_columns(), &one_row(), &naming(&["id"])).unwrap();
    assert!(result.contains("class user_1:"));
}

#[test]
fn test_empty_row_class_naming_is_positional() {
    let rows = vec![vec![Value::Int(42), Value::from("answer")]];
    let result = generate("user", &user_columns(), &rows, &naming(&[])).unwrap();
    assert!(result.contains("class user_1:"));
    assert!(!result.contains("class user_42:"));
}

#[test]
fn test_wrong_row_class_naming() {
    let err = generate(
        "user",
        &user_columns(),
        &one_row(),
        &naming(&["non_existent_column"]),
    )
    .unwrap_err();
    match err {
        FixtureError::WrongNamingColumn(columns) => {
            assert_eq!(columns, vec!["non_existent_column".to_string()])
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_table_without_id_is_positional() {
    let columns = vec!["name".to_string()];
    let rows = vec![vec![Value::from("a")], vec![Value::from("b")]];
    let result = generate("user_without_id", &columns, &rows, &RenderOptions::default()).unwrap();
    assert!(result.contains("class user_without_id_1:"));
    assert!(result.contains("class user_without_id_2:"));
}

#[test]
fn test_multiple_naming_columns() {
    let result =
        generate("user", &user_columns(), &one_row(), &naming(&["id", "name"])).unwrap();
    assert!(result.contains("class user_1_first:"));
}

#[test]
fn test_non_valid_row_class_name() {
    let rows = vec![vec![Value::Int(1), Value::from("first name")]];
    let err = generate(
        "user_with_spaced_name",
        &user_columns(),
        &rows,
        &naming(&["id", "name"]),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "NonValidRowClassName: user_with_spaced_name_1_first name"
    );
}

#[test]
fn test_without_import() {
    let options = RenderOptions {
        with_import: false,
        ..Default::default()
    };
    let result = generate("user", &user_columns(), &user_rows(), &options).unwrap();
    assert!(!result.contains(FIXTURE_IMPORT));
    assert!(result.starts_with("class UserData(DataSet):"));
}

#[test]
fn test_custom_fixture_class_name() {
    let options = RenderOptions {
        fixture_class_name: Some("TestClass".to_string()),
        ..Default::default()
    };
    let result = generate("user", &user_columns(), &user_rows(), &options).unwrap();
    assert!(result.contains("class TestClass(DataSet)"));
    assert!(!result.contains("UserData"));
}

#[test]
fn test_empty_table() {
    let result = generate("empty_table", &user_columns(), &[], &RenderOptions::default()).unwrap();
    assert!(result.contains("class EmptyTableData(DataSet):"));
    assert!(!result.contains("class empty_table_"));
}

#[test]
fn test_render_table_result() {
    let table = TableResult::new("user", user_columns(), user_rows());
    let result = render(&table, &RenderOptions::default()).unwrap();
    assert_eq!(
        result,
        generate("user", &user_columns(), &user_rows(), &RenderOptions::default()).unwrap()
    );
}

#[test]
fn test_value_literals() {
    let columns = vec![
        "id".to_string(),
        "active".to_string(),
        "score".to_string(),
        "nickname".to_string(),
        "quote".to_string(),
    ];
    let rows = vec![vec![
        Value::Int(7),
        Value::Bool(true),
        Value::Float(3.5),
        Value::Null,
        Value::from("it's"),
    ]];
    let result = generate("player", &columns, &rows, &RenderOptions::default()).unwrap();
    assert!(result.contains("class player_7:"));
    assert!(result.contains("active = True"));
    assert!(result.contains("score = 3.5"));
    assert!(result.contains("nickname = None"));
    assert!(result.contains("quote = \"it's\""));
}
