//! Integration tests for repositories running against SQLite
//!
//! Every test opens its own in-memory database, creates the conventional
//! tables with plain SQL and drives the mapper through `RowHaus`.

use chrono::TimeZone;
use rowhaus::prelude::*;
use std::collections::HashMap;

#[model]
#[entity(crate = "rowhaus::entity_mapper")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub age: i32,
}

/// Resolves the mapper through the direct `entity-mapper` dependency
#[derive(Debug, Clone, PartialEq, rowhaus::entity_derive::Entity)]
pub struct Account {
    pub id: i64,
    pub owner: String,
    pub balance: f64,
    pub active: bool,
    pub opened: DateTime<Utc>,
    pub token: Uuid,
}

async fn setup() -> RowHaus {
    let rowhaus = RowHaus::new(DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    for ddl in [
        "CREATE TABLE PERSONS (id TEXT PRIMARY KEY, name TEXT, age INTEGER)",
        "CREATE TABLE ACCOUNTS (id INTEGER PRIMARY KEY, owner TEXT, balance REAL, active TEXT, opened TEXT, token TEXT)",
    ] {
        sqlx::query(ddl).execute(rowhaus.pool()).await.expect(ddl);
    }
    rowhaus
}

fn person(id: &str, name: &str, age: i32) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        age,
    }
}

fn account() -> Account {
    Account {
        id: 7,
        owner: "Ann".to_string(),
        balance: 120.5,
        active: true,
        opened: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        token: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_health_check() {
    let rowhaus = setup().await;
    rowhaus.health_check().await.unwrap();
}

#[tokio::test]
async fn test_insert_then_find_by_id() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();

    assert_eq!(people.insert(&person("p1", "Ann", 41)).await.unwrap(), 1);
    assert_eq!(
        people.find_by_id("p1").await.unwrap(),
        Some(person("p1", "Ann", 41))
    );
}

#[tokio::test]
async fn test_missing_key_is_none_not_error() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    assert_eq!(people.find_by_id("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn test_update_moves_key_to_the_end() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    people.insert(&person("p1", "Ann", 41)).await.unwrap();

    assert_eq!(people.update(&person("p1", "Annie", 42)).await.unwrap(), 1);
    assert_eq!(
        people.find_by_id("p1").await.unwrap(),
        Some(person("p1", "Annie", 42))
    );

    // Unknown key updates nothing
    assert_eq!(people.update(&person("p9", "Zed", 1)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_all_preserves_rows() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    assert!(people.find_all().await.unwrap().is_empty());

    people.insert(&person("p1", "Ann", 41)).await.unwrap();
    people.insert(&person("p2", "Bob", 35)).await.unwrap();

    let mut all = people.find_all().await.unwrap();
    all.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(all, vec![person("p1", "Ann", 41), person("p2", "Bob", 35)]);
}

#[tokio::test]
async fn test_duplicate_insert_is_a_query_execution_error() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    people.insert(&person("p1", "Ann", 41)).await.unwrap();

    let err = people.insert(&person("p1", "Ann", 41)).await.unwrap_err();
    assert!(matches!(err, MapperError::QueryExecution { .. }));

    // The failed insert released its connection; the next call still works.
    assert!(people.find_by_id("p1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_every_column_type_round_trips() {
    let rowhaus = setup().await;
    let accounts = rowhaus.repository::<Account>();
    let original = account();

    accounts.insert(&original).await.unwrap();
    assert_eq!(accounts.find_by_id(7).await.unwrap(), Some(original.clone()));

    let closed = Account {
        active: false,
        balance: 0.0,
        ..original
    };
    accounts.update(&closed).await.unwrap();
    assert_eq!(accounts.find_by_id(7).await.unwrap(), Some(closed));
}

#[tokio::test]
async fn test_real_balance_round_trips_exactly() {
    let rowhaus = setup().await;
    let accounts = rowhaus.repository::<Account>();
    let inexact = Account {
        balance: 0.1 + 0.2,
        ..account()
    };

    accounts.insert(&inexact).await.unwrap();
    let found = accounts.find_by_id(7).await.unwrap().unwrap();
    assert_eq!(found.balance, 0.1 + 0.2);
    assert_eq!(found, inexact);
}

#[tokio::test]
async fn test_find_binds_in_criteria_order() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    people.insert(&person("p1", "Ann", 41)).await.unwrap();

    let sql = "SELECT * FROM PERSONS WHERE name = ? AND age = ?";
    let matching = Criteria::new().with("name", "Ann").with("age", 41);
    assert_eq!(
        people.find(sql, &matching).await.unwrap(),
        Some(person("p1", "Ann", 41))
    );

    // Same pairs, other order: values land in the wrong placeholders
    let swapped = Criteria::new().with("age", 41).with("name", "Ann");
    assert_eq!(people.find(sql, &swapped).await.unwrap(), None);
}

#[tokio::test]
async fn test_find_accepts_single_entry_hash_map() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    people.insert(&person("p1", "Ann", 41)).await.unwrap();

    let map: HashMap<&str, &str> = HashMap::from([("name", "Ann")]);
    let criteria: Criteria = map.into_iter().collect();
    let found = people
        .find("SELECT * FROM PERSONS WHERE name = ?", &criteria)
        .await
        .unwrap();
    assert_eq!(found, Some(person("p1", "Ann", 41)));
}

#[tokio::test]
async fn test_criteria_values_cannot_inject_sql() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    people.insert(&person("p1", "Ann", 41)).await.unwrap();

    let hostile = Criteria::new().with("name", "x' OR '1'='1");
    let found = people
        .find("SELECT * FROM PERSONS WHERE name = ?", &hostile)
        .await
        .unwrap();
    assert_eq!(found, None);

    let by_query = people
        .find_all_by(FindQuery::new().filter("name", "x' OR '1'='1"))
        .await
        .unwrap();
    assert!(by_query.is_empty());
    assert_eq!(people.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_placeholder_mismatch_is_a_binding_error() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();

    let err = people
        .find(
            "SELECT * FROM PERSONS WHERE name = ? AND age = ?",
            &Criteria::new().with("name", "Ann"),
        )
        .await
        .unwrap_err();
    assert!(err.is_binding());
}

#[tokio::test]
async fn test_find_ignores_markers_in_comments() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    people.insert(&person("p1", "Ann", 41)).await.unwrap();

    let found = people
        .find(
            "SELECT * FROM PERSONS /* name = ? */ WHERE id = ? -- why?",
            &Criteria::new().with("id", "p1"),
        )
        .await
        .unwrap();
    assert_eq!(found, Some(person("p1", "Ann", 41)));

    let numbered = people
        .find(
            "SELECT * FROM PERSONS WHERE id = ?1 OR name = ?1",
            &Criteria::new().with("id", "p1"),
        )
        .await
        .unwrap();
    assert_eq!(numbered, Some(person("p1", "Ann", 41)));
}

#[tokio::test]
async fn test_find_query_filters_on_validated_columns() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    people.insert(&person("p1", "Ann", 41)).await.unwrap();
    people.insert(&person("p2", "Bob", 41)).await.unwrap();
    people.insert(&person("p3", "Cy", 20)).await.unwrap();

    let mut forty_one = people
        .find_all_by(FindQuery::new().filter("age", 41))
        .await
        .unwrap();
    forty_one.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(forty_one, vec![person("p1", "Ann", 41), person("p2", "Bob", 41)]);

    let bob = people
        .find_by(FindQuery::new().filter("name", "Bob").filter("age", 41))
        .await
        .unwrap();
    assert_eq!(bob, Some(person("p2", "Bob", 41)));

    let err = people
        .find_by(FindQuery::new().filter("nickname", "B"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        MapperError::Binding(BindingError::UnknownField { .. })
    ));
}

#[tokio::test]
async fn test_unreadable_row_is_an_error_not_none() {
    let rowhaus = setup().await;
    sqlx::query("INSERT INTO PERSONS VALUES ('p1', 'Ann', 'forty-one')")
        .execute(rowhaus.pool())
        .await
        .unwrap();
    sqlx::query("INSERT INTO PERSONS VALUES ('p2', 'Bob', NULL)")
        .execute(rowhaus.pool())
        .await
        .unwrap();

    let people = rowhaus.repository::<Person>();
    let err = people.find_by_id("p1").await.unwrap_err();
    assert!(matches!(
        err,
        MapperError::Mapping(MappingError::Coercion { ref field, .. }) if field == "age"
    ));

    let err = people.find_by_id("p2").await.unwrap_err();
    assert!(matches!(
        err,
        MapperError::Mapping(MappingError::NullColumn { ref field }) if field == "age"
    ));
}

#[tokio::test]
async fn test_missing_table_is_a_query_execution_error() {
    let rowhaus = RowHaus::new(DatabaseConfig::in_memory()).await.unwrap();
    let people = rowhaus.repository::<Person>();
    let err = people.find_all().await.unwrap_err();
    match err {
        MapperError::QueryExecution { sql, .. } => assert_eq!(sql, "SELECT * FROM PERSONS"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_save_is_unsupported() {
    let rowhaus = setup().await;
    let people = rowhaus.repository::<Person>();
    let err = people.save(&person("p1", "Ann", 41)).await.unwrap_err();
    assert!(matches!(err, MapperError::Unsupported(_)));
    assert!(people.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rowhaus_from_toml_config() {
    let config = AppConfig::from_toml_str(
        r#"
        [database]
        url = "sqlite::memory:"
        max_connections = 1
        "#,
    )
    .unwrap();
    let rowhaus = RowHaus::new(config.database).await.unwrap();
    rowhaus.health_check().await.unwrap();
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_connecting() {
    let config = DatabaseConfig::new("sqlite::memory:".to_string(), 3, 1, 30, 0, 0);
    let err = RowHaus::new(config).await.unwrap_err();
    assert!(matches!(err, RowHausError::Config(ConfigError::Invalid(_))));
}
