//! Tests for the per-entity use-case set.

use std::sync::Arc;

use serde_json::json;

use crate::db::data_source::MockDataSource;
use crate::db::{
    DbError, DocumentDataSource, DocumentStore, Filter, Patch, Product, Repository,
    SqliteDataSource, SqliteStore, User,
};
use crate::usecase::{UseCaseError, UseCases};

fn use_cases(source: MockDataSource<User>) -> UseCases<User> {
    UseCases::new(Repository::new(Arc::new(source)))
}

fn user(name: &str) -> User {
    User {
        id: None,
        name: name.to_string(),
    }
}

fn store_fault() -> DbError {
    DbError::Database {
        message: "disk I/O error".to_string(),
    }
}

// =============================================================================
// count / get-all
// =============================================================================

#[tokio::test]
async fn count_passes_filter_through() {
    let mut source = MockDataSource::<User>::new();
    source
        .expect_count()
        .withf(|f| *f == Filter::by_name("Ann"))
        .times(1)
        .returning(|_| Ok(2));

    assert_eq!(
        use_cases(source).count(&Filter::by_name("Ann")).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn get_all_finds_with_empty_filter() {
    let mut source = MockDataSource::<User>::new();
    source
        .expect_find()
        .withf(|f| f.is_empty())
        .times(1)
        .returning(|_| Ok(vec![user("Ann")]));

    assert_eq!(use_cases(source).get_all().await.unwrap(), vec![user("Ann")]);
}

// =============================================================================
// get-one
// =============================================================================

#[tokio::test]
async fn get_one_returns_record_when_present() {
    let mut source = MockDataSource::<User>::new();
    source
        .expect_count()
        .withf(|f| *f == Filter::by_id("1"))
        .returning(|_| Ok(1));
    source
        .expect_find_by_id()
        .withf(|id| id == "1")
        .times(1)
        .returning(|_| Ok(Some(user("Ann"))));

    assert_eq!(use_cases(source).get_one("1").await.unwrap(), user("Ann"));
}

#[tokio::test]
async fn get_one_fails_not_found_without_reading() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| Ok(0));
    source.expect_find_by_id().times(0);

    let err = use_cases(source).get_one("42").await.unwrap_err();
    assert!(matches!(
        err,
        UseCaseError::NotFound { entity: "User", ref id } if id == "42"
    ));
}

#[tokio::test]
async fn get_one_treats_vanished_record_as_not_found() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| Ok(1));
    source.expect_find_by_id().returning(|_| Ok(None));

    let err = use_cases(source).get_one("1").await.unwrap_err();
    assert!(matches!(err, UseCaseError::NotFound { .. }));
}

// =============================================================================
// create
// =============================================================================

#[tokio::test]
async fn create_checks_name_then_inserts() {
    let mut source = MockDataSource::<User>::new();
    source
        .expect_count()
        .withf(|f| *f == Filter::by_name("Ann"))
        .times(1)
        .returning(|_| Ok(0));
    source
        .expect_create()
        .withf(|item| item.name == "Ann")
        .times(1)
        .returning(|_| Ok(()));

    use_cases(source).create(&user("Ann")).await.unwrap();
}

#[tokio::test]
async fn create_rejects_taken_name_without_inserting() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| Ok(1));
    source.expect_create().times(0);

    let err = use_cases(source).create(&user("Ann")).await.unwrap_err();
    assert!(matches!(
        err,
        UseCaseError::AlreadyExists { entity: "User", ref name } if name == "Ann"
    ));
}

#[tokio::test]
async fn create_propagates_store_fault() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| Ok(0));
    source.expect_create().returning(|_| Err(store_fault()));

    let err = use_cases(source).create(&user("Ann")).await.unwrap_err();
    assert!(matches!(err, UseCaseError::Store(DbError::Database { .. })));
}

// =============================================================================
// update / delete
// =============================================================================

#[tokio::test]
async fn update_on_missing_id_never_calls_update() {
    let mut source = MockDataSource::<User>::new();
    source
        .expect_count()
        .withf(|f| *f == Filter::by_id("42"))
        .returning(|_| Ok(0));
    source.expect_update().times(0);

    let mut patch = Patch::new();
    patch.insert("name".to_string(), json!("X"));
    let err = use_cases(source).update("42", &patch).await.unwrap_err();
    assert!(matches!(err, UseCaseError::NotFound { .. }));
}

#[tokio::test]
async fn update_passes_id_and_data_through() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| Ok(1));
    source
        .expect_update()
        .withf(|id, data| id == "1" && data.get("name") == Some(&json!("Bo")))
        .times(1)
        .returning(|_, _| Ok(()));

    let mut patch = Patch::new();
    patch.insert("name".to_string(), json!("Bo"));
    use_cases(source).update("1", &patch).await.unwrap();
}

#[tokio::test]
async fn delete_on_missing_id_never_calls_remove() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| Ok(0));
    source.expect_remove().times(0);

    let err = use_cases(source).delete("42").await.unwrap_err();
    assert!(matches!(err, UseCaseError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_existing_record() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| Ok(1));
    source
        .expect_remove()
        .withf(|id| id == "1")
        .times(1)
        .returning(|_| Ok(()));

    use_cases(source).delete("1").await.unwrap();
}

#[tokio::test]
async fn probe_fault_is_not_mistaken_for_absence() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| Err(store_fault()));
    source.expect_remove().times(0);

    let err = use_cases(source).delete("1").await.unwrap_err();
    assert!(matches!(err, UseCaseError::Store(_)));
}

// =============================================================================
// Against real stores
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_flips_name_count_from_zero_to_one() {
    let store = SqliteStore::in_memory().await.unwrap();
    store.migrate().await.unwrap();
    let users = UseCases::new(Repository::new(Arc::new(SqliteDataSource::<User>::new(
        &store,
    ))));

    assert_eq!(users.count(&Filter::by_name("Ann")).await.unwrap(), 0);
    users.create(&user("Ann")).await.unwrap();
    assert_eq!(users.count(&Filter::by_name("Ann")).await.unwrap(), 1);

    let err = users.create(&user("Ann")).await.unwrap_err();
    assert!(matches!(err, UseCaseError::AlreadyExists { .. }));
    assert_eq!(users.count(&Filter::by_name("Ann")).await.unwrap(), 1);
}

#[tokio::test]
async fn created_record_reads_back_with_assigned_id() {
    let store = DocumentStore::in_memory().await.unwrap();
    let products = UseCases::new(Repository::new(Arc::new(
        DocumentDataSource::<Product>::new(&store),
    )));
    let pen = Product {
        id: None,
        name: "Pen".to_string(),
        unit_price: 2.5,
    };

    products.create(&pen).await.unwrap();
    let id = products.get_all().await.unwrap()[0].id.clone().unwrap();
    let stored = products.get_one(&id).await.unwrap();

    assert_eq!(stored.id.as_deref(), Some(id.as_str()));
    assert_eq!(
        Product {
            id: None,
            ..stored
        },
        pen
    );
}
