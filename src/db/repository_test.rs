//! Tests for repository delegation.

use std::sync::Arc;

use serde_json::json;

use crate::db::data_source::MockDataSource;
use crate::db::{DbError, Filter, Patch, Repository, User};

fn ann() -> User {
    User {
        id: Some("1".to_string()),
        name: "Ann".to_string(),
    }
}

#[tokio::test]
async fn count_delegates_filter_unchanged() {
    let mut source = MockDataSource::<User>::new();
    source
        .expect_count()
        .withf(|filter| *filter == Filter::by_name("Ann"))
        .times(1)
        .returning(|_| Ok(3));

    let repo = Repository::new(Arc::new(source));
    assert_eq!(repo.count(&Filter::by_name("Ann")).await.unwrap(), 3);
}

#[tokio::test]
async fn find_returns_source_results_as_is() {
    let mut source = MockDataSource::<User>::new();
    source
        .expect_find()
        .times(1)
        .returning(|_| Ok(vec![ann()]));

    let repo = Repository::new(Arc::new(source));
    assert_eq!(repo.find(&Filter::all()).await.unwrap(), vec![ann()]);
}

#[tokio::test]
async fn find_by_id_passes_absence_through() {
    let mut source = MockDataSource::<User>::new();
    source
        .expect_find_by_id()
        .withf(|id| id == "42")
        .times(1)
        .returning(|_| Ok(None));

    let repo = Repository::new(Arc::new(source));
    assert_eq!(repo.find_by_id("42").await.unwrap(), None);
}

#[tokio::test]
async fn create_remove_update_each_call_source_once() {
    let mut source = MockDataSource::<User>::new();
    source.expect_create().times(1).returning(|_| Ok(()));
    source
        .expect_remove()
        .withf(|id| id == "1")
        .times(1)
        .returning(|_| Ok(()));
    source
        .expect_update()
        .withf(|id, data| id == "1" && data.get("name") == Some(&json!("Bo")))
        .times(1)
        .returning(|_, _| Ok(()));

    let repo = Repository::new(Arc::new(source));
    repo.create(&ann()).await.unwrap();
    repo.remove("1").await.unwrap();

    let mut patch = Patch::new();
    patch.insert("name".to_string(), json!("Bo"));
    repo.update("1", &patch).await.unwrap();
}

#[tokio::test]
async fn store_faults_propagate_unmodified() {
    let mut source = MockDataSource::<User>::new();
    source.expect_count().returning(|_| {
        Err(DbError::Connection {
            message: "connection reset".to_string(),
        })
    });

    let repo = Repository::new(Arc::new(source));
    let err = repo.count(&Filter::all()).await.unwrap_err();
    assert!(matches!(err, DbError::Connection { ref message } if message == "connection reset"));
}
