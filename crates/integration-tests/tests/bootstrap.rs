use configs::{Settings, StorageBackend};
use serde_json::json;

fn settings(pairs: &[(&str, &str)]) -> Settings {
    let vars = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    Settings::from_env(Some(vars)).unwrap()
}

#[tokio::test]
async fn memory_backend_serves_a_full_round_trip() {
    let settings = settings(&[("FORUM__STORAGE__BACKEND", "memory")]);
    assert_eq!(settings.storage.backend, StorageBackend::Memory);

    let use_cases = app::use_cases_from_settings(&settings).await.unwrap();
    let thread = use_cases
        .add_thread
        .execute(&json!({ "title": "t", "body": "b", "owner": "user-1" }))
        .await
        .unwrap();
    let detail = use_cases
        .get_thread_detail
        .execute(&json!({ "threadId": thread.id }))
        .await
        .unwrap();

    assert!(thread.id.starts_with("thread-"));
    assert_eq!(detail.title, "t");
    assert!(detail.comments.is_empty());
}

#[cfg(not(feature = "db-postgres"))]
#[tokio::test]
async fn postgres_backend_requires_its_feature() {
    let settings = settings(&[("FORUM__STORAGE__BACKEND", "postgres")]);

    let err = app::use_cases_from_settings(&settings).await.err().unwrap();

    assert!(err.to_string().contains("db-postgres"));
}
