//! End-to-end use-case flow over both adapters.
//!
//! Wires [`Services`] the way a composition root would and drives the whole
//! surface with untyped JSON payloads, once over [`MemoryStore`] and once
//! over a `:memory:` [`LibsqlStore`].

use std::sync::Arc;

use sim_app::{AppError, Services};
use sim_config::SimConfig;
use sim_core::enums::SimulationStatus;
use sim_db::ports::{ProjectRepository, SimulationHistoryRepository, UserPreferencesRepository};
use sim_db::{LibsqlStore, MemoryStore};
use sim_schema::{SchemaError, SchemaRegistry};

fn services<S>(store: Arc<S>) -> Services
where
    S: ProjectRepository + SimulationHistoryRepository + UserPreferencesRepository + 'static,
{
    Services::new(store, Arc::new(SchemaRegistry::new()), &SimConfig::default()).unwrap()
}

fn run_payload(status: &str, timestamp: &str) -> serde_json::Value {
    serde_json::json!({
        "project_path": "/sims/alpha",
        "project_name": "alpha",
        "status": status,
        "ttk_version": "2.1.0",
        "config_json": "{}",
        "summary_json": "{\"battles\":120}",
        "timestamp": timestamp
    })
}

async fn full_flow(svc: Services) {
    // Projects: register, refuse the duplicate, look up.
    let project = svc
        .projects
        .register(&serde_json::json!({"name": "alpha", "path": "/sims/alpha"}))
        .await
        .unwrap();
    let dup = svc
        .projects
        .register(&serde_json::json!({"name": "copy", "path": "/sims/alpha"}))
        .await;
    assert!(matches!(dup, Err(AppError::ProjectExists { .. })));
    assert!(svc.projects.get(&project.id).await.unwrap().is_some());

    // History: record runs, walk one through its lifecycle.
    let run = svc
        .history
        .record(&run_payload("pending", "2026-08-01T12:00:00Z"))
        .await
        .unwrap();
    for minute in 1..=14 {
        let status = if minute % 2 == 0 { "completed" } else { "failed" };
        svc.history
            .record(&run_payload(status, &format!("2026-08-01T12:{minute:02}:00Z")))
            .await
            .unwrap();
    }

    svc.history
        .transition(&run.id, SimulationStatus::Running)
        .await
        .unwrap();
    let finished = svc
        .history
        .transition(&run.id, SimulationStatus::Completed)
        .await
        .unwrap();
    assert_eq!(finished.status, SimulationStatus::Completed);
    assert!(matches!(
        svc.history.transition(&run.id, SimulationStatus::Pending).await,
        Err(AppError::InvalidTransition { .. })
    ));

    // Search: schema-validated on the way in and out, paged newest-first.
    let page = svc
        .history
        .search(&serde_json::json!({"filters": {"status": "completed"}}))
        .await
        .unwrap();
    assert_eq!(page["total"], serde_json::json!(8));
    assert_eq!(page["per_page"], serde_json::json!(10));
    assert_eq!(page["last_page"], serde_json::json!(1));
    let items = page["items"].as_array().unwrap();
    assert_eq!(items.len(), 8);
    let timestamps: Vec<&str> = items
        .iter()
        .map(|item| item["timestamp"].as_str().unwrap())
        .collect();
    let mut sorted = timestamps.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(timestamps, sorted, "search pages newest-first");

    let bad_query = svc
        .history
        .search(&serde_json::json!({"filters": {"status": "archived"}}))
        .await;
    assert!(matches!(
        bad_query,
        Err(AppError::Schema(SchemaError::Input { .. }))
    ));

    // Preferences: defaults before save, stored values after.
    let fallback = svc.preferences.get_or_default("user-1").await.unwrap();
    assert_eq!(fallback.language.as_str(), "en");
    assert_eq!(svc.preferences.get("user-1").await.unwrap(), None);

    svc.preferences
        .save(&serde_json::json!({"user_id": "user-1", "language": "pt-br", "theme": "dark"}))
        .await
        .unwrap();
    let stored = svc.preferences.get_or_default("user-1").await.unwrap();
    assert_eq!(stored.language.as_str(), "pt-BR");

    // Cleanup path: removal is idempotent, absence is data.
    svc.history.remove(&run.id).await.unwrap();
    svc.history.remove(&run.id).await.unwrap();
    assert_eq!(svc.history.get(&run.id).await.unwrap(), None);
    svc.projects.remove(&project.id).await.unwrap();
    assert_eq!(svc.projects.get(&project.id).await.unwrap(), None);
}

#[tokio::test]
async fn full_flow_over_memory_store() {
    full_flow(services(Arc::new(MemoryStore::new()))).await;
}

#[tokio::test]
async fn full_flow_over_libsql_store() {
    let store = LibsqlStore::open_local(":memory:").await.unwrap();
    full_flow(services(Arc::new(store))).await;
}
