//! Tests for the scheduler-facing API

use std::sync::Arc;

use throttle_concurrents::core::{
    AdmissionEngine, Category, CategoryRegistry, Task, ThrottleConfig,
};
use throttle_concurrents::infra::InMemoryClusterState;
use throttle_concurrents::runtime::{
    evaluate, health, list_categories, AdmissionQuery, AdmissionResponse,
};

fn engine() -> AdmissionEngine<Arc<InMemoryClusterState>> {
    let registry = Arc::new(
        CategoryRegistry::from_categories([Category::new("net", 0, 0), Category::new("db", 1, 1)])
            .unwrap(),
    );
    let state = Arc::new(InMemoryClusterState::new());
    state.add_node("n1", 2);
    state.set_config("job", ThrottleConfig::per_task(1, 0));
    AdmissionEngine::new(registry, state)
}

#[test]
fn test_evaluate_node_query() {
    let engine = engine();
    let query: AdmissionQuery =
        serde_json::from_str(r#"{"task": {"kind": "plain", "id": "job"}, "node": "n1"}"#).unwrap();

    assert_eq!(
        evaluate(&engine, &query),
        AdmissionResponse {
            allowed: true,
            label: None,
            reason: None
        }
    );

    engine.state().start("n1", Task::plain("job")).unwrap();
    let response = evaluate(&engine, &query);
    assert!(!response.allowed);
    assert_eq!(response.label.as_deref(), Some("node_capacity_reached"));
    assert_eq!(response.reason.as_deref(), Some("node capacity reached (1)"));
}

#[test]
fn test_evaluate_cluster_query() {
    let engine = engine();
    engine.state().mark_pending("job");
    let query = AdmissionQuery {
        task: Task::plain("job"),
        node: None,
    };
    let response = evaluate(&engine, &query);
    assert_eq!(response.label.as_deref(), Some("build_pending"));
    assert_eq!(response.reason.as_deref(), Some("build already pending"));
}

#[test]
fn test_list_categories_sorted() {
    let engine = engine();
    let listing = list_categories(engine.registry());
    let names: Vec<&str> = listing.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["db", "net"]);
    assert_eq!(listing[0].max_total, 1);
}

#[test]
fn test_health() {
    assert!(health().ok);
}
