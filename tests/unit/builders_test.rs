//! Tests for builder modules

use std::sync::Arc;

use throttle_concurrents::builders::{build_engine, build_registry};
use throttle_concurrents::config::{JobThrottle, ThrottleSettings};
use throttle_concurrents::core::{
    Category, CategoryMembership, CauseOfBlockage, Task, ThrottleConfig, ThrottleError,
};
use throttle_concurrents::infra::InMemoryClusterState;

fn settings() -> ThrottleSettings {
    ThrottleSettings {
        categories: vec![Category::new("db", 0, 1)],
        jobs: vec![
            JobThrottle {
                task: "migrate".into(),
                throttle: ThrottleConfig::category([CategoryMembership::writer("db")]),
            },
            JobThrottle {
                task: "report".into(),
                throttle: ThrottleConfig::category([CategoryMembership::reader("db")]),
            },
        ],
    }
}

#[test]
fn test_build_registry() {
    let registry = build_registry(&settings()).unwrap();
    assert_eq!(registry.get("db"), Some(Category::new("db", 0, 1)));
}

#[test]
fn test_build_registry_rejects_invalid_settings() {
    let mut cfg = settings();
    cfg.categories.push(Category::new("db", 1, 1));
    assert!(matches!(
        build_registry(&cfg),
        Err(ThrottleError::DuplicateCategory(_))
    ));
}

#[test]
fn test_build_engine_with_in_memory_state() {
    let engine = build_engine(&settings(), |cfg| {
        let state = Arc::new(InMemoryClusterState::from_settings(cfg));
        state.add_node("n1", 2);
        Ok(state)
    })
    .unwrap();

    engine.state().start("n1", Task::plain("migrate")).unwrap();
    assert_eq!(
        engine.can_run_anywhere(&Task::plain("report")).cause(),
        Some(&CauseOfBlockage::TotalCapacityReached(1))
    );
}

#[test]
fn test_build_engine_propagates_factory_error() {
    let result = build_engine(&settings(), |_| {
        Err::<Arc<InMemoryClusterState>, _>(ThrottleError::Io("state unavailable".into()))
    });
    assert!(matches!(result, Err(ThrottleError::Io(_))));
}
