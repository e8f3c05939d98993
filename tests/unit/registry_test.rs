//! Tests for the category registry

use std::sync::Arc;
use std::thread;

use throttle_concurrents::core::{Category, CategoryRegistry};

#[test]
fn test_insert_replaces_existing() {
    let registry = CategoryRegistry::new();
    assert_eq!(registry.insert(Category::new("db", 1, 1)).unwrap(), None);
    let previous = registry.insert(Category::new("db", 2, 2)).unwrap();
    assert_eq!(previous, Some(Category::new("db", 1, 1)));
    assert_eq!(registry.get("db").unwrap().max_total, 2);
}

#[test]
fn test_remove_missing_is_noop() {
    let registry = CategoryRegistry::new();
    assert!(registry.remove("db").is_none());
    assert!(registry.is_empty());
}

#[test]
fn test_concurrent_readers_see_whole_tables() {
    let registry = Arc::new(CategoryRegistry::new());
    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for round in 0..100_u32 {
                registry
                    .replace_all([Category::new("a", round, round), Category::new("b", round, round)])
                    .unwrap();
            }
        })
    };

    for _ in 0..100 {
        let snapshot = registry.snapshot();
        if let (Some(a), Some(b)) = (snapshot.get("a"), snapshot.get("b")) {
            assert_eq!(a.max_total, b.max_total);
        }
    }
    writer.join().unwrap();
    assert_eq!(registry.len(), 2);
}
