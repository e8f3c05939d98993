//! Tests for configuration validation

use std::io::Write;

use throttle_concurrents::config::{JobThrottle, ThrottleSettings};
use throttle_concurrents::core::{Category, ThrottleConfig, ThrottleError, ThrottleMode};

fn settings(categories: Vec<Category>) -> ThrottleSettings {
    ThrottleSettings {
        categories,
        jobs: vec![],
    }
}

#[test]
fn test_settings_validation() {
    let valid = settings(vec![Category::new("db", 1, 2), Category::new("net", 0, 0)]);
    assert!(valid.validate().is_ok());
}

#[test]
fn test_empty_category_name_rejected() {
    let invalid = settings(vec![Category::new("", 1, 2)]);
    assert!(matches!(
        invalid.validate(),
        Err(ThrottleError::EmptyCategoryName)
    ));
}

#[test]
fn test_duplicate_category_rejected() {
    let invalid = settings(vec![Category::new("db", 1, 2), Category::new("db", 0, 0)]);
    assert!(matches!(
        invalid.validate(),
        Err(ThrottleError::DuplicateCategory(name)) if name == "db"
    ));
}

#[test]
fn test_duplicate_job_rejected() {
    let job = JobThrottle {
        task: "build".into(),
        throttle: ThrottleConfig::per_task(1, 1),
    };
    let invalid = ThrottleSettings {
        categories: vec![],
        jobs: vec![job.clone(), job],
    };
    assert!(matches!(
        invalid.validate(),
        Err(ThrottleError::InvalidConfig(_))
    ));
}

#[test]
fn test_unknown_membership_accepted() {
    let json = r#"{
        "jobs": [{
            "task": "build",
            "enabled": true,
            "mode": "category",
            "categories": [{"category": "gone"}]
        }]
    }"#;
    let cfg = ThrottleSettings::from_json_str(json).unwrap();
    assert!(cfg.categories.is_empty());
    assert_eq!(cfg.jobs[0].throttle.mode, ThrottleMode::Category);
}

#[test]
fn test_settings_from_json() {
    let json = r#"{
        "categories": [
            {"name": "db", "max_per_node": 1, "max_total": 2}
        ],
        "jobs": [
            {"task": "deploy", "enabled": true, "mode": "project", "max_per_node": 1},
            {"task": "idle"}
        ]
    }"#;

    let cfg = ThrottleSettings::from_json_str(json).unwrap();
    assert_eq!(cfg.categories, vec![Category::new("db", 1, 2)]);
    assert_eq!(cfg.job(&"deploy".into()), Some(&ThrottleConfig::per_task(1, 0)));
    let idle = cfg.job(&"idle".into()).unwrap();
    assert!(!idle.enabled);
    assert_eq!(idle.mode, ThrottleMode::Disabled);
}

#[test]
fn test_settings_from_malformed_json() {
    let err = ThrottleSettings::from_json_str("{\"categories\": 3}").unwrap_err();
    assert!(matches!(err, ThrottleError::InvalidConfig(_)));
}

#[test]
fn test_settings_from_path() {
    let path = std::env::temp_dir().join(format!("throttle-settings-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(br#"{"categories": [{"name": "db", "max_total": 1}]}"#)
        .unwrap();
    drop(file);

    let cfg = ThrottleSettings::from_path(&path).unwrap();
    assert_eq!(cfg.categories[0].max_total, 1);
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(
        ThrottleSettings::from_path(&path),
        Err(ThrottleError::Io(_))
    ));
}
