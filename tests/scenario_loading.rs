use std::fs;

use realms::{civilization::Trait, events::EventKind, scenario::ScenarioLoader};
use tempfile::tempdir;

#[test]
fn loads_relative_to_base_dir() {
    let temp = tempdir().expect("tempdir");
    fs::write(
        temp.path().join("islands.yaml"),
        r#"
name: islands
years: 3
map_size: 14
civilizations: 3
days_per_season: 30
founders:
  - trait: isolationist
events:
  overrides:
    - kind: tech_discovery
      probability: 0.01
logging:
  level: debug
"#,
    )
    .unwrap();

    let scenario = ScenarioLoader::new(temp.path())
        .load("islands.yaml")
        .expect("scenario loads");
    assert_eq!(scenario.logging.level, "debug");
    let config = scenario.to_config();
    assert_eq!(config.years, 3);
    assert_eq!(config.total_days(), 3 * 120);
    assert_eq!(config.founders[0].temperament, Some(Trait::Isolationist));
    assert_eq!(config.founders[0].name, None);
    assert_eq!(
        config.events.get(EventKind::TechDiscovery).unwrap().probability,
        0.01
    );
    assert!(config.validate().is_ok());

    let report = realms::run(&config.with_seed(5)).unwrap();
    assert_eq!(report.civilizations.len(), 3);
    assert_eq!(report.civilizations[0].temperament(), Trait::Isolationist);
}

#[test]
fn missing_file_names_the_path() {
    let temp = tempdir().unwrap();
    let err = ScenarioLoader::new(temp.path())
        .load("nowhere.yaml")
        .unwrap_err();
    assert!(format!("{err:#}").contains("nowhere.yaml"));
}

#[test]
fn malformed_yaml_is_reported() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("bad.yaml"), "name: [unclosed").unwrap();
    let err = ScenarioLoader::new(temp.path()).load("bad.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));
}

#[test]
fn invalid_values_fail_validation() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("tiny.yaml"), "name: tiny\nmap_size: 3\n").unwrap();
    let config = ScenarioLoader::new(temp.path())
        .load("tiny.yaml")
        .unwrap()
        .to_config();
    assert!(config.validate().is_err());
    assert!(realms::run(&config).is_err());
}
