//! Integration test: scenario files on disk feed the calculator.

mod common;

use tempfile::tempdir;
use tlcalc_core::scenario::Scenario;
use tlcalc_core::{calculate_tl_stats_with, CalcOptions, Threshold};

#[test]
fn toml_file_reproduces_worked_example() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("two_stage.toml");
    std::fs::write(
        &path,
        r#"
threshold_hours = 1

[[stages]]
probs = [7, 5]
times = [10, 25]
success_time = 90

[[stages]]
probs = [5, 5]
times = [5, 5]
success_time = 60
"#,
    )
    .unwrap();

    let scenario = Scenario::load_from_path(&path).unwrap();
    assert_eq!(scenario.stages, common::scenarios::worked_example());
    let threshold = scenario.threshold().unwrap().unwrap();
    let stats = calculate_tl_stats_with(&scenario.stages, &CalcOptions::new(threshold)).unwrap();
    assert_eq!(stats.probability, 0.3964806470724559);
}

#[test]
fn save_and_load_json_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("chain.json");
    let mut scenario = Scenario::from_stages(common::scenarios::easy_example());
    scenario.threshold_clock = Some("30:00".to_string());
    scenario.tickets = Some(2);
    scenario.save_to_path(&path).unwrap();

    let loaded = Scenario::load_from_path(&path).unwrap();
    assert_eq!(loaded, scenario);
    assert_eq!(
        loaded.threshold().unwrap(),
        Some(Threshold::Seconds(1800.0))
    );
}

#[test]
fn save_and_load_toml_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chain.toml");
    let mut scenario = Scenario::from_stages(common::scenarios::worked_example());
    scenario.fps = Some(30.0);
    scenario.save_to_path(&path).unwrap();
    assert_eq!(Scenario::load_from_path(&path).unwrap(), scenario);
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chain.yaml");
    std::fs::write(&path, "stages: []").unwrap();
    let err = Scenario::load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("unsupported scenario format"));
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = Scenario::load_from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn bundled_scenarios_evaluate() {
    use tlcalc_core::config::TlConfig;
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../scenarios");

    let two_stage = Scenario::load_from_path(&dir.join("two_stage.toml")).unwrap();
    let eval = two_stage.evaluate(&TlConfig::default()).unwrap();
    assert_eq!(eval.overall_probability, 0.3964806470724559);

    let ticketed = Scenario::load_from_path(&dir.join("single_ticketed.json")).unwrap();
    let eval = ticketed.evaluate(&TlConfig::default()).unwrap();
    assert_eq!(eval.tickets, Some(3));
    assert_eq!(eval.threshold_secs, 3600.0);
    assert_eq!(eval.fps, 30.0);
    assert!(eval.overall_probability >= eval.stats.probability);
    assert!(eval.overall_probability <= 1.0);
}
