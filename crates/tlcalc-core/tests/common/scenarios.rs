//! Shared stage chains for integration tests.

use tlcalc_core::Stage;

/// Two-stage chain used as the reference scenario throughout the tests.
pub fn worked_example() -> Vec<Stage> {
    vec![
        Stage::new(vec![7.0, 5.0], vec![10.0, 25.0], 90.0),
        Stage::new(vec![5.0, 5.0], vec![5.0, 5.0], 60.0),
    ]
}

/// Same shape as `worked_example` with far more forgiving checkpoints.
pub fn easy_example() -> Vec<Stage> {
    vec![
        Stage::new(vec![75.0, 75.0], vec![10.0, 25.0], 90.0),
        Stage::new(vec![50.0, 50.0], vec![5.0, 5.0], 60.0),
    ]
}

/// One checkpoint that always passes.
pub fn certain_stage(success_time: f64) -> Vec<Stage> {
    vec![Stage::new(vec![100.0], vec![0.0], success_time)]
}
