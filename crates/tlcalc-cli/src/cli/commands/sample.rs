//! `tlcalc sample` – the built-in two-stage example.

use anyhow::Result;
use tlcalc_core::config::TlConfig;
use tlcalc_core::scenario::Scenario;
use tlcalc_core::Stage;

/// Two stages, one hour: the scenario the calculator was first written for.
pub fn sample_scenario() -> Scenario {
    let mut scenario = Scenario::from_stages(vec![
        Stage::new(vec![7.0, 5.0], vec![10.0, 25.0], 90.0),
        Stage::new(vec![5.0, 5.0], vec![5.0, 5.0], 60.0),
    ]);
    scenario.threshold_hours = Some(1.0);
    scenario.fps = Some(1.0);
    scenario.restart_delay_secs = Some(0.0);
    scenario
}

pub fn run_sample(cfg: &TlConfig, json: bool) -> Result<()> {
    let eval = sample_scenario().evaluate(cfg)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
    } else {
        println!("{}", eval.stats.probability * 100.0);
    }
    Ok(())
}
