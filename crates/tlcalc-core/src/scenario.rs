//! Scenario files: a stage chain plus optional run parameters, as TOML or JSON.
//!
//! ```toml
//! threshold_hours = 1.0
//!
//! [[stages]]
//! probs = [7, 5]
//! times = [10, 25]
//! success_time = 90
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calc::{calculate_tl_stats_with, CalcOptions, TlStats};
use crate::config::TlConfig;
use crate::stage::Stage;
use crate::threshold::{parse_clock, Threshold};
use crate::tickets::probability_across_tickets;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_hours: Option<f64>,
    /// `hh:mm:ss`, `mm:ss` or `ss`; takes precedence over `threshold_hours`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_clock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_delay_secs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tickets: Option<u32>,
    /// Must stay the last field: TOML needs plain keys ahead of `[[stages]]`.
    pub stages: Vec<Stage>,
}

impl Scenario {
    pub fn from_stages(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            ..Self::default()
        }
    }

    /// Threshold declared in the file, if any.
    pub fn threshold(&self) -> Result<Option<Threshold>> {
        if let Some(clock) = &self.threshold_clock {
            let secs = parse_clock(clock).context("threshold_clock")?;
            return Ok(Some(Threshold::Seconds(secs)));
        }
        Ok(self.threshold_hours.map(Threshold::Hours))
    }

    /// Run options: values from the file win, `cfg` fills the gaps.
    ///
    /// Without an explicit threshold a ticketed scenario uses one ticket length
    /// (`cfg.ticket_secs`) as its budget; otherwise a threshold is required.
    pub fn calc_options(&self, cfg: &TlConfig) -> Result<CalcOptions> {
        let threshold = match self.threshold()? {
            Some(t) => t,
            None if self.tickets.is_some() => Threshold::Seconds(cfg.ticket_secs),
            None => bail!("no threshold given: set threshold_hours or threshold_clock"),
        };
        Ok(CalcOptions::new(threshold)
            .with_fps(self.fps.unwrap_or(cfg.fps))
            .with_restart_delay(self.restart_delay_secs.unwrap_or(cfg.restart_delay_secs))
            .with_max_table_cells(cfg.max_table_cells))
    }

    /// Evaluates the scenario, folding in tickets when the file asks for them.
    pub fn evaluate(&self, cfg: &TlConfig) -> Result<Evaluation> {
        let options = self.calc_options(cfg)?;
        let stats = calculate_tl_stats_with(&self.stages, &options)?;
        let overall = match self.tickets {
            Some(n) => probability_across_tickets(stats.probability, n),
            None => stats.probability,
        };
        Ok(Evaluation {
            threshold_secs: options.threshold.as_secs(),
            fps: options.fps,
            tickets: self.tickets,
            stats,
            overall_probability: overall,
        })
    }

    pub fn from_toml_str(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Loads a scenario, picking the format from the extension (`.toml` or `.json`).
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read scenario: {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let scenario = match ext.as_deref() {
            Some("toml") => Self::from_toml_str(&data),
            Some("json") => Self::from_json_str(&data),
            _ => bail!(
                "unsupported scenario format: {} (expected .toml or .json)",
                path.display()
            ),
        }
        .with_context(|| format!("parse scenario: {}", path.display()))?;
        tracing::debug!(
            path = %path.display(),
            stages = scenario.stages.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        let data = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::to_string_pretty(self).context("serialize scenario")?,
            _ => toml::to_string_pretty(self).context("serialize scenario")?,
        };
        std::fs::write(path, data).with_context(|| format!("write scenario: {}", path.display()))?;
        Ok(())
    }
}

/// Outcome of [`Scenario::evaluate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Budget of a single run (one ticket when tickets are used).
    pub threshold_secs: f64,
    pub fps: f64,
    pub tickets: Option<u32>,
    pub stats: TlStats,
    /// Probability across all tickets; equals `stats.probability` without tickets.
    pub overall_probability: f64,
}
