use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::calc::DEFAULT_MAX_TABLE_CELLS;
use crate::tickets::DEFAULT_TICKET_SECS;

/// Global defaults loaded from `~/.config/tlcalc/config.toml`.
///
/// Scenario files and CLI flags override these per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlConfig {
    /// Frames per second of the discretized time axis.
    pub fps: f64,
    /// Seconds added to every failed attempt before the stage restarts.
    pub restart_delay_secs: f64,
    /// Length of one ticket in seconds (used with `--tickets`).
    #[serde(default = "default_ticket_secs")]
    pub ticket_secs: f64,
    /// Largest DP table (stages x frames) a run may allocate.
    #[serde(default = "default_max_table_cells")]
    pub max_table_cells: usize,
}

fn default_ticket_secs() -> f64 {
    DEFAULT_TICKET_SECS
}

fn default_max_table_cells() -> usize {
    DEFAULT_MAX_TABLE_CELLS
}

impl Default for TlConfig {
    fn default() -> Self {
        Self {
            fps: 1.0,
            restart_delay_secs: 0.0,
            ticket_secs: DEFAULT_TICKET_SECS,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tlcalc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: TlConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = TlConfig::default();
        assert_eq!(cfg.fps, 1.0);
        assert_eq!(cfg.restart_delay_secs, 0.0);
        assert_eq!(cfg.ticket_secs, 3600.0);
        assert_eq!(cfg.max_table_cells, 16 * 1024 * 1024);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = TlConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: TlConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.fps, cfg.fps);
        assert_eq!(parsed.restart_delay_secs, cfg.restart_delay_secs);
        assert_eq!(parsed.ticket_secs, cfg.ticket_secs);
        assert_eq!(parsed.max_table_cells, cfg.max_table_cells);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            fps = 30.0
            restart_delay_secs = 2.5
        "#;
        let cfg: TlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.fps, 30.0);
        assert_eq!(cfg.restart_delay_secs, 2.5);
        assert_eq!(cfg.ticket_secs, 3600.0);
        assert_eq!(cfg.max_table_cells, DEFAULT_MAX_TABLE_CELLS);
    }

    #[test]
    fn config_toml_limits() {
        let toml = r#"
            fps = 60.0
            restart_delay_secs = 0.0
            ticket_secs = 1800.0
            max_table_cells = 1_000_000
        "#;
        let cfg: TlConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.ticket_secs, 1800.0);
        assert_eq!(cfg.max_table_cells, 1_000_000);
    }
}
