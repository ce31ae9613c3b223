//! Entry points: validate, preprocess, derive the frame budget, run the engine.

use serde::Serialize;

use crate::engine::CompletionTable;
use crate::error::{Result, TlError};
use crate::stage::{self, to_frames, Preprocessed, Stage};
use crate::threshold::Threshold;

/// Default cap on DP cells (128 MiB of `f64`).
pub const DEFAULT_MAX_TABLE_CELLS: usize = 16 * 1024 * 1024;

/// Run parameters besides the stages themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalcOptions {
    pub threshold: Threshold,
    /// Frames per second of the discretized time axis.
    pub fps: f64,
    /// Seconds added to every failed attempt before the stage restarts.
    pub restart_delay_secs: f64,
    pub max_table_cells: usize,
}

impl CalcOptions {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            threshold,
            fps: 1.0,
            restart_delay_secs: 0.0,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    pub fn with_restart_delay(mut self, secs: f64) -> Self {
        self.restart_delay_secs = secs;
        self
    }

    pub fn with_max_table_cells(mut self, cells: usize) -> Self {
        self.max_table_cells = cells;
        self
    }

    fn validate(&self) -> Result<()> {
        self.threshold.validate()?;
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(TlError::InvalidFps(self.fps));
        }
        if !self.restart_delay_secs.is_finite() || self.restart_delay_secs < 0.0 {
            return Err(TlError::InvalidRestartDelay(self.restart_delay_secs));
        }
        Ok(())
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TlStats {
    /// Probability that every stage completes within the threshold.
    pub probability: f64,
    /// Unconditional expected completion time, in the input time unit.
    pub expected_time: f64,
    /// Threshold frames minus the fastest possible run; negative on a shortfall.
    pub max_waste_frames: i64,
}

/// Evaluates `stages` against a budget of `threshold_hours` at 1 fps.
pub fn calculate_tl_stats(stages: &[Stage], threshold_hours: f64) -> Result<TlStats> {
    calculate_tl_stats_with(stages, &CalcOptions::new(Threshold::Hours(threshold_hours)))
}

pub fn calculate_tl_stats_with(stages: &[Stage], opts: &CalcOptions) -> Result<TlStats> {
    let (pre, max_waste_frames) = prepare(stages, opts)?;

    let probability = match u64::try_from(max_waste_frames) {
        Ok(budget) => {
            CompletionTable::fill(&pre.stages, budget, opts.max_table_cells)?.probability_within()
        }
        Err(_) => {
            tracing::debug!(
                max_waste_frames,
                "success path alone exceeds the threshold"
            );
            0.0
        }
    };

    tracing::info!(
        stages = stages.len(),
        probability,
        expected_time = pre.total_expected_time,
        "evaluated scenario"
    );
    Ok(TlStats {
        probability,
        expected_time: pre.total_expected_time,
        max_waste_frames,
    })
}

/// Cumulative completion probability of the whole chain over elapsed frames.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionCurve {
    pub fps: f64,
    /// Frames of the fastest possible run; nothing completes earlier.
    pub min_frames: u64,
    /// Entry `t` is P(done within `min_frames + t` frames). Empty on a shortfall.
    pub cumulative: Vec<f64>,
    pub expected_time: f64,
}

impl CompletionCurve {
    /// P(done within `secs` seconds), saturating at the end of the budget.
    pub fn at_secs(&self, secs: f64) -> f64 {
        let frames = to_frames(secs.max(0.0), self.fps);
        if frames < self.min_frames || self.cumulative.is_empty() {
            return 0.0;
        }
        let idx = (frames - self.min_frames).min(self.cumulative.len() as u64 - 1);
        self.cumulative[idx as usize]
    }

    /// Probability at the full threshold (last entry), or 0 on a shortfall.
    pub fn probability(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }
}

/// Same evaluation as [`calculate_tl_stats_with`], keeping the whole final-stage distribution.
pub fn completion_curve(stages: &[Stage], opts: &CalcOptions) -> Result<CompletionCurve> {
    let (pre, max_waste_frames) = prepare(stages, opts)?;
    let cumulative = match u64::try_from(max_waste_frames) {
        Ok(budget) => CompletionTable::fill(&pre.stages, budget, opts.max_table_cells)?.cumulative(),
        Err(_) => Vec::new(),
    };
    Ok(CompletionCurve {
        fps: opts.fps,
        min_frames: pre.total_min_frames,
        cumulative,
        expected_time: pre.total_expected_time,
    })
}

fn prepare(stages: &[Stage], opts: &CalcOptions) -> Result<(Preprocessed, i64)> {
    opts.validate()?;
    stage::validate_all(stages)?;
    let pre = stage::preprocess(stages, opts.fps, opts.restart_delay_secs)?;

    let threshold_frame = opts.threshold.to_frames(opts.fps);
    let max_waste_frames = threshold_frame as i128 - pre.total_min_frames as i128;
    let max_waste_frames = max_waste_frames.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
    tracing::debug!(
        threshold_frame,
        min_frames = pre.total_min_frames,
        max_waste_frames,
        "frame budget"
    );
    Ok((pre, max_waste_frames))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sure_stage() -> Vec<Stage> {
        vec![Stage::new(vec![100.0], vec![0.0], 90.0)]
    }

    #[test]
    fn certain_stage_inside_and_outside_budget() {
        let at = CalcOptions::new(Threshold::Seconds(90.0));
        let stats = calculate_tl_stats_with(&sure_stage(), &at).unwrap();
        assert_eq!(stats.probability, 1.0);
        assert_eq!(stats.expected_time, 90.0);
        assert_eq!(stats.max_waste_frames, 0);

        let below = CalcOptions::new(Threshold::Seconds(89.0));
        let stats = calculate_tl_stats_with(&sure_stage(), &below).unwrap();
        assert_eq!(stats.probability, 0.0);
        assert_eq!(stats.expected_time, 90.0);
        assert_eq!(stats.max_waste_frames, -1);
    }

    #[test]
    fn hour_entry_point_uses_one_fps() {
        let stats = calculate_tl_stats(&sure_stage(), 90.0 / 3600.0).unwrap();
        assert_eq!(stats.probability, 1.0);
    }

    #[test]
    fn invalid_options_rejected() {
        let stages = sure_stage();
        let bad_fps = CalcOptions::new(Threshold::Hours(1.0)).with_fps(0.0);
        assert_eq!(
            calculate_tl_stats_with(&stages, &bad_fps),
            Err(TlError::InvalidFps(0.0))
        );
        let bad_delay = CalcOptions::new(Threshold::Hours(1.0)).with_restart_delay(-1.0);
        assert_eq!(
            calculate_tl_stats_with(&stages, &bad_delay),
            Err(TlError::InvalidRestartDelay(-1.0))
        );
        assert_eq!(
            calculate_tl_stats(&stages, -1.0),
            Err(TlError::InvalidThreshold(-1.0))
        );
        assert_eq!(calculate_tl_stats(&[], 1.0), Err(TlError::EmptyScenario));
    }

    #[test]
    fn shortfall_skips_table_limit() {
        let opts = CalcOptions::new(Threshold::Seconds(10.0)).with_max_table_cells(0);
        let stats = calculate_tl_stats_with(&sure_stage(), &opts).unwrap();
        assert_eq!(stats.probability, 0.0);
    }

    #[test]
    fn table_limit_surfaces_as_error() {
        let opts = CalcOptions::new(Threshold::Hours(1.0)).with_max_table_cells(100);
        assert!(matches!(
            calculate_tl_stats_with(&sure_stage(), &opts),
            Err(TlError::TableTooLarge { .. })
        ));
    }

    #[test]
    fn huge_failure_time_with_restart_delay_is_out_of_reach() {
        let stages = vec![Stage::new(vec![50.0], vec![1e30], 10.0)];
        let opts = CalcOptions::new(Threshold::Seconds(20.0)).with_restart_delay(1.0);
        let stats = calculate_tl_stats_with(&stages, &opts).unwrap();
        assert_eq!(stats.probability, 0.5);
        assert_eq!(stats.max_waste_frames, 10);
        assert!(stats.expected_time.is_finite());
    }

    #[test]
    fn vanishing_success_probability_is_reported() {
        let stages = vec![Stage::new(vec![1e-320], vec![10.0], 10.0)];
        let opts = CalcOptions::new(Threshold::Seconds(20.0));
        assert_eq!(
            calculate_tl_stats_with(&stages, &opts),
            Err(TlError::DegenerateStage { stage: 0 })
        );
    }

    #[test]
    fn curve_matches_stats_and_saturates() {
        let stages = vec![Stage::new(vec![50.0], vec![10.0], 10.0)];
        let opts = CalcOptions::new(Threshold::Seconds(40.0));
        let curve = completion_curve(&stages, &opts).unwrap();
        let stats = calculate_tl_stats_with(&stages, &opts).unwrap();
        assert_eq!(curve.min_frames, 10);
        assert_eq!(curve.cumulative.len(), 31);
        assert_eq!(curve.probability(), stats.probability);
        assert_eq!(curve.at_secs(5.0), 0.0);
        assert_eq!(curve.at_secs(10.0), 0.5);
        assert_eq!(curve.at_secs(25.0), 0.75);
        assert_eq!(curve.at_secs(1000.0), 0.9375);
    }

    #[test]
    fn curve_is_empty_on_shortfall() {
        let opts = CalcOptions::new(Threshold::Seconds(1.0));
        let curve = completion_curve(&sure_stage(), &opts).unwrap();
        assert!(curve.cumulative.is_empty());
        assert_eq!(curve.probability(), 0.0);
        assert_eq!(curve.at_secs(100.0), 0.0);
        assert_eq!(curve.expected_time, 90.0);
    }
}
