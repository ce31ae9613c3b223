//! Time-bounded completion distribution across a chain of stages.
//!
//! `dp[i][t]` is the probability that stage `i` has just completed after `t`
//! wasted frames, where wasted time is everything beyond the sum of the
//! stages' success times. Cells are filled with `t` as the outer loop and the
//! stage index as the inner one: a cell only reads `dp[i][t - Tn]` (earlier
//! frame, same stage) and `dp[i - 1][t]` (same frame, previous stage).

use crate::error::{Result, TlError};
use crate::stage::StageParams;

/// Dense, row-major DP table: one row per stage, `max_waste_frames + 1` columns.
#[derive(Debug, Clone)]
pub struct CompletionTable {
    stages: usize,
    width: usize,
    cells: Vec<f64>,
}

impl CompletionTable {
    /// Allocates and fills the table for a budget of `max_waste_frames` wasted frames.
    ///
    /// Fails with [`TlError::TableTooLarge`] before allocating when
    /// `stages * (max_waste_frames + 1)` exceeds `max_cells`.
    pub fn fill(params: &[StageParams], max_waste_frames: u64, max_cells: usize) -> Result<Self> {
        let stages = params.len();
        if stages == 0 {
            return Err(TlError::EmptyScenario);
        }
        let requested = stages as u128 * (max_waste_frames as u128 + 1);
        if requested > max_cells as u128 {
            return Err(TlError::TableTooLarge {
                cells: requested,
                limit: max_cells,
            });
        }
        let width = max_waste_frames as usize + 1;
        tracing::debug!(stages, width, "filling completion table");

        // Zero-frame failures re-enter the same cell; solve that loop in closed form.
        let self_loop: Vec<Option<f64>> = params
            .iter()
            .map(|p| {
                let z = p.zero_frame_mass();
                (z > 0.0).then(|| 1.0 - z)
            })
            .collect();

        let mut cells = vec![0.0f64; stages * width];
        for t in 0..width {
            for (i, p) in params.iter().enumerate() {
                let mut acc = if i == 0 && t == 0 { p.q_succ } else { 0.0 };

                for (&tn, &qn) in p.t_fails.iter().zip(&p.q_fails) {
                    if tn == 0 || tn > t as u64 {
                        continue;
                    }
                    acc += qn * cells[i * width + t - tn as usize];
                }

                if i > 0 {
                    acc += cells[(i - 1) * width + t] * p.q_succ;
                }

                if let Some(denom) = self_loop[i] {
                    acc /= denom;
                }
                cells[i * width + t] = acc;
            }
        }

        Ok(Self {
            stages,
            width,
            cells,
        })
    }

    pub fn stages(&self) -> usize {
        self.stages
    }

    /// Number of frame offsets per row (`max_waste_frames + 1`).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row(&self, stage: usize) -> &[f64] {
        &self.cells[stage * self.width..(stage + 1) * self.width]
    }

    pub fn get(&self, stage: usize, t: usize) -> f64 {
        self.cells[stage * self.width + t]
    }

    /// Probability that the final stage completes within the budget.
    pub fn probability_within(&self) -> f64 {
        self.row(self.stages - 1).iter().fold(0.0, |acc, p| acc + p)
    }

    /// Running sum of the final row: entry `t` is P(all stages done with <= t wasted frames).
    pub fn cumulative(&self) -> Vec<f64> {
        let mut sum = 0.0;
        self.row(self.stages - 1)
            .iter()
            .map(|p| {
                sum += p;
                sum
            })
            .collect()
    }
}
