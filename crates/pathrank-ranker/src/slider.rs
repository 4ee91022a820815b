//! Percentage sliders over an ordered list of metric groups.
//!
//! Two representations of the same "share of 100%" idea:
//!
//! - [`CutPointSlider`]: N groups separated by N−1 draggable cut points.
//!   Percentages are derived from positions, so they always total 100.
//! - [`SteppedSlider`]: each group holds its own percentage and a boundary
//!   button moves a fixed step between neighbours. After every adjustment
//!   the largest groups absorb any deviation from 100. Holding a button
//!   repeats the step on the configured hold timing.
//!
//! Both report group → percentage / 100 to a [`WeightListener`].

use std::time::Duration;

use pathrank_common::{PathrankError, Result, SliderConfig};
use tracing::debug;

use crate::weights::{from_percentages, NormalizedWeights, WeightListener};

/// Total every slider distributes.
pub const TOTAL_PERCENT: f64 = 100.0;

/// Convert a pointer offset along a track of `width` into a whole-percent
/// position. Offsets outside the track are clamped to its ends.
pub fn position_from_pointer(offset: f64, width: f64) -> f64 {
    if !(width > 0.0) || offset.is_nan() {
        return 0.0;
    }
    let x = offset.clamp(0.0, width);
    (x / width * TOTAL_PERCENT).round()
}

fn boundary_error(index: usize, boundaries: usize) -> PathrankError {
    PathrankError::BoundaryOutOfRange { index, boundaries }
}

/// Weight of `group` as a percentage; missing or non-finite weights count as 0.
fn percent_of(weights: &NormalizedWeights, group: &str) -> f64 {
    match weights.get(group) {
        Some(w) if w.is_finite() => w * TOTAL_PERCENT,
        _ => 0.0,
    }
}

fn to_owned_groups<S: AsRef<str>>(groups: &[S]) -> Vec<String> {
    groups.iter().map(|g| g.as_ref().to_string()).collect()
}

// ── Continuous ───────────────────────────────────────────────────────────────

/// Slider with N−1 ordered cut points in [0, 100].
#[derive(Debug, Clone, PartialEq)]
pub struct CutPointSlider {
    groups: Vec<String>,
    positions: Vec<f64>,
}

impl CutPointSlider {
    /// Cut points at the cumulative weights, snapped to whole percent.
    pub fn from_weights<S: AsRef<str>>(groups: &[S], weights: &NormalizedWeights) -> Self {
        let cuts = groups.len().saturating_sub(1);
        let mut positions = Vec::with_capacity(cuts);
        let mut cumulative = 0.0;
        let mut prev = 0.0;
        for g in groups.iter().take(cuts) {
            cumulative += percent_of(weights, g.as_ref());
            let pos = cumulative.round().clamp(prev, TOTAL_PERCENT);
            positions.push(pos);
            prev = pos;
        }
        Self { groups: to_owned_groups(groups), positions }
    }

    /// Equal shares, snapped to whole percent.
    pub fn even<S: AsRef<str>>(groups: &[S]) -> Self {
        let n = groups.len();
        let positions = (1..n)
            .map(|i| (TOTAL_PERCENT * i as f64 / n as f64).round())
            .collect();
        Self { groups: to_owned_groups(groups), positions }
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Number of draggable cut points.
    pub fn boundaries(&self) -> usize {
        self.positions.len()
    }

    /// Bound `pos` by the neighbouring cut points (0 and 100 at the ends).
    pub fn clamp_position(&self, pos: f64, idx: usize) -> Result<f64> {
        let last = self.positions.len().checked_sub(1).ok_or_else(|| boundary_error(idx, 0))?;
        if idx > last {
            return Err(boundary_error(idx, self.positions.len()));
        }
        let min = if idx == 0 { 0.0 } else { self.positions[idx - 1] };
        let max = if idx == last { TOTAL_PERCENT } else { self.positions[idx + 1] };
        if pos.is_nan() {
            return Ok(min);
        }
        Ok(pos.clamp(min, max))
    }

    /// Per-group percentages derived from the cut points.
    pub fn percentages(&self) -> Vec<f64> {
        let n = self.groups.len();
        match n {
            0 => Vec::new(),
            1 => vec![TOTAL_PERCENT],
            _ => (0..n)
                .map(|i| {
                    if i == 0 {
                        self.positions[0]
                    } else if i == n - 1 {
                        TOTAL_PERCENT - self.positions[n - 2]
                    } else {
                        self.positions[i] - self.positions[i - 1]
                    }
                })
                .collect(),
        }
    }

    pub fn weights(&self) -> NormalizedWeights {
        from_percentages(&self.groups, &self.percentages())
    }

    /// Move cut point `idx` towards `pos` (snapped to whole percent and
    /// clamped between its neighbours), then notify `listener`.
    pub fn drag(
        &mut self,
        idx: usize,
        pos: f64,
        listener: &mut impl WeightListener,
    ) -> Result<NormalizedWeights> {
        let clamped = self.clamp_position(pos.round(), idx)?;
        self.positions[idx] = clamped;
        debug!("cut point {} -> {}", idx, clamped);

        let weights = self.weights();
        listener.on_weights_changed(&weights);
        Ok(weights)
    }
}

// ── Stepped ──────────────────────────────────────────────────────────────────

/// Direction of a stepped boundary adjustment between groups `idx` and `idx + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryShift {
    /// Grow group `idx`, taking from group `idx + 1`
    Up,
    /// Shrink group `idx`, giving to group `idx + 1`
    Down,
}

/// Press-and-hold timing: one step on press, another after `delay`, then
/// one every `repeat` while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTiming {
    pub delay: Duration,
    pub repeat: Duration,
}

impl HoldTiming {
    pub fn from_config(config: &SliderConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.hold_delay_ms),
            repeat: Duration::from_millis(config.hold_repeat_ms),
        }
    }

    /// Steps fired by a button held for `held`.
    pub fn steps_for(&self, held: Duration) -> usize {
        if held < self.delay {
            return 1;
        }
        let repeat = self.repeat.as_millis().max(1);
        let repeats = (held - self.delay).as_millis() / repeat;
        usize::try_from(repeats).unwrap_or(usize::MAX).saturating_add(2)
    }
}

impl Default for HoldTiming {
    fn default() -> Self {
        Self::from_config(&SliderConfig::default())
    }
}

/// Slider where each group holds an independent percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct SteppedSlider {
    groups: Vec<String>,
    percentages: Vec<f64>,
    step: f64,
    hold: HoldTiming,
}

impl SteppedSlider {
    /// Percentages at `round(weight * 100)`, or an even split when no
    /// weights are known yet. The start state is reconciled to 100.
    pub fn from_weights<S: AsRef<str>>(groups: &[S], weights: &NormalizedWeights, step: f64) -> Self {
        let n = groups.len();
        let mut percentages: Vec<f64> = if weights.is_empty() {
            vec![(TOTAL_PERCENT / n.max(1) as f64).round(); n]
        } else {
            groups
                .iter()
                .map(|g| percent_of(weights, g.as_ref()).round().clamp(0.0, TOTAL_PERCENT))
                .collect()
        };
        reconcile_total(&mut percentages);
        Self { groups: to_owned_groups(groups), percentages, step, hold: HoldTiming::default() }
    }

    pub fn with_config<S: AsRef<str>>(groups: &[S], weights: &NormalizedWeights, config: &SliderConfig) -> Self {
        Self { hold: HoldTiming::from_config(config), ..Self::from_weights(groups, weights, config.step) }
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn percentages(&self) -> &[f64] {
        &self.percentages
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn hold_timing(&self) -> HoldTiming {
        self.hold
    }

    /// Number of boundaries between adjacent groups.
    pub fn boundaries(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    pub fn weights(&self) -> NormalizedWeights {
        from_percentages(&self.groups, &self.percentages)
    }

    /// Whether a step in `shift` at boundary `idx` would be accepted.
    pub fn can_shift(&self, idx: usize, shift: BoundaryShift) -> bool {
        if idx >= self.boundaries() {
            return false;
        }
        let (from, to) = endpoints(idx, shift);
        self.percentages[from] - self.step >= 0.0 && self.percentages[to] + self.step <= TOTAL_PERCENT
    }

    /// Move one step across boundary `idx`, reconcile the total and notify
    /// `listener`. A transfer that would push the source below 0 or the sink
    /// above 100 is refused; the listener still sees the (unchanged) state.
    pub fn adjust_boundary(
        &mut self,
        idx: usize,
        shift: BoundaryShift,
        listener: &mut impl WeightListener,
    ) -> Result<NormalizedWeights> {
        if idx >= self.boundaries() {
            return Err(boundary_error(idx, self.boundaries()));
        }

        if self.can_shift(idx, shift) {
            let (from, to) = endpoints(idx, shift);
            self.percentages[from] = (self.percentages[from] - self.step).clamp(0.0, TOTAL_PERCENT);
            self.percentages[to] = (self.percentages[to] + self.step).clamp(0.0, TOTAL_PERCENT);
        } else {
            debug!("boundary {} {:?} refused at {:?}", idx, shift, self.percentages);
        }
        reconcile_total(&mut self.percentages);

        let weights = self.weights();
        listener.on_weights_changed(&weights);
        Ok(weights)
    }

    /// Press-and-hold on boundary `idx` for `held`: as many adjustments as
    /// the hold timing fires, each one reported to `listener`.
    pub fn hold_boundary(
        &mut self,
        idx: usize,
        shift: BoundaryShift,
        held: Duration,
        listener: &mut impl WeightListener,
    ) -> Result<NormalizedWeights> {
        let steps = self.hold.steps_for(held);
        debug!("boundary {} {:?} held {:?}: {} steps", idx, shift, held, steps);
        let mut weights = self.adjust_boundary(idx, shift, listener)?;
        for _ in 1..steps {
            if !self.can_shift(idx, shift) {
                break;
            }
            weights = self.adjust_boundary(idx, shift, listener)?;
        }
        Ok(weights)
    }
}

fn endpoints(idx: usize, shift: BoundaryShift) -> (usize, usize) {
    match shift {
        BoundaryShift::Up => (idx + 1, idx),
        BoundaryShift::Down => (idx, idx + 1),
    }
}

/// Force `percentages` to total 100. The largest group (first on ties)
/// absorbs the deviation, clamped to [0, 100]; whatever it cannot take
/// passes to the next largest, and so on.
pub fn reconcile_total(percentages: &mut [f64]) {
    let mut order: Vec<usize> = (0..percentages.len()).collect();
    order.sort_by(|&a, &b| percentages[b].total_cmp(&percentages[a]));

    for idx in order {
        let total: f64 = percentages.iter().sum();
        if total == TOTAL_PERCENT {
            return;
        }
        percentages[idx] = (percentages[idx] + TOTAL_PERCENT - total).clamp(0.0, TOTAL_PERCENT);
    }
}
