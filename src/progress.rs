//! The loading sequence: a fixed list of named phases walked from 0% to 100%.
//!
//! [ProgressPlan] is a pure timeline, so any instant of the sequence can be computed without waiting.
//! [ProgressDriver] wraps a plan for a single traversal and fires its completion callback once.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time spent interpolating towards each phase's target.
pub(crate) const DEFAULT_STEP_DURATION: Duration = Duration::from_millis(800);

/// Pause after each phase reaches its target.
pub(crate) const DEFAULT_PHASE_PAUSE: Duration = Duration::from_millis(200);

/// Pause after the last phase before signaling completion.
pub(crate) const DEFAULT_FINAL_PAUSE: Duration = Duration::from_millis(300);

/// Sampling interval of the frame loop driving the sequence, about 60 samples per second.
pub(crate) const DEFAULT_TICK: Duration = Duration::from_millis(16);

/// Label shown once every phase has completed.
pub(crate) const FINISHING_LABEL: &str = "Finishing...";

/// Label of the implicit phase used when no phases are configured.
const IMPLICIT_PHASE_LABEL: &str = "Loading...";

/// A named segment of the loading sequence
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProgressPhase {
    pub(crate) label: String,
    pub(crate) target: f32,
}

impl ProgressPhase {
    pub(crate) fn new<S: Into<String>>(label: S, target: f32) -> Self {
        Self { label: label.into(), target }
    }
}

/// The phases shown while the hero is being "analyzed".
pub(crate) fn default_phases() -> Vec<ProgressPhase> {
    vec![
        ProgressPhase::new("Starting analysis...", 0.2),
        ProgressPhase::new("Processing data...", 0.4),
        ProgressPhase::new("Analyzing patterns...", 0.6),
        ProgressPhase::new("Generating profile...", 0.8),
        ProgressPhase::new("Discovering your hero...", 1.0),
    ]
}

/// Durations used when walking through the phases
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PhaseTimings {
    pub(crate) step: Duration,
    pub(crate) pause: Duration,
    pub(crate) final_pause: Duration,
}

impl Default for PhaseTimings {
    fn default() -> Self {
        Self { step: DEFAULT_STEP_DURATION, pause: DEFAULT_PHASE_PAUSE, final_pause: DEFAULT_FINAL_PAUSE }
    }
}

/// Errors that can occur when validating a list of phases
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProgressError {
    #[error("phase '{label}' has target {target}, which is outside [0, 1]")]
    TargetOutOfRange { label: String, target: f32 },

    #[error("phase '{label}' has target {target}, lower than the previous phase's {previous}")]
    Decreasing { label: String, target: f32, previous: f32 },

    #[error("the last phase must reach 1.0, it stops at {0}")]
    Incomplete(f32),
}

/// The snapshot of the sequence at one instant
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub(crate) struct ProgressState {
    /// Completion in [0, 1].
    pub(crate) fraction: f32,
    /// The phase being played, equal to the number of phases during the final pause.
    pub(crate) phase_index: usize,
    /// Whether the final pause has elapsed.
    pub(crate) finished: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct Segment {
    starts_at: Duration,
    step: Duration,
    from: f32,
    to: f32,
}

/// A validated list of phases laid out on a timeline
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ProgressPlan {
    phases: Vec<ProgressPhase>,
    timings: PhaseTimings,
    segments: Vec<Segment>,
    total: Duration,
}

impl ProgressPlan {
    /// Validate and lay out the given phases.
    ///
    /// An empty list is turned into a single phase going from 0 to 1.
    pub(crate) fn new(phases: Vec<ProgressPhase>, timings: PhaseTimings) -> Result<Self, ProgressError> {
        let phases =
            if phases.is_empty() { vec![ProgressPhase::new(IMPLICIT_PHASE_LABEL, 1.0)] } else { phases };

        let mut previous = 0.0_f32;
        for phase in &phases {
            if !(0.0..=1.0).contains(&phase.target) {
                return Err(ProgressError::TargetOutOfRange { label: phase.label.clone(), target: phase.target });
            }
            if phase.target < previous {
                return Err(ProgressError::Decreasing { label: phase.label.clone(), target: phase.target, previous });
            }
            previous = phase.target;
        }
        if previous < 1.0 {
            return Err(ProgressError::Incomplete(previous));
        }

        let mut segments = Vec::with_capacity(phases.len());
        let mut cursor = Duration::ZERO;
        let mut fraction = 0.0;
        for phase in &phases {
            // a phase that doesn't move the fraction forward only waits for its pause
            let step = if phase.target > fraction { timings.step } else { Duration::ZERO };
            segments.push(Segment { starts_at: cursor, step, from: fraction, to: phase.target });
            cursor += step + timings.pause;
            fraction = phase.target;
        }
        let total = cursor + timings.final_pause;
        Ok(Self { phases, timings, segments, total })
    }

    pub(crate) fn phases(&self) -> &[ProgressPhase] {
        &self.phases
    }

    /// Time from the first phase starting until completion fires.
    pub(crate) fn total_duration(&self) -> Duration {
        self.total
    }

    /// The label for a phase index as reported by [ProgressState].
    pub(crate) fn label(&self, phase_index: usize) -> &str {
        self.phases.get(phase_index).map(|phase| phase.label.as_str()).unwrap_or(FINISHING_LABEL)
    }

    /// The state of the sequence `elapsed` after it started.
    pub(crate) fn state_at(&self, elapsed: Duration) -> ProgressState {
        for (phase_index, segment) in self.segments.iter().enumerate() {
            let step_ends_at = segment.starts_at + segment.step;
            if elapsed < step_ends_at {
                let ratio = (elapsed - segment.starts_at).as_secs_f64() / segment.step.as_secs_f64();
                let ratio = ratio.min(1.0) as f32;
                let fraction = segment.from + (segment.to - segment.from) * ratio;
                return ProgressState { fraction, phase_index, finished: false };
            }
            if elapsed < step_ends_at + self.timings.pause {
                return ProgressState { fraction: segment.to, phase_index, finished: false };
            }
        }
        ProgressState { fraction: 1.0, phase_index: self.phases.len(), finished: elapsed >= self.total }
    }
}

/// A single traversal of a [ProgressPlan].
///
/// Time only moves forward: sampling an earlier instant than a previous one returns the latest state.
/// The completion callback receives `context` exactly once, after the final pause.
/// Dropping the driver before that cancels the traversal.
pub(crate) struct ProgressDriver<C, F>
where
    F: FnOnce(C),
{
    plan: ProgressPlan,
    latest: Duration,
    state: ProgressState,
    completion: Option<(C, F)>,
}

impl<C, F> ProgressDriver<C, F>
where
    F: FnOnce(C),
{
    pub(crate) fn new(plan: ProgressPlan, context: C, on_finished: F) -> Self {
        Self { plan, latest: Duration::ZERO, state: ProgressState::default(), completion: Some((context, on_finished)) }
    }

    pub(crate) fn plan(&self) -> &ProgressPlan {
        &self.plan
    }

    /// Move the traversal to `elapsed` since it started.
    pub(crate) fn advance(&mut self, elapsed: Duration) -> ProgressState {
        self.latest = self.latest.max(elapsed);
        self.state = self.plan.state_at(self.latest);
        if self.state.finished {
            if let Some((context, on_finished)) = self.completion.take() {
                on_finished(context);
            }
        }
        self.state
    }
}
