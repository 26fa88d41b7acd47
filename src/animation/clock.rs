use super::easing::Easing;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::{Display, EnumIter};

/// What happens when a channel reaches the end of its duration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RepeatMode {
    /// Jump back to the initial value.
    Restart,
    /// Play backwards towards the initial value, then forwards again.
    Reverse,
}

/// Errors that can occur when building an animation channel
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ClockError {
    #[error("animation duration must be greater than zero")]
    ZeroDuration,

    #[error("animation bounds must be finite, got {0} and {1}")]
    NonFiniteBounds(f32, f32),
}

/// An infinitely repeating animation between two values
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AnimationSpec {
    initial: f32,
    target: f32,
    duration: Duration,
    easing: Easing,
    repeat: RepeatMode,
}

impl AnimationSpec {
    pub(crate) fn new(
        initial: f32,
        target: f32,
        duration: Duration,
        easing: Easing,
        repeat: RepeatMode,
    ) -> Result<Self, ClockError> {
        if duration.is_zero() {
            return Err(ClockError::ZeroDuration);
        }
        if !initial.is_finite() || !target.is_finite() {
            return Err(ClockError::NonFiniteBounds(initial, target));
        }
        Ok(Self { initial, target, duration, easing, repeat })
    }

    #[cfg(test)]
    pub(crate) fn duration(&self) -> Duration {
        self.duration
    }

    #[cfg(test)]
    pub(crate) fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// The smallest and largest values this channel can produce.
    pub(crate) fn bounds(&self) -> (f32, f32) {
        (self.initial.min(self.target), self.initial.max(self.target))
    }

    /// Evaluate the channel at the given time since the scene started.
    pub(crate) fn value_at(&self, elapsed: Duration) -> f32 {
        let period = self.duration.as_nanos();
        let elapsed = elapsed.as_nanos();
        let cycle = elapsed / period;
        let linear = ((elapsed % period) as f64 / period as f64) as f32;
        let t = match self.repeat {
            RepeatMode::Restart => linear,
            // odd cycles run backwards, which folds time into a triangle wave
            RepeatMode::Reverse if cycle % 2 == 1 => 1.0 - linear,
            RepeatMode::Reverse => linear,
        };
        let eased = self.easing.apply(t);
        let (low, high) = self.bounds();
        (self.initial + (self.target - self.initial) * eased).clamp(low, high)
    }
}

/// The named channels driving the loading scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub(crate) enum ClockChannel {
    /// Degrees, spins the progress ring gradient.
    Rotation,
    /// Scale factor of the ring halo.
    Pulse,
    /// Brightness used by most background layers.
    Glow,
    Float1,
    Float2,
    /// Degrees, the phase shared by bolts, particles, hexagons and aurora.
    EnergyWave,
}

impl ClockChannel {
    /// The stock animation for this channel.
    pub(crate) fn default_spec(self) -> AnimationSpec {
        let (initial, target, millis, easing, repeat) = match self {
            Self::Rotation => (0.0, 360.0, 2000, Easing::Linear, RepeatMode::Restart),
            Self::Pulse => (0.8, 1.1, 1500, Easing::EaseInOut, RepeatMode::Reverse),
            Self::Glow => (0.3, 1.0, 2500, Easing::EaseInOutCubic, RepeatMode::Reverse),
            Self::Float1 => (0.0, 30.0, 4000, Easing::EaseInOutSine, RepeatMode::Reverse),
            Self::Float2 => (0.0, -25.0, 3500, Easing::EaseInOutSine, RepeatMode::Reverse),
            Self::EnergyWave => (0.0, 360.0, 8000, Easing::Linear, RepeatMode::Restart),
        };
        // all of the above have non zero durations and finite bounds
        AnimationSpec { initial, target, duration: Duration::from_millis(millis), easing, repeat }
    }
}

/// Every channel value at one instant
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub(crate) struct ClockSample {
    pub(crate) rotation: f32,
    pub(crate) pulse: f32,
    pub(crate) glow: f32,
    pub(crate) float1: f32,
    pub(crate) float2: f32,
    pub(crate) energy_wave: f32,
}

/// The set of looping channels for one scene.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AnimationClock {
    rotation: AnimationSpec,
    pulse: AnimationSpec,
    glow: AnimationSpec,
    float1: AnimationSpec,
    float2: AnimationSpec,
    energy_wave: AnimationSpec,
}

impl AnimationClock {
    /// Replace the animation of a single channel.
    pub(crate) fn with_channel(mut self, channel: ClockChannel, spec: AnimationSpec) -> Self {
        *self.spec_mut(channel) = spec;
        self
    }

    #[cfg(test)]
    pub(crate) fn spec(&self, channel: ClockChannel) -> &AnimationSpec {
        match channel {
            ClockChannel::Rotation => &self.rotation,
            ClockChannel::Pulse => &self.pulse,
            ClockChannel::Glow => &self.glow,
            ClockChannel::Float1 => &self.float1,
            ClockChannel::Float2 => &self.float2,
            ClockChannel::EnergyWave => &self.energy_wave,
        }
    }

    fn spec_mut(&mut self, channel: ClockChannel) -> &mut AnimationSpec {
        match channel {
            ClockChannel::Rotation => &mut self.rotation,
            ClockChannel::Pulse => &mut self.pulse,
            ClockChannel::Glow => &mut self.glow,
            ClockChannel::Float1 => &mut self.float1,
            ClockChannel::Float2 => &mut self.float2,
            ClockChannel::EnergyWave => &mut self.energy_wave,
        }
    }

    pub(crate) fn sample(&self, elapsed: Duration) -> ClockSample {
        ClockSample {
            rotation: self.rotation.value_at(elapsed),
            pulse: self.pulse.value_at(elapsed),
            glow: self.glow.value_at(elapsed),
            float1: self.float1.value_at(elapsed),
            float2: self.float2.value_at(elapsed),
            energy_wave: self.energy_wave.value_at(elapsed),
        }
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self {
            rotation: ClockChannel::Rotation.default_spec(),
            pulse: ClockChannel::Pulse.default_spec(),
            glow: ClockChannel::Glow.default_spec(),
            float1: ClockChannel::Float1.default_spec(),
            float2: ClockChannel::Float2.default_spec(),
            energy_wave: ClockChannel::EnergyWave.default_spec(),
        }
    }
}
