mod clock;
mod easing;

pub(crate) use clock::{AnimationClock, AnimationSpec, ClockChannel, ClockError, ClockSample, RepeatMode};
pub(crate) use easing::Easing;
