use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Easing curves available to animation channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Display, EnumIter)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum Easing {
    Linear,
    /// Fast start, long gentle settle.
    EaseInOut,
    EaseInOutCubic,
    EaseInOutSine,
}

impl Easing {
    /// Shape a linear progress value. The input is clamped to [0, 1] and so is the output.
    pub(crate) fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => CubicBezier::new(0.4, 0.0, 0.2, 1.0).transform(t),
            Self::EaseInOutCubic => CubicBezier::new(0.65, 0.0, 0.35, 1.0).transform(t),
            Self::EaseInOutSine => CubicBezier::new(0.37, 0.0, 0.63, 1.0).transform(t),
        }
    }
}

/// A cubic Bézier timing curve going from (0, 0) to (1, 1).
///
/// Both control points must have their x coordinate within [0, 1] so the curve is a function of x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    const MAX_ITERATIONS: usize = 32;
    const TOLERANCE: f32 = 1e-6;

    pub(crate) const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn sample(p1: f32, p2: f32, t: f32) -> f32 {
        let inverse = 1.0 - t;
        3.0 * p1 * inverse * inverse * t + 3.0 * p2 * inverse * t * t + t * t * t
    }

    /// The curve's y for a given x.
    pub(crate) fn transform(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        // x(t) is monotonic, bisect on it
        let (mut low, mut high) = (0.0_f32, 1.0_f32);
        let mut t = x;
        for _ in 0..Self::MAX_ITERATIONS {
            let estimate = Self::sample(self.x1, self.x2, t);
            if (estimate - x).abs() < Self::TOLERANCE {
                break;
            }
            if estimate < x {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        Self::sample(self.y1, self.y2, t).clamp(0.0, 1.0)
    }
}
