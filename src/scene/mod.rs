pub(crate) mod color;
pub(crate) mod command;
mod compositor;
mod layers;
pub(crate) mod shapes;

pub(crate) use color::Color;
pub(crate) use command::{Brush, DrawCommand, Point, Size, StrokeCap, Style};
pub(crate) use compositor::Compositor;
pub(crate) use layers::progress_ring_geometry;

use crate::animation::ClockSample;
use serde::Serialize;

/// Everything the compositor reads for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub(crate) struct SceneParams {
    pub(crate) rotation: f32,
    pub(crate) pulse: f32,
    pub(crate) glow: f32,
    pub(crate) float1: f32,
    pub(crate) float2: f32,
    pub(crate) wave_phase: f32,
    pub(crate) progress: f32,
}

impl SceneParams {
    pub(crate) fn new(sample: &ClockSample, progress: f32) -> Self {
        Self {
            rotation: sample.rotation,
            pulse: sample.pulse,
            glow: sample.glow,
            float1: sample.float1,
            float2: sample.float2,
            wave_phase: sample.energy_wave,
            progress,
        }
    }

    /// Progress clamped to [0, 1], safe to use in angle, radius and alpha math.
    pub(crate) fn clamped_progress(&self) -> f32 {
        if self.progress.is_nan() { 0.0 } else { self.progress.clamp(0.0, 1.0) }
    }
}

/// The fixed colors used by the loading scene
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Palette {
    pub(crate) primary: Color,
    pub(crate) secondary: Color,
    pub(crate) accent: Color,
    /// Radial backdrop stops, from the center outwards.
    pub(crate) backdrop: [Color; 3],
    pub(crate) text_primary: Color,
    pub(crate) text_secondary: Color,
}

impl Palette {
    /// Pick primary, secondary or accent by cycling through them.
    pub(crate) fn cycle(&self, index: usize) -> Color {
        match index % 3 {
            0 => self.primary,
            1 => self.secondary,
            _ => self.accent,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::from_hex(0x1e40af),
            secondary: Color::from_hex(0xdc2626),
            accent: Color::from_hex(0xfcd34d),
            backdrop: [Color::from_hex(0x0c1129), Color::from_hex(0x1a202c), Color::from_hex(0x000000)],
            text_primary: Color::WHITE,
            text_secondary: Color::from_hex(0xe5e7eb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::below(-0.5, 0.0)]
    #[case::inside(0.42, 0.42)]
    #[case::above(1.7, 1.0)]
    #[case::nan(f32::NAN, 0.0)]
    fn progress_is_clamped(#[case] progress: f32, #[case] expected: f32) {
        let params = SceneParams { progress, ..Default::default() };
        assert_eq!(params.clamped_progress(), expected);
    }
}
