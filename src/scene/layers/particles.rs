use super::{Layer, LayerContext};
use crate::scene::{Brush, Color, DrawCommand, Palette, Point, Style};

const PARTICLE_COUNT: usize = 20;

/// Sparkles scattered over the canvas, drifting with the wave phase.
///
/// Placement comes from the particle index only, so every frame is reproducible.
pub(crate) struct Particles;

impl Particles {
    /// Resting position of a particle as a fraction of the canvas, both within [0.1, 0.9].
    pub(crate) fn anchor(index: usize) -> (f32, f32) {
        let spread = |multiplier: usize| 0.1 + 0.8 * ((index * multiplier) % 100) as f32 / 100.0;
        (spread(47), spread(73))
    }

    fn color(palette: &Palette, index: usize, sparkle: f32) -> Color {
        match index % 3 {
            0 => palette.primary.with_alpha(sparkle * 0.9),
            1 => palette.secondary.with_alpha(sparkle * 0.7),
            _ => palette.accent.with_alpha(sparkle * 0.8),
        }
    }
}

impl Layer for Particles {
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>) {
        let time = ctx.params.wave_phase;
        let sparkle = ctx.params.glow;
        for i in 0..PARTICLE_COUNT {
            let (anchor_x, anchor_y) = Self::anchor(i);
            let drift_x = (time + i as f32 * 30.0).to_radians().sin() * 30.0;
            let drift_y = (time + i as f32 * 45.0).to_radians().cos() * 20.0;
            out.push(DrawCommand::Circle {
                center: Point::new(ctx.width() * anchor_x + drift_x, ctx.height() * anchor_y + drift_y),
                radius: 2.0 + sparkle * 6.0,
                brush: Brush::solid(Self::color(ctx.palette, i, sparkle)),
                style: Style::Fill,
            });
        }
    }
}
