use super::{Layer, LayerContext};
use crate::scene::{Brush, DrawCommand, Style};

const RING_COUNT: usize = 4;

/// Concentric rings that spread out as progress grows
pub(crate) struct EnergyRings;

impl Layer for EnergyRings {
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>) {
        let progress = ctx.progress();
        for i in 0..RING_COUNT {
            let radius = 120.0 + i as f32 * 180.0 + progress * 300.0;
            let alpha = (0.15 - i as f32 * 0.03) * ctx.params.glow;
            out.push(DrawCommand::Circle {
                center: ctx.center(),
                radius,
                brush: Brush::solid(ctx.palette.cycle(i).with_alpha(alpha)),
                style: Style::Stroke { width: 3.0 },
            });
        }
    }
}
