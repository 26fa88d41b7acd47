use super::{Layer, LayerContext};
use crate::scene::{Brush, DrawCommand, Point};

/// Dark radial gradient covering the whole canvas
pub(crate) struct Backdrop;

impl Layer for Backdrop {
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::FillRect {
            origin: Point::default(),
            size: ctx.canvas,
            brush: Brush::RadialGradient {
                center: ctx.center(),
                radius: ctx.canvas.max_dimension() * 0.8,
                colors: ctx.palette.backdrop.to_vec(),
            },
        });
    }
}
