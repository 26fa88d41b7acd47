use super::{Layer, LayerContext};
use crate::scene::{shapes, Brush, Color, DrawCommand, Point, StrokeCap, Style};

/// Four floating hero emblems: a shield, a lightning bolt, a crest and a star
pub(crate) struct Emblems;

impl Emblems {
    /// Alpha shared by every emblem, derived from the glow channel.
    pub(crate) fn alpha(glow: f32) -> f32 {
        glow * 0.4 + 0.2
    }
}

impl Layer for Emblems {
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>) {
        let (width, height) = (ctx.width(), ctx.height());
        let float1 = ctx.params.float1;
        let float2 = ctx.params.float2;
        let alpha = Self::alpha(ctx.params.glow);
        let palette = ctx.palette;

        // shield: two filled discs and an outer stroke, top left
        let shield = Point::new(width * 0.15, height * 0.25 + float1);
        for i in 0..3 {
            let color =
                if i % 2 == 0 { palette.primary.with_alpha(alpha) } else { Color::WHITE.with_alpha(alpha * 0.6) };
            let style = if i == 2 { Style::Stroke { width: 4.0 } } else { Style::Fill };
            out.push(DrawCommand::Circle {
                center: shield,
                radius: 50.0 - i as f32 * 15.0,
                brush: Brush::solid(color),
                style,
            });
        }

        let lightning = Point::new(width * 0.85, height * 0.75 + float2);
        out.push(DrawCommand::Path {
            points: shapes::lightning(lightning),
            closed: true,
            color: palette.accent.with_alpha(alpha * 1.2),
            style: Style::Fill,
            cap: StrokeCap::Butt,
        });

        let crest = Point::new(width * 0.2, height * 0.8 + float1 * 0.5);
        out.push(DrawCommand::Path {
            points: shapes::diamond(crest),
            closed: true,
            color: palette.secondary.with_alpha(alpha),
            style: Style::Fill,
            cap: StrokeCap::Butt,
        });

        let star = Point::new(width * 0.8, height * 0.2 + float2 * 0.7);
        out.push(DrawCommand::Path {
            points: shapes::star(star, 25.0, 5),
            closed: true,
            color: palette.accent.with_alpha(alpha * 1.3),
            style: Style::Fill,
            cap: StrokeCap::Butt,
        });
    }
}
