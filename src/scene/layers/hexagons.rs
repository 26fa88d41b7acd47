use super::{Layer, LayerContext};
use crate::scene::{shapes, DrawCommand, Point, Size, StrokeCap, Style};

const HEXAGON_COUNT: usize = 10;

/// Hexagons whose center lies further than this outside the canvas are skipped.
const CULL_MARGIN: f32 = 50.0;

/// Rotating tech hexagons spiraling out of the center
pub(crate) struct Hexagons;

impl Hexagons {
    fn visible(center: Point, canvas: Size) -> bool {
        center.x > -CULL_MARGIN
            && center.x < canvas.width + CULL_MARGIN
            && center.y > -CULL_MARGIN
            && center.y < canvas.height + CULL_MARGIN
    }
}

impl Layer for Hexagons {
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>) {
        let rotation = ctx.params.wave_phase * 0.5;
        let primary = ctx.palette.primary.with_alpha(0.15);
        let secondary = ctx.palette.secondary.with_alpha(0.1);

        for i in 0..HEXAGON_COUNT {
            let angle = i as f32 * 36.0 + rotation * 0.3;
            let distance = 250.0 + i as f32 * 40.0;
            let center = Point::polar(ctx.center(), distance, angle);
            if !Self::visible(center, ctx.canvas) {
                continue;
            }
            out.push(DrawCommand::Path {
                points: shapes::hexagon(center, 30.0 + i as f32 * 4.0, rotation + i as f32 * 20.0),
                closed: true,
                color: if i % 2 == 0 { primary } else { secondary },
                style: Style::Stroke { width: 2.0 },
                cap: StrokeCap::Butt,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::layers::test_support::{draw, params};
    use crate::scene::{Palette, SceneParams};

    #[test]
    fn all_visible_on_large_canvas() {
        let commands = draw(&Hexagons, &params(1.0, 0.0, 0.0));
        assert_eq!(commands.len(), HEXAGON_COUNT);
        for command in &commands {
            let DrawCommand::Path { points, closed, .. } = command else { panic!("not a path") };
            assert_eq!(points.len(), 6);
            assert!(*closed);
        }
    }

    #[test]
    fn culled_outside_small_canvas() {
        let palette = Palette::default();
        let params = SceneParams { glow: 1.0, ..Default::default() };
        let ctx = LayerContext { params: &params, canvas: Size::new(400.0, 400.0), palette: &palette };
        let mut out = Vec::new();
        Hexagons.draw(&ctx, &mut out);
        // only the inner hexagons stay within 50 units of a 400x400 canvas
        assert!(!out.is_empty());
        assert!(out.len() < HEXAGON_COUNT);
    }

    #[rstest::rstest]
    #[case::inside(Point::new(10.0, 10.0), true)]
    #[case::within_margin(Point::new(-49.0, 1049.0), true)]
    #[case::outside_left(Point::new(-50.0, 10.0), false)]
    #[case::outside_bottom(Point::new(10.0, 1100.0), false)]
    fn visibility(#[case] center: Point, #[case] expected: bool) {
        assert_eq!(Hexagons::visible(center, Size::new(1000.0, 1000.0)), expected);
    }
}
