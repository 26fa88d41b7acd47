use super::{Layer, LayerContext};
use crate::scene::{Brush, DrawCommand, Point, Size, StrokeCap, Style};

/// Where the circular progress indicator sits on a canvas
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct RingGeometry {
    pub(crate) center: Point,
    /// Outer diameter, stroke included
    pub(crate) diameter: f32,
    pub(crate) stroke: f32,
}

impl RingGeometry {
    /// Radius of the stroke's center line.
    pub(crate) fn radius(&self) -> f32 {
        (self.diameter - self.stroke) / 2.0
    }
}

/// Ring placement: centered, sized after the canvas width in portrait and after its height in landscape.
pub(crate) fn progress_ring_geometry(canvas: Size) -> RingGeometry {
    let diameter = if canvas.width > canvas.height { canvas.min_dimension() * 0.45 } else { canvas.width * 0.4 };
    RingGeometry { center: canvas.center(), diameter, stroke: diameter * 0.05 }
}

/// The circular progress indicator: halo, track, gradient arc and leading glow
pub(crate) struct ProgressRing;

impl Layer for ProgressRing {
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>) {
        let geometry = progress_ring_geometry(ctx.canvas);
        let palette = ctx.palette;
        let progress = ctx.progress();
        let glow = ctx.params.glow;
        let radius = geometry.radius();

        // soft halo breathing with the pulse channel
        out.push(DrawCommand::Circle {
            center: geometry.center,
            radius: geometry.diameter / 2.0 * ctx.params.pulse,
            brush: Brush::solid(palette.primary.with_alpha(0.2)),
            style: Style::Fill,
        });

        out.push(DrawCommand::Circle {
            center: geometry.center,
            radius,
            brush: Brush::solid(palette.primary.with_alpha(0.2)),
            style: Style::Stroke { width: geometry.stroke },
        });

        let start_angle = -90.0;
        let sweep_angle = progress * 360.0;
        out.push(DrawCommand::Arc {
            center: geometry.center,
            radius,
            start_angle,
            sweep_angle,
            brush: Brush::SweepGradient {
                center: geometry.center,
                rotation: ctx.params.rotation,
                colors: vec![palette.primary, palette.accent, palette.secondary, palette.primary.with_alpha(0.8)],
            },
            width: geometry.stroke,
            cap: StrokeCap::Round,
        });

        if progress > 0.0 {
            out.push(DrawCommand::Circle {
                center: Point::polar(geometry.center, radius, start_angle + sweep_angle),
                radius: geometry.stroke / 2.0 * glow * 1.5,
                brush: Brush::solid(palette.accent.with_alpha(glow)),
                style: Style::Fill,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::layers::test_support::{draw, params, CANVAS};
    use rstest::rstest;

    #[test]
    fn portrait_geometry() {
        let geometry = progress_ring_geometry(CANVAS);
        assert_eq!(geometry.diameter, 432.0);
        assert_eq!(geometry.center, Point::new(540.0, 960.0));
    }

    #[test]
    fn landscape_geometry() {
        let geometry = progress_ring_geometry(Size::new(1080.0, 400.0));
        assert_eq!(geometry.diameter, 180.0);
    }

    #[test]
    fn no_glow_dot_before_progress() {
        let commands = draw(&ProgressRing, &params(1.0, 0.0, 0.0));
        assert_eq!(commands.len(), 3);
        let DrawCommand::Arc { sweep_angle, start_angle, .. } = &commands[2] else { panic!("not an arc") };
        assert_eq!(*sweep_angle, 0.0);
        assert_eq!(*start_angle, -90.0);
    }

    #[rstest]
    #[case::quarter(0.25, 0.0)]
    #[case::half(0.5, 90.0)]
    #[case::clamped(1.4, 270.0)]
    fn glow_dot_leads_the_arc(#[case] progress: f32, #[case] expected_angle: f32) {
        let commands = draw(&ProgressRing, &params(0.8, 0.0, progress));
        assert_eq!(commands.len(), 4);

        let geometry = progress_ring_geometry(CANVAS);
        let DrawCommand::Circle { center, radius, .. } = &commands[3] else { panic!("not a circle") };
        assert!((center.distance(geometry.center) - geometry.radius()).abs() < 1e-2);
        assert!((center.angle_from(geometry.center) - expected_angle).abs() < 1e-2);
        assert!((radius - geometry.stroke / 2.0 * 0.8 * 1.5).abs() < 1e-4);
    }
}
