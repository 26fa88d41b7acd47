use super::{Layer, LayerContext};
use crate::scene::{DrawCommand, Point, StrokeCap};

const BOLT_COUNT: usize = 8;
const BOLT_LENGTH: f32 = 120.0;

/// Energy bolts radiating from the center, flickering with the wave phase
pub(crate) struct Bolts;

impl Bolts {
    /// Bolt alpha, zero for half of each flicker cycle.
    pub(crate) fn alpha(wave_phase: f32, index: usize) -> f32 {
        0.4 * (wave_phase.to_radians() + index as f32 * 2.0).sin().max(0.0)
    }
}

impl Layer for Bolts {
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>) {
        let center = ctx.center();
        let wave_phase = ctx.params.wave_phase;
        let distance = 180.0 + ctx.progress() * 150.0;

        for i in 0..BOLT_COUNT {
            let angle = i as f32 * 45.0 + wave_phase * 0.5;
            let base = if i % 2 == 0 { ctx.palette.primary } else { ctx.palette.accent };
            out.push(DrawCommand::Line {
                start: Point::polar(center, distance, angle),
                end: Point::polar(center, distance + BOLT_LENGTH, angle),
                color: base.with_alpha(Self::alpha(wave_phase, i)),
                width: 4.0,
                cap: StrokeCap::Round,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::layers::test_support::{draw, params, CANVAS};

    #[test]
    fn bolts_radiate() {
        let commands = draw(&Bolts, &params(1.0, 90.0, 1.0));
        assert_eq!(commands.len(), BOLT_COUNT);

        let center = CANVAS.center();
        for command in &commands {
            let DrawCommand::Line { start, end, .. } = command else { panic!("not a line") };
            assert!((start.distance(center) - 330.0).abs() < 1e-2);
            assert!((end.distance(center) - 450.0).abs() < 1e-2);
        }

        // the first bolt is rotated by half the wave phase
        let DrawCommand::Line { start, .. } = &commands[0] else { panic!("not a line") };
        assert!((start.angle_from(center) - 45.0).abs() < 1e-2);
    }

    #[test]
    fn alpha_is_never_negative() {
        for phase in (0..360).step_by(5) {
            for index in 0..BOLT_COUNT {
                let alpha = Bolts::alpha(phase as f32, index);
                assert!((0.0..=0.4).contains(&alpha));
            }
        }
        assert_eq!(Bolts::alpha(270.0, 0), 0.0);
    }
}
