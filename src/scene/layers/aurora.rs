use super::{Layer, LayerContext};
use crate::scene::{DrawCommand, Point, StrokeCap, Style};

const BAND_COUNT: usize = 4;

/// Horizontal distance between two samples of a band.
const SAMPLE_STEP: usize = 15;

/// Aurora layer - Northern lights bands flowing along the bottom of the canvas
pub(crate) struct Aurora;

impl Aurora {
    /// Band alpha: a steady base plus a shimmer that only ever brightens.
    pub(crate) fn alpha(time: f32, band: usize) -> f32 {
        0.15 + 0.15 * (time + band as f32 * 90.0).to_radians().sin().max(0.0)
    }

    /// The band's polyline, starting on its baseline at the left edge.
    pub(crate) fn band(width: f32, height: f32, time: f32, band: usize) -> Vec<Point> {
        let amplitude = height * 0.12;
        let baseline = height * 0.75 + band as f32 * 40.0;

        let mut points = vec![Point::new(0.0, baseline)];
        let last = width.max(0.0) as usize;
        for x in (0..=last).step_by(SAMPLE_STEP) {
            // two slow wave fronts: one across x, one across time, shifted per band
            let phase = x as f32 * 0.008 + time * 0.015 + band as f32 * 3.0;
            points.push(Point::new(x as f32, baseline + (phase * std::f32::consts::PI).sin() * amplitude));
        }
        points
    }
}

impl Layer for Aurora {
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>) {
        let time = ctx.params.wave_phase;
        for i in 0..BAND_COUNT {
            out.push(DrawCommand::Path {
                points: Self::band(ctx.width(), ctx.height(), time, i),
                closed: false,
                color: ctx.palette.cycle(i).with_alpha(Self::alpha(time, i)),
                style: Style::Stroke { width: 4.0 },
                cap: StrokeCap::Round,
            });
        }
    }
}
