use crate::{
    animation::AnimationClock,
    progress::{ProgressDriver, ProgressPlan, ProgressState},
    render::{poll_key, screen_size, CellGrid, KeyAction, RenderError, Terminal, Viewport},
    scene::{progress_ring_geometry, Color, Compositor, DrawCommand, Palette, Point, SceneParams, Size},
};
use std::{
    cell::Cell,
    io::Write,
    time::{Duration, Instant},
};
use tracing::{debug, info};

const TITLE: &str = "Heroic Analysis";

/// Fastest playback `--speed` accepts.
pub(crate) const MAX_SPEED: f32 = 100.0;

/// Widest the progress bar gets, in cells.
const MAX_BAR_WIDTH: usize = 40;

/// How the loading screen ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoadingOutcome {
    /// Every phase played out, carrying the month the screen was started with.
    Finished(i32),
    Abandoned,
}

/// Everything needed to draw the loading screen at any point in time
pub(crate) struct LoadingScene {
    clock: AnimationClock,
    palette: Palette,
    logical_width: f32,
}

impl LoadingScene {
    pub(crate) fn new(clock: AnimationClock, palette: Palette, logical_width: f32) -> Self {
        Self { clock, palette, logical_width }
    }

    /// The frame parameters at `elapsed` since the scene started.
    pub(crate) fn params(&self, elapsed: Duration, state: &ProgressState) -> SceneParams {
        SceneParams::new(&self.clock.sample(elapsed), state.fraction)
    }

    /// The background and ring draw commands for a canvas of the given logical size.
    pub(crate) fn commands(&self, params: &SceneParams, canvas: Size) -> Vec<DrawCommand> {
        Compositor::new(canvas, self.palette.clone()).compose(params)
    }

    /// Build the full frame for a terminal of the given size.
    pub(crate) fn frame(
        &self,
        elapsed: Duration,
        state: &ProgressState,
        plan: &ProgressPlan,
        columns: u16,
        rows: u16,
    ) -> CellGrid {
        let viewport = Viewport::fit(columns, rows, self.logical_width);
        let params = self.params(elapsed, state);
        let mut grid = viewport.rasterize(&self.commands(&params, viewport.logical_size()));
        self.stamp_overlays(&mut grid, &viewport, state, plan);
        grid
    }

    fn stamp_overlays(&self, grid: &mut CellGrid, viewport: &Viewport, state: &ProgressState, plan: &ProgressPlan) {
        let geometry = progress_ring_geometry(viewport.logical_size());
        let radius = geometry.diameter / 2.0;
        let (_, center_row) = viewport.cell_at(geometry.center);
        let (_, top_row) = viewport.cell_at(Point::new(geometry.center.x, geometry.center.y - radius));
        let (_, bottom_row) = viewport.cell_at(Point::new(geometry.center.x, geometry.center.y + radius));
        let text = self.palette.text_primary;

        grid.put_centered(top_row.saturating_sub(2), TITLE, text);
        grid.put_centered(center_row, &percentage(state.fraction), text);
        grid.put_centered(bottom_row + 2, plan.label(state.phase_index), self.palette.text_secondary);

        let bar_width = MAX_BAR_WIDTH.min(grid.columns() * 3 / 5);
        let bar_row = bottom_row + 4;
        let start = grid.columns().saturating_sub(bar_width) / 2;
        let filled = ((state.fraction.clamp(0.0, 1.0) * bar_width as f32).round() as usize).min(bar_width);
        let dim = self.palette.text_secondary.darken(0.6);
        grid.put_text(start, bar_row, &"━".repeat(filled), self.palette.accent);
        grid.put_text(start + filled, bar_row, &"━".repeat(bar_width - filled), dim);

        let phases = plan.phases().len();
        let dots_width = phases * 2 - 1;
        let mut column = grid.columns().saturating_sub(dots_width) / 2;
        for index in 0..phases {
            if index > 0 {
                grid.put_text(column - 1, bar_row + 2, " ", dim);
            }
            let color = step_color(&self.palette, index, state.phase_index, dim);
            grid.put_text(column, bar_row + 2, "●", color);
            column += 2;
        }
    }
}

fn step_color(palette: &Palette, step: usize, current: usize, pending: Color) -> Color {
    match step.cmp(&current) {
        std::cmp::Ordering::Less => palette.accent,
        std::cmp::Ordering::Equal => palette.primary,
        std::cmp::Ordering::Greater => pending,
    }
}

/// `elapsed` played back at `speed`, saturating instead of overflowing.
fn scaled(elapsed: Duration, speed: f32) -> Duration {
    Duration::try_from_secs_f64(elapsed.as_secs_f64() * speed as f64).unwrap_or(Duration::MAX)
}

/// Whole percent shown in the middle of the ring, rounded down.
pub(crate) fn percentage(fraction: f32) -> String {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    format!("{}%", (fraction * 100.0).floor() as u32)
}

/// Plays the loading sequence on a terminal until it finishes or the user leaves
pub(crate) struct LoadingScreen<'a> {
    scene: &'a LoadingScene,
    frame_interval: Duration,
    speed: f32,
}

impl<'a> LoadingScreen<'a> {
    pub(crate) fn new(scene: &'a LoadingScene, frame_interval: Duration, speed: f32) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 { speed.min(MAX_SPEED) } else { 1.0 };
        Self { scene, frame_interval, speed }
    }

    pub(crate) fn run<W: Write>(
        &self,
        terminal: &mut Terminal<W>,
        plan: ProgressPlan,
        month: i32,
    ) -> Result<LoadingOutcome, RenderError> {
        let finished = Cell::new(None);
        let mut driver = ProgressDriver::new(plan, month, |month| finished.set(Some(month)));
        let start = Instant::now();
        let mut frames = 0_u64;
        info!("loading screen started for month {month}, {:?} at speed {}", driver.plan().total_duration(), self.speed);

        loop {
            let elapsed = scaled(start.elapsed(), self.speed);
            let state = driver.advance(elapsed);
            if let Some(month) = finished.get() {
                info!("loading screen finished after {frames} frames");
                return Ok(LoadingOutcome::Finished(month));
            }

            // the size is read every frame so resizes show up right away
            let (columns, rows) = screen_size()?;
            let grid = self.scene.frame(elapsed, &state, driver.plan(), columns, rows);
            terminal.draw(&grid)?;
            frames += 1;

            if let Some(KeyAction::Abandon) = poll_key(self.frame_interval)? {
                info!("loading screen abandoned at {:.0}%", state.fraction * 100.0);
                return Ok(LoadingOutcome::Abandoned);
            }
            if frames % 120 == 0 {
                debug!("frame {frames}, phase {} at {:.2}", state.phase_index, state.fraction);
            }
        }
    }
}
