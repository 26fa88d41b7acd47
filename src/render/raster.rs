use crate::scene::{Brush, Color, DrawCommand, Point, Style, StrokeCap};

/// Thinnest stroke the rasterizer draws, in pixels.
const MIN_STROKE: f32 = 1.0;

/// An opaque RGB pixel with float channels in [0, 255].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Pixel {
    pub(crate) r: f32,
    pub(crate) g: f32,
    pub(crate) b: f32,
}

impl Pixel {
    pub(crate) fn to_color(self) -> Color {
        let channel = |value: f32| value.round().clamp(0.0, 255.0) as u8;
        Color::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Source over compositing of `color`, scaled by `coverage`.
    fn blend(&mut self, color: Color, coverage: f32) {
        let alpha = (color.alpha * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        self.r += (color.r as f32 - self.r) * alpha;
        self.g += (color.g as f32 - self.g) * alpha;
        self.b += (color.b as f32 - self.b) * alpha;
    }
}

/// Pixel bounds of a shape, inclusive on both ends.
struct Bounds {
    left: usize,
    top: usize,
    right: usize,
    bottom: usize,
}

/// A grid of RGB pixels that draw commands get painted onto.
#[derive(Clone, Debug)]
pub(crate) struct PixelCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelCanvas {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![Pixel::default(); width * height] }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    /// The pixel at a position, black when out of bounds.
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Pixel {
        if x < self.width && y < self.height { self.pixels[y * self.width + x] } else { Pixel::default() }
    }

    /// Paint commands in order. `scale` converts logical units into pixels.
    pub(crate) fn paint(&mut self, commands: &[DrawCommand], scale: f32) {
        for command in commands {
            self.paint_command(command, scale);
        }
    }

    fn paint_command(&mut self, command: &DrawCommand, scale: f32) {
        match command {
            DrawCommand::FillRect { origin, size, brush } => {
                let left = origin.x * scale;
                let top = origin.y * scale;
                let right = left + size.width * scale;
                let bottom = top + size.height * scale;
                self.cover(left, top, right, bottom, brush, scale, |p| {
                    let horizontal = (p.x - left + 0.5).min(right - p.x + 0.5).clamp(0.0, 1.0);
                    let vertical = (p.y - top + 0.5).min(bottom - p.y + 0.5).clamp(0.0, 1.0);
                    horizontal * vertical
                });
            }
            DrawCommand::Circle { center, radius, brush, style } => {
                let center = scaled(*center, scale);
                let radius = radius * scale;
                match style {
                    Style::Fill => {
                        self.cover_around(center, radius + 1.0, brush, scale, |p| {
                            coverage(radius - p.distance(center))
                        });
                    }
                    Style::Stroke { width } => {
                        let half = stroke_width(*width, scale) / 2.0;
                        self.cover_around(center, radius + half + 1.0, brush, scale, |p| {
                            coverage(half - (p.distance(center) - radius).abs())
                        });
                    }
                }
            }
            DrawCommand::Line { start, end, color, width, cap } => {
                let segment = [scaled(*start, scale), scaled(*end, scale)];
                let half = stroke_width(*width, scale) / 2.0;
                self.stroke_polyline(&segment, half, *cap, &Brush::solid(*color), scale);
            }
            DrawCommand::Path { points, closed, color, style, cap } => {
                let mut points: Vec<Point> = points.iter().map(|point| scaled(*point, scale)).collect();
                let brush = Brush::solid(*color);
                match style {
                    Style::Fill => self.fill_polygon(&points, &brush, scale),
                    Style::Stroke { width } => {
                        if *closed {
                            if let Some(first) = points.first().copied() {
                                points.push(first);
                            }
                        }
                        let half = stroke_width(*width, scale) / 2.0;
                        self.stroke_polyline(&points, half, *cap, &brush, scale);
                    }
                }
            }
            DrawCommand::Arc { center, radius, start_angle, sweep_angle, brush, width, cap } => {
                let center = scaled(*center, scale);
                let radius = radius * scale;
                let half = stroke_width(*width, scale) / 2.0;
                self.stroke_arc(center, radius, *start_angle, *sweep_angle, half, *cap, brush, scale);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn stroke_arc(
        &mut self,
        center: Point,
        radius: f32,
        start: f32,
        sweep: f32,
        half: f32,
        cap: StrokeCap,
        brush: &Brush,
        scale: f32,
    ) {
        if sweep == 0.0 || !sweep.is_finite() {
            return;
        }
        // negative sweeps run counter clockwise, flip them around
        let (start, sweep) = if sweep < 0.0 { (start + sweep, -sweep) } else { (start, sweep) };
        let full_circle = sweep >= 360.0;
        let first = Point::polar(center, radius, start);
        let last = Point::polar(center, radius, start + sweep);

        self.cover_around(center, radius + half + 1.0, brush, scale, |p| {
            let angle = (p.angle_from(center) - start).rem_euclid(360.0);
            let body =
                if full_circle || angle <= sweep { coverage(half - (p.distance(center) - radius).abs()) } else { 0.0 };
            let caps = match cap {
                StrokeCap::Round if !full_circle => coverage(half - p.distance(first).min(p.distance(last))),
                _ => 0.0,
            };
            body.max(caps)
        });
    }

    /// Stroke connected segments, covering every pixel once so joints don't get painted twice.
    fn stroke_polyline(&mut self, points: &[Point], half: f32, cap: StrokeCap, brush: &Brush, scale: f32) {
        let Some(bounds) = polygon_bounds(points, half + 1.0) else {
            return;
        };
        let (left, top, right, bottom) = bounds;
        let last_segment = points.len().saturating_sub(2);
        // a closed outline has no outer ends to trim
        let open = points.first() != points.last();
        self.cover(left, top, right, bottom, brush, scale, |p| {
            let mut best: f32 = 0.0;
            for (index, pair) in points.windows(2).enumerate() {
                let (distance, along) = segment_distance(p, pair[0], pair[1]);
                // butt caps only trim the outer ends of the polyline
                let trimmed = open
                    && matches!(cap, StrokeCap::Butt)
                    && ((index == 0 && along < 0.0) || (index == last_segment && along > 1.0));
                if !trimmed {
                    best = best.max(coverage(half - distance));
                }
            }
            best
        });
    }

    /// Even-odd polygon fill, sampled at four points per pixel.
    fn fill_polygon(&mut self, points: &[Point], brush: &Brush, scale: f32) {
        if points.len() < 3 {
            return;
        }
        let Some((left, top, right, bottom)) = polygon_bounds(points, 1.0) else {
            return;
        };
        const SAMPLES: [(f32, f32); 4] = [(-0.25, -0.25), (0.25, -0.25), (-0.25, 0.25), (0.25, 0.25)];
        self.cover(left, top, right, bottom, brush, scale, |p| {
            let inside = SAMPLES.iter().filter(|(dx, dy)| contains(points, p.offset(*dx, *dy))).count();
            inside as f32 / SAMPLES.len() as f32
        });
    }

    fn cover_around<F>(&mut self, center: Point, reach: f32, brush: &Brush, scale: f32, coverage: F)
    where
        F: Fn(Point) -> f32,
    {
        self.cover(center.x - reach, center.y - reach, center.x + reach, center.y + reach, brush, scale, coverage);
    }

    /// Blend `brush` over every pixel in the given pixel space box, weighted by `coverage` at the pixel center.
    #[allow(clippy::too_many_arguments)]
    fn cover<F>(&mut self, left: f32, top: f32, right: f32, bottom: f32, brush: &Brush, scale: f32, coverage: F)
    where
        F: Fn(Point) -> f32,
    {
        let Some(bounds) = self.clip(left, top, right, bottom) else {
            return;
        };
        for y in bounds.top..=bounds.bottom {
            for x in bounds.left..=bounds.right {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let amount = coverage(center);
                if amount <= 0.0 {
                    continue;
                }
                let color = match brush {
                    Brush::Solid { color } => *color,
                    _ => brush.color_at(Point::new(center.x / scale, center.y / scale)),
                };
                self.pixels[y * self.width + x].blend(color, amount);
            }
        }
    }

    fn clip(&self, left: f32, top: f32, right: f32, bottom: f32) -> Option<Bounds> {
        if self.width == 0 || self.height == 0 || !(left.is_finite() && top.is_finite()) {
            return None;
        }
        if !(right.is_finite() && bottom.is_finite()) || right < 0.0 || bottom < 0.0 {
            return None;
        }
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        if left > max_x + 1.0 || top > max_y + 1.0 {
            return None;
        }
        Some(Bounds {
            left: left.floor().clamp(0.0, max_x) as usize,
            top: top.floor().clamp(0.0, max_y) as usize,
            right: right.ceil().clamp(0.0, max_x) as usize,
            bottom: bottom.ceil().clamp(0.0, max_y) as usize,
        })
    }
}

fn scaled(point: Point, scale: f32) -> Point {
    Point::new(point.x * scale, point.y * scale)
}

fn stroke_width(width: f32, scale: f32) -> f32 {
    (width * scale).max(MIN_STROKE)
}

/// Coverage of a pixel whose center lies `depth` pixels inside a shape edge.
fn coverage(depth: f32) -> f32 {
    (depth + 0.5).clamp(0.0, 1.0)
}

/// Distance from `p` to the segment, plus where the projection of `p` falls along it (0 at `a`, 1 at `b`).
fn segment_distance(p: Point, a: Point, b: Point) -> (f32, f32) {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length = dx * dx + dy * dy;
    if length == 0.0 {
        return (p.distance(a), 0.0);
    }
    let along = ((p.x - a.x) * dx + (p.y - a.y) * dy) / length;
    let t = along.clamp(0.0, 1.0);
    (p.distance(Point::new(a.x + dx * t, a.y + dy * t)), along)
}

fn polygon_bounds(points: &[Point], margin: f32) -> Option<(f32, f32, f32, f32)> {
    let first = points.first()?;
    let mut bounds = (first.x, first.y, first.x, first.y);
    for point in points {
        bounds.0 = bounds.0.min(point.x);
        bounds.1 = bounds.1.min(point.y);
        bounds.2 = bounds.2.max(point.x);
        bounds.3 = bounds.3.max(point.y);
    }
    Some((bounds.0 - margin, bounds.1 - margin, bounds.2 + margin, bounds.3 + margin))
}

/// Even-odd point in polygon test.
fn contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut previous = points[points.len() - 1];
    for &current in points {
        if (current.y > p.y) != (previous.y > p.y) {
            let x = previous.x + (p.y - previous.y) / (current.y - previous.y) * (current.x - previous.x);
            if p.x < x {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Size;
    use rstest::rstest;

    const RED: Color = Color::new(255, 0, 0);

    fn canvas() -> PixelCanvas {
        PixelCanvas::new(20, 20)
    }

    #[test]
    fn fill_rect_covers_its_area() {
        let mut canvas = canvas();
        let rect =
            DrawCommand::FillRect { origin: Point::new(2.0, 2.0), size: Size::new(4.0, 4.0), brush: Brush::solid(RED) };
        canvas.paint(&[rect], 1.0);
        assert_eq!(canvas.pixel(3, 3).to_color(), RED);
        assert_eq!(canvas.pixel(10, 10).to_color(), Color::BLACK);
    }

    #[test]
    fn source_over_blending() {
        let mut canvas = canvas();
        let brush = Brush::solid(Color::WHITE.with_alpha(0.5));
        let rect = DrawCommand::FillRect { origin: Point::default(), size: Size::new(20.0, 20.0), brush };
        canvas.paint(&[rect.clone()], 1.0);
        assert_eq!(canvas.pixel(5, 5).to_color(), Color::new(128, 128, 128));

        canvas.paint(&[rect], 1.0);
        assert_eq!(canvas.pixel(5, 5).to_color(), Color::new(191, 191, 191));
    }

    #[test]
    fn filled_circle_edges_are_antialiased() {
        let mut canvas = canvas();
        let circle = DrawCommand::Circle {
            center: Point::new(10.0, 10.0),
            radius: 5.0,
            brush: Brush::solid(Color::WHITE),
            style: Style::Fill,
        };
        canvas.paint(&[circle], 1.0);
        assert_eq!(canvas.pixel(10, 10).to_color(), Color::WHITE);
        assert_eq!(canvas.pixel(0, 0).to_color(), Color::BLACK);

        // a pixel straddling the edge gets partial coverage
        let edge = canvas.pixel(14, 12).to_color();
        assert!(edge.r > 0 && edge.r < 255, "{edge:?}");
    }

    #[test]
    fn stroked_circle_leaves_the_inside_empty() {
        let mut canvas = canvas();
        let ring = DrawCommand::Circle {
            center: Point::new(10.0, 10.0),
            radius: 6.0,
            brush: Brush::solid(Color::WHITE),
            style: Style::Stroke { width: 2.0 },
        };
        canvas.paint(&[ring], 1.0);
        assert_eq!(canvas.pixel(10, 10).to_color(), Color::BLACK);
        assert_eq!(canvas.pixel(15, 9).to_color(), Color::WHITE);
    }

    #[test]
    fn thin_strokes_stay_visible() {
        let mut canvas = canvas();
        let line = DrawCommand::Line {
            start: Point::new(0.0, 100.0),
            end: Point::new(200.0, 100.0),
            color: Color::WHITE,
            width: 1.0,
            cap: StrokeCap::Butt,
        };
        // one logical unit is a tenth of a pixel here
        canvas.paint(&[line], 0.1);
        assert!(canvas.pixel(5, 9).to_color().r > 0 || canvas.pixel(5, 10).to_color().r > 0);
    }

    #[rstest]
    #[case::butt(StrokeCap::Butt, false)]
    #[case::round(StrokeCap::Round, true)]
    fn line_caps(#[case] cap: StrokeCap, #[case] painted_past_end: bool) {
        let mut canvas = canvas();
        let line = DrawCommand::Line {
            start: Point::new(5.0, 10.0),
            end: Point::new(15.0, 10.0),
            color: Color::WHITE,
            width: 6.0,
            cap,
        };
        canvas.paint(&[line], 1.0);
        assert_eq!(canvas.pixel(10, 10).to_color(), Color::WHITE);
        assert_eq!(canvas.pixel(16, 9).to_color() != Color::BLACK, painted_past_end);
    }

    #[test]
    fn closed_outline_corners_match() {
        let mut canvas = canvas();
        let square = DrawCommand::Path {
            points: vec![Point::new(5.0, 5.0), Point::new(15.0, 5.0), Point::new(15.0, 15.0), Point::new(5.0, 15.0)],
            closed: true,
            color: Color::WHITE,
            style: Style::Stroke { width: 4.0 },
            cap: StrokeCap::Butt,
        };
        canvas.paint(&[square], 1.0);
        // the corner where the outline starts and ends isn't trimmed like an open end
        assert_ne!(canvas.pixel(3, 3).to_color(), Color::BLACK);
        assert_eq!(canvas.pixel(3, 3), canvas.pixel(16, 16));
    }

    #[test]
    fn arc_only_covers_its_sweep() {
        let mut canvas = canvas();
        let arc = DrawCommand::Arc {
            center: Point::new(10.0, 10.0),
            radius: 7.0,
            start_angle: -90.0,
            sweep_angle: 90.0,
            brush: Brush::solid(Color::WHITE),
            width: 2.0,
            cap: StrokeCap::Butt,
        };
        canvas.paint(&[arc], 1.0);
        // the quarter from 12 o'clock to 3 o'clock
        assert_eq!(canvas.pixel(14, 4).to_color(), Color::WHITE);
        // 6 o'clock and 9 o'clock stay untouched
        assert_eq!(canvas.pixel(10, 17).to_color(), Color::BLACK);
        assert_eq!(canvas.pixel(2, 10).to_color(), Color::BLACK);
    }

    #[test]
    fn empty_arc_draws_nothing() {
        let mut canvas = canvas();
        let arc = DrawCommand::Arc {
            center: Point::new(10.0, 10.0),
            radius: 7.0,
            start_angle: -90.0,
            sweep_angle: 0.0,
            brush: Brush::solid(Color::WHITE),
            width: 4.0,
            cap: StrokeCap::Round,
        };
        canvas.paint(&[arc], 1.0);
        assert!((0..20).all(|y| (0..20).all(|x| canvas.pixel(x, y).to_color() == Color::BLACK)));
    }

    #[test]
    fn even_odd_fill() {
        // a square wound twice: the overlap is filled an even number of times
        let square = [Point::new(2.0, 2.0), Point::new(18.0, 2.0), Point::new(18.0, 18.0), Point::new(2.0, 18.0)];
        let inner = [Point::new(6.0, 6.0), Point::new(14.0, 6.0), Point::new(14.0, 14.0), Point::new(6.0, 14.0)];
        let points: Vec<Point> =
            square.iter().chain(square.first()).chain(inner.iter()).chain(inner.first()).copied().collect();

        let mut canvas = canvas();
        let path =
            DrawCommand::Path { points, closed: true, color: Color::WHITE, style: Style::Fill, cap: StrokeCap::Butt };
        canvas.paint(&[path], 1.0);
        assert_eq!(canvas.pixel(3, 10).to_color(), Color::WHITE);
        assert_eq!(canvas.pixel(10, 10).to_color(), Color::BLACK);
    }

    #[test]
    fn off_canvas_shapes_are_ignored() {
        let mut canvas = canvas();
        let circle = DrawCommand::Circle {
            center: Point::new(-100.0, -100.0),
            radius: 5.0,
            brush: Brush::solid(Color::WHITE),
            style: Style::Fill,
        };
        canvas.paint(&[circle], 1.0);
        assert_eq!(canvas.pixel(0, 0).to_color(), Color::BLACK);
    }
}
