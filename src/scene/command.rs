use super::color::Color;
use serde::Serialize;

/// A point in logical canvas units. The y axis grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub(crate) struct Point {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Point {
    pub(crate) const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point at `radius` from `center` in the direction of `degrees`, measured clockwise from 3 o'clock.
    pub(crate) fn polar(center: Point, radius: f32, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Self::new(center.x + radius * radians.cos(), center.y + radius * radians.sin())
    }

    pub(crate) fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub(crate) fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Direction from `center` to this point, in degrees within [0, 360).
    pub(crate) fn angle_from(self, center: Point) -> f32 {
        (self.y - center.y).atan2(self.x - center.x).to_degrees().rem_euclid(360.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct Size {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Size {
    pub(crate) const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub(crate) fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub(crate) fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }

    pub(crate) fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// How a shape gets painted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Brush {
    Solid { color: Color },

    /// Colors evenly spread from `center` (first color) to `radius` (last color).
    RadialGradient { center: Point, radius: f32, colors: Vec<Color> },

    /// Colors evenly spread clockwise around `center`, starting at `rotation` degrees.
    SweepGradient { center: Point, rotation: f32, colors: Vec<Color> },
}

impl Brush {
    pub(crate) fn solid(color: Color) -> Self {
        Self::Solid { color }
    }

    /// The color this brush paints at the given logical point.
    pub(crate) fn color_at(&self, point: Point) -> Color {
        match self {
            Self::Solid { color } => *color,
            Self::RadialGradient { center, radius, colors } => {
                let t = if *radius > 0.0 { point.distance(*center) / radius } else { 1.0 };
                gradient_color(colors, t)
            }
            Self::SweepGradient { center, rotation, colors } => {
                let angle = (point.angle_from(*center) - rotation).rem_euclid(360.0);
                gradient_color(colors, angle / 360.0)
            }
        }
    }
}

fn gradient_color(colors: &[Color], t: f32) -> Color {
    match colors {
        [] => Color::BLACK.with_alpha(0.0),
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let segments = (colors.len() - 1) as f32;
            let position = t * segments;
            let index = (position.floor() as usize).min(colors.len() - 2);
            colors[index].lerp(colors[index + 1], position - index as f32)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Style {
    Fill,
    Stroke { width: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum StrokeCap {
    Butt,
    Round,
}

/// A single drawing primitive, expressed in logical canvas units.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum DrawCommand {
    FillRect {
        origin: Point,
        size: Size,
        brush: Brush,
    },
    Circle {
        center: Point,
        radius: f32,
        brush: Brush,
        style: Style,
    },
    Line {
        start: Point,
        end: Point,
        color: Color,
        width: f32,
        cap: StrokeCap,
    },
    Path {
        points: Vec<Point>,
        closed: bool,
        color: Color,
        style: Style,
        /// Ends of an open stroked path. Fills and closed outlines ignore it.
        cap: StrokeCap,
    },
    /// A stroked arc. Angles are in degrees, clockwise from 3 o'clock.
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep_angle: f32,
        brush: Brush,
        width: f32,
        cap: StrokeCap,
    },
}
