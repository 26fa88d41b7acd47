mod aurora;
mod backdrop;
mod bolts;
mod emblems;
mod energy_rings;
mod hexagons;
mod particles;
mod progress_ring;

pub(crate) use progress_ring::progress_ring_geometry;

use super::{DrawCommand, Palette, Point, SceneParams, Size};
use strum::{Display, EnumIter};

/// Context passed to every layer while composing a frame
#[derive(Debug, Clone, Copy)]
pub(crate) struct LayerContext<'a> {
    /// The animation and progress snapshot for this frame
    pub params: &'a SceneParams,
    /// Canvas size in logical units
    pub canvas: Size,
    pub palette: &'a Palette,
}

impl LayerContext<'_> {
    pub(crate) fn width(&self) -> f32 {
        self.canvas.width
    }

    pub(crate) fn height(&self) -> f32 {
        self.canvas.height
    }

    pub(crate) fn center(&self) -> Point {
        self.canvas.center()
    }

    pub(crate) fn progress(&self) -> f32 {
        self.params.clamped_progress()
    }
}

/// Trait for background layers
pub(crate) trait Layer {
    /// Append this layer's primitives for the current frame
    fn draw(&self, ctx: &LayerContext, out: &mut Vec<DrawCommand>);
}

/// The layers of the loading scene, in back to front order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum LayerKind {
    Backdrop,
    EnergyRings,
    Emblems,
    Bolts,
    Particles,
    Hexagons,
    Aurora,
    ProgressRing,
}

/// Get the layer implementation for a given kind
pub(crate) fn get_layer(kind: LayerKind) -> Box<dyn Layer> {
    match kind {
        LayerKind::Backdrop => Box::new(backdrop::Backdrop),
        LayerKind::EnergyRings => Box::new(energy_rings::EnergyRings),
        LayerKind::Emblems => Box::new(emblems::Emblems),
        LayerKind::Bolts => Box::new(bolts::Bolts),
        LayerKind::Particles => Box::new(particles::Particles),
        LayerKind::Hexagons => Box::new(hexagons::Hexagons),
        LayerKind::Aurora => Box::new(aurora::Aurora),
        LayerKind::ProgressRing => Box::new(progress_ring::ProgressRing),
    }
}
