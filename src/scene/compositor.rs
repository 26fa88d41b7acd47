use super::layers::{get_layer, LayerContext, LayerKind};
use super::{DrawCommand, Palette, SceneParams, Size};
use strum::IntoEnumIterator;

/// Builds the loading scene out of its layers.
///
/// Composing is a pure function of the frame parameters: the same [SceneParams] always yields the same commands.
#[derive(Clone, Debug)]
pub(crate) struct Compositor {
    canvas: Size,
    palette: Palette,
}

impl Compositor {
    pub(crate) fn new(canvas: Size, palette: Palette) -> Self {
        Self { canvas, palette }
    }

    /// Produce the draw commands for a frame, back to front.
    pub(crate) fn compose(&self, params: &SceneParams) -> Vec<DrawCommand> {
        let ctx = LayerContext { params, canvas: self.canvas, palette: &self.palette };
        let mut commands = Vec::new();
        for kind in LayerKind::iter() {
            get_layer(kind).draw(&ctx, &mut commands);
        }
        commands
    }
}
