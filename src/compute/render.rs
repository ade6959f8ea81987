//! Renderer callback interface.

use std::convert::Infallible;

use super::{Board, Overlay};
use crate::schema::{PatternCatalog, Rgb};

/// Read-only view of a completed generation handed to a [`FrameRenderer`].
///
/// The buffers are reused from the next generation on, so a renderer must
/// copy out anything it wants to keep.
pub struct Frame<'a> {
    /// Generation number of this frame (1 for the first computed generation).
    pub generation: u64,
    /// Cells of this generation.
    pub board: &'a Board,
    /// Pattern tags for this generation.
    pub overlay: &'a Overlay,
    /// Catalog the tags refer to.
    pub catalog: &'a PatternCatalog,
}

impl Frame<'_> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.board.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.board.height()
    }

    /// Display color of a live cell, `None` for dead cells.
    ///
    /// Untagged live cells are white; tagged cells use the pattern color.
    pub fn color_at(&self, index: usize) -> Option<Rgb> {
        if self.board.load(index) == 0 {
            return None;
        }
        match self.overlay.load(index) {
            0 => Some(Rgb(255, 255, 255)),
            tag => Some(self.catalog.color_for(tag)),
        }
    }
}

/// Consumer of completed generations.
pub trait FrameRenderer {
    type Error;

    /// Called once per generation after pattern detection and before the swap.
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}

impl<F> FrameRenderer for F
where
    F: FnMut(&Frame<'_>),
{
    type Error = Infallible;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        self(frame);
        Ok(())
    }
}

/// Renderer that discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl FrameRenderer for NullRenderer {
    type Error = Infallible;

    fn render(&mut self, _frame: &Frame<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}
