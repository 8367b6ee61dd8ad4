//! The seam between the editor and whatever paints the canvas.
//!
//! The editor never rasterizes anything itself. A surface receives a
//! [`Frame`] every time the document or an overlay changes and must be
//! able to produce a raster of its last frame on demand for export.

use thumb_core::{Bounds, Guide, ThumbnailDocument};

/// Everything a surface needs to paint one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub document: &'a ThumbnailDocument,
    /// Selection overlay box, if anything is selected.
    pub selection: Option<Bounds>,
    pub guides: &'a [Guide],
    /// Grid cell to draw, `None` when the grid is hidden.
    pub grid: Option<f32>,
    pub show_hint: bool,
}

impl<'a> Frame<'a> {
    /// A frame of the bare composition with every editing aid hidden, as
    /// it is exported.
    pub fn clean(document: &'a ThumbnailDocument) -> Self {
        Self {
            document,
            selection: None,
            guides: &[],
            grid: None,
            show_hint: false,
        }
    }

    pub fn has_overlays(&self) -> bool {
        self.selection.is_some() || !self.guides.is_empty() || self.grid.is_some() || self.show_hint
    }
}

/// An RGBA8 image, row-major, no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }
}

pub trait RenderSurface {
    fn draw(&mut self, frame: &Frame<'_>);

    /// Synchronously rasterize the last drawn frame.
    fn rasterize(&mut self) -> RasterImage;
}
