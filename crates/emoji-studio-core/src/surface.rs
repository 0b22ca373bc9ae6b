use std::sync::Arc;

use crate::fonts::build_fontdb;
use crate::{Error, Font, Result, CANVAS_SIZE};

/// The 128×128 raster the preview and the export both paint into.
///
/// Every [`FrameBuffer::draw`] replaces the whole surface; there is no partial
/// update.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixmap: tiny_skia::Pixmap,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl FrameBuffer {
    pub fn new(font: &Font) -> Result<Self> {
        let fontdb = build_fontdb(font)?;
        Self::with_fontdb(fontdb)
    }

    pub(crate) fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Result<Self> {
        let pixmap = tiny_skia::Pixmap::new(CANVAS_SIZE, CANVAS_SIZE).ok_or_else(|| {
            Error::Render(format!("invalid pixmap size {CANVAS_SIZE}x{CANVAS_SIZE}"))
        })?;
        Ok(Self { pixmap, fontdb })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Clears the surface and rasterizes one complete SVG scene onto it.
    pub fn draw(&mut self, svg: &str) -> Result<()> {
        let mut opt = usvg::Options::default();
        opt.fontdb = Arc::clone(&self.fontdb);
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opt)
            .map_err(|err| Error::Render(format!("usvg parse: {err}")))?;

        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        let size = tree.size().to_int_size();
        let transform = if size.width() == self.pixmap.width() {
            tiny_skia::Transform::identity()
        } else {
            let scale = self.pixmap.width() as f32 / size.width().max(1) as f32;
            tiny_skia::Transform::from_scale(scale, scale)
        };
        let mut pixmap_mut = self.pixmap.as_mut();
        resvg::render(&tree, transform, &mut pixmap_mut);
        Ok(())
    }

    /// Straight-alpha RGBA copy of the current pixels.
    pub fn snapshot_rgba(&self) -> Vec<u8> {
        unpremultiply_rgba(self.pixmap.data())
    }
}

pub(crate) fn unpremultiply_rgba(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for chunk in data.chunks_exact(4) {
        let a = chunk[3] as u16;
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let r = ((chunk[0] as u16 * 255 + a / 2) / a) as u8;
        let g = ((chunk[1] as u16 * 255 + a / 2) / a) as u8;
        let b = ((chunk[2] as u16 * 255 + a / 2) / a) as u8;
        out.extend_from_slice(&[r, g, b, chunk[3]]);
    }
    out
}
