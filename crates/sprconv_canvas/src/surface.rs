use glam::{IVec2, UVec2};
use palette::Srgb;
use sprconv_image::Bitmap;

/// A 2D drawing target the panel paints into.
///
/// All positions are relative to the current translation, which starts at the
/// top-left corner of the surface.
pub trait Surface {
    /// Visible size of the surface in pixels, independent of translation.
    fn size(&self) -> UVec2;

    /// Moves the origin by `offset`. Translations accumulate.
    fn translate(&mut self, offset: IVec2);

    fn set_color(&mut self, color: Srgb<u8>);

    /// Draws a one pixel wide line, both endpoints included.
    fn draw_line(&mut self, from: IVec2, to: IVec2);

    fn fill_rect(&mut self, origin: IVec2, size: UVec2);

    fn draw_bitmap(&mut self, origin: IVec2, bitmap: &Bitmap);
}

#[cfg(test)]
pub(crate) mod recording {
    use sprconv_image::BitmapId;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum DrawOp {
        Translate(IVec2),
        Color(Srgb<u8>),
        Line(IVec2, IVec2),
        Rect(IVec2, UVec2),
        Bitmap(IVec2, BitmapId),
    }

    /// Records draw calls instead of rasterizing them.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub size: UVec2,
        pub ops: Vec<DrawOp>,
    }

    impl RecordingSurface {
        pub fn new(size: UVec2) -> Self {
            Self {
                size,
                ops: Vec::new(),
            }
        }

        pub fn bitmaps(&self) -> Vec<BitmapId> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Bitmap(_, id) => Some(*id),
                    _ => None,
                })
                .collect()
        }

        /// Rectangles together with the color that was active when drawn.
        pub fn colored_rects(&self) -> Vec<(Srgb<u8>, IVec2, UVec2)> {
            let mut color = Srgb::new(0, 0, 0);
            let mut rects = Vec::new();
            for op in &self.ops {
                match op {
                    DrawOp::Color(c) => color = *c,
                    DrawOp::Rect(origin, size) => rects.push((color, *origin, *size)),
                    _ => {}
                }
            }
            rects
        }
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> UVec2 {
            self.size
        }

        fn translate(&mut self, offset: IVec2) {
            self.ops.push(DrawOp::Translate(offset));
        }

        fn set_color(&mut self, color: Srgb<u8>) {
            self.ops.push(DrawOp::Color(color));
        }

        fn draw_line(&mut self, from: IVec2, to: IVec2) {
            self.ops.push(DrawOp::Line(from, to));
        }

        fn fill_rect(&mut self, origin: IVec2, size: UVec2) {
            self.ops.push(DrawOp::Rect(origin, size));
        }

        fn draw_bitmap(&mut self, origin: IVec2, bitmap: &Bitmap) {
            self.ops.push(DrawOp::Bitmap(origin, bitmap.id()));
        }
    }
}
