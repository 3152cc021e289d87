use glam::{IVec2, UVec2};
use image::{Rgba, RgbaImage};
use palette::Srgb;
use sprconv_image::Bitmap;

use crate::surface::Surface;

/// A [`Surface`] rasterizing into an in-memory RGBA image.
///
/// Everything outside the image is clipped. Bitmaps are composited with
/// source-over blending, so transparent sprite pixels show the checkerboard.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    target: RgbaImage,
    offset: IVec2,
    color: Rgba<u8>,
}

impl RasterSurface {
    pub const CLEAR_COLOR: Srgb<u8> = Srgb::new(255, 255, 255);

    pub fn new(size: UVec2) -> Self {
        Self::with_clear_color(size, Self::CLEAR_COLOR)
    }

    pub fn with_clear_color(size: UVec2, clear: Srgb<u8>) -> Self {
        Self {
            target: RgbaImage::from_pixel(size.x, size.y, opaque(clear)),
            offset: IVec2::ZERO,
            color: Rgba([0, 0, 0, 255]),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.target
    }

    pub fn into_image(self) -> RgbaImage {
        self.target
    }

    /// Pixel at absolute surface coordinates, ignoring translation.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.target.width() && y < self.target.height()).then(|| *self.target.get_pixel(x, y))
    }

    fn put(&mut self, p: IVec2, px: Rgba<u8>) {
        let p = p + self.offset;
        if p.x < 0 || p.y < 0 {
            return;
        }
        let (x, y) = (p.x as u32, p.y as u32);
        if x < self.target.width() && y < self.target.height() {
            self.target.put_pixel(x, y, px);
        }
    }

    fn blend(&mut self, p: IVec2, src: Rgba<u8>) {
        let p = p + self.offset;
        if p.x < 0 || p.y < 0 {
            return;
        }
        let (x, y) = (p.x as u32, p.y as u32);
        if x >= self.target.width() || y >= self.target.height() {
            return;
        }
        let dst = self.target.get_pixel_mut(x, y);
        *dst = source_over(src, *dst);
    }

    /// Clips an axis-aligned rectangle given in translated coordinates to
    /// the target, returning absolute pixel bounds `[min, max)`.
    fn clip(&self, origin: IVec2, size: UVec2) -> Option<(UVec2, UVec2)> {
        let min = (origin + self.offset).max(IVec2::ZERO);
        let max = (origin + self.offset + size.as_ivec2()).min(IVec2::new(
            self.target.width() as i32,
            self.target.height() as i32,
        ));
        (min.x < max.x && min.y < max.y).then(|| (min.as_uvec2(), max.as_uvec2()))
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> UVec2 {
        UVec2::new(self.target.width(), self.target.height())
    }

    fn translate(&mut self, offset: IVec2) {
        self.offset += offset;
    }

    fn set_color(&mut self, color: Srgb<u8>) {
        self.color = opaque(color);
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2) {
        // Bresenham, all octants.
        let d = (to - from).abs();
        let step = (to - from).signum();
        let mut err = d.x - d.y;
        let mut p = from;
        loop {
            self.put(p, self.color);
            if p == to {
                break;
            }
            let e2 = err * 2;
            if e2 > -d.y {
                err -= d.y;
                p.x += step.x;
            }
            if e2 < d.x {
                err += d.x;
                p.y += step.y;
            }
        }
    }

    fn fill_rect(&mut self, origin: IVec2, size: UVec2) {
        let Some((min, max)) = self.clip(origin, size) else {
            return;
        };
        for y in min.y..max.y {
            for x in min.x..max.x {
                self.target.put_pixel(x, y, self.color);
            }
        }
    }

    fn draw_bitmap(&mut self, origin: IVec2, bitmap: &Bitmap) {
        if self.clip(origin, bitmap.size()).is_none() {
            return;
        }
        for (x, y, px) in bitmap.pixels().enumerate_pixels() {
            self.blend(origin + IVec2::new(x as i32, y as i32), *px);
        }
    }
}

fn opaque(color: Srgb<u8>) -> Rgba<u8> {
    Rgba([color.red, color.green, color.blue, 255])
}

fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src.0[3] {
        255 => src,
        0 => dst,
        a => {
            let sa = a as u32;
            let da = dst.0[3] as u32;
            // Output alpha scaled by 255.
            let oa = sa * 255 + da * (255 - sa);
            let mut out = [0u8; 4];
            for i in 0..3 {
                let c = src.0[i] as u32 * sa * 255 + dst.0[i] as u32 * da * (255 - sa);
                out[i] = (c / oa.max(1)) as u8;
            }
            out[3] = (oa / 255) as u8;
            Rgba(out)
        }
    }
}
