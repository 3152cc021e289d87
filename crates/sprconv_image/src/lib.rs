use std::path::Path;

use glam::UVec2;
use image::{DynamicImage, Rgba, RgbaImage};
use palette::Srgba;
use uuid::Uuid;

/// Identity tag of a [`Bitmap`]. Every constructed bitmap gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmapId(Uuid);

impl BitmapId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for BitmapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An owned RGBA raster.
#[derive(Debug, Clone)]
pub struct Bitmap {
    id: BitmapId,
    pixels: RgbaImage,
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            id: BitmapId::random(),
            pixels,
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> image::ImageResult<Self> {
        Ok(Self::from_dynamic(image::open(path)?))
    }

    pub fn from_dynamic(img: DynamicImage) -> Self {
        Self::new(img.into_rgba8())
    }

    pub fn solid(size: UVec2, color: Srgba<u8>) -> Self {
        let px = Rgba([color.red, color.green, color.blue, color.alpha]);
        Self::new(RgbaImage::from_pixel(size.x, size.y, px))
    }

    pub fn id(&self) -> BitmapId {
        self.id
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.pixels.width(), self.pixels.height())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }
}

impl From<DynamicImage> for Bitmap {
    fn from(img: DynamicImage) -> Self {
        Self::from_dynamic(img)
    }
}

impl From<RgbaImage> for Bitmap {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bitmap_gets_its_own_id() {
        let a = Bitmap::solid(UVec2::new(2, 2), Srgba::new(0, 0, 0, 255));
        let b = Bitmap::solid(UVec2::new(2, 2), Srgba::new(0, 0, 0, 255));
        assert_ne!(a.id(), b.id());

        // Clones keep the identity of their source.
        assert_eq!(a.clone().id(), a.id());
    }

    #[test]
    fn converts_dynamic_images_to_rgba() {
        let img = DynamicImage::new_rgb8(3, 5);
        let bitmap = Bitmap::from(img);
        assert_eq!(bitmap.size(), UVec2::new(3, 5));
        assert_eq!(bitmap.pixels().get_pixel(2, 4), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn solid_fills_every_pixel() {
        let bitmap = Bitmap::solid(UVec2::new(4, 3), Srgba::new(10, 20, 30, 40));
        assert_eq!((bitmap.width(), bitmap.height()), (4, 3));
        assert!(
            bitmap
                .pixels()
                .pixels()
                .all(|px| *px == Rgba([10, 20, 30, 40]))
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Bitmap::from_file("definitely/not/here.png").is_err());
    }
}
