use glam::{IVec2, UVec2};
use palette::Srgb;

use crate::surface::Surface;

pub const DARK_BACKGROUND: Srgb<u8> = Srgb::new(100, 100, 100);
pub const LIGHT_BACKGROUND: Srgb<u8> = Srgb::new(150, 150, 150);

/// The transparency grid drawn behind a sprite, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerGrid {
    pub cols: u32,
    pub rows: u32,
    pub cell: u32,
}

impl CheckerGrid {
    /// Covers the visible `area` of a panel whose origin sits `inset` pixels
    /// from the top-left corner. Partial cells at the far edges are included.
    pub fn fit_area(area: UVec2, inset: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        Self {
            cols: area.x.saturating_sub(inset).div_ceil(cell),
            rows: area.y.saturating_sub(inset).div_ceil(cell),
            cell,
        }
    }

    /// Covers a bitmap of `size`. Only whole cells are counted.
    pub fn fit_bitmap(size: UVec2, cell: u32) -> Self {
        let cell = cell.max(1);
        Self {
            cols: size.x / cell,
            rows: size.y / cell,
            cell,
        }
    }

    pub fn is_light(col: u32, row: u32) -> bool {
        (col + row) % 2 == 0
    }

    pub fn color_at(col: u32, row: u32) -> Srgb<u8> {
        if Self::is_light(col, row) {
            LIGHT_BACKGROUND
        } else {
            DARK_BACKGROUND
        }
    }

    pub fn pixel_size(&self) -> UVec2 {
        UVec2::new(self.cols * self.cell, self.rows * self.cell)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }

        surface.set_color(DARK_BACKGROUND);
        surface.fill_rect(IVec2::ZERO, self.pixel_size());

        surface.set_color(LIGHT_BACKGROUND);
        let cell = UVec2::splat(self.cell);
        for row in 0..self.rows {
            for col in 0..self.cols {
                if Self::is_light(col, row) {
                    surface.fill_rect((UVec2::new(col, row) * self.cell).as_ivec2(), cell);
                }
            }
        }
    }
}
