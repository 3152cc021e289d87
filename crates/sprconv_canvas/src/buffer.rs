use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use glam::{IVec2, UVec2};
use palette::Srgb;
use parking_lot::Mutex;
use sprconv_image::{Bitmap, BitmapId};

use crate::{checker::CheckerGrid, config::PanelConfig, error::BufferError, surface::Surface};

/// Hook into the hosting panel, asking it to schedule another paint pass.
pub trait RepaintRequest: Send + Sync + 'static {
    fn request_repaint(&self, delay: Duration);
}

impl<F> RepaintRequest for F
where
    F: Fn(Duration) + Send + Sync + 'static,
{
    fn request_repaint(&self, delay: Duration) {
        self(delay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    Drawn(BitmapId),
    Empty,
    /// The image guard could not be acquired in time. A repaint was requested.
    Deferred,
}

/// The optional bitmap shown by an image panel.
///
/// Writers (`set`, `remove`) may run on any thread and block on the guard.
/// `paint` runs on the rendering thread and never waits longer than the
/// configured lock timeout.
pub struct ImageBuffer {
    current: Mutex<Option<Bitmap>>,
    repaint: Arc<dyn RepaintRequest>,
    config: PanelConfig,
    /// Consecutive paint passes that failed to acquire `current`.
    deferrals: AtomicU32,
}

impl ImageBuffer {
    /// Offset of the drawing origin from the top-left corner of the panel.
    pub const ORIGIN_INSET: i32 = 10;
    /// Space kept around the bitmap by `preferred_size`, two checker cells.
    pub const PREFERRED_MARGIN: u32 = 16;
    pub const CHECKER_CELL: u32 = 16;
    pub const ORIGIN_COLOR: Srgb<u8> = Srgb::new(0, 0, 0);

    pub fn new(repaint: impl RepaintRequest) -> Self {
        Self::with_config(repaint, PanelConfig::default())
    }

    pub fn with_config(repaint: impl RepaintRequest, config: PanelConfig) -> Self {
        Self {
            current: Mutex::new(None),
            repaint: Arc::new(repaint),
            config,
            deferrals: AtomicU32::new(0),
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn set(&self, bitmap: Bitmap) {
        let (id, size) = (bitmap.id(), bitmap.size());
        let previous = self.current.lock().replace(bitmap);
        drop(previous);

        log::info!("Image set to {} ({}x{})", id, size.x, size.y);
        self.repaint.request_repaint(Duration::ZERO);
    }

    /// Like [`set`](Self::set), rejecting an absent bitmap. Clearing the
    /// buffer goes through [`remove`](Self::remove).
    pub fn try_set(&self, bitmap: Option<Bitmap>) -> Result<(), BufferError> {
        let bitmap = bitmap.ok_or(BufferError::InvalidArgument)?;
        self.set(bitmap);
        Ok(())
    }

    pub fn remove(&self) {
        let previous = self.current.lock().take();
        if let Some(previous) = previous {
            log::info!("Image {} removed", previous.id());
        }
        self.repaint.request_repaint(Duration::ZERO);
    }

    pub fn is_empty(&self) -> bool {
        self.current.lock().is_none()
    }

    pub fn current_id(&self) -> Option<BitmapId> {
        self.current.lock().as_ref().map(Bitmap::id)
    }

    /// Bitmap size plus a margin on every side, or `minimum` when empty.
    pub fn preferred_size(&self, minimum: UVec2) -> UVec2 {
        match self.current.lock().as_ref() {
            Some(bitmap) => bitmap.size() + UVec2::splat(Self::PREFERRED_MARGIN * 2),
            None => minimum,
        }
    }

    pub fn preferred_size_or_min(&self) -> UVec2 {
        self.preferred_size(self.config.min_size())
    }

    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S) -> PaintOutcome {
        let inset = IVec2::splat(Self::ORIGIN_INSET);
        let area = surface.size();

        surface.translate(inset);
        draw_origin(surface, area, Self::ORIGIN_INSET);
        let outcome = self.paint_image(surface, area);
        surface.translate(-inset);

        outcome
    }

    fn paint_image<S: Surface + ?Sized>(&self, surface: &mut S, area: UVec2) -> PaintOutcome {
        let area_grid =
            CheckerGrid::fit_area(area, Self::ORIGIN_INSET as u32, Self::CHECKER_CELL);

        let Some(current) = self.current.try_lock_for(self.config.lock_timeout()) else {
            area_grid.draw(surface);

            let deferrals = self.deferrals.fetch_add(1, Ordering::Relaxed) + 1;
            let delay = self.config.retry.delay(deferrals);
            log::debug!(
                "Image guard busy for {:?}, deferring paint (attempt {}, retry in {:?})",
                self.config.lock_timeout(),
                deferrals,
                delay
            );
            self.repaint.request_repaint(delay);
            return PaintOutcome::Deferred;
        };
        self.deferrals.store(0, Ordering::Relaxed);

        match current.as_ref() {
            Some(bitmap) => {
                CheckerGrid::fit_bitmap(bitmap.size(), Self::CHECKER_CELL).draw(surface);
                surface.draw_bitmap(IVec2::ZERO, bitmap);
                log::debug!("Image {} was drawn", bitmap.id());
                PaintOutcome::Drawn(bitmap.id())
            }
            None => {
                area_grid.draw(surface);
                PaintOutcome::Empty
            }
        }
    }
}

/// An L of two lines just above and left of the origin, spanning the panel.
fn draw_origin<S: Surface + ?Sized>(surface: &mut S, area: UVec2, inset: i32) {
    surface.set_color(ImageBuffer::ORIGIN_COLOR);
    surface.draw_line(IVec2::new(-inset, -1), IVec2::new(area.x as i32, -1));
    surface.draw_line(IVec2::new(-1, -inset), IVec2::new(-1, area.y as i32));
}
