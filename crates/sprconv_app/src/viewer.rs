use std::{sync::Arc, thread};

use glam::UVec2;
use iced::{
    ContentFit, Element, Size, Subscription, Task, event,
    widget::{button, column, image, row, scrollable},
    window,
};
use rfd::FileDialog;
use sprconv_canvas::{ImageBuffer, PaintOutcome, RasterSurface};
use sprconv_image::Bitmap;

use crate::{config::ViewerConfig, repaint};

const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "gif", "jpg", "jpeg", "tga", "webp"];

pub struct Viewer {
    buffer: Arc<ImageBuffer>,
    panel_size: UVec2,
}

#[derive(Debug, Clone)]
pub enum ViewerMessage {
    Open,
    Clear,
    Repaint,
    WindowResized(Size),
}

impl Viewer {
    /// Height taken by the toolbar above the panel.
    pub const TOOLBAR_HEIGHT: f32 = 48.0;

    pub fn new(config: &ViewerConfig) -> Self {
        let window = Size::new(config.window.width as f32, config.window.height as f32);
        Self {
            buffer: Arc::new(ImageBuffer::with_config(
                repaint::channel(),
                config.panel.clone(),
            )),
            panel_size: panel_size(window),
        }
    }

    pub fn update(&mut self, message: ViewerMessage) -> Task<ViewerMessage> {
        match message {
            ViewerMessage::Open => self.open_file(),
            ViewerMessage::Clear => self.buffer.remove(),
            // Reaching `view` again is all a repaint needs.
            ViewerMessage::Repaint => {}
            ViewerMessage::WindowResized(size) => self.panel_size = panel_size(size),
        }

        Task::none()
    }

    fn open_file(&self) {
        let Some(file) = FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            log::info!("No file selected.");
            return;
        };

        let buffer = self.buffer.clone();
        thread::spawn(move || match Bitmap::from_file(&file) {
            Ok(bitmap) => {
                log::info!("Opened image from file {:?}.", file);
                buffer.set(bitmap);
            }
            Err(e) => log::error!("Unable to open image from file {:?}: {}", file, e),
        });
    }

    pub fn view(&self) -> Element<'_, ViewerMessage> {
        let toolbar = row![
            button("Open").on_press(ViewerMessage::Open),
            button("Clear").on_press(ViewerMessage::Clear),
        ]
        .spacing(8)
        .padding(8);

        let mut surface = RasterSurface::new(surface_size(
            self.panel_size,
            self.buffer.preferred_size_or_min(),
        ));
        if let PaintOutcome::Deferred = self.buffer.paint(&mut surface) {
            log::debug!("Panel painted without its image, waiting for the next pass.");
        }

        let pixels = surface.into_image();
        let handle = image::Handle::from_rgba(pixels.width(), pixels.height(), pixels.into_raw());
        let panel = scrollable(image(handle).content_fit(ContentFit::None)).direction(
            scrollable::Direction::Both {
                vertical: scrollable::Scrollbar::default(),
                horizontal: scrollable::Scrollbar::default(),
            },
        );

        column![toolbar, panel].into()
    }

    pub fn subscription(&self) -> Subscription<ViewerMessage> {
        Subscription::batch([
            Subscription::run(repaint_messages),
            event::listen().filter_map(|event| match event {
                iced::Event::Window(window::Event::Resized(size)) => {
                    Some(ViewerMessage::WindowResized(size))
                }
                _ => None,
            }),
        ])
    }
}

fn repaint_messages() -> impl futures::Stream<Item = ViewerMessage> {
    use futures::StreamExt;

    repaint::events().map(|()| ViewerMessage::Repaint)
}

/// Visible panel area of a window.
fn panel_size(window: Size) -> UVec2 {
    UVec2::new(
        window.width.max(0.0) as u32,
        (window.height - Viewer::TOOLBAR_HEIGHT).max(0.0) as u32,
    )
}

/// The panel grows past the visible area to fit its preferred size; the
/// scrollable takes care of the overflow.
fn surface_size(panel: UVec2, preferred: UVec2) -> UVec2 {
    let inset = ImageBuffer::ORIGIN_INSET as u32;
    panel.max(preferred + UVec2::splat(inset))
}
