pub mod buffer;
pub mod checker;
pub mod config;
pub mod error;
pub mod raster;
pub mod surface;

pub use buffer::{ImageBuffer, PaintOutcome, RepaintRequest};
pub use config::{PanelConfig, RetryPolicy};
pub use error::BufferError;
pub use raster::RasterSurface;
pub use surface::Surface;
