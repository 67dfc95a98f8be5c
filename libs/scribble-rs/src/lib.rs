//! The drawing engine behind card art in the card game client.
//!
//! Two pieces do the real work:
//!
//! - a stroke log with linear undo/redo whose pixels are always rebuilt by replaying the log
//!   (see [model::stroke_log] and [render::rasterizer]), driven by a [DrawingSession];
//! - a lossless codec for black and white images (see [codec]) that packs finished card art into
//!   a [CompressedImage] small enough to live in shared game state.
//!
//! - The [model] module contains the data that crosses into the rest of the application.
//! - The [service] module contains sessions, the card image boundary and logging setup.
//! - The [io] module contains loading of base images, the only asynchronous boundary.

#[macro_use]
extern crate tracing;

pub mod codec;
pub mod io;
pub mod model;
pub mod render;
pub mod service;

pub use model::compressed_image::{CardImage, CompressedImage};
pub use model::config::Config;
pub use model::errors::{SketchErr, SketchErrKind, SketchResult};
pub use model::stroke::{Brush, Color, Point, Segment, Stroke, StrokeBuilder, StrokeMode};
pub use model::stroke_log::StrokeLog;
pub use resvg::tiny_skia::Pixmap;
pub use service::session::DrawingSession;

pub fn get_code_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
