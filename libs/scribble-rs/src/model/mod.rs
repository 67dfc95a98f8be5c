//! Data structures shared by the codec, the rasterizer and drawing sessions.

pub mod bitmap;
pub mod compressed_image;
pub mod config;
pub mod errors;
pub mod stroke;
pub mod stroke_log;
