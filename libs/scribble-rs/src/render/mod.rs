pub mod rasterizer;

use image::RgbaImage;
use resvg::tiny_skia::{ColorU8, Pixmap};

use crate::model::bitmap::{BinaryBitmap, Tone};
use crate::model::errors::{SketchErrKind, SketchResult};

/// Paints a decoded black and white image as an opaque surface.
pub fn paint_bitmap(bitmap: &BinaryBitmap) -> SketchResult<Pixmap> {
    let mut pixmap = Pixmap::new(bitmap.width(), bitmap.height())
        .ok_or(SketchErrKind::CanvasSizeInvalid(bitmap.width()))?;

    let white = ColorU8::from_rgba(0xFF, 0xFF, 0xFF, 0xFF).premultiply();
    let black = ColorU8::from_rgba(0x00, 0x00, 0x00, 0xFF).premultiply();
    for (dst, tone) in pixmap.pixels_mut().iter_mut().zip(bitmap.pixels()) {
        *dst = match tone {
            Tone::White => white,
            Tone::Black => black,
        };
    }

    Ok(pixmap)
}

/// Straight-alpha copy of a surface, for encoders that expect it.
pub fn to_rgba_image(pixmap: &Pixmap) -> SketchResult<RgbaImage> {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or_else(|| {
        SketchErrKind::Unexpected("surface buffer does not match its dimensions".to_string()).into()
    })
}

pub fn from_rgba_image(image: &RgbaImage) -> SketchResult<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())
        .ok_or(SketchErrKind::CanvasSizeInvalid(image.width()))?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Ok(pixmap)
}
