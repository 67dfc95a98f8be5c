//! The boundary between finished drawings and the game state that stores them.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use resvg::tiny_skia::Pixmap;

use crate::codec::{self, quantize};
use crate::model::compressed_image::CardImage;
use crate::model::config::MAX_CANVAS_SIZE;
use crate::model::errors::{SketchErrKind, SketchResult};
use crate::render;

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Finalizes a rendered surface. With `compress` the surface is quantized and packed; otherwise
/// it is kept as a full-color PNG data url.
#[instrument(level = "debug", skip(pixmap))]
pub fn encode(pixmap: &Pixmap, compress: bool) -> SketchResult<CardImage> {
    if compress {
        let bitmap = quantize::threshold(pixmap);
        Ok(CardImage::Compressed(codec::compress(&bitmap)))
    } else {
        Ok(CardImage::Bitmap(to_data_url(pixmap)?))
    }
}

/// Accepts either representation and yields a `size`x`size` surface.
#[instrument(level = "debug", skip(image), fields(compressed = image.is_compressed()))]
pub fn decode(image: &CardImage, size: u32) -> SketchResult<Pixmap> {
    if size == 0 || size > MAX_CANVAS_SIZE {
        return Err(SketchErrKind::CanvasSizeInvalid(size).into());
    }

    match image {
        CardImage::Compressed(compressed) => {
            let bitmap = codec::decompress(compressed, size, size)?;
            render::paint_bitmap(&bitmap)
        }
        CardImage::Bitmap(url) => {
            let image = from_data_url(url)?;
            if image.width() != size || image.height() != size {
                return Err(SketchErrKind::ImageSizeMismatch {
                    expected: (size, size),
                    actual: (image.width(), image.height()),
                }
                .into());
            }
            render::from_rgba_image(&image)
        }
    }
}

/// A reference a browser can display directly.
pub fn to_display_url(image: &CardImage, size: u32) -> SketchResult<String> {
    match image {
        CardImage::Bitmap(url) => Ok(url.clone()),
        CardImage::Compressed(_) => to_data_url(&decode(image, size)?),
    }
}

pub fn to_data_url(pixmap: &Pixmap) -> SketchResult<String> {
    let image = render::to_rgba_image(pixmap)?;
    Ok(format!("{DATA_URL_PREFIX}{}", base64::encode(encode_png(&image)?)))
}

pub fn encode_png(image: &RgbaImage) -> SketchResult<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(png)
}

pub fn from_data_url(url: &str) -> SketchResult<RgbaImage> {
    let payload = url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
        .ok_or_else(|| SketchErrKind::ImageMalformed("not a base64 data url".to_string()))?;

    let bytes = base64::decode(payload.trim())
        .map_err(|err| SketchErrKind::ImageMalformed(format!("{err}")))?;

    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

pub fn from_json(json: &str) -> SketchResult<CardImage> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_json(image: &CardImage) -> SketchResult<String> {
    Ok(serde_json::to_string(image)?)
}
