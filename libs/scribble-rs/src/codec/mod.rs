//! Two-stage lossless codec for black and white card art: run-length encoding followed by a
//! frequency-rank remap of the run lengths. Quantization in front of it is the only lossy step.

pub mod quantize;
pub mod rank;
pub mod rle;

use crate::model::bitmap::BinaryBitmap;
use crate::model::compressed_image::CompressedImage;
use crate::model::errors::SketchResult;

#[instrument(level = "debug", skip_all, fields(width = bitmap.width(), height = bitmap.height()))]
pub fn compress(bitmap: &BinaryBitmap) -> CompressedImage {
    let runs = rle::encode(bitmap);
    let image = rank::encode(&runs);
    debug!(runs = runs.len(), distinct = image.frequencies.len(), "compressed bitmap");
    image
}

#[instrument(level = "debug", skip(image))]
pub fn decompress(image: &CompressedImage, width: u32, height: u32) -> SketchResult<BinaryBitmap> {
    let runs = rank::decode(image)?;
    rle::decode(&runs, width, height)
}
