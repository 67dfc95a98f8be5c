use image::RgbaImage;
use resvg::tiny_skia::Pixmap;

use crate::model::bitmap::{BinaryBitmap, Tone};

/// Channel sum below which a pixel is black: a mean under 128 of 255.
const BLACK_BELOW: u32 = 128 * 3;

fn tone(r: u32, g: u32, b: u32) -> Tone {
    if r + g + b < BLACK_BELOW {
        Tone::Black
    } else {
        Tone::White
    }
}

/// Reduces a rendered surface to black and white. Pixels are composited over white first, so
/// transparent (erased or never painted) areas come out white.
pub fn threshold(pixmap: &Pixmap) -> BinaryBitmap {
    let pixels = pixmap
        .pixels()
        .iter()
        .map(|p| {
            // premultiplied: c + (255 - a) is c over white
            let under = 255 - p.alpha() as u32;
            tone(p.red() as u32 + under, p.green() as u32 + under, p.blue() as u32 + under)
        })
        .collect();

    BinaryBitmap::from_pixels(pixmap.width(), pixmap.height(), pixels)
        .unwrap_or_else(|_| BinaryBitmap::blank(pixmap.width(), pixmap.height()))
}

/// Same as [`threshold`] for straight-alpha images read from disk.
pub fn threshold_rgba(image: &RgbaImage) -> BinaryBitmap {
    let over_white = |c: u8, a: u8| -> u32 {
        let (c, a) = (c as u32, a as u32);
        (c * a + 255 * (255 - a) + 127) / 255
    };

    let pixels = image
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            tone(over_white(r, a), over_white(g, a), over_white(b, a))
        })
        .collect();

    BinaryBitmap::from_pixels(image.width(), image.height(), pixels)
        .unwrap_or_else(|_| BinaryBitmap::blank(image.width(), image.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::Color;

    #[test]
    fn midpoint_is_white() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgba([128, 128, 128, 255]));
        image.put_pixel(1, 0, image::Rgba([127, 128, 128, 255]));

        let bitmap = threshold_rgba(&image);
        assert_eq!(bitmap.pixels(), &[Tone::White, Tone::Black]);
    }

    #[test]
    fn channels_are_weighted_equally() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        image.put_pixel(1, 0, image::Rgba([255, 255, 0, 255]));

        let bitmap = threshold_rgba(&image);
        assert_eq!(bitmap.pixels(), &[Tone::Black, Tone::White]);
    }

    #[test]
    fn transparent_reads_as_white() {
        let image = RgbaImage::new(3, 3);
        assert_eq!(threshold_rgba(&image).count(Tone::White), 9);

        let pixmap = Pixmap::new(3, 3).unwrap();
        assert_eq!(threshold(&pixmap).count(Tone::White), 9);
    }

    #[test]
    fn opaque_black_surface() {
        let mut pixmap = Pixmap::new(4, 2).unwrap();
        pixmap.fill(Color::BLACK);
        assert_eq!(threshold(&pixmap).count(Tone::Black), 8);
    }
}
