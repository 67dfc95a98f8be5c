use crate::model::bitmap::{BinaryBitmap, Tone};
use crate::model::errors::{SketchErrKind, SketchResult};

/// Tone of the run at index 0. Runs alternate from here, so an image whose first pixel is black
/// starts with a zero-length run.
pub const FIRST_RUN: Tone = Tone::White;

pub fn encode(bitmap: &BinaryBitmap) -> Vec<u32> {
    let mut runs = Vec::new();
    let mut current = FIRST_RUN;
    let mut run = 0u32;

    for &pixel in bitmap.pixels() {
        if pixel == current {
            run += 1;
        } else {
            runs.push(run);
            run = 1;
            current = current.flip();
        }
    }
    runs.push(run);

    runs
}

/// Tone of the run at `index` in an encoded sequence.
pub fn tone_at(index: usize) -> Tone {
    if index % 2 == 0 {
        FIRST_RUN
    } else {
        FIRST_RUN.flip()
    }
}

pub fn decode(runs: &[u32], width: u32, height: u32) -> SketchResult<BinaryBitmap> {
    let expected = width as u64 * height as u64;
    let actual: u64 = runs.iter().map(|&r| r as u64).sum();
    if actual != expected {
        return Err(SketchErrKind::RunTotalMismatch { expected, actual }.into());
    }

    let mut pixels = Vec::with_capacity(expected as usize);
    for (index, &run) in runs.iter().enumerate() {
        pixels.extend(std::iter::repeat(tone_at(index)).take(run as usize));
    }

    BinaryBitmap::from_pixels(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_black_gets_empty_white_run() {
        let bitmap =
            BinaryBitmap::from_pixels(2, 2, vec![Tone::Black, Tone::Black, Tone::White, Tone::Black])
                .unwrap();
        assert_eq!(encode(&bitmap), vec![0, 2, 1, 1]);
    }

    #[test]
    fn short_total_is_rejected() {
        let err = decode(&[3, 2], 2, 3).unwrap_err();
        assert_eq!(err.kind, SketchErrKind::RunTotalMismatch { expected: 6, actual: 5 });
    }
}
