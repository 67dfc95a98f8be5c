use serde::{Deserialize, Serialize};

use super::errors::{SketchErrKind, SketchResult};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
pub enum Tone {
    #[default]
    White,
    Black,
}

impl Tone {
    pub fn flip(self) -> Self {
        match self {
            Tone::White => Tone::Black,
            Tone::Black => Tone::White,
        }
    }
}

/// A strictly two-tone image in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryBitmap {
    width: u32,
    height: u32,
    pixels: Vec<Tone>,
}

impl BinaryBitmap {
    pub fn blank(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![Tone::White; width as usize * height as usize] }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Tone>) -> SketchResult<Self> {
        let expected = width as u64 * height as u64;
        if pixels.len() as u64 != expected {
            return Err(SketchErrKind::RunTotalMismatch { expected, actual: pixels.len() as u64 }
                .into());
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Tone] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Tone> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn set(&mut self, x: u32, y: u32, tone: Tone) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = tone;
        }
    }

    pub fn count(&self, tone: Tone) -> usize {
        self.pixels.iter().filter(|p| **p == tone).count()
    }
}
