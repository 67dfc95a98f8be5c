use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::{SketchErr, SketchErrKind};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx.hypot(dy) as f32
    }
}

/// One pointer sample. `time` is in milliseconds.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Segment {
    pub point: Point,
    pub time: i64,
}

impl Segment {
    /// Builds a segment from a raw input sample. Samples without a finite timestamp are
    /// synthesized by the input layer (click compensation) and carry no position history, so
    /// they yield `None`.
    pub fn from_sample(point: Point, time: Option<f64>) -> Option<Self> {
        match time {
            Some(t) if t.is_finite() => Some(Segment { point, time: t as i64 }),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
pub enum StrokeMode {
    #[default]
    Draw,
    Erase,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xFF {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = SketchErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Some(Color::BLACK),
            "white" => Some(Color::WHITE),
            "red" => Some(Color::rgb(0xFF, 0x00, 0x00)),
            "green" => Some(Color::rgb(0x00, 0x80, 0x00)),
            "blue" => Some(Color::rgb(0x00, 0x00, 0xFF)),
            "yellow" => Some(Color::rgb(0xFF, 0xFF, 0x00)),
            "gray" | "grey" => Some(Color::rgb(0x80, 0x80, 0x80)),
            "transparent" => Some(Color::rgba(0x00, 0x00, 0x00, 0x00)),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let invalid = || SketchErr::from(SketchErrKind::Unexpected(format!("invalid color: {s}")));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize, len: usize| -> Result<u8, SketchErr> {
            let digits = &hex[i * len..(i + 1) * len];
            let value = u8::from_str_radix(digits, 16).map_err(|_| invalid())?;
            Ok(if len == 1 { value * 0x11 } else { value })
        };

        match hex.len() {
            3 => Ok(Color::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Color::rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Ok(Color::rgba(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, channel(3, 2)?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = SketchErr;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub segments: Vec<Segment>,
    pub color: Color,
    pub weight: f32,
    pub smoothing: f32,
    pub adaptive_stroke: bool,
    pub mode: StrokeMode,
    pub is_fill: bool,
}

impl Stroke {
    /// A fill paints the whole canvas; `origin` is where the user tapped.
    pub fn fill(color: Color, origin: Segment) -> Self {
        Stroke {
            segments: vec![origin],
            color,
            weight: 0.0,
            smoothing: 0.0,
            adaptive_stroke: false,
            mode: StrokeMode::Draw,
            is_fill: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(|s| s.point)
    }
}

/// Pen attributes applied to every stroke a [`StrokeBuilder`] produces.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brush {
    pub color: Color,
    pub weight: f32,
    pub smoothing: f32,
    pub adaptive_stroke: bool,
    pub mode: StrokeMode,
}

impl Default for Brush {
    fn default() -> Self {
        Brush {
            color: Color::BLACK,
            weight: 4.0,
            smoothing: 0.5,
            adaptive_stroke: false,
            mode: StrokeMode::Draw,
        }
    }
}

/// Accumulates pointer samples between pointer-down and pointer-up.
#[derive(Debug, Default)]
pub struct StrokeBuilder {
    brush: Brush,
    segments: Vec<Segment>,
}

impl StrokeBuilder {
    pub fn new(brush: Brush) -> Self {
        Self { brush, segments: vec![] }
    }

    /// Returns whether the sample was kept.
    pub fn push(&mut self, point: Point, time: Option<f64>) -> bool {
        let Some(segment) = Segment::from_sample(point, time) else {
            trace!("dropping sample at {point:?} with time {time:?}");
            return false;
        };

        // some pointer backends report the same position twice, which draws a knot
        if let Some(last) = self.segments.last() {
            if last.point == segment.point {
                return false;
            }
        }

        self.segments.push(segment);
        true
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// `None` when every sample was discarded.
    pub fn finish(self) -> Option<Stroke> {
        if self.segments.is_empty() {
            return None;
        }

        Some(Stroke {
            segments: self.segments,
            color: self.brush.color,
            weight: self.brush.weight,
            smoothing: self.brush.smoothing,
            adaptive_stroke: self.brush.adaptive_stroke,
            mode: self.brush.mode,
            is_fill: false,
        })
    }
}
