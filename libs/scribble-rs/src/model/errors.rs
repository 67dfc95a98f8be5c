use std::backtrace::Backtrace;
use std::fmt::{self, Display, Formatter};
use std::panic::Location;
use std::sync::PoisonError;

use serde::{Serialize, Serializer};

pub type SketchResult<T> = Result<T, SketchErr>;

#[derive(Debug)]
pub struct SketchErr {
    pub kind: SketchErrKind,
    pub backtrace: Option<Backtrace>,
}

impl Serialize for SketchErr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.kind.to_string())
    }
}

impl Display for SketchErr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for SketchErr {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SketchErrKind {
    /// The canvas side length is zero or larger than the rasterizer supports.
    CanvasSizeInvalid(u32),
    /// A bitmap was supplied at a resolution other than the canvas resolution.
    ImageSizeMismatch { expected: (u32, u32), actual: (u32, u32) },
    /// A literal bitmap reference could not be parsed or decoded.
    ImageMalformed(String),
    /// A compressed record references a rank that its frequency table does not contain.
    RankMissing(u32),
    /// Run lengths do not add up to the pixel count of the canvas.
    RunTotalMismatch { expected: u64, actual: u64 },
    Unexpected(String),
}

/// Wording here is what a player may end up seeing when a card image fails to load, so keep it
/// plain. Anything not expected to leave this crate gets the debug-ish treatment.
impl Display for SketchErrKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SketchErrKind::CanvasSizeInvalid(size) => {
                write!(f, "A canvas of {size}x{size} pixels is not supported")
            }
            SketchErrKind::ImageSizeMismatch { expected, actual } => write!(
                f,
                "That image is {}x{} but the canvas is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            SketchErrKind::ImageMalformed(msg) => write!(f, "That image is invalid: {msg}"),
            SketchErrKind::RankMissing(rank) => {
                write!(f, "That card image is corrupted (unknown run rank {rank})")
            }
            SketchErrKind::RunTotalMismatch { expected, actual } => write!(
                f,
                "That card image is corrupted ({actual} pixels encoded, {expected} expected)"
            ),
            SketchErrKind::Unexpected(msg) => write!(f, "Unexpected error: {msg}"),
        }
    }
}

impl From<SketchErrKind> for SketchErr {
    fn from(kind: SketchErrKind) -> Self {
        Self { kind, backtrace: Some(Backtrace::force_capture()) }
    }
}

impl<T> From<PoisonError<T>> for SketchErr {
    fn from(err: PoisonError<T>) -> Self {
        SketchErrKind::Unexpected(format!("lock poisoned: {err}")).into()
    }
}

impl From<serde_json::Error> for SketchErr {
    fn from(err: serde_json::Error) -> Self {
        SketchErrKind::ImageMalformed(format!("{err}")).into()
    }
}

impl From<image::ImageError> for SketchErr {
    fn from(err: image::ImageError) -> Self {
        SketchErrKind::ImageMalformed(format!("{err}")).into()
    }
}

pub trait Unexpected<T> {
    fn map_unexpected(self) -> SketchResult<T>;
}

impl<T, E: std::fmt::Debug> Unexpected<T> for Result<T, E> {
    #[track_caller]
    fn map_unexpected(self) -> SketchResult<T> {
        let location = Location::caller();
        self.map_err(|err| {
            SketchErrKind::Unexpected(format!(
                "unexpected error at {}:{} {err:?}",
                location.file(),
                location.line(),
            ))
            .into()
        })
    }
}

pub fn core_err_unexpected<T: std::fmt::Debug>(err: T) -> SketchErr {
    SketchErrKind::Unexpected(format!("{err:?}")).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_survives_conversion() {
        let err: SketchErr = SketchErrKind::RankMissing(7).into();
        assert_eq!(err.kind, SketchErrKind::RankMissing(7));
        assert!(err.backtrace.is_some());
    }

    #[test]
    fn map_unexpected_records_location() {
        let res: Result<(), &str> = Err("boom");
        let err = res.map_unexpected().unwrap_err();
        match err.kind {
            SketchErrKind::Unexpected(msg) => {
                assert!(msg.contains("errors.rs"));
                assert!(msg.contains("boom"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn serializes_as_display_text() {
        let err: SketchErr = SketchErrKind::CanvasSizeInvalid(0).into();
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"A canvas of 0x0 pixels is not supported\"");
    }
}
