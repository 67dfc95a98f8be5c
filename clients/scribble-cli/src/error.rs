use std::fmt;
use std::io;
use std::path::Path;

use scribble_rs::SketchErr;

pub struct CliError(pub String);

impl CliError {
    pub fn os_file(path: &Path, err: io::Error) -> Self {
        Self(format!("'{}': {err}", path.display()))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.0)
    }
}

impl From<SketchErr> for CliError {
    fn from(err: SketchErr) -> Self {
        Self(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self(format!("invalid json: {err}"))
    }
}

impl From<image::ImageError> for CliError {
    fn from(err: image::ImageError) -> Self {
        Self(format!("could not read image: {err}"))
    }
}
