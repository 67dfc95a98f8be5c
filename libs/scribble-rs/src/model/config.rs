use std::env;

use serde::{Deserialize, Serialize};

/// Side length of the square card canvas, in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 500;

/// Largest canvas the rasterizer will allocate.
pub const MAX_CANVAS_SIZE: u32 = 4096;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where should scribble store its data, including logs?
    pub writeable_path: String,

    /// Should we log at all?
    pub logs: bool,
    /// Should logs be printed to stdout?
    pub stdout_logs: bool,
    /// Should logs be colored?
    pub colored_logs: bool,

    /// Side length of the square drawing surface.
    pub canvas_size: u32,
    /// Should finished card art be stored as a compressed record rather than a PNG data url?
    pub compress_images: bool,
}

impl Config {
    /// Configures scribble for CLI use with no stdout logs. `writeable_path_subfolder` is generally
    /// a hardcoded client name like `"cli"`.
    pub fn cli_config(writeable_path_subfolder: &str) -> Config {
        Config {
            writeable_path: Self::writeable_path(writeable_path_subfolder),
            logs: true,
            stdout_logs: false,
            colored_logs: true,
            canvas_size: Self::canvas_size(),
            compress_images: Self::compress_images(),
        }
    }

    /// Configures scribble for an interactive drawing client with stdout logs.
    pub fn ui_config(writeable_path_subfolder: &str) -> Config {
        Config {
            writeable_path: Self::writeable_path(writeable_path_subfolder),
            logs: true,
            stdout_logs: true,
            colored_logs: true,
            canvas_size: Self::canvas_size(),
            compress_images: Self::compress_images(),
        }
    }

    /// Produces a full writable path based on environment variables and platform. Falls back to
    /// the working directory when no home can be found.
    pub fn writeable_path(writeable_path_subfolder: &str) -> String {
        let specified_path = env::var("SCRIBBLE_PATH");

        let default_path = env::var("HOME") // unix
            .or(env::var("HOMEPATH")) // windows
            .map(|home| format!("{home}/.scribble/{writeable_path_subfolder}"));

        specified_path
            .or(default_path)
            .unwrap_or_else(|_| format!(".scribble/{writeable_path_subfolder}"))
    }

    pub fn canvas_size() -> u32 {
        match env::var("SCRIBBLE_CANVAS_SIZE") {
            Ok(val) => val.parse::<u32>().unwrap_or(DEFAULT_CANVAS_SIZE),
            Err(_) => DEFAULT_CANVAS_SIZE,
        }
    }

    pub fn compress_images() -> bool {
        match env::var("SCRIBBLE_COMPRESS") {
            Ok(val) => !matches!(val.as_str(), "0" | "false" | "off"),
            Err(_) => true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            writeable_path: ".scribble".to_string(),
            logs: false,
            stdout_logs: false,
            colored_logs: false,
            canvas_size: DEFAULT_CANVAS_SIZE,
            compress_images: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clients_differ_only_in_stdout_logs() {
        let cli = Config::cli_config("cli");
        let ui = Config::ui_config("cli");
        assert!(!cli.stdout_logs);
        assert!(ui.stdout_logs);
        assert_eq!(Config { stdout_logs: true, ..cli }, ui);
    }
}
