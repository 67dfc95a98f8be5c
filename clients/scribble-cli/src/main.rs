mod card;
mod error;
mod render;

use std::path::PathBuf;

use clap::Parser;
use scribble_rs::service::logging;
use scribble_rs::Config;

use crate::error::CliError;

/// Pack, unpack and replay card art.
#[derive(Debug, PartialEq, Eq, Parser)]
#[command(name = "scribble", version = scribble_rs::get_code_version())]
enum Scribble {
    /// Pack a PNG into a card image record
    ///
    /// The PNG is scaled to the configured canvas size first. Records are written to stdout unless
    /// `--out` is given.
    Encode {
        input: PathBuf,

        /// Keep full color as a PNG data url instead of a compressed record
        #[arg(short, long)]
        raw: bool,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Turn a card image record back into a PNG
    Decode { input: PathBuf, output: PathBuf },

    /// Describe a card image record
    Stats { input: PathBuf },

    /// Replay a JSON array of strokes into a card image record
    Render {
        strokes: PathBuf,

        /// Card image record to draw on top of
        #[arg(short, long)]
        base: Option<PathBuf>,

        /// Also write the rendered surface as a PNG
        #[arg(short, long)]
        png: Option<PathBuf>,
    },
}

type Res<T> = Result<T, CliError>;

#[tokio::main]
async fn main() {
    let config = Config::cli_config("cli");
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err}");
    }

    let result = match Scribble::parse() {
        Scribble::Encode { input, raw, out } => card::encode(&config, input, raw, out),
        Scribble::Decode { input, output } => card::decode(&config, input, output),
        Scribble::Stats { input } => card::stats(&config, input),
        Scribble::Render { strokes, base, png } => render::strokes(config, strokes, base, png).await,
    };

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
