use std::fs;
use std::path::PathBuf;

use scribble_rs::service::card_image;
use scribble_rs::{Config, DrawingSession, Stroke};

use crate::card::{read_card, write_png};
use crate::error::CliError;
use crate::Res;

pub async fn strokes(
    config: Config, strokes: PathBuf, base: Option<PathBuf>, png: Option<PathBuf>,
) -> Res<()> {
    let json = fs::read_to_string(&strokes).map_err(|err| CliError::os_file(&strokes, err))?;
    let strokes: Vec<Stroke> = serde_json::from_str(&json)?;
    let base = base.as_deref().map(read_card).transpose()?;

    let session = DrawingSession::open(config, base).await?;
    for stroke in strokes {
        session.record(stroke)?;
    }

    if let Some(path) = png {
        write_png(&path, &session.surface()?)?;
    }

    println!("{}", card_image::to_json(&session.finalize()?)?);
    Ok(())
}
