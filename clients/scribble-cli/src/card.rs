use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use scribble_rs::codec::{self, quantize, rle};
use scribble_rs::render;
use scribble_rs::service::card_image;
use scribble_rs::{CardImage, Config, Pixmap};

use crate::error::CliError;
use crate::Res;

pub fn encode(config: &Config, input: PathBuf, raw: bool, out: Option<PathBuf>) -> Res<()> {
    let mut image = image::open(&input)?.to_rgba8();
    let size = config.canvas_size;
    if image.dimensions() != (size, size) {
        image = imageops::resize(&image, size, size, FilterType::Nearest);
    }

    let card = if raw || !config.compress_images {
        CardImage::Bitmap(card_image::to_data_url(&render::from_rgba_image(&image)?)?)
    } else {
        CardImage::Compressed(codec::compress(&quantize::threshold_rgba(&image)))
    };

    let json = card_image::to_json(&card)?;
    match out {
        Some(path) => fs::write(&path, json).map_err(|err| CliError::os_file(&path, err)),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

pub fn decode(config: &Config, input: PathBuf, output: PathBuf) -> Res<()> {
    let card = read_card(&input)?;
    let pixmap = card_image::decode(&card, config.canvas_size)?;
    write_png(&output, &pixmap)
}

pub fn stats(config: &Config, input: PathBuf) -> Res<()> {
    let card = read_card(&input)?;
    match &card {
        CardImage::Compressed(image) => {
            let stats = image.stats();
            let raw_runs = codec::decompress(image, config.canvas_size, config.canvas_size)
                .map(|bitmap| rle::encode(&bitmap))?;
            println!("kind:\t\t\tcompressed");
            println!("runs:\t\t\t{}", stats.runs);
            println!("distinct runs:\t\t{}", stats.distinct_runs);
            println!("largest rank:\t\t{}", stats.largest_rank);
            println!("serialized bytes:\t{}", stats.serialized_len);
            println!("raw run bytes:\t\t{}", serde_json::to_vec(&raw_runs)?.len());
        }
        CardImage::Bitmap(url) => {
            let image = card_image::from_data_url(url)?;
            println!("kind:\t\t\tbitmap");
            println!("dimensions:\t\t{}x{}", image.width(), image.height());
            println!("serialized bytes:\t{}", url.len());
        }
    }
    Ok(())
}

pub fn read_card(path: &Path) -> Res<CardImage> {
    let json = fs::read_to_string(path).map_err(|err| CliError::os_file(path, err))?;
    Ok(card_image::from_json(&json)?)
}

pub fn write_png(path: &Path, pixmap: &Pixmap) -> Res<()> {
    let png = card_image::encode_png(&render::to_rgba_image(pixmap)?)?;
    fs::write(path, png).map_err(|err| CliError::os_file(path, err))
}
