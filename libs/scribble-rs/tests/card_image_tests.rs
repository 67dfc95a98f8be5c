use std::collections::BTreeMap;

use scribble_rs::codec::quantize;
use scribble_rs::model::config::MAX_CANVAS_SIZE;
use scribble_rs::render::rasterizer;
use scribble_rs::service::card_image;
use scribble_rs::{CardImage, CompressedImage, SketchErrKind};
use test_utils::{doodle, SIZE};

#[test]
fn compressed_card_decodes_to_quantized_art() {
    let pixmap = rasterizer::replay(&doodle(), None, SIZE).unwrap();
    let image = card_image::encode(&pixmap, true).unwrap();
    assert!(image.is_compressed());

    let decoded = card_image::decode(&image, SIZE).unwrap();
    assert_eq!(quantize::threshold(&decoded), quantize::threshold(&pixmap));
}

#[test]
fn uncompressed_card_keeps_full_pixels() {
    let pixmap = rasterizer::replay(&doodle(), None, SIZE).unwrap();
    let image = card_image::encode(&pixmap, false).unwrap();

    match &image {
        CardImage::Bitmap(url) => assert!(url.starts_with(card_image::DATA_URL_PREFIX)),
        other => panic!("expected a bitmap, got {other:?}"),
    }

    let decoded = card_image::decode(&image, SIZE).unwrap();
    assert_eq!(decoded.data(), pixmap.data());
}

#[test]
fn both_forms_survive_json() {
    let pixmap = rasterizer::replay(&doodle(), None, SIZE).unwrap();
    for compress in [true, false] {
        let image = card_image::encode(&pixmap, compress).unwrap();
        let json = card_image::to_json(&image).unwrap();
        assert_eq!(card_image::from_json(&json).unwrap(), image);
    }
}

#[test]
fn display_url_for_either_form() {
    let pixmap = rasterizer::replay(&doodle(), None, SIZE).unwrap();
    let compressed = card_image::encode(&pixmap, true).unwrap();

    let url = card_image::to_display_url(&compressed, SIZE).unwrap();
    let shown = card_image::from_data_url(&url).unwrap();
    assert_eq!((shown.width(), shown.height()), (SIZE, SIZE));
    assert_eq!(quantize::threshold_rgba(&shown), quantize::threshold(&pixmap));

    let literal = CardImage::Bitmap(url.clone());
    assert_eq!(card_image::to_display_url(&literal, SIZE).unwrap(), url);
}

#[test]
fn wrong_size_bitmap_is_rejected() {
    let small = rasterizer::blank(SIZE / 5).unwrap();
    let image = card_image::encode(&small, false).unwrap();

    let err = card_image::decode(&image, SIZE).unwrap_err();
    assert_eq!(
        err.kind,
        SketchErrKind::ImageSizeMismatch { expected: (SIZE, SIZE), actual: (SIZE / 5, SIZE / 5) }
    );
}

#[test]
fn malformed_references_are_errors() {
    for url in ["https://example.com/card.png", "data:image/png;base64,%%%", "data:text/plain,hi"] {
        let err = card_image::decode(&CardImage::Bitmap(url.to_string()), SIZE).unwrap_err();
        assert!(matches!(err.kind, SketchErrKind::ImageMalformed(_)), "{url}: {err:?}");
    }

    assert!(card_image::from_json("[1, 2, 3]").is_err());
}

#[test]
fn oversized_canvas_is_rejected_before_decoding() {
    let side = MAX_CANVAS_SIZE + 1;
    let image = CardImage::Compressed(CompressedImage {
        frequencies: BTreeMap::from([(0, side * side)]),
        sequences: vec![0],
    });

    let err = card_image::decode(&image, side).unwrap_err();
    assert_eq!(err.kind, SketchErrKind::CanvasSizeInvalid(side));

    let err = card_image::decode(&image, 0).unwrap_err();
    assert_eq!(err.kind, SketchErrKind::CanvasSizeInvalid(0));
}
