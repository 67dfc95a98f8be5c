use scribble_rs::model::bitmap::{BinaryBitmap, Tone};
use scribble_rs::{Brush, Color, Config, Point, Segment, Stroke, StrokeBuilder, StrokeMode};
use uuid::Uuid;

pub const SIZE: u32 = 500;

pub fn test_config() -> Config {
    Config {
        writeable_path: format!("/tmp/{}", Uuid::new_v4()),
        logs: false,
        stdout_logs: false,
        colored_logs: false,
        canvas_size: SIZE,
        compress_images: true,
    }
}

pub fn small_config(size: u32) -> Config {
    Config { canvas_size: size, ..test_config() }
}

pub fn pen(color: Color, weight: f32) -> Brush {
    Brush { color, weight, smoothing: 0.0, adaptive_stroke: false, mode: StrokeMode::Draw }
}

/// A stroke through `points`, one sample every 16ms.
pub fn stroke_through(brush: Brush, points: &[(i32, i32)]) -> Stroke {
    let mut builder = StrokeBuilder::new(brush);
    for (i, (x, y)) in points.iter().enumerate() {
        builder.push(Point::new(*x, *y), Some(i as f64 * 16.0));
    }
    builder
        .finish()
        .expect("stroke_through needs at least one point")
}

pub fn line(from: (i32, i32), to: (i32, i32)) -> Stroke {
    stroke_through(pen(Color::BLACK, 6.0), &[from, to])
}

pub fn fill(color: Color) -> Stroke {
    Stroke::fill(color, Segment { point: Point::new(0, 0), time: 0 })
}

/// Three distinct strokes, handy for undo/redo scenarios.
pub fn three_strokes() -> [Stroke; 3] {
    [line((10, 10), (200, 10)), line((10, 50), (200, 250)), line((300, 300), (450, 480))]
}

/// Something that looks like card art: a frame, a face and some hatching.
pub fn doodle() -> Vec<Stroke> {
    let thick = pen(Color::BLACK, 8.0);
    let smooth = Brush { smoothing: 0.7, ..pen(Color::BLACK, 4.0) };
    let adaptive = Brush { adaptive_stroke: true, ..pen(Color::rgb(0x20, 0x20, 0x20), 10.0) };

    let mut strokes = vec![
        stroke_through(thick, &[(20, 20), (480, 20), (480, 480), (20, 480), (20, 20)]),
        stroke_through(smooth, &[(150, 300), (200, 350), (250, 360), (300, 350), (350, 300)]),
        stroke_through(thick, &[(180, 180)]),
        stroke_through(thick, &[(320, 180)]),
    ];
    for i in 0..10 {
        let x = 60 + i * 12;
        strokes.push(stroke_through(adaptive, &[(x, 420), (x + 30, 380), (x + 60, 440)]));
    }
    strokes
}

/// Deterministic noise; worst case for run-length coding.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> BinaryBitmap {
    let mut bitmap = BinaryBitmap::blank(width, height);
    for y in 0..height {
        for x in 0..width {
            if ((x / cell) + (y / cell)) % 2 == 1 {
                bitmap.set(x, y, Tone::Black);
            }
        }
    }
    bitmap
}
