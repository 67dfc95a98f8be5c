use resvg::tiny_skia::{
    self, BlendMode, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Transform,
};

use crate::model::config::MAX_CANVAS_SIZE;
use crate::model::errors::{SketchErrKind, SketchResult};
use crate::model::stroke::{Segment, Stroke, StrokeMode};

/// Narrowest line the rasterizer draws. Zero would make tiny-skia fall back to hairlines.
const MIN_WEIGHT: f32 = 1.0;

/// Floor for the width of fast-moving adaptive strokes, as a fraction of the brush weight.
const ADAPTIVE_MIN_SCALE: f32 = 0.4;

/// A transparent surface of the canvas size.
pub fn blank(size: u32) -> SketchResult<Pixmap> {
    if size == 0 || size > MAX_CANVAS_SIZE {
        return Err(SketchErrKind::CanvasSizeInvalid(size).into());
    }
    Pixmap::new(size, size).ok_or_else(|| SketchErrKind::CanvasSizeInvalid(size).into())
}

/// Cleared surface with `base` drawn underneath whatever gets replayed next.
pub fn begin(size: u32, base: Option<&Pixmap>) -> SketchResult<Pixmap> {
    let mut pixmap = blank(size)?;
    if let Some(base) = base {
        if base.width() != size || base.height() != size {
            return Err(SketchErrKind::ImageSizeMismatch {
                expected: (size, size),
                actual: (base.width(), base.height()),
            }
            .into());
        }
        pixmap.draw_pixmap(0, 0, base.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
    }
    Ok(pixmap)
}

/// Rebuilds a drawing from its log. Output depends only on `strokes` and `base`, so replaying
/// the same history twice gives identical pixels.
pub fn replay(strokes: &[Stroke], base: Option<&Pixmap>, size: u32) -> SketchResult<Pixmap> {
    let mut pixmap = begin(size, base)?;
    for stroke in strokes {
        apply_stroke(&mut pixmap, stroke);
    }
    Ok(pixmap)
}

pub fn apply_stroke(pixmap: &mut Pixmap, stroke: &Stroke) {
    if stroke.is_empty() {
        warn!("skipping stroke without segments");
        return;
    }

    if stroke.is_fill {
        let c = stroke.color;
        pixmap.fill(tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a));
        return;
    }

    let paint = paint_for(stroke);
    let segments = distinct_segments(&stroke.segments);
    let weight = stroke.weight.max(MIN_WEIGHT);

    if segments.len() == 1 {
        let p = segments[0].point;
        if let Some(dot) = PathBuilder::from_circle(p.x as f32, p.y as f32, weight / 2.0) {
            pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
        }
        return;
    }

    let pieces = pieces(&segments, stroke.smoothing);
    if stroke.adaptive_stroke {
        // one path per pair so each can carry its own width
        let mut from = point_of(&segments[0]);
        for (i, piece) in pieces.iter().enumerate() {
            let width = weight * velocity_scale(&segments[i], &segments[i + 1]);
            if let Some(path) = build_path(from, std::slice::from_ref(piece)) {
                stroke_path(pixmap, &path, &paint, width);
            }
            from = piece.end();
        }
    } else if let Some(path) = build_path(point_of(&segments[0]), &pieces) {
        stroke_path(pixmap, &path, &paint, weight);
    }
}

fn paint_for(stroke: &Stroke) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.anti_alias = false;
    match stroke.mode {
        StrokeMode::Draw => {
            let c = stroke.color;
            paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        }
        StrokeMode::Erase => paint.blend_mode = BlendMode::Clear,
    }
    paint
}

fn stroke_path(pixmap: &mut Pixmap, path: &Path, paint: &Paint, width: f32) {
    let style = tiny_skia::Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..tiny_skia::Stroke::default()
    };
    pixmap.stroke_path(path, paint, &style, Transform::identity(), None);
}

fn distinct_segments(segments: &[Segment]) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if out.last().map(|last| last.point) != Some(segment.point) {
            out.push(*segment);
        }
    }
    out
}

type Pt = (f32, f32);

fn point_of(segment: &Segment) -> Pt {
    (segment.point.x as f32, segment.point.y as f32)
}

fn lerp(a: Pt, b: Pt, t: f32) -> Pt {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// Piece `i` runs from wherever piece `i - 1` ended toward segment `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece {
    Line(Pt),
    Quad(Pt, Pt),
}

impl Piece {
    fn end(&self) -> Pt {
        match self {
            Piece::Line(to) | Piece::Quad(_, to) => *to,
        }
    }
}

/// Midpoint smoothing: the curve passes through the midpoints between samples and bends toward
/// the samples themselves. `smoothing` of 0 pins the control point to the chord (a polyline),
/// 1 puts it on the sample.
fn pieces(segments: &[Segment], smoothing: f32) -> Vec<Piece> {
    let points: Vec<Pt> = segments.iter().map(point_of).collect();
    let smoothing = smoothing.clamp(0.0, 1.0);

    if smoothing == 0.0 || points.len() < 3 {
        return points[1..].iter().map(|p| Piece::Line(*p)).collect();
    }

    let mut pieces = Vec::with_capacity(points.len() - 1);
    let mut pen = points[0];
    for i in 1..points.len() - 1 {
        let mid = lerp(points[i], points[i + 1], 0.5);
        let chord = lerp(pen, mid, 0.5);
        pieces.push(Piece::Quad(lerp(chord, points[i], smoothing), mid));
        pen = mid;
    }
    pieces.push(Piece::Line(points[points.len() - 1]));
    pieces
}

fn build_path(from: Pt, pieces: &[Piece]) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(from.0, from.1);
    for piece in pieces {
        match piece {
            Piece::Line(to) => pb.line_to(to.0, to.1),
            Piece::Quad(ctrl, to) => pb.quad_to(ctrl.0, ctrl.1, to.0, to.1),
        }
    }
    pb.finish()
}

/// Faster pointer movement (px/ms) draws a thinner line, like ink spreading less.
fn velocity_scale(a: &Segment, b: &Segment) -> f32 {
    let elapsed = b.time.saturating_sub(a.time).max(1) as f32;
    let velocity = a.point.distance(&b.point) / elapsed;
    (1.0 / (1.0 + velocity)).max(ADAPTIVE_MIN_SCALE)
}
