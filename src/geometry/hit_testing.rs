use kurbo::{BezPath, ParamCurveNearest, PathEl, Point, Rect};

use crate::geometry::PATH_TOLERANCE;

/// Default pick tolerance around outlines, in canvas units.
pub const HIT_TOLERANCE: f64 = 5.0;
/// Accuracy passed to kurbo's nearest-point solver.
const NEAREST_ACCURACY: f64 = 1e-3;
/// Rough advance width of a glyph relative to the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.55;

/// What part of an item counts as "hit".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOptions {
    pub fill: bool,
    pub stroke: bool,
    pub tolerance: f64,
}

impl Default for HitOptions {
    fn default() -> Self {
        Self {
            fill: true,
            stroke: true,
            tolerance: HIT_TOLERANCE,
        }
    }
}

impl HitOptions {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}

/// Shortest distance from `point` to the outline of `path`, or `None` for an empty path.
pub fn distance_to_outline(path: &BezPath, point: Point) -> Option<f64> {
    path.segments()
        .map(|seg| seg.nearest(point, NEAREST_ACCURACY).distance_sq)
        .min_by(|a, b| a.total_cmp(b))
        .map(f64::sqrt)
}

/// Nonzero winding of the flattened outline around `point`. Every subpath is
/// treated as closed, matching how fills are tessellated.
///
/// Crossings use a half-open rule on y so a ray through a vertex where two
/// segments join is counted exactly once.
pub fn winding_number(path: &BezPath, point: Point) -> i32 {
    let mut winding = 0;
    let mut start: Option<Point> = None;
    let mut last: Option<Point> = None;
    let mut cross = |a: Point, b: Point| {
        if a.y <= point.y && b.y > point.y && is_left(a, b, point) > 0.0 {
            winding += 1;
        } else if a.y > point.y && b.y <= point.y && is_left(a, b, point) < 0.0 {
            winding -= 1;
        }
    };
    kurbo::flatten(path.elements().iter().copied(), PATH_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            if let (Some(a), Some(b)) = (last, start) {
                cross(a, b);
            }
            start = Some(p);
            last = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(a) = last {
                cross(a, p);
            }
            last = Some(p);
        }
        PathEl::ClosePath => {
            if let (Some(a), Some(b)) = (last, start) {
                cross(a, b);
            }
            last = start;
        }
        _ => {}
    });
    if let (Some(a), Some(b)) = (last, start) {
        cross(a, b);
    }
    winding
}

fn is_left(a: Point, b: Point, p: Point) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

/// Hit test for a path item.
///
/// A filled path is hit inside its area or within `tolerance` of its outline.
/// A stroked path is hit within half the stroke width plus `tolerance`.
pub fn hit_path(
    path: &BezPath,
    point: Point,
    filled: bool,
    stroke_width: Option<f64>,
    options: HitOptions,
) -> bool {
    let Some(distance) = distance_to_outline(path, point) else {
        return false;
    };

    if options.fill && filled && (winding_number(path, point) != 0 || distance <= options.tolerance) {
        return true;
    }

    if options.stroke {
        if let Some(width) = stroke_width {
            return distance <= width / 2.0 + options.tolerance;
        }
    }

    false
}

/// Estimated bounds of a single line of text whose baseline starts at `anchor`.
pub fn text_bounds(anchor: Point, content: &str, font_size: f64) -> Rect {
    let width = content.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO;
    Rect::new(anchor.x, anchor.y - font_size, anchor.x + width, anchor.y)
}

pub fn hit_text(anchor: Point, content: &str, font_size: f64, point: Point, options: HitOptions) -> bool {
    options.fill && text_bounds(anchor, content, font_size).inflate(options.tolerance, options.tolerance).contains(point)
}
