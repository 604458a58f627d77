//! Path construction and transformation helpers on top of `kurbo`.
//!
//! All coordinates are canvas units: origin top-left, y growing downwards.
//! "Clockwise" below means clockwise as seen on screen.

pub mod hit_testing;
mod sampler;

pub use hit_testing::{HitOptions, distance_to_outline, hit_path, winding_number};
pub use sampler::PathSampler;

use kurbo::simplify::{SimplifyOptions, simplify_bezpath};
use kurbo::{Affine, BezPath, Point, Rect, RoundedRect, Shape, Vec2};

/// Cubic handle length factor for approximating a quarter circle.
pub const KAPPA: f64 = 0.552_284_749_8;

/// Tolerance used when converting kurbo primitives into paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Circle as four cubic segments, starting at the top and running clockwise.
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    let k = radius * KAPPA;
    let (cx, cy) = (center.x, center.y);
    let top = Point::new(cx, cy - radius);
    let right = Point::new(cx + radius, cy);
    let bottom = Point::new(cx, cy + radius);
    let left = Point::new(cx - radius, cy);

    let mut path = BezPath::new();
    path.move_to(top);
    path.curve_to(Point::new(cx + k, cy - radius), Point::new(cx + radius, cy - k), right);
    path.curve_to(Point::new(cx + radius, cy + k), Point::new(cx + k, cy + radius), bottom);
    path.curve_to(Point::new(cx - k, cy + radius), Point::new(cx - radius, cy + k), left);
    path.curve_to(Point::new(cx - radius, cy - k), Point::new(cx - k, cy - radius), top);
    path.close_path();
    path
}

/// Closed axis-aligned rectangle spanning two opposite corners given in any order.
pub fn rect_path(a: Point, b: Point) -> BezPath {
    let rect = Rect::from_points(a, b);
    let mut path = BezPath::new();
    path.move_to((rect.x0, rect.y0));
    path.line_to((rect.x1, rect.y0));
    path.line_to((rect.x1, rect.y1));
    path.line_to((rect.x0, rect.y1));
    path.close_path();
    path
}

pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    RoundedRect::from_rect(rect, radius).to_path(PATH_TOLERANCE)
}

/// Vertices of a regular polygon, first vertex straight up, clockwise.
pub fn regular_polygon_points(center: Point, radius: f64, sides: usize) -> Vec<Point> {
    let sides = sides.max(3);
    (0..sides)
        .map(|i| {
            let angle = -std::f64::consts::FRAC_PI_2 + std::f64::consts::TAU * i as f64 / sides as f64;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Vertices of a star with `points` tips, alternating outer and inner radius,
/// first tip straight up, clockwise.
pub fn star_points(center: Point, outer: f64, inner_ratio: f64, points: usize) -> Vec<Point> {
    let count = points.max(2) * 2;
    (0..count)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { outer * inner_ratio };
            let angle = -std::f64::consts::FRAC_PI_2 + std::f64::consts::TAU * i as f64 / count as f64;
            center + Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Straight-edged path through `points`.
pub fn polyline_path(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(*first);
    for p in rest {
        path.line_to(*p);
    }
    if closed {
        path.close_path();
    }
    path
}

/// Catmull-Rom smoothing through every point of an open sequence.
pub fn smooth_open(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let n = points.len();
    if n == 0 {
        return path;
    }
    path.move_to(points[0]);
    for i in 0..n.saturating_sub(1) {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        let (c1, c2) = catmull_rom_handles(p0, p1, p2, p3);
        path.curve_to(c1, c2, p2);
    }
    path
}

/// Catmull-Rom smoothing through a closed loop of points.
pub fn smooth_closed(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let n = points.len();
    if n < 3 {
        return polyline_path(points, true);
    }
    path.move_to(points[0]);
    for i in 0..n {
        let p0 = points[(i + n - 1) % n];
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];
        let (c1, c2) = catmull_rom_handles(p0, p1, p2, p3);
        path.curve_to(c1, c2, p2);
    }
    path.close_path();
    path
}

fn catmull_rom_handles(p0: Point, p1: Point, p2: Point, p3: Point) -> (Point, Point) {
    let c1 = p1 + (p2 - p0) / 6.0;
    let c2 = p2 - (p3 - p1) / 6.0;
    (c1, c2)
}

/// Fits smooth curves through a hand-drawn polyline; `tolerance` is the
/// maximum allowed deviation in canvas units.
pub fn simplify_polyline(points: &[Point], tolerance: f64) -> BezPath {
    if points.len() < 3 {
        return polyline_path(points, false);
    }
    let smoothed = smooth_open(points);
    simplify_bezpath(smoothed.elements().iter().copied(), tolerance, &SimplifyOptions::default())
}

pub fn translated(path: &BezPath, delta: Vec2) -> BezPath {
    Affine::translate(delta) * path.clone()
}

/// Uniform scale of `path` about `center`.
pub fn scaled_about(path: &BezPath, factor: f64, center: Point) -> BezPath {
    let to_origin = center.to_vec2();
    Affine::translate(to_origin) * Affine::scale(factor) * Affine::translate(-to_origin) * path.clone()
}

pub fn bounds(path: &BezPath) -> Rect {
    path.bounding_box()
}

/// Anchor points of a path in order (the end point of every element that has one).
pub fn anchors(path: &BezPath) -> Vec<Point> {
    path.elements()
        .iter()
        .filter_map(|el| el.end_point())
        .collect()
}
