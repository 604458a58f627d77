use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point, Vec2};

const ARCLEN_ACCURACY: f64 = 1e-4;
const TANGENT_STEP: f64 = 1e-4;

/// Arc-length parameterisation of a path.
///
/// Segment lengths are computed once; `point_at` then walks the cached
/// lengths and inverts within the owning segment.
#[derive(Debug, Clone)]
pub struct PathSampler {
    segments: Vec<(PathSeg, f64)>,
    length: f64,
}

impl PathSampler {
    pub fn new(path: &BezPath) -> Self {
        let segments: Vec<(PathSeg, f64)> = path
            .segments()
            .map(|seg| (seg, seg.arclen(ARCLEN_ACCURACY)))
            .collect();
        let length = segments.iter().map(|(_, len)| len).sum();
        Self { segments, length }
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment and local parameter at `distance` along the path (clamped to the path).
    fn locate(&self, distance: f64) -> Option<(PathSeg, f64)> {
        let (last, _) = *self.segments.last()?;
        let mut remaining = distance.clamp(0.0, self.length);
        for &(seg, len) in &self.segments {
            if remaining <= len && len > 0.0 {
                return Some((seg, seg.inv_arclen(remaining, ARCLEN_ACCURACY)));
            }
            remaining -= len;
        }
        Some((last, 1.0))
    }

    pub fn point_at(&self, distance: f64) -> Option<Point> {
        self.locate(distance).map(|(seg, t)| seg.eval(t))
    }

    /// Unit tangent at `distance`, following the path direction.
    pub fn tangent_at(&self, distance: f64) -> Option<Vec2> {
        let (seg, t) = self.locate(distance)?;
        let before = seg.eval((t - TANGENT_STEP).max(0.0));
        let after = seg.eval((t + TANGENT_STEP).min(1.0));
        let mut dir = after - before;
        if dir.hypot() < f64::EPSILON {
            dir = seg.end() - seg.start();
        }
        if dir.hypot() < f64::EPSILON {
            return Some(Vec2::ZERO);
        }
        Some(dir.normalize())
    }
}
