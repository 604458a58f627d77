use std::fmt;

use kurbo::{BezPath, Point, Vec2};

use crate::config::MorphParams;
use crate::demos::add_instructions;
use crate::geometry::{self, PathSampler};
use crate::model::DrawingModel;
use crate::palette::hsv;
use crate::scene::{Item, ItemId, Style};

pub const INSTRUCTIONS: &str = "Morphing Animation: Circle ↔ Star ↔ Polygon";

/// The outlines the morpher cycles through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphTarget {
    Circle,
    Star,
    Polygon,
}

impl MorphTarget {
    pub fn next(self) -> Self {
        match self {
            Self::Circle => Self::Star,
            Self::Star => Self::Polygon,
            Self::Polygon => Self::Circle,
        }
    }
}

impl fmt::Display for MorphTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Circle => "circle",
            Self::Star => "star",
            Self::Polygon => "polygon",
        })
    }
}

/// An anchor with its incoming and outgoing handles, relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub point: Point,
    pub handle_in: Vec2,
    pub handle_out: Vec2,
}

impl Segment {
    fn lerp(&self, other: &Segment, t: f64) -> Segment {
        Segment {
            point: self.point.lerp(other.point, t),
            handle_in: self.handle_in.lerp(other.handle_in, t),
            handle_out: self.handle_out.lerp(other.handle_out, t),
        }
    }
}

/// A closed outline as a ring of segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    segments: Vec<Segment>,
}

impl Outline {
    /// Resamples a closed path into `count` segments evenly spaced by arc
    /// length, starting at the path's first point. Handles follow the
    /// tangent with a third of the spacing as length.
    pub fn resample(path: &BezPath, count: usize) -> Self {
        let sampler = PathSampler::new(path);
        let count = count.max(3);
        let spacing = sampler.length() / count as f64;
        let segments = (0..count)
            .filter_map(|i| {
                let distance = spacing * i as f64;
                let point = sampler.point_at(distance)?;
                let tangent = sampler.tangent_at(distance)? * (spacing / 3.0);
                Some(Segment {
                    point,
                    handle_in: -tangent,
                    handle_out: tangent,
                })
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Pairs segments index by index over the shorter outline (wrapping the
    /// longer one cyclically) and interpolates anchors and handles.
    pub fn interpolate(from: &Outline, to: &Outline, t: f64) -> Outline {
        let count = from.len().min(to.len());
        let segments = (0..count)
            .map(|i| from.segments[i % from.len()].lerp(&to.segments[i % to.len()], t))
            .collect();
        Outline { segments }
    }

    /// Closed path through the anchors using the stored handles.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.segments.first() else {
            return path;
        };
        path.move_to(first.point);
        let n = self.segments.len();
        for i in 0..n {
            let a = &self.segments[i];
            let b = &self.segments[(i + 1) % n];
            path.curve_to(a.point + a.handle_out, b.point + b.handle_in, b.point);
        }
        path.close_path();
        path
    }

    /// Closed path through the anchors with freshly smoothed handles.
    pub fn smoothed_path(&self) -> BezPath {
        let anchors: Vec<Point> = self.segments.iter().map(|segment| segment.point).collect();
        geometry::smooth_closed(&anchors)
    }
}

/// Builds the outline of `target` for the given parameters, resampled to the
/// shared vertex count. All outlines start at the top and run clockwise.
pub fn target_outline(target: MorphTarget, center: Point, params: &MorphParams) -> Outline {
    let path = match target {
        MorphTarget::Circle => geometry::circle_path(center, params.radius),
        MorphTarget::Star => geometry::polyline_path(
            &geometry::star_points(center, params.radius, params.star_inner_ratio, params.star_points),
            true,
        ),
        MorphTarget::Polygon => geometry::polyline_path(
            &geometry::regular_polygon_points(center, params.radius, params.polygon_sides),
            true,
        ),
    };
    Outline::resample(&path, params.vertex_count)
}

/// Continuously morphs one shape through circle, star and polygon while its
/// hue rotates.
#[derive(Debug)]
pub struct ShapeMorpher {
    params: MorphParams,
    circle: Outline,
    star: Outline,
    polygon: Outline,
    current: MorphTarget,
    target: MorphTarget,
    frame: u32,
    hue: f64,
    displayed: Outline,
    shape: ItemId,
}

impl ShapeMorpher {
    pub fn start(params: MorphParams, model: &mut DrawingModel) -> Self {
        let center = model.scene().center() + Vec2::new(params.center_offset_x, 0.0);
        let circle = target_outline(MorphTarget::Circle, center, &params);
        let star = target_outline(MorphTarget::Star, center, &params);
        let polygon = target_outline(MorphTarget::Polygon, center, &params);

        let displayed = circle.clone();
        let hue = 0.0;
        let shape = model
            .scene_mut()
            .content_mut()
            .insert(Item::demo(displayed.smoothed_path(), Self::style(hue)));
        add_instructions(model, INSTRUCTIONS);

        Self {
            params,
            circle,
            star,
            polygon,
            current: MorphTarget::Circle,
            target: MorphTarget::Star,
            frame: 0,
            hue,
            displayed,
            shape,
        }
    }

    fn style(hue: f64) -> Style {
        Style::filled(hsv(hue, 0.7, 0.9)).with_stroke(hsv(hue + 180.0, 0.8, 0.7), 2.0)
    }

    pub fn outline(&self, target: MorphTarget) -> &Outline {
        match target {
            MorphTarget::Circle => &self.circle,
            MorphTarget::Star => &self.star,
            MorphTarget::Polygon => &self.polygon,
        }
    }

    pub fn current(&self) -> MorphTarget {
        self.current
    }

    pub fn target(&self) -> MorphTarget {
        self.target
    }

    /// Progress of the running transition, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.frame as f64 / self.params.frames_per_transition() as f64
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn displayed(&self) -> &Outline {
        &self.displayed
    }

    pub fn shape_item(&self) -> ItemId {
        self.shape
    }

    pub fn set_params(&mut self, params: MorphParams) {
        self.params = params;
    }

    pub fn tick(&mut self, model: &mut DrawingModel) {
        self.frame += 1;
        self.hue = (self.hue + self.params.rotation_speed).rem_euclid(360.0);

        if self.frame >= self.params.frames_per_transition() {
            self.frame = 0;
            self.current = self.target;
            self.target = self.target.next();
            log::debug!("morph reached {}, heading to {}", self.current, self.target);
        }

        self.displayed = Outline::interpolate(
            self.outline(self.current),
            self.outline(self.target),
            self.progress(),
        );

        if let Some(item) = model.scene_mut().content_mut().get_mut(self.shape) {
            let style = Self::style(self.hue);
            item.set_path(self.displayed.smoothed_path());
            item.set_fill(style.fill);
            item.set_stroke(style.stroke, style.stroke_width);
        }
    }
}
