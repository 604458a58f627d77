use egui::Color32;
use kurbo::{BezPath, Point};

use crate::config::CurveParams;
use crate::demos::add_instructions;
use crate::geometry::{self, PathSampler};
use crate::model::DrawingModel;
use crate::palette::hsv;
use crate::scene::{Item, ItemId, Style};

pub const INSTRUCTIONS: &str = "Click to add points (max 6). Drag points to adjust the curve.";

const CURVE_HUE: f64 = 210.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub id: ItemId,
    pub position: Point,
}

/// Builds the curve for a sequence of control points:
/// a line for 2, a quadratic for 3, a cubic for 4 and a smooth spline
/// through every point beyond that. Fewer than 2 points give no curve.
pub fn curve_through(points: &[Point]) -> Option<BezPath> {
    let mut path = BezPath::new();
    match points {
        [] | [_] => return None,
        [p0, p1] => {
            path.move_to(*p0);
            path.line_to(*p1);
        }
        [p0, c, p1] => {
            path.move_to(*p0);
            path.quad_to(*c, *p1);
        }
        [p0, c1, c2, p1] => {
            path.move_to(*p0);
            path.curve_to(*c1, *c2, *p1);
        }
        _ => path = geometry::smooth_open(points),
    }
    Some(path)
}

/// Click-to-place control points with a marker that travels along the
/// resulting curve at constant speed.
#[derive(Debug)]
pub struct CurveDesigner {
    params: CurveParams,
    points: Vec<ControlPoint>,
    curve: Option<ItemId>,
    curve_path: Option<BezPath>,
    sampler: Option<PathSampler>,
    marker: Option<ItemId>,
    progress: f64,
    dragging: Option<usize>,
}

impl CurveDesigner {
    pub fn start(params: CurveParams, model: &mut DrawingModel) -> Self {
        add_instructions(model, INSTRUCTIONS);
        Self {
            params,
            points: Vec::new(),
            curve: None,
            curve_path: None,
            sampler: None,
            marker: None,
            progress: 0.0,
            dragging: None,
        }
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn curve_path(&self) -> Option<&BezPath> {
        self.curve_path.as_ref()
    }

    pub fn curve_item(&self) -> Option<ItemId> {
        self.curve
    }

    pub fn marker_item(&self) -> Option<ItemId> {
        self.marker
    }

    /// Fraction of the curve length the marker has travelled, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn set_params(&mut self, params: CurveParams) {
        self.params = params;
    }

    fn handle_at(&self, pos: Point) -> Option<usize> {
        self.points
            .iter()
            .rposition(|point| (point.position - pos).hypot() <= self.params.point_size)
    }

    pub fn on_pointer_down(&mut self, pos: Point, model: &mut DrawingModel) {
        if let Some(index) = self.handle_at(pos) {
            self.dragging = Some(index);
            return;
        }
        if self.points.len() >= self.params.max_points {
            log::debug!("curve already has {} points", self.points.len());
            return;
        }

        let hue = (self.points.len() * 60 % 360) as f64;
        let handle = Item::demo(
            geometry::circle_path(pos, self.params.point_size),
            Style::filled(hsv(hue, 0.7, 1.0)).with_stroke(Color32::WHITE, 2.0),
        );
        let id = model.scene_mut().content_mut().insert(handle);
        self.points.push(ControlPoint { id, position: pos });
        // A press that adds a point keeps hold of it for the rest of the drag.
        self.dragging = Some(self.points.len() - 1);
        self.rebuild(model);
    }

    pub fn on_pointer_drag(&mut self, pos: Point, model: &mut DrawingModel) {
        let Some(point) = self.dragging.and_then(|index| self.points.get_mut(index)) else {
            return;
        };
        point.position = pos;
        if let Some(item) = model.scene_mut().content_mut().get_mut(point.id) {
            item.set_position(pos);
        }
        self.rebuild(model);
    }

    pub fn on_pointer_up(&mut self) {
        self.dragging = None;
    }

    /// Replaces the curve and marker after the control points changed.
    fn rebuild(&mut self, model: &mut DrawingModel) {
        let content = model.scene_mut().content_mut();
        if let Some(id) = self.curve.take() {
            content.remove(id);
        }
        if let Some(id) = self.marker.take() {
            content.remove(id);
        }
        self.curve_path = None;
        self.sampler = None;
        self.progress = 0.0;

        let positions: Vec<Point> = self.points.iter().map(|point| point.position).collect();
        let Some(path) = curve_through(&positions) else {
            return;
        };

        let curve = Item::demo(
            path.clone(),
            Style::stroked(hsv(CURVE_HUE, 0.8, 0.8), self.params.curve_width),
        );
        self.curve = Some(content.insert_at_bottom(curve));

        let marker = Item::demo(
            geometry::circle_path(positions[0], self.params.marker_radius),
            Style::filled(hsv(0.0, 1.0, 1.0)),
        );
        self.marker = Some(content.insert(marker));

        self.sampler = Some(PathSampler::new(&path));
        self.curve_path = Some(path);
    }

    /// Advances the marker one frame along the curve.
    pub fn tick(&mut self, model: &mut DrawingModel) {
        let (Some(sampler), Some(marker)) = (&self.sampler, self.marker) else {
            return;
        };
        self.progress = (self.progress + self.params.animation_speed).rem_euclid(1.0);
        let Some(position) = sampler.point_at(self.progress * sampler.length()) else {
            return;
        };
        if let Some(item) = model.scene_mut().content_mut().get_mut(marker) {
            item.set_position(position);
            item.set_fill(Some(hsv(self.progress * 360.0, 1.0, 1.0)));
        }
    }

    /// Removes every control point, the curve and the marker.
    pub fn reset(&mut self, model: &mut DrawingModel) {
        let content = model.scene_mut().content_mut();
        for point in self.points.drain(..) {
            content.remove(point.id);
        }
        self.dragging = None;
        self.rebuild(model);
        log::debug!("curve designer reset");
    }
}
