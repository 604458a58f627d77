use kurbo::Point;

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::geometry;
use crate::model::DrawingModel;
use crate::scene::{Item, Shape, ShapeKind, Style};
use crate::tools::Tool;

/// Records a pointer trail and commits it as a simplified smooth stroke.
#[derive(Debug, Clone)]
pub struct FreehandTool {
    min_distance: f64,
    max_distance: f64,
    stroke_width: f64,
    simplify_tolerance: f64,
    points: Vec<Point>,
    preview: Option<Item>,
}

impl FreehandTool {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            min_distance: config.freehand_min_distance,
            max_distance: config.freehand_max_distance.max(config.freehand_min_distance),
            stroke_width: config.freehand_stroke_width,
            simplify_tolerance: config.simplify_tolerance,
            points: Vec::new(),
            preview: None,
        }
    }

    /// Samples recorded for the stroke in progress.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Appends `pos`, dropping samples that are too close and subdividing
    /// jumps longer than the maximum spacing.
    fn add_sample(&mut self, pos: Point) -> bool {
        let Some(&last) = self.points.last() else {
            self.points.push(pos);
            return true;
        };
        let distance = (pos - last).hypot();
        if distance < self.min_distance {
            return false;
        }
        if self.max_distance > 0.0 && distance > self.max_distance {
            let steps = (distance / self.max_distance).ceil() as usize;
            for step in 1..steps {
                self.points.push(last.lerp(pos, step as f64 / steps as f64));
            }
        }
        self.points.push(pos);
        true
    }

    fn refresh_preview(&mut self, style: Style) {
        self.preview = Some(Item::preview(geometry::polyline_path(&self.points, false), style));
    }
}

impl Tool for FreehandTool {
    fn name(&self) -> &'static str {
        "Freehand"
    }

    fn deactivate(&mut self) {
        self.points.clear();
        self.preview = None;
    }

    fn on_pointer_down(&mut self, pos: Point, model: &DrawingModel) -> Option<Command> {
        self.points.clear();
        self.points.push(pos);
        self.refresh_preview(Style::stroked(model.color(), self.stroke_width));
        None
    }

    fn on_pointer_drag(&mut self, pos: Point, model: &DrawingModel) -> Option<Command> {
        if self.points.is_empty() {
            return None;
        }
        if self.add_sample(pos) {
            let style = self
                .preview
                .as_ref()
                .map(|preview| *preview.style())
                .unwrap_or_else(|| Style::stroked(model.color(), self.stroke_width));
            self.refresh_preview(style);
        }
        None
    }

    fn on_pointer_up(&mut self, _pos: Point, _model: &DrawingModel) -> Option<Command> {
        let points = std::mem::take(&mut self.points);
        let preview = self.preview.take()?;
        if points.len() < 2 {
            log::debug!("dropping freehand stroke with {} point(s)", points.len());
            return None;
        }
        Some(Command::AddShape(Shape {
            kind: ShapeKind::Freehand,
            path: geometry::simplify_polyline(&points, self.simplify_tolerance),
            style: *preview.style(),
        }))
    }

    fn preview(&self) -> Option<&Item> {
        self.preview.as_ref()
    }
}
