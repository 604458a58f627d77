use egui::Color32;
use kurbo::{BezPath, Point, Shape as _};

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::geometry;
use crate::model::DrawingModel;
use crate::scene::{Item, Shape, ShapeKind, Style};
use crate::tools::Tool;

/// Drag-to-size tool for circles (centre + radius) and rectangles (two corners).
#[derive(Debug, Clone)]
pub struct ShapeTool {
    kind: ShapeKind,
    outline_width: f64,
    anchor: Option<Point>,
    preview: Option<Item>,
}

impl ShapeTool {
    pub fn circle(config: &CanvasConfig) -> Self {
        Self::new(ShapeKind::Circle, config)
    }

    pub fn rectangle(config: &CanvasConfig) -> Self {
        Self::new(ShapeKind::Rectangle, config)
    }

    fn new(kind: ShapeKind, config: &CanvasConfig) -> Self {
        Self {
            kind,
            outline_width: config.shape_stroke_width,
            anchor: None,
            preview: None,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    fn outline(&self, anchor: Point, pos: Point) -> BezPath {
        match self.kind {
            ShapeKind::Circle => geometry::circle_path(anchor, (pos - anchor).hypot()),
            _ => geometry::rect_path(anchor, pos),
        }
    }

    fn style(&self, model: &DrawingModel) -> Style {
        Style::filled(model.color()).with_stroke(Color32::BLACK, self.outline_width)
    }
}

impl Tool for ShapeTool {
    fn name(&self) -> &'static str {
        match self.kind {
            ShapeKind::Circle => "Circle",
            _ => "Rectangle",
        }
    }

    fn deactivate(&mut self) {
        self.anchor = None;
        self.preview = None;
    }

    fn on_pointer_down(&mut self, pos: Point, _model: &DrawingModel) -> Option<Command> {
        self.anchor = Some(pos);
        self.preview = None;
        None
    }

    fn on_pointer_drag(&mut self, pos: Point, model: &DrawingModel) -> Option<Command> {
        let anchor = self.anchor?;
        // Each drag step replaces the previous preview outright.
        self.preview = Some(Item::preview(self.outline(anchor, pos), self.style(model)));
        None
    }

    fn on_pointer_up(&mut self, _pos: Point, _model: &DrawingModel) -> Option<Command> {
        self.anchor = None;
        let preview = self.preview.take()?;
        let path = preview.path()?.clone();
        if path.bounding_box().area() <= f64::EPSILON {
            log::debug!("dropping zero-size {:?}", self.kind);
            return None;
        }
        Some(Command::AddShape(Shape {
            kind: self.kind,
            path,
            style: *preview.style(),
        }))
    }

    fn preview(&self) -> Option<&Item> {
        self.preview.as_ref()
    }
}
