use kurbo::Point;

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::model::DrawingModel;
use crate::tools::{GrabbedShape, Tool, grab_shape};

/// Grows the shape under the pointer in proportion to the drag distance.
///
/// Every drag step rescales the snapshot taken at pointer-down, so the
/// factor never compounds: `factor = 1 + distance / divisor`.
#[derive(Debug, Clone)]
pub struct ResizeTool {
    tolerance: f64,
    divisor: f64,
    grabbed: Option<GrabbedShape>,
}

impl ResizeTool {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            tolerance: config.hit_tolerance,
            divisor: config.resize_divisor.max(f64::EPSILON),
            grabbed: None,
        }
    }

    pub fn factor_for(&self, anchor: Point, pos: Point) -> f64 {
        1.0 + (pos - anchor).hypot() / self.divisor
    }
}

impl Tool for ResizeTool {
    fn name(&self) -> &'static str {
        "Resize"
    }

    fn deactivate(&mut self) {
        self.grabbed = None;
    }

    fn on_pointer_down(&mut self, pos: Point, model: &DrawingModel) -> Option<Command> {
        self.grabbed = grab_shape(model, pos, self.tolerance);
        self.grabbed.as_ref().map(|grabbed| Command::Select(grabbed.id))
    }

    fn on_pointer_drag(&mut self, pos: Point, _model: &DrawingModel) -> Option<Command> {
        let grabbed = self.grabbed.as_ref()?;
        Some(Command::ScaleShape {
            id: grabbed.id,
            from: grabbed.from.clone(),
            factor: self.factor_for(grabbed.anchor, pos),
        })
    }

    fn on_pointer_up(&mut self, _pos: Point, _model: &DrawingModel) -> Option<Command> {
        self.grabbed = None;
        None
    }
}
