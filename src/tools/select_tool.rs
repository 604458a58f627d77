use kurbo::Point;

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::model::DrawingModel;
use crate::tools::{GrabbedShape, Tool, grab_shape};

/// Picks the topmost shape under the pointer and drags it around.
#[derive(Debug, Clone)]
pub struct SelectTool {
    tolerance: f64,
    grabbed: Option<GrabbedShape>,
}

impl SelectTool {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            tolerance: config.hit_tolerance,
            grabbed: None,
        }
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn deactivate(&mut self) {
        self.grabbed = None;
    }

    fn on_pointer_down(&mut self, pos: Point, model: &DrawingModel) -> Option<Command> {
        self.grabbed = grab_shape(model, pos, self.tolerance);
        match &self.grabbed {
            Some(grabbed) => Some(Command::Select(grabbed.id)),
            None => Some(Command::ClearSelection),
        }
    }

    fn on_pointer_drag(&mut self, pos: Point, _model: &DrawingModel) -> Option<Command> {
        let grabbed = self.grabbed.as_ref()?;
        Some(Command::MoveShape {
            id: grabbed.id,
            from: grabbed.from.clone(),
            delta: pos - grabbed.anchor,
        })
    }

    fn on_pointer_up(&mut self, _pos: Point, _model: &DrawingModel) -> Option<Command> {
        self.grabbed = None;
        None
    }
}
