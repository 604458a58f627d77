use std::fmt;
use std::str::FromStr;

use kurbo::Point;

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::model::DrawingModel;
use crate::scene::Item;

mod freehand_tool;
mod resize_tool;
mod select_tool;
mod shape_tool;

pub use freehand_tool::FreehandTool;
pub use resize_tool::ResizeTool;
pub use select_tool::SelectTool;
pub use shape_tool::ShapeTool;

/// The tools a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Select,
    Circle,
    Rectangle,
    Freehand,
    Resize,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Select,
        ToolKind::Circle,
        ToolKind::Rectangle,
        ToolKind::Freehand,
        ToolKind::Resize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Freehand => "freehand",
            Self::Resize => "resize",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Select => "Select",
            Self::Circle => "Circle",
            Self::Rectangle => "Rectangle",
            Self::Freehand => "Free Draw",
            Self::Resize => "Resize",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Self::Select => 'S',
            Self::Circle => 'C',
            Self::Rectangle => 'R',
            Self::Freehand => 'F',
            Self::Resize => 'Z',
        }
    }
}

impl FromStr for ToolKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(Self::Select),
            "circle" => Ok(Self::Circle),
            "rectangle" => Ok(Self::Rectangle),
            "freehand" | "freedraw" => Ok(Self::Freehand),
            "resize" => Ok(Self::Resize),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A gesture handler for one tool.
///
/// Handlers read the model but never mutate it; any change is returned as a
/// [`Command`] for the controller to execute.
pub trait Tool {
    fn name(&self) -> &'static str;

    /// Called when the tool becomes the active one.
    fn activate(&mut self) {}

    /// Called when another tool takes over. Drops any gesture in progress.
    fn deactivate(&mut self);

    fn on_pointer_down(&mut self, pos: Point, model: &DrawingModel) -> Option<Command>;

    /// Pointer moved while held down.
    fn on_pointer_drag(&mut self, pos: Point, model: &DrawingModel) -> Option<Command>;

    fn on_pointer_up(&mut self, pos: Point, model: &DrawingModel) -> Option<Command>;

    /// Transient geometry to draw on top of the content layer.
    fn preview(&self) -> Option<&Item> {
        None
    }
}

/// Enum over every tool handler, so the controller can hold one without boxing.
#[derive(Debug, Clone)]
pub enum ToolType {
    Select(SelectTool),
    Shape(ShapeTool),
    Freehand(FreehandTool),
    Resize(ResizeTool),
}

impl ToolType {
    pub fn new(kind: ToolKind, config: &CanvasConfig) -> Self {
        match kind {
            ToolKind::Select => Self::Select(SelectTool::new(config)),
            ToolKind::Circle => Self::Shape(ShapeTool::circle(config)),
            ToolKind::Rectangle => Self::Shape(ShapeTool::rectangle(config)),
            ToolKind::Freehand => Self::Freehand(FreehandTool::new(config)),
            ToolKind::Resize => Self::Resize(ResizeTool::new(config)),
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Select(tool) => tool.name(),
            Self::Shape(tool) => tool.name(),
            Self::Freehand(tool) => tool.name(),
            Self::Resize(tool) => tool.name(),
        }
    }

    fn activate(&mut self) {
        match self {
            Self::Select(tool) => tool.activate(),
            Self::Shape(tool) => tool.activate(),
            Self::Freehand(tool) => tool.activate(),
            Self::Resize(tool) => tool.activate(),
        }
    }

    fn deactivate(&mut self) {
        match self {
            Self::Select(tool) => tool.deactivate(),
            Self::Shape(tool) => tool.deactivate(),
            Self::Freehand(tool) => tool.deactivate(),
            Self::Resize(tool) => tool.deactivate(),
        }
    }

    fn on_pointer_down(&mut self, pos: Point, model: &DrawingModel) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_down(pos, model),
            Self::Shape(tool) => tool.on_pointer_down(pos, model),
            Self::Freehand(tool) => tool.on_pointer_down(pos, model),
            Self::Resize(tool) => tool.on_pointer_down(pos, model),
        }
    }

    fn on_pointer_drag(&mut self, pos: Point, model: &DrawingModel) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_drag(pos, model),
            Self::Shape(tool) => tool.on_pointer_drag(pos, model),
            Self::Freehand(tool) => tool.on_pointer_drag(pos, model),
            Self::Resize(tool) => tool.on_pointer_drag(pos, model),
        }
    }

    fn on_pointer_up(&mut self, pos: Point, model: &DrawingModel) -> Option<Command> {
        match self {
            Self::Select(tool) => tool.on_pointer_up(pos, model),
            Self::Shape(tool) => tool.on_pointer_up(pos, model),
            Self::Freehand(tool) => tool.on_pointer_up(pos, model),
            Self::Resize(tool) => tool.on_pointer_up(pos, model),
        }
    }

    fn preview(&self) -> Option<&Item> {
        match self {
            Self::Shape(tool) => tool.preview(),
            Self::Freehand(tool) => tool.preview(),
            _ => None,
        }
    }
}

/// Snapshot of the shape under the pointer at gesture start.
#[derive(Debug, Clone)]
pub(crate) struct GrabbedShape {
    pub id: crate::scene::ItemId,
    pub from: kurbo::BezPath,
    pub anchor: Point,
}

/// Topmost shape under `pos`, with its current path.
pub(crate) fn grab_shape(model: &DrawingModel, pos: Point, tolerance: f64) -> Option<GrabbedShape> {
    let options = crate::geometry::HitOptions::with_tolerance(tolerance);
    let item = model
        .scene()
        .content()
        .hit_test_filtered(pos, options, Item::is_shape)?;
    Some(GrabbedShape {
        id: item.id(),
        from: item.path()?.clone(),
        anchor: pos,
    })
}
