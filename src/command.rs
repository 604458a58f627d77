use kurbo::{BezPath, Vec2};

use crate::model::{DrawingModel, ShapeEdit};
use crate::scene::{ItemId, Shape};

/// A model mutation produced by a tool gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddShape(Shape),
    RemoveShape(ItemId),
    Select(ItemId),
    ClearSelection,
    /// Moves a shape to `from` offset by `delta`.
    MoveShape {
        id: ItemId,
        from: BezPath,
        delta: Vec2,
    },
    /// Resets a shape to `from` and scales it by `factor` about its centre.
    ScaleShape {
        id: ItemId,
        from: BezPath,
        factor: f64,
    },
}

impl Command {
    /// Applies the command. Returns the id of a newly added shape, if any.
    pub fn execute(self, model: &mut DrawingModel) -> Option<ItemId> {
        match self {
            Command::AddShape(shape) => {
                log::debug!("adding {:?}", shape.kind);
                return Some(model.add_item(shape));
            }
            Command::RemoveShape(id) => model.remove_item(id),
            Command::Select(id) => model.select_item(id),
            Command::ClearSelection => model.clear_selection(),
            Command::MoveShape { id, from, delta } => {
                model.edit_shape(id, ShapeEdit::Translate { from, delta });
            }
            Command::ScaleShape { id, from, factor } => {
                model.edit_shape(id, ShapeEdit::ScaleFrom { from, factor });
            }
        }
        None
    }
}
