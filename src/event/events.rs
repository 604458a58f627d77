use crate::demos::DemoKind;
use crate::palette::ColorChoice;
use crate::scene::ItemId;
use crate::tools::ToolKind;

/// A change to the drawing model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    ColorChanged(ColorChoice),
    ShapeAdded(ItemId),
    ShapeRemoved(ItemId),
    ShapeUpdated(ItemId),
    SelectionChanged {
        old: Option<ItemId>,
        new: Option<ItemId>,
    },
    /// Every shape was dropped along with the rest of the content layer.
    ShapesCleared,
    DemoChanged(Option<DemoKind>),
}

/// Snapshot of the model handed to every listener alongside the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStatus {
    pub tool: ToolKind,
    pub color: ColorChoice,
    pub selection: Option<ItemId>,
    pub demo: Option<DemoKind>,
    pub shape_count: usize,
}
