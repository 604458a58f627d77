use kurbo::{BezPath, Size, Vec2};

use crate::demos::DemoKind;
use crate::event::{EventBus, EventHandler, ModelEvent, ModelStatus, Subscription};
use crate::geometry;
use crate::palette::ColorChoice;
use crate::scene::{Item, ItemId, Scene, Shape};
use crate::tools::ToolKind;

/// A geometry change applied to a shape, always derived from a snapshot of
/// the path taken when the gesture began.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeEdit {
    Translate { from: BezPath, delta: Vec2 },
    ScaleFrom { from: BezPath, factor: f64 },
}

/// Authoritative drawing state: the scene, the shape list, tool, color,
/// selection and running demo. Every mutation notifies subscribers.
#[derive(Debug)]
pub struct DrawingModel {
    scene: Scene,
    shapes: Vec<ItemId>,
    tool: ToolKind,
    color: ColorChoice,
    selection: Option<ItemId>,
    demo: Option<DemoKind>,
    version: usize,
    events: EventBus,
}

impl Default for DrawingModel {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl DrawingModel {
    pub fn new(viewport: Size) -> Self {
        Self {
            scene: Scene::new(viewport),
            shapes: Vec::new(),
            tool: ToolKind::Select,
            color: ColorChoice::default(),
            selection: None,
            demo: None,
            version: 0,
            events: EventBus::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        let old = self.tool;
        self.tool = tool;
        log::info!("tool: {old} -> {tool}");
        self.notify(ModelEvent::ToolChanged { old, new: tool });
    }

    /// Sets the tool from its name. Unknown names are ignored.
    pub fn set_tool_by_name(&mut self, name: &str) -> bool {
        match name.parse::<ToolKind>() {
            Ok(tool) => {
                self.set_tool(tool);
                true
            }
            Err(_) => {
                log::debug!("ignoring unknown tool {name:?}");
                false
            }
        }
    }

    pub fn color_choice(&self) -> ColorChoice {
        self.color
    }

    /// The resolved drawing color.
    pub fn color(&self) -> egui::Color32 {
        self.color.resolve()
    }

    pub fn set_color(&mut self, color: ColorChoice) {
        self.color = color;
        log::debug!("color: {color}");
        self.notify(ModelEvent::ColorChanged(color));
    }

    /// Sets the color from a palette name or a `#rrggbb` string. Anything else is ignored.
    pub fn set_color_by_name(&mut self, value: &str) -> bool {
        match ColorChoice::parse(value) {
            Some(color) => {
                self.set_color(color);
                true
            }
            None => {
                log::debug!("ignoring unknown color {value:?}");
                false
            }
        }
    }

    /// Adds a shape on top of the content layer and returns its id.
    pub fn add_item(&mut self, shape: Shape) -> ItemId {
        let id = self.scene.content_mut().insert_shape(Item::from_shape(shape));
        self.shapes.push(id);
        self.notify(ModelEvent::ShapeAdded(id));
        id
    }

    /// Removes a shape, clearing the selection if it pointed at it.
    pub fn remove_item(&mut self, id: ItemId) {
        let Some(index) = self.shapes.iter().position(|shape| *shape == id) else {
            return;
        };
        self.shapes.remove(index);
        self.scene.content_mut().remove_shape(id);
        if self.selection == Some(id) {
            self.selection = None;
            self.notify(ModelEvent::SelectionChanged { old: Some(id), new: None });
        }
        self.notify(ModelEvent::ShapeRemoved(id));
    }

    /// Selects a shape. Ids that are not in the shape list are ignored.
    pub fn select_item(&mut self, id: ItemId) {
        if !self.shapes.contains(&id) {
            log::debug!("ignoring selection of unknown shape {id}");
            return;
        }
        let old = self.selection.replace(id);
        self.notify(ModelEvent::SelectionChanged { old, new: Some(id) });
    }

    pub fn clear_selection(&mut self) {
        if let Some(old) = self.selection.take() {
            self.notify(ModelEvent::SelectionChanged { old: Some(old), new: None });
        }
    }

    pub fn selection(&self) -> Option<ItemId> {
        self.selection
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selection.and_then(|id| self.shape(id))
    }

    /// Shape ids, oldest first.
    pub fn shapes(&self) -> &[ItemId] {
        &self.shapes
    }

    pub fn shape(&self, id: ItemId) -> Option<&Item> {
        self.scene.content().get(id).filter(|item| item.is_shape())
    }

    /// Applies a geometry edit to a shape. Returns false if the shape is gone.
    pub fn edit_shape(&mut self, id: ItemId, edit: ShapeEdit) -> bool {
        let Some(item) = self.scene.content_mut().shape_mut(id) else {
            return false;
        };
        match edit {
            ShapeEdit::Translate { from, delta } => item.set_path(geometry::translated(&from, delta)),
            ShapeEdit::ScaleFrom { from, factor } => {
                let center = geometry::bounds(&from).center();
                item.set_path(geometry::scaled_about(&from, factor, center));
            }
        }
        self.notify(ModelEvent::ShapeUpdated(id));
        true
    }

    /// Empties the content layer, dropping every shape, demo item and the selection.
    pub fn clear_content(&mut self) {
        self.scene.content_mut().clear();
        self.shapes.clear();
        self.selection = None;
        self.notify(ModelEvent::ShapesCleared);
    }

    pub fn current_demo(&self) -> Option<DemoKind> {
        self.demo
    }

    pub fn set_demo(&mut self, demo: Option<DemoKind>) {
        if self.demo == demo {
            return;
        }
        self.demo = demo;
        self.notify(ModelEvent::DemoChanged(demo));
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.scene.set_viewport(viewport);
    }

    /// Registers a change listener. Dropping the returned handle unsubscribes it.
    pub fn on_change(&self, handler: impl EventHandler + 'static) -> Subscription {
        self.events.subscribe(handler)
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            tool: self.tool,
            color: self.color,
            selection: self.selection,
            demo: self.demo,
            shape_count: self.shapes.len(),
        }
    }

    /// Bumped on every notification.
    pub fn version(&self) -> usize {
        self.version
    }

    fn notify(&mut self, event: ModelEvent) {
        self.version += 1;
        self.events.emit(event, self.status());
    }
}
