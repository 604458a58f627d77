use egui::Key;
use kurbo::Point;

use crate::config::{AppConfig, CanvasConfig};
use crate::demos::{DemoEngine, DemoKind};
use crate::error::DemoError;
use crate::geometry::HitOptions;
use crate::input::InputEvent;
use crate::model::DrawingModel;
use crate::palette::ColorChoice;
use crate::scene::Item;
use crate::tools::{Tool, ToolKind, ToolType};
use crate::widgets::{OverlayWidget, ViewId};

/// Something the controller needs its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerAction {
    /// An overlay widget was clicked.
    Activate(OverlayWidget),
    ShowView(ViewId),
}

/// Who owns the pointer between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    /// Pressed on the overlay; canvas handlers see nothing until release.
    Swallowed(Option<OverlayWidget>),
    Tool,
    Demo,
}

/// Routes input to the active tool or demo and applies their results to the model.
#[derive(Debug)]
pub struct Controller {
    config: CanvasConfig,
    tool: ToolType,
    demos: DemoEngine,
    gesture: Gesture,
}

impl Controller {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_demos(config, DemoEngine::new(config.demos.clone()))
    }

    pub fn with_demos(config: &AppConfig, demos: DemoEngine) -> Self {
        let mut tool = ToolType::new(ToolKind::Select, &config.canvas);
        tool.activate();
        Self {
            config: config.canvas.clone(),
            tool,
            demos,
            gesture: Gesture::Idle,
        }
    }

    pub fn demos(&self) -> &DemoEngine {
        &self.demos
    }

    pub fn demos_mut(&mut self) -> &mut DemoEngine {
        &mut self.demos
    }

    pub fn active_tool(&self) -> &ToolType {
        &self.tool
    }

    /// Transient geometry from the gesture in progress.
    pub fn preview(&self) -> Option<&Item> {
        self.tool.preview()
    }

    fn hit_options(&self) -> HitOptions {
        HitOptions::with_tolerance(self.config.hit_tolerance)
    }

    /// Stops any demo, swaps the gesture handler and records the tool in the model.
    pub fn set_tool(&mut self, model: &mut DrawingModel, tool: ToolKind) {
        self.demos.stop(model);
        self.tool.deactivate();
        self.tool = ToolType::new(tool, &self.config);
        self.tool.activate();
        self.gesture = Gesture::Idle;
        model.set_tool(tool);
    }

    /// Unknown names are ignored.
    pub fn set_tool_by_name(&mut self, model: &mut DrawingModel, name: &str) -> bool {
        match name.parse::<ToolKind>() {
            Ok(tool) => {
                self.set_tool(model, tool);
                true
            }
            Err(_) => {
                log::debug!("ignoring unknown tool {name:?}");
                false
            }
        }
    }

    pub fn set_color(&mut self, model: &mut DrawingModel, color: ColorChoice) {
        model.set_color(color);
    }

    pub fn start_demo(&mut self, model: &mut DrawingModel, kind: DemoKind) {
        model.clear_selection();
        self.tool.deactivate();
        self.gesture = Gesture::Idle;
        self.demos.start(kind, model);
    }

    pub fn start_demo_by_name(&mut self, model: &mut DrawingModel, name: &str) -> Result<(), DemoError> {
        let kind = name.parse::<DemoKind>()?;
        self.start_demo(model, kind);
        Ok(())
    }

    pub fn stop_demo(&mut self, model: &mut DrawingModel) {
        self.demos.stop(model);
        if self.gesture == Gesture::Demo {
            self.gesture = Gesture::Idle;
        }
    }

    pub fn remove_selection(&mut self, model: &mut DrawingModel) {
        if let Some(id) = model.selection() {
            model.remove_item(id);
        }
    }

    /// Runs one demo frame if one is due.
    pub fn on_frame(&mut self, model: &mut DrawingModel, now: f64) -> bool {
        self.demos.on_frame(now, model)
    }

    pub fn handle_event(&mut self, model: &mut DrawingModel, event: &InputEvent) -> Option<ControllerAction> {
        match event {
            InputEvent::PointerDown { pos } => self.on_pointer_down(model, *pos),
            InputEvent::PointerDrag { pos } => {
                self.on_pointer_drag(model, *pos);
                None
            }
            InputEvent::PointerUp { pos } => self.on_pointer_up(model, *pos),
            InputEvent::PointerMove { pos } => {
                self.on_pointer_move(model, *pos);
                None
            }
            InputEvent::KeyDown { key, text_focus } => self.on_key_down(model, *key, *text_focus),
        }
    }

    pub fn on_pointer_down(&mut self, model: &mut DrawingModel, pos: Point) -> Option<ControllerAction> {
        if let Some(item) = model.scene().overlay_hit(pos, self.hit_options()) {
            self.gesture = Gesture::Swallowed(item.widget());
            return None;
        }

        if self.demos.is_active() {
            if self.demos.handles_pointer() {
                self.gesture = Gesture::Demo;
                self.demos.on_pointer_down(pos, model);
            }
            return None;
        }

        self.gesture = Gesture::Tool;
        if let Some(command) = self.tool.on_pointer_down(pos, model) {
            command.execute(model);
        }
        None
    }

    pub fn on_pointer_drag(&mut self, model: &mut DrawingModel, pos: Point) {
        match self.gesture {
            Gesture::Tool => {
                if let Some(command) = self.tool.on_pointer_drag(pos, model) {
                    command.execute(model);
                }
            }
            Gesture::Demo => {
                if model.scene().overlay_hit(pos, self.hit_options()).is_none() {
                    self.demos.on_pointer_drag(pos, model);
                }
            }
            Gesture::Idle | Gesture::Swallowed(_) => {}
        }
    }

    pub fn on_pointer_up(&mut self, model: &mut DrawingModel, pos: Point) -> Option<ControllerAction> {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        match gesture {
            Gesture::Tool => {
                if let Some(command) = self.tool.on_pointer_up(pos, model) {
                    command.execute(model);
                }
                None
            }
            Gesture::Demo => {
                self.demos.on_pointer_up(pos, model);
                None
            }
            Gesture::Swallowed(Some(pressed)) => {
                let released = model
                    .scene()
                    .overlay_hit(pos, self.hit_options())
                    .and_then(Item::widget);
                (released == Some(pressed)).then_some(ControllerAction::Activate(pressed))
            }
            Gesture::Swallowed(None) | Gesture::Idle => None,
        }
    }

    /// Hover without a button held; only the particle emitter listens.
    pub fn on_pointer_move(&mut self, model: &mut DrawingModel, pos: Point) {
        if model.scene().overlay_hit(pos, self.hit_options()).is_some() {
            return;
        }
        self.demos.on_pointer_move(pos);
    }

    pub fn on_key_down(&mut self, model: &mut DrawingModel, key: Key, text_focus: bool) -> Option<ControllerAction> {
        if text_focus {
            return None;
        }
        match key {
            Key::S => self.set_tool(model, ToolKind::Select),
            Key::C => self.set_tool(model, ToolKind::Circle),
            Key::R => self.set_tool(model, ToolKind::Rectangle),
            Key::F => self.set_tool(model, ToolKind::Freehand),
            Key::Z => self.set_tool(model, ToolKind::Resize),
            Key::Num1 => self.start_demo(model, DemoKind::CurveDesigner),
            Key::Num2 => self.start_demo(model, DemoKind::ShapeMorph),
            Key::Num3 => self.start_demo(model, DemoKind::ParticleEmitter),
            Key::H => return Some(ControllerAction::ShowView(ViewId::Help)),
            Key::Escape => {
                self.stop_demo(model);
                self.set_tool(model, ToolKind::Select);
                return Some(ControllerAction::ShowView(ViewId::Main));
            }
            Key::Delete | Key::Backspace => self.remove_selection(model),
            _ => {}
        }
        None
    }
}
