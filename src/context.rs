use kurbo::Size;

use crate::config::AppConfig;
use crate::controller::{Controller, ControllerAction};
use crate::input::InputEvent;
use crate::model::DrawingModel;
use crate::palette::ColorChoice;
use crate::view::CanvasView;
use crate::widgets::{OverlayWidget, ViewId};

/// Everything the canvas needs, wired together and passed around explicitly.
#[derive(Debug)]
pub struct AppContext {
    pub model: DrawingModel,
    pub controller: Controller,
    pub view: CanvasView,
}

impl AppContext {
    pub fn new(config: &AppConfig, viewport: Size) -> Self {
        Self::with_controller(config, viewport, Controller::new(config))
    }

    pub fn with_controller(config: &AppConfig, viewport: Size, controller: Controller) -> Self {
        let mut model = DrawingModel::new(viewport);
        if !model.set_color_by_name(&config.canvas.initial_color) {
            log::warn!("invalid initial color {:?}", config.canvas.initial_color);
        }
        let view = CanvasView::new(&mut model);
        Self {
            model,
            controller,
            view,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match self.controller.handle_event(&mut self.model, event) {
            Some(ControllerAction::Activate(widget)) => self.activate_widget(widget),
            Some(ControllerAction::ShowView(view)) => self.view.show_view(&mut self.model, view),
            None => {}
        }
        self.view.sync(&mut self.model);
    }

    /// Performs the action bound to an overlay widget.
    pub fn activate_widget(&mut self, widget: OverlayWidget) {
        log::debug!("overlay widget: {widget:?}");
        match widget {
            OverlayWidget::ToolButton(tool) => self.controller.set_tool(&mut self.model, tool),
            OverlayWidget::ColorSwatch(color) => {
                self.controller.set_color(&mut self.model, ColorChoice::Named(color))
            }
            OverlayWidget::DemoButton(kind) => self.controller.start_demo(&mut self.model, kind),
            OverlayWidget::ViewButton(view) => self.view.show_view(&mut self.model, view),
            OverlayWidget::CloseHelp => self.view.show_view(&mut self.model, ViewId::Main),
        }
        self.view.sync(&mut self.model);
    }

    pub fn wants_frame(&self) -> bool {
        self.controller.demos().wants_frame()
    }

    /// Runs a demo frame if one is due and asks the view to redraw after it.
    pub fn on_frame(&mut self, now: f64) -> bool {
        let ran = self.controller.on_frame(&mut self.model, now);
        if ran {
            self.view.request_redraw();
        }
        self.view.sync(&mut self.model);
        ran
    }

    pub fn resize(&mut self, viewport: Size) {
        self.view.resize(&mut self.model, viewport);
    }

    pub fn sync_view(&mut self) {
        self.view.sync(&mut self.model);
    }
}
