use std::cell::Cell;
use std::rc::Rc;

use kurbo::Size;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::event::{ModelEvent, ModelStatus, Subscription};
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::widgets::OverlayWidget;

/// eframe host: a side panel mirroring the model and a canvas showing the scene.
pub struct PaintApp {
    context: AppContext,
    input: InputHandler,
    status: Rc<Cell<ModelStatus>>,
    _status_subscription: Subscription,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let viewport = Size::new(
            config.canvas.window_width as f64,
            config.canvas.window_height as f64,
        );
        let context = AppContext::new(&config, viewport);
        let status = Rc::new(Cell::new(context.model.status()));
        let mirror = Rc::clone(&status);
        let subscription = context
            .model
            .on_change(move |_: &ModelEvent, status: &ModelStatus| mirror.set(*status));

        Self {
            context,
            input: InputHandler::new(),
            status,
            _status_subscription: subscription,
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    /// Model state as of the last change notification.
    pub fn status(&self) -> ModelStatus {
        self.status.get()
    }

    pub fn activate(&mut self, widget: OverlayWidget) {
        self.context.activate_widget(widget);
    }

    /// Feeds this frame's pointer and keyboard input to the canvas.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas: &egui::Response) {
        self.input.set_canvas(canvas.rect, canvas.contains_pointer());
        for event in self.input.process_input(ctx) {
            self.context.handle_event(&event);
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|input| input.time);
        self.context.on_frame(now);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        let redraw = self.context.view.take_redraw_request();
        if redraw || self.context.wants_frame() {
            ctx.request_repaint();
        }
    }
}
