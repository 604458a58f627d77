use std::cell::Cell;
use std::rc::Rc;

use egui::Color32;
use kurbo::{Point, Rect, Size};

use crate::demos::DemoKind;
use crate::event::{ModelEvent, ModelStatus, Subscription};
use crate::geometry;
use crate::model::DrawingModel;
use crate::palette::{CHROME_ACTIVE, CHROME_BORDER, CHROME_PANEL, CHROME_SWATCH_RING, CHROME_TEXT, PaletteColor};
use crate::scene::{Item, ItemRole, Style};
use crate::tools::ToolKind;
use crate::widgets::{self, OverlayWidget, ViewId};

pub const PANEL_WIDTH: f64 = 200.0;
pub const BUTTON_SIZE: f64 = 40.0;
pub const BUTTON_MARGIN: f64 = 10.0;
pub const PANEL_MARGIN: f64 = 15.0;
pub const SWATCH_RADIUS: f64 = 15.0;
const SWATCHES_PER_ROW: usize = 3;
const SWATCH_SPACING: f64 = 50.0;
const HELP_SIZE: Size = Size::new(400.0, 300.0);
const PREVIEW_OPACITY: f32 = 0.8;
const INACTIVE_DEMO_OPACITY: f32 = 0.6;
const INACTIVE_DEMO_LABEL_OPACITY: f32 = 0.8;

pub const HELP_LINES: [&str; 9] = [
    "S - Select tool",
    "C - Circle tool",
    "R - Rectangle tool",
    "F - Free draw tool",
    "Z - Resize tool",
    "1 / 2 / 3 - Bezier, morphing, particles demo",
    "H - Show this help",
    "Esc - Stop demo and return to Select",
    "Delete - Remove the selected shape",
];

fn demo_color(kind: DemoKind) -> Color32 {
    match kind {
        DemoKind::CurveDesigner => Color32::from_rgb(0xFF, 0x98, 0x00),
        DemoKind::ShapeMorph => Color32::from_rgb(0xE9, 0x1E, 0x63),
        DemoKind::ParticleEmitter => Color32::from_rgb(0x4C, 0xAF, 0x50),
    }
}

/// Builds the overlay UI and keeps it in step with the drawing model.
///
/// Model notifications only mark the view dirty; [`CanvasView::sync`]
/// reconciles and raises a redraw request for the host.
#[derive(Debug)]
pub struct CanvasView {
    current: ViewId,
    dirty: Rc<Cell<bool>>,
    redraw_requested: bool,
    _subscription: Subscription,
}

impl CanvasView {
    pub fn new(model: &mut DrawingModel) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        let subscription = model.on_change(move |_: &ModelEvent, _: &ModelStatus| flag.set(true));

        let mut view = Self {
            current: ViewId::Main,
            dirty,
            redraw_requested: true,
            _subscription: subscription,
        };
        view.layout(model);
        view
    }

    pub fn current_view(&self) -> ViewId {
        self.current
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Adopts a new viewport size and rebuilds the overlay for it.
    pub fn resize(&mut self, model: &mut DrawingModel, size: Size) {
        if model.scene().viewport() == size {
            return;
        }
        model.set_viewport(size);
        self.layout(model);
    }

    /// Rebuilds every overlay item for the current viewport.
    pub fn layout(&mut self, model: &mut DrawingModel) {
        let viewport = model.scene().viewport();
        let overlay = model.scene_mut().overlay_mut();
        overlay.clear();

        let x0 = (viewport.width - PANEL_WIDTH).max(0.0);
        let left = x0 + PANEL_MARGIN;
        let right = x0 + PANEL_WIDTH - PANEL_MARGIN;

        overlay.insert(Item::chrome(
            geometry::rect_path(Point::new(x0, 0.0), Point::new(viewport.width, viewport.height)),
            Style::filled(CHROME_PANEL).with_stroke(CHROME_BORDER, 1.0),
        ));
        widgets::add_title(overlay, Point::new(left, 30.0), "Tool Panel");

        let mut y = 60.0;
        for tool in ToolKind::ALL {
            let rect = Rect::new(left, y, right, y + BUTTON_SIZE);
            let label = format!("{}  {}", tool.shortcut(), tool.label());
            widgets::add_button(overlay, rect, &label, Color32::WHITE, CHROME_TEXT, OverlayWidget::ToolButton(tool));
            y += BUTTON_SIZE + BUTTON_MARGIN;
        }

        y += 15.0;
        widgets::add_title(overlay, Point::new(left, y), "Colors");
        y += 30.0;
        for (i, color) in PaletteColor::ALL.into_iter().enumerate() {
            let col = (i % SWATCHES_PER_ROW) as f64;
            let row = (i / SWATCHES_PER_ROW) as f64;
            let center = Point::new(left + SWATCH_RADIUS + col * SWATCH_SPACING, y + row * BUTTON_SIZE);
            widgets::add_swatch(overlay, center, SWATCH_RADIUS, color);
        }
        let rows = PaletteColor::ALL.len().div_ceil(SWATCHES_PER_ROW) as f64;
        y += (rows - 1.0) * BUTTON_SIZE + SWATCH_RADIUS + 35.0;

        widgets::add_title(overlay, Point::new(left, y), "Interactive Demos");
        y += 15.0;
        for kind in DemoKind::ALL {
            let rect = Rect::new(left, y, right, y + BUTTON_SIZE);
            let label = format!("{}  {}", kind.shortcut(), kind.label());
            widgets::add_button(overlay, rect, &label, demo_color(kind), Color32::WHITE, OverlayWidget::DemoButton(kind));
            y += BUTTON_SIZE + BUTTON_MARGIN;
        }

        y += 15.0;
        widgets::add_title(overlay, Point::new(left, y), "Navigation");
        y += 15.0;
        let width = (right - left - 2.0 * BUTTON_MARGIN) / ViewId::ALL.len() as f64;
        for (i, view) in ViewId::ALL.into_iter().enumerate() {
            let x = left + i as f64 * (width + BUTTON_MARGIN);
            let rect = Rect::new(x, y, x + width, y + BUTTON_SIZE * 0.75);
            widgets::add_button(overlay, rect, view.label(), Color32::WHITE, CHROME_TEXT, OverlayWidget::ViewButton(view));
        }

        Self::build_help_panel(model, x0);
        self.reconcile(model);
    }

    fn build_help_panel(model: &mut DrawingModel, canvas_width: f64) {
        let viewport = model.scene().viewport();
        let center = Point::new(canvas_width / 2.0, viewport.height / 2.0);
        let panel = Rect::from_center_size(center, HELP_SIZE);
        let overlay = model.scene_mut().overlay_mut();

        overlay.insert(
            Item::chrome(
                geometry::rounded_rect_path(panel, widgets::BUTTON_RADIUS * 2.0),
                Style::filled(Color32::WHITE).with_stroke(CHROME_BORDER, 1.0),
            )
            .in_section(ViewId::Help),
        );
        overlay.insert(
            Item::text(
                ItemRole::Chrome,
                Point::new(panel.x0 + 20.0, panel.y0 + 35.0),
                "Keyboard Shortcuts",
                18.0,
                CHROME_TEXT,
            )
            .in_section(ViewId::Help),
        );
        for (i, line) in HELP_LINES.iter().enumerate() {
            let anchor = Point::new(panel.x0 + 20.0, panel.y0 + 65.0 + i as f64 * 19.0);
            overlay.insert(
                Item::text(ItemRole::Chrome, anchor, *line, widgets::LABEL_SIZE, CHROME_TEXT).in_section(ViewId::Help),
            );
        }

        let close = Rect::new(panel.x1 - 100.0, panel.y1 - 45.0, panel.x1 - 20.0, panel.y1 - 15.0);
        let ids = widgets::add_button(overlay, close, "Close", CHROME_ACTIVE, CHROME_TEXT, OverlayWidget::CloseHelp);
        for id in ids {
            if let Some(item) = overlay.get_mut(id) {
                item.set_section(Some(ViewId::Help));
            }
        }
    }

    pub fn show_view(&mut self, model: &mut DrawingModel, view: ViewId) {
        if self.current != view {
            log::info!("view: {} -> {view}", self.current);
        }
        self.current = view;
        self.reconcile(model);
    }

    /// Reconciles if a model notification arrived since the last sync.
    pub fn sync(&mut self, model: &mut DrawingModel) -> bool {
        if !self.dirty.get() {
            return false;
        }
        self.reconcile(model);
        true
    }

    /// Restyles the overlay from the model state and requests a redraw.
    pub fn reconcile(&mut self, model: &mut DrawingModel) {
        self.dirty.set(false);
        let status = model.status();
        let current = self.current;

        let content_opacity = if current == ViewId::Preview { PREVIEW_OPACITY } else { 1.0 };
        model.scene_mut().content_mut().set_opacity(content_opacity);

        for item in model.scene_mut().overlay_mut().items_mut() {
            if let Some(section) = item.section() {
                item.set_visible(section == current);
            }
            let is_label = item.text_content().is_some();
            match item.widget() {
                Some(OverlayWidget::ToolButton(tool)) if !is_label => {
                    let fill = if tool == status.tool { CHROME_ACTIVE } else { Color32::WHITE };
                    item.set_fill(Some(fill));
                }
                Some(OverlayWidget::ColorSwatch(color)) => {
                    if status.color.palette() == Some(color) {
                        item.set_stroke(Some(Color32::BLACK), 2.0);
                    } else {
                        item.set_stroke(Some(CHROME_SWATCH_RING), 1.0);
                    }
                }
                Some(OverlayWidget::DemoButton(kind)) => {
                    let opacity = match status.demo {
                        Some(active) if active != kind && is_label => INACTIVE_DEMO_LABEL_OPACITY,
                        Some(active) if active != kind => INACTIVE_DEMO_OPACITY,
                        _ => 1.0,
                    };
                    item.set_opacity(opacity);
                }
                Some(OverlayWidget::ViewButton(view)) if !is_label => {
                    let fill = if view == current { CHROME_ACTIVE } else { Color32::WHITE };
                    item.set_fill(Some(fill));
                }
                _ => {}
            }
        }
        self.request_redraw();
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}
