//! Overlay widgets: identifiers for clickable overlay items and helpers that
//! build them as scene items.

use std::fmt;

use egui::Color32;
use kurbo::{Point, Rect};

use crate::demos::DemoKind;
use crate::geometry;
use crate::palette::{CHROME_BORDER, CHROME_TEXT, PaletteColor};
use crate::scene::{Item, ItemId, ItemRole, Layer, Style};
use crate::tools::ToolKind;

/// Corner radius of overlay buttons.
pub const BUTTON_RADIUS: f64 = 5.0;
pub const LABEL_SIZE: f64 = 14.0;
pub const TITLE_SIZE: f64 = 16.0;

/// The screens the overlay can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Main,
    Preview,
    Help,
}

impl ViewId {
    pub const ALL: [ViewId; 3] = [ViewId::Main, ViewId::Preview, ViewId::Help];

    pub fn label(self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Preview => "Preview",
            Self::Help => "Help",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a click on an overlay item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayWidget {
    ToolButton(ToolKind),
    ColorSwatch(PaletteColor),
    DemoButton(DemoKind),
    ViewButton(ViewId),
    CloseHelp,
}

/// Adds a rounded button with a centred-left label. Both items carry `widget`.
pub(crate) fn add_button(
    layer: &mut Layer,
    rect: Rect,
    label: &str,
    fill: Color32,
    text_color: Color32,
    widget: OverlayWidget,
) -> [ItemId; 2] {
    let background = Item::chrome(
        geometry::rounded_rect_path(rect, BUTTON_RADIUS),
        Style::filled(fill).with_stroke(CHROME_BORDER, 1.0),
    )
    .with_widget(widget);
    let background = layer.insert(background);

    let baseline = Point::new(rect.x0 + 10.0, rect.center().y + LABEL_SIZE * 0.35);
    let text = Item::text(ItemRole::Chrome, baseline, label, LABEL_SIZE, text_color).with_widget(widget);
    [background, layer.insert(text)]
}

pub(crate) fn add_title(layer: &mut Layer, anchor: Point, title: &str) {
    layer.insert(Item::text(ItemRole::Chrome, anchor, title, TITLE_SIZE, CHROME_TEXT));
}

pub(crate) fn add_swatch(layer: &mut Layer, center: Point, radius: f64, color: PaletteColor) {
    let swatch = Item::chrome(geometry::circle_path(center, radius), Style::filled(color.color()))
        .with_widget(OverlayWidget::ColorSwatch(color));
    layer.insert(swatch);
}
