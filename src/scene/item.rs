use egui::Color32;
use kurbo::{BezPath, Point, Rect, Vec2};
use uuid::Uuid;

use crate::geometry::{self, HitOptions, hit_testing};
use crate::widgets::{OverlayWidget, ViewId};

pub type ItemId = Uuid;

/// The kinds of shape a user can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Freehand,
}

/// Who owns an item and which invariants apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// User-drawn shape, tracked by the drawing model.
    Shape(ShapeKind),
    /// Transient tool feedback; never inserted into a layer.
    Preview,
    /// Owned by the running demo.
    Demo,
    /// Overlay UI.
    Chrome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextGeometry {
    /// Left end of the baseline.
    pub anchor: Point,
    pub content: String,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Path(BezPath),
    Text(TextGeometry),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub fill: Option<Color32>,
    pub stroke: Option<Color32>,
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

impl Style {
    pub fn filled(fill: Color32) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub fn stroked(stroke: Color32, width: f64) -> Self {
        Self {
            stroke: Some(stroke),
            stroke_width: width,
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, stroke: Color32, width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = width;
        self
    }
}

/// A user-drawn shape before it is added to the drawing model.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub path: BezPath,
    pub style: Style,
}

/// A displayable item: a styled path or a line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    role: ItemRole,
    geometry: Geometry,
    style: Style,
    opacity: f32,
    visible: bool,
    widget: Option<OverlayWidget>,
    section: Option<ViewId>,
}

impl Item {
    fn new(role: ItemRole, geometry: Geometry, style: Style) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            geometry,
            style,
            opacity: 1.0,
            visible: true,
            widget: None,
            section: None,
        }
    }

    /// Only the drawing model builds shape items, so the shape list and the
    /// content layer cannot drift apart.
    pub(crate) fn from_shape(shape: Shape) -> Self {
        Self::new(ItemRole::Shape(shape.kind), Geometry::Path(shape.path), shape.style)
    }

    pub fn demo(path: BezPath, style: Style) -> Self {
        Self::new(ItemRole::Demo, Geometry::Path(path), style)
    }

    pub fn chrome(path: BezPath, style: Style) -> Self {
        Self::new(ItemRole::Chrome, Geometry::Path(path), style)
    }

    pub fn preview(path: BezPath, style: Style) -> Self {
        Self::new(ItemRole::Preview, Geometry::Path(path), style)
    }

    pub fn text(role: ItemRole, anchor: Point, content: impl Into<String>, font_size: f64, color: Color32) -> Self {
        let text = TextGeometry {
            anchor,
            content: content.into(),
            font_size,
        };
        Self::new(role, Geometry::Text(text), Style::filled(color))
    }

    pub fn with_widget(mut self, widget: OverlayWidget) -> Self {
        self.widget = Some(widget);
        self
    }

    pub fn in_section(mut self, section: ViewId) -> Self {
        self.section = Some(section);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn role(&self) -> ItemRole {
        self.role
    }

    pub fn is_shape(&self) -> bool {
        matches!(self.role, ItemRole::Shape(_))
    }

    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self.role {
            ItemRole::Shape(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn path(&self) -> Option<&BezPath> {
        match &self.geometry {
            Geometry::Path(path) => Some(path),
            Geometry::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.geometry {
            Geometry::Text(text) => Some(&text.content),
            Geometry::Path(_) => None,
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn widget(&self) -> Option<OverlayWidget> {
        self.widget
    }

    pub fn section(&self) -> Option<ViewId> {
        self.section
    }

    pub fn bounds(&self) -> Rect {
        match &self.geometry {
            Geometry::Path(path) => geometry::bounds(path),
            Geometry::Text(text) => hit_testing::text_bounds(text.anchor, &text.content, text.font_size),
        }
    }

    /// Centre of the item's bounds.
    pub fn position(&self) -> Point {
        self.bounds().center()
    }

    pub fn hit(&self, point: Point, options: HitOptions) -> bool {
        match &self.geometry {
            Geometry::Path(path) => {
                let stroke_width = self.style.stroke.map(|_| self.style.stroke_width);
                geometry::hit_path(path, point, self.style.fill.is_some(), stroke_width, options)
            }
            Geometry::Text(text) => {
                hit_testing::hit_text(text.anchor, &text.content, text.font_size, point, options)
            }
        }
    }

    pub fn set_path(&mut self, path: BezPath) {
        self.geometry = Geometry::Path(path);
    }

    pub fn set_text(&mut self, content: impl Into<String>) {
        if let Geometry::Text(text) = &mut self.geometry {
            text.content = content.into();
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        match &mut self.geometry {
            Geometry::Path(path) => *path = geometry::translated(path, delta),
            Geometry::Text(text) => text.anchor += delta,
        }
    }

    /// Moves the item so that its bounds are centred on `position`.
    pub fn set_position(&mut self, position: Point) {
        let delta = position - self.position();
        self.translate(delta);
    }

    /// Scales a path item about its own centre. Text is left unchanged.
    pub fn scale(&mut self, factor: f64) {
        let center = self.position();
        if let Geometry::Path(path) = &mut self.geometry {
            *path = geometry::scaled_about(path, factor, center);
        }
    }

    pub fn set_fill(&mut self, fill: Option<Color32>) {
        self.style.fill = fill;
    }

    pub fn set_stroke(&mut self, stroke: Option<Color32>, width: f64) {
        self.style.stroke = stroke;
        self.style.stroke_width = width;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_section(&mut self, section: Option<ViewId>) {
        self.section = section;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
