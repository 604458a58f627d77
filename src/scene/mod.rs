//! Retained scene graph: an ordered content layer for drawing and demos, and
//! an overlay layer for in-canvas UI that is hit-tested first.

mod item;

pub use item::{Geometry, Item, ItemId, ItemRole, Shape, ShapeKind, Style, TextGeometry};

use kurbo::{Point, Size};

use crate::geometry::HitOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Content,
    Overlay,
}

/// Ordered items, bottom to top.
#[derive(Debug, Clone)]
pub struct Layer {
    kind: LayerKind,
    items: Vec<Item>,
    opacity: f32,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            opacity: 1.0,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Places `item` on top of the layer. Shape items are refused; they enter
    /// the content layer through the drawing model.
    pub fn insert(&mut self, item: Item) -> ItemId {
        let id = item.id();
        if item.is_shape() {
            log::warn!("refusing to insert shape {id} outside the drawing model");
            return id;
        }
        self.items.push(item);
        id
    }

    pub(crate) fn insert_shape(&mut self, item: Item) -> ItemId {
        let id = item.id();
        self.items.push(item);
        id
    }

    /// Places `item` below everything else in the layer.
    pub fn insert_at_bottom(&mut self, item: Item) -> ItemId {
        let id = item.id();
        if item.is_shape() {
            log::warn!("refusing to insert shape {id} outside the drawing model");
            return id;
        }
        self.items.insert(0, item);
        id
    }

    /// Removes a non-shape item.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let index = self.index_of(id)?;
        if self.items[index].is_shape() {
            return None;
        }
        Some(self.items.remove(index))
    }

    pub(crate) fn remove_shape(&mut self, id: ItemId) -> Option<Item> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    pub fn send_to_back(&mut self, id: ItemId) {
        if let Some(index) = self.index_of(id) {
            let item = self.items.remove(index);
            self.items.insert(0, item);
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Mutable access to a non-shape item. Shapes change only through the drawing model.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id && !item.is_shape())
    }

    pub(crate) fn shape_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id() == id && item.is_shape())
    }

    /// Items bottom to top.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = &Item> {
        self.items.iter()
    }

    /// Mutable iteration over every non-shape item.
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut().filter(|item| !item.is_shape())
    }

    /// Removes every non-shape item for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&Item) -> bool) {
        self.items.retain(|item| item.is_shape() || keep(item));
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Topmost visible item under `point`.
    pub fn hit_test(&self, point: Point, options: HitOptions) -> Option<&Item> {
        self.hit_test_filtered(point, options, |_| true)
    }

    /// Topmost visible item under `point` among those accepted by `filter`.
    pub fn hit_test_filtered(
        &self,
        point: Point,
        options: HitOptions,
        filter: impl Fn(&Item) -> bool,
    ) -> Option<&Item> {
        self.items
            .iter()
            .rev()
            .filter(|item| item.is_visible() && filter(item))
            .find(|item| item.hit(point, options))
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHit {
    pub layer: LayerKind,
    pub id: ItemId,
}

#[derive(Debug, Clone)]
pub struct Scene {
    content: Layer,
    overlay: Layer,
    viewport: Size,
}

impl Scene {
    pub fn new(viewport: Size) -> Self {
        Self {
            content: Layer::new(LayerKind::Content),
            overlay: Layer::new(LayerKind::Overlay),
            viewport,
        }
    }

    pub fn content(&self) -> &Layer {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Layer {
        &mut self.content
    }

    pub fn overlay(&self) -> &Layer {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut Layer {
        &mut self.overlay
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Content => &self.content,
            LayerKind::Overlay => &self.overlay,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Overlay first, then content.
    pub fn hit_test(&self, point: Point, options: HitOptions) -> Option<SceneHit> {
        [&self.overlay, &self.content].into_iter().find_map(|layer| {
            layer.hit_test(point, options).map(|item| SceneHit {
                layer: layer.kind(),
                id: item.id(),
            })
        })
    }

    pub fn overlay_hit(&self, point: Point, options: HitOptions) -> Option<&Item> {
        self.overlay.hit_test(point, options)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.content.get(id).or_else(|| self.overlay.get(id))
    }
}
