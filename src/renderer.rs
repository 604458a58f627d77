use egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Stroke};
use kurbo::{BezPath, PathEl, Point, Vec2};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

use crate::geometry::{self, PATH_TOLERANCE};
use crate::palette::SELECTION_SHADOW;
use crate::scene::{Geometry, Item, ItemId, Layer, Scene};

const SHADOW_OFFSET: Vec2 = Vec2::new(5.0, 5.0);
const SHADOW_OPACITY: f32 = 0.35;

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    Pos2::new(origin.x + p.x as f32, origin.y + p.y as f32)
}

fn to_lyon(path: &BezPath) -> Path {
    let mut builder = Path::builder();
    let mut open = false;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                if open {
                    builder.end(false);
                }
                builder.begin(point(p.x as f32, p.y as f32));
                open = true;
            }
            PathEl::LineTo(p) if open => {
                builder.line_to(point(p.x as f32, p.y as f32));
            }
            PathEl::QuadTo(c, p) if open => {
                builder.quadratic_bezier_to(point(c.x as f32, c.y as f32), point(p.x as f32, p.y as f32));
            }
            PathEl::CurveTo(c1, c2, p) if open => {
                builder.cubic_bezier_to(
                    point(c1.x as f32, c1.y as f32),
                    point(c2.x as f32, c2.y as f32),
                    point(p.x as f32, p.y as f32),
                );
            }
            PathEl::ClosePath if open => {
                builder.end(true);
                open = false;
            }
            _ => {}
        }
    }
    if open {
        builder.end(false);
    }
    builder.build()
}

/// Tessellates the interior of `path` into a mesh offset by `origin`.
pub fn fill_mesh(path: &BezPath, color: Color32, origin: Pos2) -> Option<Mesh> {
    let mut geometry: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    let options = FillOptions::default().with_tolerance(PATH_TOLERANCE as f32);

    let result = tessellator.tessellate_path(
        &to_lyon(path),
        &options,
        &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex<'_>| vertex.position().to_array()),
    );
    if let Err(err) = result {
        log::warn!("fill tessellation failed: {err:?}");
        return None;
    }
    if geometry.indices.is_empty() {
        return None;
    }

    let mut mesh = Mesh::default();
    for [x, y] in &geometry.vertices {
        mesh.colored_vertex(Pos2::new(origin.x + x, origin.y + y), color);
    }
    for tri in geometry.indices.chunks_exact(3) {
        mesh.add_triangle(tri[0], tri[1], tri[2]);
    }
    Some(mesh)
}

/// Flattens `path` into screen-space polylines; the flag marks closed subpaths.
pub fn outline_polylines(path: &BezPath, origin: Pos2) -> Vec<(Vec<Pos2>, bool)> {
    let mut lines = Vec::new();
    let mut current: Vec<Pos2> = Vec::new();
    kurbo::flatten(path.elements().iter().copied(), PATH_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            if current.len() > 1 {
                lines.push((std::mem::take(&mut current), false));
            }
            current.clear();
            current.push(to_screen(origin, p));
        }
        PathEl::LineTo(p) => current.push(to_screen(origin, p)),
        PathEl::ClosePath => {
            if current.len() > 1 {
                lines.push((std::mem::take(&mut current), true));
            }
            current.clear();
        }
        _ => {}
    });
    if current.len() > 1 {
        lines.push((current, false));
    }
    lines
}

fn paint_path(painter: &Painter, origin: Pos2, path: &BezPath, item: &Item, opacity: f32) {
    let style = item.style();
    if let Some(fill) = style.fill {
        if let Some(mesh) = fill_mesh(path, fill.gamma_multiply(opacity), origin) {
            painter.add(egui::Shape::mesh(mesh));
        }
    }
    if let Some(color) = style.stroke {
        let stroke = Stroke::new(style.stroke_width as f32, color.gamma_multiply(opacity));
        for (points, closed) in outline_polylines(path, origin) {
            let shape = if closed {
                egui::Shape::closed_line(points, stroke)
            } else {
                egui::Shape::line(points, stroke)
            };
            painter.add(shape);
        }
    }
}

fn paint_selection_shadow(painter: &Painter, origin: Pos2, item: &Item, opacity: f32) {
    let Some(path) = item.path() else {
        return;
    };
    let shadow = geometry::translated(path, SHADOW_OFFSET);
    let color = SELECTION_SHADOW.gamma_multiply(SHADOW_OPACITY * opacity);
    let style = item.style();
    if style.fill.is_some() {
        if let Some(mesh) = fill_mesh(&shadow, color, origin) {
            painter.add(egui::Shape::mesh(mesh));
        }
    } else {
        let width = style.stroke_width.max(1.0) as f32;
        for (points, closed) in outline_polylines(&shadow, origin) {
            let shape = if closed {
                egui::Shape::closed_line(points, Stroke::new(width, color))
            } else {
                egui::Shape::line(points, Stroke::new(width, color))
            };
            painter.add(shape);
        }
    }
}

/// Paints one item. `layer_opacity` multiplies the item's own opacity.
pub fn paint_item(painter: &Painter, origin: Pos2, item: &Item, layer_opacity: f32) {
    if !item.is_visible() {
        return;
    }
    let opacity = item.opacity() * layer_opacity;
    match item.geometry() {
        Geometry::Path(path) => paint_path(painter, origin, path, item, opacity),
        Geometry::Text(text) => {
            let color = item.style().fill.unwrap_or(Color32::BLACK);
            painter.text(
                to_screen(origin, text.anchor),
                Align2::LEFT_BOTTOM,
                &text.content,
                FontId::proportional(text.font_size as f32),
                color.gamma_multiply(opacity),
            );
        }
    }
}

fn paint_layer(painter: &Painter, origin: Pos2, layer: &Layer, selection: Option<ItemId>) {
    let opacity = layer.opacity();
    for item in layer.items() {
        if selection == Some(item.id()) && item.is_visible() {
            paint_selection_shadow(painter, origin, item, opacity);
        }
        paint_item(painter, origin, item, opacity);
    }
}

/// Paints the content layer, the tool preview and then the overlay, with
/// scene coordinates offset by `origin`.
pub fn paint_scene(
    painter: &Painter,
    origin: Pos2,
    scene: &Scene,
    preview: Option<&Item>,
    selection: Option<ItemId>,
) {
    paint_layer(painter, origin, scene.content(), selection);
    if let Some(item) = preview {
        paint_item(painter, origin, item, 1.0);
    }
    paint_layer(painter, origin, scene.overlay(), None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ItemRole, Style};
    use kurbo::Size;

    #[test]
    fn test_rectangle_fills_with_two_triangles() {
        let path = geometry::rect_path(Point::new(0.0, 0.0), Point::new(10.0, 20.0));
        let mesh = fill_mesh(&path, Color32::RED, Pos2::new(100.0, 0.0)).unwrap();
        assert_eq!(mesh.indices.len(), 6);
        assert!(mesh.vertices.iter().all(|v| v.pos.x >= 100.0 && v.color == Color32::RED));
    }

    #[test]
    fn test_open_polyline_stays_open() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)];
        let lines = outline_polylines(&geometry::polyline_path(&points, false), Pos2::ZERO);
        assert_eq!(lines.len(), 1);
        assert!(!lines[0].1);
        assert_eq!(lines[0].0.len(), 3);

        let closed = outline_polylines(&geometry::polyline_path(&points, true), Pos2::ZERO);
        assert!(closed[0].1);
    }

    #[test]
    fn test_paints_a_scene_without_panicking() {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let rect = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(400.0, 300.0));
            let painter = Painter::new(ctx.clone(), egui::LayerId::background(), rect);

            let mut scene = Scene::new(Size::new(400.0, 300.0));
            scene.content_mut().insert(Item::demo(
                geometry::circle_path(Point::new(50.0, 50.0), 20.0),
                Style::filled(Color32::BLUE).with_stroke(Color32::BLACK, 1.0),
            ));
            scene
                .overlay_mut()
                .insert(Item::text(ItemRole::Chrome, Point::new(10.0, 20.0), "label", 14.0, Color32::BLACK));
            let preview = Item::preview(
                geometry::rect_path(Point::new(0.0, 0.0), Point::new(5.0, 5.0)),
                Style::stroked(Color32::BLACK, 1.0),
            );
            paint_scene(&painter, Pos2::ZERO, &scene, Some(&preview), None);
        });
    }
}
