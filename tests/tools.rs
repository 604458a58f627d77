use egui::Color32;
use kurbo::{ParamCurve, Point};
use vector_canvas::command::Command;
use vector_canvas::config::CanvasConfig;
use vector_canvas::geometry;
use vector_canvas::scene::{Shape, ShapeKind, Style};
use vector_canvas::tools::{FreehandTool, Tool, ToolKind, ToolType};
use vector_canvas::{DrawingModel, ItemId};

/// Runs one press-drag-release gesture through `tool`, executing every command.
fn gesture(tool: &mut impl Tool, model: &mut DrawingModel, points: &[Point]) -> Option<ItemId> {
    let (first, rest) = points.split_first().unwrap();
    let mut added = None;
    if let Some(command) = tool.on_pointer_down(*first, model) {
        added = added.or(command.execute(model));
    }
    for p in rest {
        if let Some(command) = tool.on_pointer_drag(*p, model) {
            added = added.or(command.execute(model));
        }
    }
    let last = *points.last().unwrap();
    if let Some(command) = tool.on_pointer_up(last, model) {
        added = added.or(command.execute(model));
    }
    added
}

fn add_square(model: &mut DrawingModel, x0: f64, y0: f64, side: f64) -> ItemId {
    model.add_item(Shape {
        kind: ShapeKind::Rectangle,
        path: geometry::rect_path(Point::new(x0, y0), Point::new(x0 + side, y0 + side)),
        style: Style::filled(Color32::GREEN),
    })
}

#[test]
fn test_tool_names_parse() {
    assert_eq!("select".parse::<ToolKind>(), Ok(ToolKind::Select));
    assert_eq!("FreeDraw".parse::<ToolKind>(), Ok(ToolKind::Freehand));
    assert_eq!(" rectangle ".parse::<ToolKind>(), Ok(ToolKind::Rectangle));
    assert!("lasso".parse::<ToolKind>().is_err());
    for kind in ToolKind::ALL {
        assert_eq!(kind.to_string().parse::<ToolKind>(), Ok(kind));
    }
}

#[test]
fn test_circle_drag_sets_center_and_radius() {
    let config = CanvasConfig::default();
    let mut model = DrawingModel::default();
    let mut tool = ToolType::new(ToolKind::Circle, &config);

    let id = gesture(
        &mut tool,
        &mut model,
        &[Point::new(100.0, 100.0), Point::new(120.0, 100.0), Point::new(150.0, 100.0)],
    )
    .expect("circle should be added");

    let item = model.shape(id).unwrap();
    let bounds = item.bounds();
    assert_eq!(item.shape_kind(), Some(ShapeKind::Circle));
    assert!((bounds.center().x - 100.0).abs() < 1e-6);
    assert!((bounds.center().y - 100.0).abs() < 1e-6);
    assert!((bounds.width() / 2.0 - 50.0).abs() < 1e-6);
    assert_eq!(item.style().fill, Some(model.color()));
    assert_eq!(item.style().stroke, Some(Color32::BLACK));
    assert!(tool.preview().is_none());
}

#[test]
fn test_preview_follows_drag_without_touching_model() {
    let config = CanvasConfig::default();
    let model = DrawingModel::default();
    let mut tool = ToolType::new(ToolKind::Rectangle, &config);

    assert!(tool.on_pointer_down(Point::new(10.0, 10.0), &model).is_none());
    assert!(tool.on_pointer_drag(Point::new(50.0, 30.0), &model).is_none());
    assert!(tool.on_pointer_drag(Point::new(5.0, 60.0), &model).is_none());

    let bounds = tool.preview().unwrap().bounds();
    assert_eq!((bounds.x0, bounds.y0, bounds.x1, bounds.y1), (5.0, 10.0, 10.0, 60.0));
    assert!(model.shapes().is_empty());
    assert!(model.scene().content().is_empty());
}

#[test]
fn test_zero_size_shapes_are_dropped() {
    let config = CanvasConfig::default();
    let mut model = DrawingModel::default();

    let mut circle = ToolType::new(ToolKind::Circle, &config);
    assert!(gesture(&mut circle, &mut model, &[Point::new(50.0, 50.0)]).is_none());

    let mut rect = ToolType::new(ToolKind::Rectangle, &config);
    let flat = [Point::new(50.0, 50.0), Point::new(90.0, 50.0)];
    assert!(gesture(&mut rect, &mut model, &flat).is_none());
    assert!(model.shapes().is_empty());
}

#[test]
fn test_select_tool_drags_topmost_shape() {
    let config = CanvasConfig::default();
    let mut model = DrawingModel::default();
    let lower = add_square(&mut model, 0.0, 0.0, 40.0);
    let upper = add_square(&mut model, 20.0, 0.0, 40.0);
    let mut tool = ToolType::new(ToolKind::Select, &config);

    gesture(&mut tool, &mut model, &[Point::new(30.0, 20.0), Point::new(60.0, 40.0), Point::new(80.0, 20.0)]);

    assert_eq!(model.selection(), Some(upper));
    let moved = model.shape(upper).unwrap().bounds();
    assert_eq!((moved.x0, moved.y0), (70.0, 0.0));
    let still = model.shape(lower).unwrap().bounds();
    assert_eq!((still.x0, still.y0), (0.0, 0.0));
}

#[test]
fn test_select_on_empty_canvas_clears_selection() {
    let config = CanvasConfig::default();
    let mut model = DrawingModel::default();
    let id = add_square(&mut model, 0.0, 0.0, 40.0);
    model.select_item(id);

    let mut tool = ToolType::new(ToolKind::Select, &config);
    gesture(&mut tool, &mut model, &[Point::new(300.0, 300.0)]);
    assert_eq!(model.selection(), None);
}

#[test]
fn test_resize_scales_by_drag_distance() {
    let config = CanvasConfig::default();
    let mut model = DrawingModel::default();
    let id = add_square(&mut model, 100.0, 100.0, 40.0);
    let mut tool = ToolType::new(ToolKind::Resize, &config);

    gesture(
        &mut tool,
        &mut model,
        &[Point::new(120.0, 120.0), Point::new(220.0, 120.0), Point::new(320.0, 120.0)],
    );

    let bounds = model.shape(id).unwrap().bounds();
    assert!((bounds.width() - 80.0).abs() < 1e-9);
    assert!((bounds.center().x - 120.0).abs() < 1e-9);
    assert_eq!(model.selection(), Some(id));
}

#[test]
fn test_resize_on_empty_canvas_does_nothing() {
    let config = CanvasConfig::default();
    let mut model = DrawingModel::default();
    let id = add_square(&mut model, 100.0, 100.0, 40.0);
    let version = model.version();
    let mut tool = ToolType::new(ToolKind::Resize, &config);

    gesture(&mut tool, &mut model, &[Point::new(400.0, 400.0), Point::new(500.0, 400.0)]);
    assert_eq!(model.version(), version);
    assert!((model.shape(id).unwrap().bounds().width() - 40.0).abs() < 1e-9);
}

#[test]
fn test_freehand_samples_are_spaced() {
    let config = CanvasConfig::default();
    let model = DrawingModel::default();
    let mut tool = FreehandTool::new(&config);

    tool.on_pointer_down(Point::new(0.0, 0.0), &model);
    tool.on_pointer_drag(Point::new(1.0, 0.0), &model);
    assert_eq!(tool.points().len(), 1);

    tool.on_pointer_drag(Point::new(90.0, 0.0), &model);
    let points = tool.points();
    assert_eq!(points.len(), 4);
    assert!(points.windows(2).all(|w| (w[1] - w[0]).hypot() <= config.freehand_max_distance + 1e-9));
}

#[test]
fn test_freehand_commits_a_smoothed_stroke() {
    let config = CanvasConfig::default();
    let mut model = DrawingModel::default();
    let mut tool = ToolType::new(ToolKind::Freehand, &config);

    let trail: Vec<Point> = (0..=20)
        .map(|i| {
            let x = i as f64 * 10.0;
            Point::new(x, 100.0 + (x / 30.0).sin() * 20.0)
        })
        .collect();
    let id = gesture(&mut tool, &mut model, &trail).expect("stroke should be added");

    let item = model.shape(id).unwrap();
    assert_eq!(item.shape_kind(), Some(ShapeKind::Freehand));
    assert_eq!(item.style().fill, None);
    assert_eq!(item.style().stroke, Some(model.color()));
    assert_eq!(item.style().stroke_width, config.freehand_stroke_width);

    let path = item.path().unwrap();
    let start = path.segments().next().unwrap().start();
    assert!((start - trail[0]).hypot() < 1e-6);
    assert!(item.bounds().width() > 190.0);
}

#[test]
fn test_freehand_single_click_is_dropped() {
    let config = CanvasConfig::default();
    let mut model = DrawingModel::default();
    let mut tool = ToolType::new(ToolKind::Freehand, &config);
    assert!(gesture(&mut tool, &mut model, &[Point::new(10.0, 10.0)]).is_none());
    assert!(model.shapes().is_empty());
}

#[test]
fn test_deactivate_drops_gesture() {
    let config = CanvasConfig::default();
    let model = DrawingModel::default();
    let mut tool = ToolType::new(ToolKind::Circle, &config);
    tool.on_pointer_down(Point::new(10.0, 10.0), &model);
    tool.on_pointer_drag(Point::new(40.0, 10.0), &model);
    tool.deactivate();

    assert!(tool.preview().is_none());
    let command: Option<Command> = tool.on_pointer_up(Point::new(40.0, 10.0), &model);
    assert!(command.is_none());
    assert!(model.shapes().is_empty());
}
