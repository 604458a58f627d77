use egui::Key;
use kurbo::{Point, Size};
use vector_canvas::config::AppConfig;
use vector_canvas::input::InputEvent;
use vector_canvas::{AppContext, ControllerAction, DemoKind, OverlayWidget, PaletteColor, ToolKind, ViewId};

const SELECT_BUTTON: Point = Point::new(650.0, 80.0);
const CIRCLE_BUTTON: Point = Point::new(650.0, 130.0);

fn context() -> AppContext {
    AppContext::new(&AppConfig::default(), Size::new(800.0, 600.0))
}

fn drag(ctx: &mut AppContext, points: &[Point]) {
    let (first, rest) = points.split_first().unwrap();
    ctx.handle_event(&InputEvent::PointerDown { pos: *first });
    for p in rest {
        ctx.handle_event(&InputEvent::PointerDrag { pos: *p });
    }
    ctx.handle_event(&InputEvent::PointerUp {
        pos: *points.last().unwrap(),
    });
}

fn key(ctx: &mut AppContext, key: Key) {
    ctx.handle_event(&InputEvent::KeyDown { key, text_focus: false });
}

#[test]
fn test_circle_gesture_through_controller() {
    let mut ctx = context();
    key(&mut ctx, Key::C);
    assert_eq!(ctx.model.tool(), ToolKind::Circle);

    drag(&mut ctx, &[Point::new(100.0, 100.0), Point::new(150.0, 100.0)]);

    assert_eq!(ctx.model.shapes().len(), 1);
    let item = ctx.model.shape(ctx.model.shapes()[0]).unwrap();
    assert!((item.bounds().width() - 100.0).abs() < 1e-6);
    assert!((item.position().x - 100.0).abs() < 1e-6);
    assert!(ctx.controller.preview().is_none());
}

#[test]
fn test_overlay_button_click_activates_tool() {
    let mut ctx = context();
    drag(&mut ctx, &[CIRCLE_BUTTON]);
    assert_eq!(ctx.model.tool(), ToolKind::Circle);

    drag(&mut ctx, &[SELECT_BUTTON]);
    assert_eq!(ctx.model.tool(), ToolKind::Select);
}

#[test]
fn test_overlay_press_swallows_gesture() {
    let mut ctx = context();
    key(&mut ctx, Key::R);

    drag(&mut ctx, &[CIRCLE_BUTTON, Point::new(300.0, 300.0), Point::new(100.0, 100.0)]);

    assert!(ctx.model.shapes().is_empty());
    assert_eq!(ctx.model.tool(), ToolKind::Rectangle);
}

#[test]
fn test_release_on_other_widget_does_not_activate() {
    let mut ctx = context();
    ctx.controller.on_pointer_down(&mut ctx.model, CIRCLE_BUTTON);
    let action = ctx.controller.on_pointer_up(&mut ctx.model, SELECT_BUTTON);
    assert_eq!(action, None);

    ctx.controller.on_pointer_down(&mut ctx.model, CIRCLE_BUTTON);
    let action = ctx.controller.on_pointer_up(&mut ctx.model, CIRCLE_BUTTON);
    assert_eq!(action, Some(ControllerAction::Activate(OverlayWidget::ToolButton(ToolKind::Circle))));
}

#[test]
fn test_swatch_activation_sets_color() {
    let mut ctx = context();
    ctx.activate_widget(OverlayWidget::ColorSwatch(PaletteColor::Purple));
    assert_eq!(ctx.model.color(), PaletteColor::Purple.color());
}

#[test]
fn test_escape_stops_demo_and_returns_to_select() {
    let mut ctx = context();
    key(&mut ctx, Key::H);
    assert_eq!(ctx.view.current_view(), ViewId::Help);

    key(&mut ctx, Key::Num2);
    assert_eq!(ctx.model.current_demo(), Some(DemoKind::ShapeMorph));
    assert!(ctx.wants_frame());
    assert!(ctx.on_frame(0.0));

    key(&mut ctx, Key::Escape);
    assert!(!ctx.wants_frame());
    assert!(!ctx.on_frame(0.016));
    assert_eq!(ctx.model.current_demo(), None);
    assert_eq!(ctx.model.tool(), ToolKind::Select);
    assert_eq!(ctx.view.current_view(), ViewId::Main);
    assert!(ctx.model.scene().content().is_empty());
}

#[test]
fn test_shortcuts_ignored_while_typing() {
    let mut ctx = context();
    ctx.handle_event(&InputEvent::KeyDown {
        key: Key::C,
        text_focus: true,
    });
    assert_eq!(ctx.model.tool(), ToolKind::Select);
}

#[test]
fn test_delete_removes_selected_shape() {
    let mut ctx = context();
    key(&mut ctx, Key::R);
    drag(&mut ctx, &[Point::new(100.0, 100.0), Point::new(200.0, 200.0)]);
    key(&mut ctx, Key::S);
    drag(&mut ctx, &[Point::new(150.0, 150.0)]);
    assert!(ctx.model.selection().is_some());

    key(&mut ctx, Key::Delete);
    assert!(ctx.model.shapes().is_empty());
    assert_eq!(ctx.model.selection(), None);

    key(&mut ctx, Key::Backspace);
    assert!(ctx.model.shapes().is_empty());
}

#[test]
fn test_starting_demo_clears_drawing() {
    let mut ctx = context();
    key(&mut ctx, Key::C);
    drag(&mut ctx, &[Point::new(100.0, 100.0), Point::new(150.0, 100.0)]);

    key(&mut ctx, Key::Num1);
    assert!(ctx.model.shapes().is_empty());
    assert_eq!(ctx.controller.demos().active(), Some(DemoKind::CurveDesigner));

    key(&mut ctx, Key::F);
    assert_eq!(ctx.controller.demos().active(), None);
    assert!(ctx.model.scene().content().is_empty());
    assert_eq!(ctx.model.tool(), ToolKind::Freehand);
}

#[test]
fn test_morph_demo_ignores_pointer() {
    let mut ctx = context();
    key(&mut ctx, Key::Num2);
    let before = ctx.model.scene().content().len();

    drag(&mut ctx, &[Point::new(100.0, 100.0), Point::new(200.0, 200.0)]);

    assert_eq!(ctx.model.scene().content().len(), before);
    assert!(ctx.model.shapes().is_empty());
}

#[test]
fn test_curve_designer_receives_clicks() {
    let mut ctx = context();
    key(&mut ctx, Key::Num1);
    for x in [100.0, 200.0, 300.0] {
        drag(&mut ctx, &[Point::new(x, 300.0)]);
    }
    let curve = ctx.controller.demos().curve_designer().unwrap();
    assert_eq!(curve.control_points().len(), 3);
    assert!(curve.curve_path().is_some());
}

#[test]
fn test_hover_over_overlay_is_not_forwarded() {
    let mut ctx = context();
    ctx.controller
        .start_demo_by_name(&mut ctx.model, "particles")
        .unwrap();

    ctx.handle_event(&InputEvent::PointerMove { pos: SELECT_BUTTON });
    assert_eq!(ctx.controller.demos().particle_emitter().unwrap().pointer(), None);

    ctx.handle_event(&InputEvent::PointerMove {
        pos: Point::new(200.0, 200.0),
    });
    assert_eq!(
        ctx.controller.demos().particle_emitter().unwrap().pointer(),
        Some(Point::new(200.0, 200.0))
    );
}

#[test]
fn test_particle_drag_over_overlay_emits_nothing() {
    let mut ctx = context();
    ctx.controller
        .start_demo_by_name(&mut ctx.model, "particles")
        .unwrap();

    ctx.handle_event(&InputEvent::PointerDown {
        pos: Point::new(200.0, 200.0),
    });
    ctx.handle_event(&InputEvent::PointerDrag { pos: SELECT_BUTTON });
    let emitter = ctx.controller.demos().particle_emitter().unwrap();
    assert!(emitter.particles().is_empty());
    assert_eq!(emitter.pointer(), Some(Point::new(200.0, 200.0)));

    ctx.handle_event(&InputEvent::PointerDrag {
        pos: Point::new(220.0, 200.0),
    });
    ctx.handle_event(&InputEvent::PointerUp {
        pos: Point::new(220.0, 200.0),
    });
    let emitter = ctx.controller.demos().particle_emitter().unwrap();
    assert_eq!(emitter.particles().len(), AppConfig::default().demos.particles.drag_burst);
}

#[test]
fn test_unknown_names_are_rejected() {
    let mut ctx = context();
    assert!(!ctx.controller.set_tool_by_name(&mut ctx.model, "spray"));
    assert!(ctx.controller.start_demo_by_name(&mut ctx.model, "fireworks").is_err());
    assert_eq!(ctx.model.current_demo(), None);
    assert!(ctx.controller.set_tool_by_name(&mut ctx.model, "resize"));
    assert_eq!(ctx.model.tool(), ToolKind::Resize);
}
