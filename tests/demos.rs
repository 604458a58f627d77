use kurbo::{PathSeg, Point, Size};
use vector_canvas::config::{AppConfig, DemoParams, MorphParams, ParticleParams};
use vector_canvas::demos::{
    CurveDesigner, DemoEngine, MorphTarget, Outline, ParticleEmitter, ShapeMorpher, curve_through,
};
use vector_canvas::error::{ConfigError, DemoError};
use vector_canvas::scene::ItemRole;
use vector_canvas::{DemoKind, DrawingModel};

fn model() -> DrawingModel {
    DrawingModel::new(Size::new(800.0, 600.0))
}

fn assert_outlines_close(a: &Outline, b: &Outline) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.segments().iter().zip(b.segments()) {
        assert!((x.point - y.point).hypot() < 1e-9, "{:?} != {:?}", x.point, y.point);
    }
}

#[test]
fn test_demo_names() {
    assert_eq!("bezier".parse::<DemoKind>(), Ok(DemoKind::CurveDesigner));
    assert_eq!("Morphing".parse::<DemoKind>(), Ok(DemoKind::ShapeMorph));
    assert_eq!("particles".parse::<DemoKind>(), Ok(DemoKind::ParticleEmitter));
    assert_eq!(
        "fireworks".parse::<DemoKind>(),
        Err(DemoError::UnknownDemo("fireworks".to_owned()))
    );
}

#[test]
fn test_curve_segment_type_follows_point_count() {
    let pts: Vec<Point> = (0..6).map(|i| Point::new(i as f64 * 50.0, (i % 2) as f64 * 80.0)).collect();

    assert!(curve_through(&pts[..1]).is_none());
    assert!(matches!(curve_through(&pts[..2]).unwrap().segments().collect::<Vec<_>>()[..], [PathSeg::Line(_)]));
    assert!(matches!(curve_through(&pts[..3]).unwrap().segments().collect::<Vec<_>>()[..], [PathSeg::Quad(_)]));
    assert!(matches!(curve_through(&pts[..4]).unwrap().segments().collect::<Vec<_>>()[..], [PathSeg::Cubic(_)]));

    let spline: Vec<PathSeg> = curve_through(&pts).unwrap().segments().collect();
    assert_eq!(spline.len(), 5);
    assert!(spline.iter().all(|seg| matches!(seg, PathSeg::Cubic(_))));
}

#[test]
fn test_curve_designer_caps_points_and_drags_handles() {
    let mut model = model();
    let mut curve = CurveDesigner::start(DemoParams::default().curve, &mut model);

    for i in 0..8 {
        curve.on_pointer_down(Point::new(50.0 + i as f64 * 60.0, 200.0), &mut model);
        curve.on_pointer_up();
    }
    assert_eq!(curve.control_points().len(), 6);

    curve.on_pointer_down(Point::new(53.0, 203.0), &mut model);
    curve.on_pointer_drag(Point::new(50.0, 400.0), &mut model);
    curve.on_pointer_up();
    assert_eq!(curve.control_points().len(), 6);
    assert_eq!(curve.control_points()[0].position, Point::new(50.0, 400.0));
    let handle = model.scene().get(curve.control_points()[0].id).unwrap();
    assert!((handle.position() - Point::new(50.0, 400.0)).hypot() < 1e-9);

    let first = curve.curve_path().unwrap().segments().next().unwrap();
    assert_eq!(kurbo::ParamCurve::start(&first), Point::new(50.0, 400.0));
}

#[test]
fn test_new_curve_point_follows_the_drag_that_placed_it() {
    let mut model = model();
    let mut curve = CurveDesigner::start(DemoParams::default().curve, &mut model);

    curve.on_pointer_down(Point::new(100.0, 100.0), &mut model);
    curve.on_pointer_drag(Point::new(150.0, 180.0), &mut model);
    curve.on_pointer_up();

    assert_eq!(curve.control_points().len(), 1);
    assert_eq!(curve.control_points()[0].position, Point::new(150.0, 180.0));
    let handle = model.scene().get(curve.control_points()[0].id).unwrap();
    assert!((handle.position() - Point::new(150.0, 180.0)).hypot() < 1e-9);

    // Once released, a drag without a press moves nothing.
    curve.on_pointer_drag(Point::new(400.0, 400.0), &mut model);
    assert_eq!(curve.control_points()[0].position, Point::new(150.0, 180.0));
}

#[test]
fn test_curve_marker_travels_and_reset_clears() {
    let mut model = model();
    let mut curve = CurveDesigner::start(DemoParams::default().curve, &mut model);
    curve.on_pointer_down(Point::new(100.0, 100.0), &mut model);
    curve.on_pointer_up();
    assert!(curve.marker_item().is_none());
    curve.tick(&mut model);

    curve.on_pointer_down(Point::new(300.0, 100.0), &mut model);
    curve.on_pointer_up();
    let marker = curve.marker_item().unwrap();

    for _ in 0..50 {
        curve.tick(&mut model);
    }
    assert!((curve.progress() - 0.5).abs() < 1e-9);
    let pos = model.scene().get(marker).unwrap().position();
    assert!((pos - Point::new(200.0, 100.0)).hypot() < 1e-3);

    // The curve sits below the handles.
    let bottom = model.scene().content().items().next().unwrap().id();
    assert_eq!(Some(bottom), curve.curve_item());

    curve.reset(&mut model);
    assert!(curve.control_points().is_empty());
    assert!(curve.curve_item().is_none());
    assert_eq!(model.scene().content().len(), 1);
}

#[test]
fn test_morph_cycles_circle_star_polygon() {
    let mut model = model();
    let mut morph = ShapeMorpher::start(MorphParams::default(), &mut model);
    assert_eq!((morph.current(), morph.target()), (MorphTarget::Circle, MorphTarget::Star));
    for target in [MorphTarget::Circle, MorphTarget::Star, MorphTarget::Polygon] {
        assert_eq!(morph.outline(target).len(), 60);
    }

    for _ in 0..25 {
        morph.tick(&mut model);
    }
    assert!((morph.progress() - 0.5).abs() < 1e-9);

    for _ in 0..25 {
        morph.tick(&mut model);
    }
    assert_eq!((morph.current(), morph.target()), (MorphTarget::Star, MorphTarget::Polygon));
    assert_eq!(morph.progress(), 0.0);
    assert_outlines_close(morph.displayed(), morph.outline(MorphTarget::Star));

    for _ in 0..100 {
        morph.tick(&mut model);
    }
    assert_eq!((morph.current(), morph.target()), (MorphTarget::Circle, MorphTarget::Star));
    assert!((morph.hue() - 75.0).abs() < 1e-9);
}

#[test]
fn test_morph_outlines_share_center_and_start_at_top() {
    let mut model = model();
    let morph = ShapeMorpher::start(MorphParams::default(), &mut model);
    let center = Point::new(300.0, 300.0);
    for target in [MorphTarget::Circle, MorphTarget::Star, MorphTarget::Polygon] {
        let first = morph.outline(target).segments()[0].point;
        assert!((first - Point::new(300.0, 200.0)).hypot() < 1e-6, "{target}");
    }
    let shape = model.scene().get(morph.shape_item()).unwrap();
    assert!((shape.position() - center).hypot() < 1.0);
}

#[test]
fn test_morph_between_unequal_outlines_uses_shorter_count() {
    let center = Point::new(200.0, 200.0);
    let circle = Outline::resample(&vector_canvas::geometry::circle_path(center, 50.0), 6);
    let square = Outline::resample(
        &vector_canvas::geometry::rect_path(Point::new(150.0, 150.0), Point::new(250.0, 250.0)),
        4,
    );
    assert_eq!((circle.len(), square.len()), (6, 4));

    for (from, to) in [(&circle, &square), (&square, &circle)] {
        let start = Outline::interpolate(from, to, 0.0);
        let end = Outline::interpolate(from, to, 1.0);
        assert_eq!(start.len(), 4);
        assert_eq!(end.len(), 4);
        for i in 0..4 {
            assert!((start.segments()[i].point - from.segments()[i].point).hypot() < 1e-9);
            assert!((end.segments()[i].point - to.segments()[i].point).hypot() < 1e-9);
        }
    }

    let half = Outline::interpolate(&circle, &square, 0.5);
    let expected = circle.segments()[3].point.midpoint(square.segments()[3].point);
    assert!((half.segments()[3].point - expected).hypot() < 1e-9);
}

#[test]
fn test_particles_expire_after_lifetime() {
    let mut model = model();
    let params = ParticleParams::default();
    let lifetime = params.lifetime;
    let mut emitter = ParticleEmitter::with_seed(params, 7, &mut model);

    emitter.emit(Point::new(400.0, 300.0), 3, &mut model);
    assert_eq!(emitter.particles().len(), 3);
    assert_eq!(model.scene().content().len(), 4);

    for _ in 0..lifetime - 1 {
        emitter.tick(0.0, &mut model);
    }
    assert_eq!(emitter.particles().len(), 3);
    let particle = emitter.particles()[0];
    assert_eq!(particle.life, 1);
    let item = model.scene().get(particle.id).unwrap();
    assert!((item.opacity() - 1.0 / lifetime as f32).abs() < 1e-6);

    emitter.tick(0.0, &mut model);
    assert!(emitter.particles().is_empty());
    assert!(
        model
            .scene()
            .content()
            .items()
            .all(|item| item.text_content().is_some())
    );
}

#[test]
fn test_particles_fall_under_gravity() {
    let mut model = model();
    let mut emitter = ParticleEmitter::with_seed(ParticleParams::default(), 1, &mut model);
    emitter.emit(Point::new(400.0, 300.0), 1, &mut model);
    let before = emitter.particles()[0].velocity;
    emitter.tick(0.0, &mut model);
    let after = emitter.particles()[0].velocity;
    assert!(((before.y + 0.05) * 0.97 - after.y).abs() < 1e-9);
    assert!((before.x * 0.97 - after.x).abs() < 1e-9);
}

#[test]
fn test_timed_emission_waits_for_pointer_and_interval() {
    let mut model = model();
    let mut emitter = ParticleEmitter::with_seed(ParticleParams::default(), 3, &mut model);

    emitter.tick(0.0, &mut model);
    assert!(emitter.particles().is_empty());

    emitter.on_pointer_move(Point::new(100.0, 100.0));
    emitter.tick(1.0, &mut model);
    assert_eq!(emitter.particles().len(), 5);
    emitter.tick(1.02, &mut model);
    assert_eq!(emitter.particles().len(), 5);
    emitter.tick(1.06, &mut model);
    assert_eq!(emitter.particles().len(), 10);

    emitter.on_pointer_drag(Point::new(120.0, 100.0), &mut model);
    assert_eq!(emitter.particles().len(), 20);
}

#[test]
fn test_seeded_emitters_agree() {
    let mut a_model = model();
    let mut b_model = model();
    let mut a = ParticleEmitter::with_seed(ParticleParams::default(), 42, &mut a_model);
    let mut b = ParticleEmitter::with_seed(ParticleParams::default(), 42, &mut b_model);
    a.emit(Point::new(10.0, 10.0), 4, &mut a_model);
    b.emit(Point::new(10.0, 10.0), 4, &mut b_model);
    let velocities = |e: &ParticleEmitter| e.particles().iter().map(|p| p.velocity).collect::<Vec<_>>();
    assert_eq!(velocities(&a), velocities(&b));
}

#[test]
fn test_engine_frame_requests() {
    let mut model = model();
    let mut engine = DemoEngine::new(DemoParams::default());
    assert!(!engine.wants_frame());
    assert!(!engine.on_frame(0.0, &mut model));

    engine.start(DemoKind::ShapeMorph, &mut model);
    assert_eq!(model.current_demo(), Some(DemoKind::ShapeMorph));
    assert!(engine.on_frame(0.0, &mut model));
    assert!(engine.on_frame(0.016, &mut model));
    assert_eq!(engine.frames_run(), 2);

    engine.start(DemoKind::CurveDesigner, &mut model);
    assert_eq!(engine.active(), Some(DemoKind::CurveDesigner));
    assert_eq!(model.scene().content().len(), 1);

    engine.stop(&mut model);
    assert!(!engine.wants_frame());
    assert!(!engine.on_frame(0.032, &mut model));
    assert_eq!(engine.frames_run(), 2);
    assert_eq!(model.current_demo(), None);
    assert!(
        model
            .scene()
            .content()
            .items()
            .all(|item| item.role() != ItemRole::Demo)
    );
}

#[test]
fn test_engine_start_by_name() {
    let mut model = model();
    let mut engine = DemoEngine::new(DemoParams::default()).with_particle_seed(9);
    assert!(engine.start_by_name("unknown", &mut model).is_err());
    assert!(!engine.is_active());

    engine.start_by_name("particles", &mut model).unwrap();
    assert!(engine.handles_pointer());
    engine.on_pointer_drag(Point::new(50.0, 50.0), &mut model);
    assert_eq!(engine.particle_emitter().unwrap().particles().len(), 10);
}

#[test]
fn test_update_param_reaches_running_demo() {
    let mut model = model();
    let mut engine = DemoEngine::new(DemoParams::default());
    engine.start(DemoKind::CurveDesigner, &mut model);
    engine.on_pointer_down(Point::new(100.0, 100.0), &mut model);
    engine.on_pointer_up(Point::new(100.0, 100.0), &mut model);
    engine.on_pointer_down(Point::new(200.0, 100.0), &mut model);
    engine.on_pointer_up(Point::new(200.0, 100.0), &mut model);

    assert!(engine.update_param(DemoKind::CurveDesigner, "animationSpeed", 0.25));
    assert!(!engine.update_param(DemoKind::CurveDesigner, "wobble", 1.0));
    assert_eq!(engine.params().curve.animation_speed, 0.25);

    engine.on_frame(0.0, &mut model);
    assert!((engine.curve_designer().unwrap().progress() - 0.25).abs() < 1e-9);

    assert!(engine.reset_curve(&mut model));
    assert!(engine.curve_designer().unwrap().control_points().is_empty());
}

#[test]
fn test_config_defaults_and_partial_json() {
    let config = AppConfig::default();
    assert_eq!(config.canvas.hit_tolerance, 5.0);
    assert_eq!(config.canvas.resize_divisor, 200.0);
    assert_eq!(config.canvas.initial_color, "blue");
    assert_eq!(config.demos.morph.frames_per_transition(), 50);

    let config = AppConfig::from_json(r#"{ "canvas": { "hit_tolerance": 8 }, "demos": { "particles": { "lifetime": 20 } } }"#)
        .unwrap();
    assert_eq!(config.canvas.hit_tolerance, 8.0);
    assert_eq!(config.canvas.freehand_stroke_width, 3.0);
    assert_eq!(config.demos.particles.lifetime, 20);
    assert_eq!(config.demos.particles.emit_rate, 5);

    assert!(matches!(AppConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    assert!(matches!(
        AppConfig::load("/definitely/not/here.json"),
        Err(ConfigError::Read { .. })
    ));
}
