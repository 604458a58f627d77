//! Self-running animation demos that take over the content layer.

use std::fmt;
use std::str::FromStr;

use kurbo::Point;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::DemoParams;
use crate::error::DemoError;
use crate::model::DrawingModel;
use crate::palette::CHROME_TEXT;
use crate::scene::{Item, ItemRole};

mod curve_designer;
mod particles;
mod scheduler;
mod shape_morph;

pub use curve_designer::{ControlPoint, CurveDesigner, curve_through};
pub use particles::{Particle, ParticleEmitter};
pub use scheduler::{FrameRequest, FrameScheduler};
pub use shape_morph::{MorphTarget, Outline, Segment, ShapeMorpher, target_outline};

const INSTRUCTION_ANCHOR: Point = Point::new(20.0, 30.0);
const INSTRUCTION_SIZE: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoKind {
    CurveDesigner,
    ShapeMorph,
    ParticleEmitter,
}

impl DemoKind {
    pub const ALL: [DemoKind; 3] = [
        DemoKind::CurveDesigner,
        DemoKind::ShapeMorph,
        DemoKind::ParticleEmitter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CurveDesigner => "bezier",
            Self::ShapeMorph => "morphing",
            Self::ParticleEmitter => "particles",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CurveDesigner => "Bezier Curves",
            Self::ShapeMorph => "Shape Morphing",
            Self::ParticleEmitter => "Particles",
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Self::CurveDesigner => '1',
            Self::ShapeMorph => '2',
            Self::ParticleEmitter => '3',
        }
    }
}

impl FromStr for DemoKind {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bezier" | "curve" | "curve-designer" => Ok(Self::CurveDesigner),
            "morphing" | "morph" | "shape-morph" => Ok(Self::ShapeMorph),
            "particles" | "particle-emitter" => Ok(Self::ParticleEmitter),
            _ => Err(DemoError::UnknownDemo(s.to_owned())),
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Places the demo's instruction line in the top-left of the canvas.
pub(crate) fn add_instructions(model: &mut DrawingModel, text: &str) {
    let item = Item::text(ItemRole::Demo, INSTRUCTION_ANCHOR, text, INSTRUCTION_SIZE, CHROME_TEXT);
    model.scene_mut().content_mut().insert(item);
}

#[derive(Debug)]
enum ActiveDemo {
    Curve(CurveDesigner),
    Morph(ShapeMorpher),
    Particles(ParticleEmitter),
}

impl ActiveDemo {
    fn kind(&self) -> DemoKind {
        match self {
            Self::Curve(_) => DemoKind::CurveDesigner,
            Self::Morph(_) => DemoKind::ShapeMorph,
            Self::Particles(_) => DemoKind::ParticleEmitter,
        }
    }
}

/// Owns the running demo and its frame callback.
///
/// At most one demo runs. Starting a demo stops the previous one and clears
/// the content layer; stopping cancels the frame request synchronously and
/// removes every item the demo created.
#[derive(Debug)]
pub struct DemoEngine {
    params: DemoParams,
    active: Option<ActiveDemo>,
    scheduler: FrameScheduler,
    particle_seed: Option<u64>,
    frames: u64,
}

impl DemoEngine {
    pub fn new(params: DemoParams) -> Self {
        Self {
            params,
            active: None,
            scheduler: FrameScheduler::new(),
            particle_seed: None,
            frames: 0,
        }
    }

    /// Makes the particle emitter deterministic.
    pub fn with_particle_seed(mut self, seed: u64) -> Self {
        self.particle_seed = Some(seed);
        self
    }

    pub fn params(&self) -> &DemoParams {
        &self.params
    }

    /// Changes a demo parameter by name. A running demo of that kind picks it up immediately.
    pub fn update_param(&mut self, demo: DemoKind, name: &str, value: f64) -> bool {
        if !self.params.update(demo, name, value) {
            return false;
        }
        match &mut self.active {
            Some(ActiveDemo::Curve(curve)) if demo == DemoKind::CurveDesigner => {
                curve.set_params(self.params.curve.clone())
            }
            Some(ActiveDemo::Morph(morph)) if demo == DemoKind::ShapeMorph => {
                morph.set_params(self.params.morph.clone())
            }
            Some(ActiveDemo::Particles(emitter)) if demo == DemoKind::ParticleEmitter => {
                emitter.set_params(self.params.particles.clone())
            }
            _ => {}
        }
        true
    }

    pub fn active(&self) -> Option<DemoKind> {
        self.active.as_ref().map(ActiveDemo::kind)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// True while a frame callback is pending.
    pub fn wants_frame(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Frames run since the engine was created.
    pub fn frames_run(&self) -> u64 {
        self.frames
    }

    pub fn start(&mut self, kind: DemoKind, model: &mut DrawingModel) {
        self.stop(model);
        model.clear_content();
        model.set_demo(Some(kind));

        let demo = match kind {
            DemoKind::CurveDesigner => {
                ActiveDemo::Curve(CurveDesigner::start(self.params.curve.clone(), model))
            }
            DemoKind::ShapeMorph => {
                ActiveDemo::Morph(ShapeMorpher::start(self.params.morph.clone(), model))
            }
            DemoKind::ParticleEmitter => {
                let rng = match self.particle_seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_os_rng(),
                };
                ActiveDemo::Particles(ParticleEmitter::start(self.params.particles.clone(), rng, model))
            }
        };
        self.active = Some(demo);
        self.scheduler.request_frame();
        log::info!("demo started: {kind}");
    }

    pub fn start_by_name(&mut self, name: &str, model: &mut DrawingModel) -> Result<(), DemoError> {
        let kind = name.parse::<DemoKind>()?;
        self.start(kind, model);
        Ok(())
    }

    /// Stops the running demo, if any. No frame callback runs after this returns.
    pub fn stop(&mut self, model: &mut DrawingModel) {
        self.scheduler.cancel();
        let Some(demo) = self.active.take() else {
            return;
        };
        model
            .scene_mut()
            .content_mut()
            .retain(|item| item.role() != ItemRole::Demo);
        model.set_demo(None);
        log::info!("demo stopped: {}", demo.kind());
    }

    /// Runs one frame of the active demo if a frame is due, then requests the next.
    pub fn on_frame(&mut self, now: f64, model: &mut DrawingModel) -> bool {
        if self.scheduler.take_due().is_none() {
            return false;
        }
        let Some(demo) = &mut self.active else {
            return false;
        };
        match demo {
            ActiveDemo::Curve(curve) => curve.tick(model),
            ActiveDemo::Morph(morph) => morph.tick(model),
            ActiveDemo::Particles(emitter) => emitter.tick(now, model),
        }
        self.frames += 1;
        self.scheduler.request_frame();
        true
    }

    /// Whether the running demo consumes pointer gestures.
    pub fn handles_pointer(&self) -> bool {
        matches!(
            self.active,
            Some(ActiveDemo::Curve(_)) | Some(ActiveDemo::Particles(_))
        )
    }

    pub fn on_pointer_down(&mut self, pos: Point, model: &mut DrawingModel) {
        match &mut self.active {
            Some(ActiveDemo::Curve(curve)) => curve.on_pointer_down(pos, model),
            Some(ActiveDemo::Particles(emitter)) => emitter.on_pointer_move(pos),
            _ => {}
        }
    }

    pub fn on_pointer_drag(&mut self, pos: Point, model: &mut DrawingModel) {
        match &mut self.active {
            Some(ActiveDemo::Curve(curve)) => curve.on_pointer_drag(pos, model),
            Some(ActiveDemo::Particles(emitter)) => emitter.on_pointer_drag(pos, model),
            _ => {}
        }
    }

    pub fn on_pointer_up(&mut self, _pos: Point, _model: &mut DrawingModel) {
        if let Some(ActiveDemo::Curve(curve)) = &mut self.active {
            curve.on_pointer_up();
        }
    }

    pub fn on_pointer_move(&mut self, pos: Point) {
        if let Some(ActiveDemo::Particles(emitter)) = &mut self.active {
            emitter.on_pointer_move(pos);
        }
    }

    /// Clears the curve designer's points, if it is running.
    pub fn reset_curve(&mut self, model: &mut DrawingModel) -> bool {
        match &mut self.active {
            Some(ActiveDemo::Curve(curve)) => {
                curve.reset(model);
                true
            }
            _ => false,
        }
    }

    pub fn curve_designer(&self) -> Option<&CurveDesigner> {
        match &self.active {
            Some(ActiveDemo::Curve(curve)) => Some(curve),
            _ => None,
        }
    }

    pub fn shape_morpher(&self) -> Option<&ShapeMorpher> {
        match &self.active {
            Some(ActiveDemo::Morph(morph)) => Some(morph),
            _ => None,
        }
    }

    pub fn particle_emitter(&self) -> Option<&ParticleEmitter> {
        match &self.active {
            Some(ActiveDemo::Particles(emitter)) => Some(emitter),
            _ => None,
        }
    }
}
