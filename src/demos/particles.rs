use kurbo::{Point, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ParticleParams;
use crate::demos::add_instructions;
use crate::geometry;
use crate::model::DrawingModel;
use crate::palette::hsv;
use crate::scene::{Item, ItemId, Style};

pub const INSTRUCTIONS: &str = "Move or drag your mouse to emit particles";

/// One live particle; its circle lives in the content layer under `id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub id: ItemId,
    pub velocity: Vec2,
    /// Remaining frames.
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Remaining lifetime ratio; zero when the particle expires.
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }
}

/// Emits short-lived particles at the pointer, with gravity and damping.
#[derive(Debug)]
pub struct ParticleEmitter {
    params: ParticleParams,
    particles: Vec<Particle>,
    pointer: Option<Point>,
    last_emit: Option<f64>,
    rng: StdRng,
}

impl ParticleEmitter {
    pub fn start(params: ParticleParams, rng: StdRng, model: &mut DrawingModel) -> Self {
        add_instructions(model, INSTRUCTIONS);
        Self {
            params,
            particles: Vec::new(),
            pointer: None,
            last_emit: None,
            rng,
        }
    }

    /// Starts with a deterministic random sequence.
    pub fn with_seed(params: ParticleParams, seed: u64, model: &mut DrawingModel) -> Self {
        Self::start(params, StdRng::seed_from_u64(seed), model)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn set_params(&mut self, params: ParticleParams) {
        self.params = params;
    }

    pub fn on_pointer_move(&mut self, pos: Point) {
        self.pointer = Some(pos);
    }

    /// Dragging emits a burst on every event, on top of the timed emission.
    pub fn on_pointer_drag(&mut self, pos: Point, model: &mut DrawingModel) {
        self.pointer = Some(pos);
        self.emit(pos, self.params.drag_burst, model);
    }

    pub fn emit(&mut self, pos: Point, count: usize, model: &mut DrawingModel) {
        let content = model.scene_mut().content_mut();
        for _ in 0..count {
            let angle = self.rng.random::<f64>() * std::f64::consts::TAU;
            let speed = self.rng.random::<f64>() * self.params.speed_variation + self.params.min_speed;
            let radius = self.rng.random::<f64>() * self.params.particle_size + self.params.min_size;
            let hue = self.rng.random::<f64>() * 360.0;

            let item = Item::demo(geometry::circle_path(pos, radius), Style::filled(hsv(hue, 0.8, 0.9)));
            let id = content.insert(item);
            self.particles.push(Particle {
                id,
                velocity: Vec2::from_angle(angle) * speed,
                life: self.params.lifetime,
                max_life: self.params.lifetime,
            });
        }
        log::trace!("emitted {count} particles, {} live", self.particles.len());
    }

    /// One frame: timed emission at the last pointer position, then aging and motion.
    pub fn tick(&mut self, now: f64, model: &mut DrawingModel) {
        if let Some(pos) = self.pointer {
            let interval = self.params.emit_interval_ms / 1000.0;
            if self.last_emit.is_none_or(|last| now - last > interval) {
                self.emit(pos, self.params.emit_rate, model);
                self.last_emit = Some(now);
            }
        }

        let ParticleParams {
            gravity,
            damping,
            shrink,
            ..
        } = self.params;
        let content = model.scene_mut().content_mut();
        self.particles.retain_mut(|particle| {
            particle.life = particle.life.saturating_sub(1);
            if particle.life == 0 {
                content.remove(particle.id);
                return false;
            }
            let Some(item) = content.get_mut(particle.id) else {
                return false;
            };
            item.translate(particle.velocity);
            item.set_opacity(particle.opacity());
            item.scale(shrink);

            particle.velocity.y += gravity;
            particle.velocity *= damping;
            true
        });
    }
}
