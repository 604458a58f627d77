//! Runtime configuration, loaded from JSON. Every field has a default, so a
//! config file only needs the values it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::demos::DemoKind;
use crate::error::ConfigError;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "VECTOR_CANVAS_CONFIG";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas: CanvasConfig,
    pub demos: DemoParams,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads the file named by [`CONFIG_ENV`], falling back to defaults.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                log::info!("loaded config from {path}");
                config
            }
            Err(err) => {
                log::warn!("{err}; using default config");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Pick tolerance around outlines.
    pub hit_tolerance: f64,
    /// Outline width of circles and rectangles.
    pub shape_stroke_width: f64,
    pub freehand_stroke_width: f64,
    /// Freehand samples closer than this to the previous one are dropped.
    pub freehand_min_distance: f64,
    /// Freehand jumps longer than this are subdivided.
    pub freehand_max_distance: f64,
    pub simplify_tolerance: f64,
    /// Drag distance that adds 1.0 to the resize factor.
    pub resize_divisor: f64,
    /// Palette name or `#rrggbb`.
    pub initial_color: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: 5.0,
            shape_stroke_width: 1.0,
            freehand_stroke_width: 3.0,
            freehand_min_distance: 2.0,
            freehand_max_distance: 30.0,
            simplify_tolerance: 10.0,
            resize_divisor: 200.0,
            initial_color: "blue".to_owned(),
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoParams {
    pub curve: CurveParams,
    pub morph: MorphParams,
    pub particles: ParticleParams,
}

impl DemoParams {
    /// Updates one numeric parameter of a demo by name. Unknown names are ignored.
    pub fn update(&mut self, demo: DemoKind, name: &str, value: f64) -> bool {
        let updated = match demo {
            DemoKind::CurveDesigner => self.curve.update(name, value),
            DemoKind::ShapeMorph => self.morph.update(name, value),
            DemoKind::ParticleEmitter => self.particles.update(name, value),
        };
        if updated {
            log::debug!("{demo}: {name} = {value}");
        } else {
            log::debug!("{demo}: ignoring unknown parameter {name:?}");
        }
        updated
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveParams {
    pub max_points: usize,
    /// Radius of a control-point handle; also its grab radius.
    pub point_size: f64,
    pub curve_width: f64,
    pub marker_radius: f64,
    /// Marker progress added per frame, as a fraction of the curve length.
    pub animation_speed: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            max_points: 6,
            point_size: 10.0,
            curve_width: 3.0,
            marker_radius: 8.0,
            animation_speed: 0.01,
        }
    }
}

impl CurveParams {
    fn update(&mut self, name: &str, value: f64) -> bool {
        match name {
            "max_points" | "maxPoints" => self.max_points = value.max(2.0) as usize,
            "point_size" | "pointSize" => self.point_size = value,
            "curve_width" | "curveWidth" => self.curve_width = value,
            "marker_radius" => self.marker_radius = value,
            "animation_speed" | "animationSpeed" => self.animation_speed = value,
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphParams {
    /// Tips of the star.
    pub star_points: usize,
    pub star_inner_ratio: f64,
    pub polygon_sides: usize,
    pub radius: f64,
    /// Horizontal offset of the morph centre from the viewport centre.
    pub center_offset_x: f64,
    /// Progress added per frame; a transition takes `1 / transition_speed` frames.
    pub transition_speed: f64,
    /// Hue rotation in degrees per frame.
    pub rotation_speed: f64,
    /// Vertices every outline is resampled to.
    pub vertex_count: usize,
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            star_points: 5,
            star_inner_ratio: 0.4,
            polygon_sides: 6,
            radius: 100.0,
            center_offset_x: -100.0,
            transition_speed: 0.02,
            rotation_speed: 0.5,
            vertex_count: 60,
        }
    }
}

impl MorphParams {
    /// Frames per transition, at least one.
    pub fn frames_per_transition(&self) -> u32 {
        if self.transition_speed <= 0.0 {
            return u32::MAX;
        }
        (1.0 / self.transition_speed).round().max(1.0) as u32
    }

    fn update(&mut self, name: &str, value: f64) -> bool {
        match name {
            "sides" | "star_points" => self.star_points = value.max(2.0) as usize,
            "star_inner_ratio" => self.star_inner_ratio = value,
            "polygon_sides" => self.polygon_sides = value.max(3.0) as usize,
            "radius" => self.radius = value,
            "transition_speed" | "transitionSpeed" => self.transition_speed = value,
            "rotation_speed" | "rotationSpeed" => self.rotation_speed = value,
            "vertex_count" => self.vertex_count = value.max(3.0) as usize,
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleParams {
    /// Particles per timed emission.
    pub emit_rate: usize,
    /// Particles per drag event.
    pub drag_burst: usize,
    /// Lifetime in frames.
    pub lifetime: u32,
    /// Random part of the radius; every particle also gets `min_size`.
    pub particle_size: f64,
    pub min_size: f64,
    /// Random part of the speed; every particle also gets `min_speed`.
    pub speed_variation: f64,
    pub min_speed: f64,
    pub emit_interval_ms: f64,
    pub gravity: f64,
    pub damping: f64,
    /// Per-frame scale factor.
    pub shrink: f64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            emit_rate: 5,
            drag_burst: 10,
            lifetime: 100,
            particle_size: 10.0,
            min_size: 3.0,
            speed_variation: 2.0,
            min_speed: 1.0,
            emit_interval_ms: 50.0,
            gravity: 0.05,
            damping: 0.97,
            shrink: 0.97,
        }
    }
}

impl ParticleParams {
    fn update(&mut self, name: &str, value: f64) -> bool {
        match name {
            "emit_rate" | "emitRate" => self.emit_rate = value.max(0.0) as usize,
            "drag_burst" => self.drag_burst = value.max(0.0) as usize,
            "lifetime" | "particleLifetime" => self.lifetime = value.max(1.0) as u32,
            "particle_size" | "particleSize" => self.particle_size = value,
            "speed_variation" | "speedVariation" => self.speed_variation = value,
            "emit_interval_ms" => self.emit_interval_ms = value,
            "gravity" => self.gravity = value,
            "damping" => self.damping = value,
            "shrink" => self.shrink = value,
            _ => return false,
        }
        true
    }
}
