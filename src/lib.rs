#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod context;
pub mod controller;
pub mod demos;
pub mod error;
pub mod event;
pub mod geometry;
pub mod input;
pub mod model;
pub mod palette;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod tools;
pub mod view;
pub mod widgets;

pub use app::PaintApp;
pub use command::Command;
pub use config::AppConfig;
pub use context::AppContext;
pub use controller::{Controller, ControllerAction};
pub use demos::{DemoEngine, DemoKind};
pub use error::{ConfigError, DemoError};
pub use event::{EventBus, EventHandler, ModelEvent, ModelStatus, Subscription};
pub use input::{InputEvent, InputHandler};
pub use model::DrawingModel;
pub use palette::{ColorChoice, PaletteColor};
pub use scene::{Item, ItemId, Scene};
pub use tools::{Tool, ToolKind, ToolType};
pub use view::CanvasView;
pub use widgets::{OverlayWidget, ViewId};
