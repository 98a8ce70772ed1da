#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod pad;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod shape;
pub mod state;
pub mod stroke;
pub mod tools;

pub use app::DraftPadApp;
pub use command::{Command, CommandHistory};
pub use config::PadConfig;
pub use error::{ConfigError, HistoryError};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use pad::DraftPad;
pub use renderer::Renderer;
pub use scene::Scene;
pub use shape::{Shape, ShapeId, ShapeKind};
pub use state::EditorState;
pub use stroke::{Stroke, StrokeMode};
pub use tools::{AxisLock, ShapeTool, ToolState};
