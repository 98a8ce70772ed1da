pub mod tool_button;

pub use tool_button::{ToolButton, color_swatch};
