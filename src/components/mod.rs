pub mod tool_button;

pub use tool_button::{color_swatch, ToolButton};
