pub mod ansi;
pub mod render;
pub mod theme;
pub mod typography;

pub use render::{measure, render_body, to_lines};
pub use theme::Theme;
