pub mod body;
pub mod color;
pub mod context;
pub mod display;
pub mod error;
pub mod font;
pub mod hydrate;
pub mod palette;

pub use body::{BodyRange, MessageBody, RangeKind, SearchRanges, Style, StyleId};
pub use color::{AppearanceMode, Rgba, ThemedColor};
pub use context::{ContextKind, DisplayContext};
pub use display::{DisplayConfiguration, SpoilerPolicy};
pub use error::StyleError;
pub use font::{FontDescriptor, FontWeight, TextStyle, TypeScale};
pub use hydrate::{hydrate, hydrate_with, HydratedBody, ResolvedRun, Run, SpoilerState};
pub use palette::Palette;
