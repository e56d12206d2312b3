use crate::body::StyleId;

#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Invalid hex color '{0}', expected #rrggbb or #rrggbbaa")]
    InvalidHex(String),

    #[error("Range {start}..{end} is out of bounds for a body of {len} chars")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Range starting at {0} is empty")]
    EmptyRange(usize),

    #[error("Spoiler id '{0}' is used by more than one range")]
    DuplicateSpoilerId(StyleId),

    #[error("Unknown display context '{0}'")]
    UnknownContext(String),

    #[error("Unknown appearance mode '{0}', expected light or dark")]
    UnknownMode(String),

    #[error("Unknown text style '{0}'")]
    UnknownTextStyle(String),

    #[error("Invalid message body JSON: {0}")]
    Json(#[from] serde_json::Error),
}
