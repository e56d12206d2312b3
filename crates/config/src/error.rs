#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid color for '{key}' in [colors]: {source}")]
    InvalidColor {
        key: String,
        #[source]
        source: msgstyle_core::StyleError,
    },

    #[error("Unknown color token '{0}' in [colors]")]
    UnknownColorToken(String),

    #[error("Unknown preference '{0}'")]
    UnknownPreference(String),

    #[error("Unsupported screen lock timeout of {0}s")]
    InvalidTimeout(u64),

    #[error("Font scale must be a positive number, got {0}")]
    InvalidFontScale(f32),
}
