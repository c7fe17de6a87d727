use thiserror::Error;

pub type Result<T, E = PlotError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("unknown shade mode {0:?}, expected one of \"inside\", \"outside\" or \"none\"")]
    InvalidShadeMode(String),

    #[error("unknown color {0:?}")]
    InvalidColor(String),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("failed to draw figure: {0}")]
    Draw(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("failed to export figure: {0}")]
    Export(#[from] image::ImageError),
}

impl PlotError {
    pub(crate) fn invalid_parameter(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}
