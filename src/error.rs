use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmutError {
    #[error("Unknown material error: no {class} named '{name}' in the catalog")]
    UnknownMaterial { class: &'static str, name: String },

    #[error("Numeric domain error: {reason} ({combination})")]
    NumericDomain { combination: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Output error: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, CmutError>;
