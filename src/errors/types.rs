use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid navigation: {0}")]
    InvalidTransition(String),

    #[error("Submission blocked: {0}")]
    SubmitBlocked(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShopError::Config(_) | ShopError::Yaml(_) => 2,
            ShopError::Catalog(_) | ShopError::Csv(_) => 3,
            _ => 1,
        }
    }
}
