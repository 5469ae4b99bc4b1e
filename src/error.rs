use thiserror::Error;

#[derive(Error, Debug)]
pub enum K6GenError {
    #[error("OpenAPI spec file not found: {0}")]
    InputNotFound(String),

    #[error("Failed to parse OpenAPI spec: {0}")]
    SpecParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, K6GenError>;
