use thiserror::Error;

#[derive(Error, Debug)]
pub enum PowerForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Grid Validation Error: {0}")]
    Validation(String),

    #[error("Precondition Violated: {0}")]
    Precondition(String),

    #[error("Thread Pool Error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type PfResult<T> = Result<T, PowerForgeError>;
