use thiserror::Error;

pub type IsoPathResult<T> = Result<T, IsoPathError>;

#[derive(Debug, Error)]
pub enum IsoPathError {
    #[error("GraphError: {0}")]
    Graph(String),
    #[error("PatternError: {0}")]
    Pattern(String),
    #[error("GenerateError: {0}")]
    Generate(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Bincode(#[from] bincode::Error),
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
