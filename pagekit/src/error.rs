use pagedom::DomError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index {index} is out of range for {len} item(s)")]
    InvalidIndex { index: usize, len: usize },

    #[error("missing element: {0}")]
    MissingElement(String),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("widget has been destroyed")]
    Destroyed,

    #[error(transparent)]
    Dom(#[from] DomError),
}

pub type Result<T> = std::result::Result<T, Error>;
