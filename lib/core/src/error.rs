use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("No feature fields given")]
    NoFeatureFields,

    #[error("Item {id} has no value for feature field '{field}'")]
    MissingField { id: String, field: String },

    #[error("Item {id} has a non-numeric value for feature field '{field}'")]
    NonNumericField { id: String, field: String },

    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    #[error("Item not found: {0}")]
    UnknownIdentifier(String),

    #[error("Invalid neighbour count: {0} (must be at least 1)")]
    InvalidK(usize),

    #[error("Cosine distance is undefined for zero vector of item {id}")]
    DegenerateVector { id: String },

    #[error("Unknown distance metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
