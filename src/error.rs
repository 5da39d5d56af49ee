use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// No element with this id exists on the page
    #[error("element not found: #{0}")]
    MissingElement(String),

    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("invalid map config: {0}")]
    Config(#[from] serde_json::Error),

    /// The mapping library rejected a call
    #[error("map error: {0}")]
    Map(String),
}
