use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("The document store could not be reached: {0}")]
    Unreachable(String),

    #[error("Could not connect to the document store, timed out after {0} seconds")]
    ConnectionTimeout(u64),

    #[error("The document store rejected the query: {0}")]
    Query(String),

    #[error("Could not decode document store response: {0}")]
    Decode(String),

    #[error("Execution id '{0}' does not end with a '_<unix timestamp>' suffix")]
    InvalidExecutionId(String),

    #[error("Invalid storage configuration: {0}")]
    Config(String),
}
