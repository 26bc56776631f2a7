use thiserror::Error;

/// Failure talking to the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dynamodb request failed: {0}")]
    Dynamo(#[from] aws_sdk_dynamodb::Error),

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// A stored item that cannot be turned back into a `User`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("attribute `{0}` is not a string")]
    NotAString(String),
}

/// Errors an operation hands back to the lambda handler
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to build response: {0}")]
    Http(#[from] lambda_http::http::Error),
}
