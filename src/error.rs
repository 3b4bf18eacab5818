use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Bad Request: Invalid path")]
    Invalid,

    #[error("Internal Server Error: Unable to determine working directory")]
    WorkingDir(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum BodyError {
    #[error("Bad Request: incomplete body: got {received}, expected {expected}")]
    Incomplete { received: u64, expected: u64 },

    #[error("Bad Request: read error: {0}")]
    Read(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not Found: Key does not exist")]
    NotFound,

    #[error("Bad Request: Empty value")]
    EmptyValue,

    #[error("Bad Request: Key already exists")]
    KeyExists,

    #[error("Internal Server Error: Failed to store value")]
    Storage(#[source] io::Error),
}

/// Every way a single CGI request can fail, as seen by the dispatcher.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Bad Request: Invalid Content Length")]
    InvalidContentLength,

    #[error("Length Required")]
    LengthRequired,

    #[error("Payload Too Large")]
    PayloadTooLarge,

    #[error("Unsupported Media Type")]
    UnsupportedMediaType,

    #[error("Bad Request: Missing key")]
    MissingKey,

    #[error("Bad Request: Invalid request environment: {0}")]
    Environment(#[from] envy::Error),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Body(#[from] BodyError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HandlerError {
    pub fn status(&self) -> u16 {
        match self {
            HandlerError::MethodNotAllowed => 405,
            HandlerError::LengthRequired => 411,
            HandlerError::PayloadTooLarge => 413,
            HandlerError::UnsupportedMediaType => 415,
            HandlerError::InvalidContentLength
            | HandlerError::MissingKey
            | HandlerError::Environment(_)
            | HandlerError::Body(_) => 400,
            HandlerError::Path(PathError::Invalid) => 400,
            HandlerError::Path(PathError::WorkingDir(_)) => 500,
            HandlerError::Store(StoreError::NotFound) => 404,
            HandlerError::Store(StoreError::EmptyValue) | HandlerError::Store(StoreError::KeyExists) => 400,
            HandlerError::Store(StoreError::Storage(_)) => 500,
        }
    }

    pub fn is_server_fault(&self) -> bool {
        self.status() >= 500
    }
}
