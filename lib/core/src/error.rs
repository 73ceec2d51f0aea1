use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which end of an edge a lookup failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "Source"),
            Endpoint::Target => write!(f, "Target"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Vertex already exists: {0}")]
    DuplicateId(String),

    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    #[error("{endpoint} vertex not found: {id}")]
    EndpointNotFound { endpoint: Endpoint, id: String },

    #[error("Edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// True for every lookup miss: vertex, edge endpoint or edge
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::VertexNotFound(_) | Error::EndpointNotFound { .. } | Error::EdgeNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Decode(err.to_string())
        }
    }
}
