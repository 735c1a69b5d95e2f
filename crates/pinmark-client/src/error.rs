use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
    Location,
    MediaLibrary,
    Notifications,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionKind::Location => write!(f, "location"),
            PermissionKind::MediaLibrary => write!(f, "media library"),
            PermissionKind::Notifications => write!(f, "notifications"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("response carried no data")]
    EmptyResponse,
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid location: {0}")]
    Validation(String),
    #[error("{0} permission denied")]
    PermissionDenied(PermissionKind),
    #[error("storage error: {0}")]
    Storage(String),
}
