//! Load errors.
//!
//! Errors stay typed up to the loader boundary, where [`ViewModel::failed`]
//! flattens them into a single message.
//!
//! [`ViewModel::failed`]: crate::models::ViewModel::failed

use crate::fetch::FetchError;
use crate::models::ResourceKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    /// The backend answered with a non-2xx status.
    #[error("Could not load {} {}", .kind.noun(), .id)]
    FetchFailed { kind: ResourceKind, id: String },

    /// Network failure, timeout or unparseable body.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The body parsed but does not have the shape the aggregate needs.
    #[error("{0}")]
    Malformed(String),
}

impl LoadError {
    pub fn fetch_failed(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self::FetchFailed {
            kind,
            id: id.into(),
        }
    }
}
