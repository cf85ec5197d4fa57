//! View-model and resource descriptors.
//!
//! Backend resources are kept as opaque JSON; the only structure the loaders
//! care about is which key a page's result lives under and which nested
//! collections get attached to a project.

use crate::error::LoadError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;

/// Status carried by every failure view-model.
pub const FAILURE_STATUS: u16 = 500;

/// Message used when a failure carries no text of its own.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Key under which a project's environment list is attached.
pub const ENVIRONMENTS_KEY: &str = "Environments";

/// Key under which an environment's variable list is attached.
pub const VARIABLES_KEY: &str = "Variables";

/// Field holding an environment's identifier in the backend payload.
pub const ENVIRONMENT_ID_FIELD: &str = "ID";

/// Kind of backend fetch, used in failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Image,
    Service,
    Project,
    Environments,
}

impl ResourceKind {
    /// Noun phrase placed between "Could not load" and the id.
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Image => "image details for",
            ResourceKind::Service => "service",
            ResourceKind::Project => "project",
            ResourceKind::Environments => "environments for project",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Image => write!(f, "image"),
            ResourceKind::Service => write!(f, "service"),
            ResourceKind::Project => write!(f, "project"),
            ResourceKind::Environments => write!(f, "environments"),
        }
    }
}

/// Top-level key of a successful view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKey {
    ImageDetails,
    Service,
    Project,
}

impl ResourceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKey::ImageDetails => "imageDetails",
            ResourceKey::Service => "service",
            ResourceKey::Project => "project",
        }
    }
}

/// A navigable detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Page {
    Project,
    Service,
    Image,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Project => write!(f, "project"),
            Page::Service => write!(f, "service"),
            Page::Image => write!(f, "image"),
        }
    }
}

/// A resource loaded with a single GET to `{base_path}/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatResource {
    pub kind: ResourceKind,
    pub base_path: &'static str,
    pub key: ResourceKey,
}

impl FlatResource {
    pub fn path_for(&self, id: &str) -> String {
        format!("{}/{}", self.base_path, id)
    }
}

pub const IMAGE: FlatResource = FlatResource {
    kind: ResourceKind::Image,
    base_path: "/images",
    key: ResourceKey::ImageDetails,
};

pub const SERVICE: FlatResource = FlatResource {
    kind: ResourceKind::Service,
    base_path: "/api/services",
    key: ResourceKey::Service,
};

/// Result of a page load, handed to the renderer.
///
/// Serializes to `{"<key>": <resource>}` or `{"status": 500, "error": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewModel {
    Loaded { key: ResourceKey, resource: Value },
    Failed { status: u16, error: String },
}

impl ViewModel {
    pub fn loaded(key: ResourceKey, resource: Value) -> Self {
        ViewModel::Loaded { key, resource }
    }

    /// Collapse any load error into the generic failure shape.
    pub fn failed(err: &LoadError) -> Self {
        let message = err.to_string();
        ViewModel::Failed {
            status: FAILURE_STATUS,
            error: if message.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                message
            },
        }
    }

    pub fn from_result(key: ResourceKey, result: Result<Value, LoadError>) -> Self {
        match result {
            Ok(resource) => Self::loaded(key, resource),
            Err(e) => Self::failed(&e),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ViewModel::Failed { .. })
    }
}

impl Serialize for ViewModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ViewModel::Loaded { key, resource } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key.as_str(), resource)?;
                map.end()
            }
            ViewModel::Failed { status, error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status", status)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}
