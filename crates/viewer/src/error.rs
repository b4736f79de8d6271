//! Error taxonomy for the viewer core.
//!
//! Command-surface operations never return these directly: they answer with
//! `bool`/`Option` and report the reason through the diagnostic listener.
//! Loading paths (schema, settings) return them as `Result`.

use shared::{PartId, ViewMode};
use thiserror::Error;

/// Errors and diagnostics raised by the viewer core
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Part id is not in the registry
    #[error("part '{0}' not found")]
    NotFound(String),

    /// Operation makes no sense in the current view state
    #[error("invalid transition in {mode}: {reason}")]
    InvalidTransition { mode: ViewMode, reason: String },

    /// None of the discovered nodes matched a major part of the schema
    #[error("no major parts matched the discovered nodes of '{0}'")]
    EmptyModel(String),

    /// Schema contradicts itself (duplicate ids, empty id)
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ViewerError {
    pub(crate) fn invalid(mode: ViewMode, reason: impl Into<String>) -> Self {
        ViewerError::InvalidTransition {
            mode,
            reason: reason.into(),
        }
    }

    /// Id the diagnostic refers to, if any
    pub fn part_id(&self) -> Option<&str> {
        match self {
            ViewerError::NotFound(id) => Some(id),
            _ => None,
        }
    }

    /// True for diagnostics the command surface swallows (never fatal)
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            ViewerError::NotFound(_) | ViewerError::InvalidTransition { .. }
        )
    }
}

/// Convenience alias for loading paths
pub type ViewerResult<T> = Result<T, ViewerError>;

pub(crate) fn not_found(id: &str) -> ViewerError {
    ViewerError::NotFound(PartId::from(id))
}
