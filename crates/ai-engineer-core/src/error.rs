use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("path escapes the workspace: {}", .0.display())]
    OutsideWorkspace(PathBuf),

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {} is not valid JSON: {source}", path.display())]
    StateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid state file: field '{field}' {reason}")]
    StateValidation { field: &'static str, reason: String },

    #[error("unknown state: {0}")]
    UnknownState(String),

    #[error("unknown spell '{0}': expected one of Accio, Expecto, Reparo, Reverto, Finite, Lumos")]
    UnknownSpell(String),

    #[error("rule '{id}' is malformed: {reason}")]
    InvalidRule { id: &'static str, reason: String },

    #[error("rule '{rule}' cannot resolve {to} from {from}: source state has no G/A suffix")]
    UnresolvedDestination {
        rule: &'static str,
        to: String,
        from: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
