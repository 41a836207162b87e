use crate::error::{EngineError, Result};
use crate::fs::FileSystem;
use crate::paths;
use crate::types::State;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// StateContext
// ---------------------------------------------------------------------------

/// The whole persisted workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateContext {
    pub current_state: State,
}

impl StateContext {
    pub fn new(current_state: State) -> Self {
        Self { current_state }
    }
}

// ---------------------------------------------------------------------------
// StateRepository
// ---------------------------------------------------------------------------

pub trait StateRepository {
    /// `Ok(None)` when no state has been saved yet.
    fn load(&self) -> Result<Option<StateContext>>;

    fn save(&self, ctx: &StateContext) -> Result<()>;

    fn clear(&self) -> Result<()>;

    fn initialize(&self, start: State) -> Result<StateContext> {
        let ctx = StateContext::new(start);
        self.save(&ctx)?;
        Ok(ctx)
    }

    fn update_state(&self, _ctx: &StateContext, new_state: State) -> Result<StateContext> {
        let next = StateContext::new(new_state);
        self.save(&next)?;
        Ok(next)
    }
}

/// Stores the context as `{"currentState": "..."}` at [`paths::STATE_FILE`].
pub struct JsonStateRepository<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> JsonStateRepository<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self::at(fs, Path::new(paths::STATE_FILE))
    }

    pub fn at(fs: &'a dyn FileSystem, path: &Path) -> Self {
        Self {
            fs,
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateRepository for JsonStateRepository<'_> {
    fn load(&self) -> Result<Option<StateContext>> {
        if !self.fs.exists(&self.path)? {
            return Ok(None);
        }
        let data = self.fs.read(&self.path)?;
        parse_state(&self.path, &data).map(Some)
    }

    fn save(&self, ctx: &StateContext) -> Result<()> {
        let mut data = serde_json::to_string_pretty(ctx)?;
        data.push('\n');
        self.fs.write(&self.path, &data)
    }

    fn clear(&self) -> Result<()> {
        self.fs.delete(&self.path)
    }
}

/// Extra top-level fields are ignored; `currentState` must name a known state.
fn parse_state(path: &Path, data: &str) -> Result<StateContext> {
    let value: serde_json::Value =
        serde_json::from_str(data).map_err(|source| EngineError::StateParse {
            path: path.to_path_buf(),
            source,
        })?;

    let object = value.as_object().ok_or_else(|| EngineError::StateValidation {
        field: "currentState",
        reason: "is missing: state file must be a JSON object".to_string(),
    })?;

    let raw = match object.get("currentState") {
        None => {
            return Err(EngineError::StateValidation {
                field: "currentState",
                reason: "is missing".to_string(),
            })
        }
        Some(serde_json::Value::String(s)) => s,
        Some(other) => {
            return Err(EngineError::StateValidation {
                field: "currentState",
                reason: format!("must be a string, found {other}"),
            })
        }
    };

    let state = raw
        .parse::<State>()
        .map_err(|_| EngineError::StateValidation {
            field: "currentState",
            reason: format!("has unknown value '{raw}'"),
        })?;
    Ok(StateContext::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::DiskFileSystem;
    use crate::memory::MemoryFileSystem;
    use tempfile::TempDir;

    #[test]
    fn load_absent_is_none() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn save_load_round_trip_every_state() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        for state in State::all() {
            let ctx = StateContext::new(*state);
            repo.save(&ctx).unwrap();
            assert_eq!(repo.load().unwrap(), Some(ctx));
        }
    }

    #[test]
    fn save_writes_only_current_state() {
        let fs = MemoryFileSystem::new();
        let repo = JsonStateRepository::new(&fs);
        repo.save(&StateContext::new(State::GatherEditing)).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&fs.file(paths::STATE_FILE).unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({ "currentState": "GATHER_EDITING" }));
    }

    #[test]
    fn unknown_state_names_field_and_value() {
        let fs = MemoryFileSystem::with_files(&[(paths::STATE_FILE, r#"{"currentState":"FOO"}"#)]);
        let err = JsonStateRepository::new(&fs).load().unwrap_err();
        assert!(matches!(err, EngineError::StateValidation { .. }));
        let msg = err.to_string();
        assert!(msg.contains("currentState"), "{msg}");
        assert!(msg.contains("FOO"), "{msg}");
    }

    #[test]
    fn non_json_is_parse_error() {
        let fs = MemoryFileSystem::with_files(&[(paths::STATE_FILE, "not json {")]);
        let err = JsonStateRepository::new(&fs).load().unwrap_err();
        assert!(matches!(err, EngineError::StateParse { .. }));
    }

    #[test]
    fn missing_or_mistyped_field_is_validation_error() {
        for body in [r#"{}"#, r#"{"currentState": 3}"#, r#"["GATHER_EDITING"]"#] {
            let fs = MemoryFileSystem::with_files(&[(paths::STATE_FILE, body)]);
            let err = JsonStateRepository::new(&fs).load().unwrap_err();
            assert!(matches!(err, EngineError::StateValidation { .. }), "{body}");
        }
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body = r#"{"currentState":"ACHIEVE_COMPLETE","lastUpdated":"2024-01-01"}"#;
        let fs = MemoryFileSystem::with_files(&[(paths::STATE_FILE, body)]);
        let ctx = JsonStateRepository::new(&fs).load().unwrap().unwrap();
        assert_eq!(ctx.current_state, State::AchieveComplete);
    }

    #[test]
    fn initialize_update_clear() {
        let dir = TempDir::new().unwrap();
        let fs = DiskFileSystem::new(dir.path());
        let repo = JsonStateRepository::new(&fs);

        let ctx = repo.initialize(State::START).unwrap();
        assert_eq!(ctx.current_state, State::GatherNeedsContext);
        assert!(paths::state_path(dir.path()).exists());

        let next = repo.update_state(&ctx, State::GatherEditingContext).unwrap();
        assert_eq!(repo.load().unwrap(), Some(next));

        repo.clear().unwrap();
        assert!(repo.load().unwrap().is_none());
        repo.clear().unwrap();
    }
}
