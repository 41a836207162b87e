pub mod archive;
pub mod engine;
pub mod error;
pub mod fs;
pub mod memory;
pub mod paths;
pub mod plan;
pub mod render;
pub mod responses;
pub mod rule;
pub mod rules;
pub mod state;
pub mod templates;
pub mod types;

pub use engine::{Engine, SpellResult, Status};
pub use error::{EngineError, Result};
pub use fs::{DiskFileSystem, FileSystem};
pub use memory::MemoryFileSystem;
pub use rule::RuleTable;
pub use rules::default_table;
pub use state::{JsonStateRepository, StateContext, StateRepository};
pub use types::{Spell, State};
