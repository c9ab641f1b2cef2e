//! Configuration and session state for vxcore.
//!
//! Three JSON documents are involved:
//!
//! ## `data/vxcore.json` - packaged defaults (read-only)
//!
//! Shipped next to the executable. Optional.
//!
//! ## `vxcore.json` - user overrides
//!
//! Located in the app data directory. Partial documents are fine; every key
//! present here overrides the packaged default. Lists replace lists, they are
//! never concatenated.
//!
//! ## `session.json` - session state
//!
//! Located in the local data directory. Holds the open notebooks. Decoded on
//! its own and never merged with the configuration. This is the only file
//! written back.
//!
//! ## Precedence
//!
//! For configuration: user file > packaged defaults > built-in defaults.
//!
//! Use [`ConfigManager`] to load everything in one go.

pub mod manager;
pub mod merge;
pub mod schema;
pub mod session;

pub use manager::{
    ConfigManager, LoadState, NoopMigration, VersionMigration, set_test_mode, test_mode,
};
pub use merge::merge_json;
pub use schema::{Config, DEFAULT_SEARCH_BACKENDS, DEFAULT_VERSION, SearchConfig};
pub use session::{NotebookRecord, NotebookType, SessionConfig, SessionRecord, notebook_id};
