//! Loading and saving of the three configuration layers.
//!
//! ## Lifecycle
//!
//! ```text
//! Constructed ──resolve──▶ PathsResolved ──load_configs──▶ Ready
//!                                │                          │
//!                                └──────── any error ───────┴──▶ Failed(kind)
//! ```
//!
//! A failed load leaves the previously loaded `Config` and `SessionConfig`
//! untouched; a later `load_configs` call may still succeed.
//!
//! ## Files
//!
//! 1. `<executableDir>/data/vxcore.json` - packaged defaults
//! 2. `<appDataDir>/vxcore.json` - user overrides (merged over 1)
//! 3. `<localDataDir>/session.json` - session state (decoded on its own)
//!
//! Missing files count as empty documents. Present but malformed files abort
//! the load.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::config::merge::merge_json;
use crate::config::schema::{Config, DEFAULT_VERSION};
use crate::config::session::SessionConfig;
use crate::paths::{DirectoryResolver, ResolvedPaths, native_resolver};
use crate::{Error, ErrorKind, Result};

/// Process-wide test-mode switch, consulted only by [`ConfigManager::from_global_test_mode`].
static TEST_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable test mode for managers constructed afterwards.
///
/// Set this once, before the first manager is built. Managers that already
/// exist keep the mode they were constructed with.
pub fn set_test_mode(enabled: bool) {
    TEST_MODE.store(enabled, Ordering::SeqCst);
}

/// Current value of the process-wide test-mode switch.
pub fn test_mode() -> bool {
    TEST_MODE.load(Ordering::SeqCst)
}

/// Where a manager is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Paths could not be resolved; loading and saving will fail
    Constructed,
    /// Paths resolved, nothing loaded yet
    PathsResolved,
    /// Last load succeeded
    Ready,
    /// Last load failed with the given kind
    Failed(ErrorKind),
}

/// Hook invoked on every load, before any config file is read.
///
/// Reserved for rewriting persisted files when their schema version differs
/// from the running one. An error aborts the load.
pub trait VersionMigration {
    fn migrate(&self, paths: &ResolvedPaths, running_version: &str) -> Result<()>;
}

/// Migration hook that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMigration;

impl VersionMigration for NoopMigration {
    fn migrate(&self, _paths: &ResolvedPaths, running_version: &str) -> Result<()> {
        debug!(running_version, "no config migration required");
        Ok(())
    }
}

/// Owns the resolved paths and the in-memory config and session state.
pub struct ConfigManager {
    paths: Option<ResolvedPaths>,
    config: Config,
    session: SessionConfig,
    state: LoadState,
    migration: Box<dyn VersionMigration>,
    // Keeps the test-mode sandbox alive; removed on drop
    sandbox: Option<TempDir>,
}

impl ConfigManager {
    /// Construct with the platform resolver.
    ///
    /// In test mode both data directories point into a fresh temporary
    /// sandbox instead of the user's real directories.
    pub fn new(test_mode: bool) -> Self {
        Self::with_resolver(native_resolver().as_ref(), test_mode)
    }

    /// Construct using the process-wide flag set by [`set_test_mode`].
    pub fn from_global_test_mode() -> Self {
        Self::new(test_mode())
    }

    /// Construct with an explicit resolver.
    pub fn with_resolver(resolver: &dyn DirectoryResolver, test_mode: bool) -> Self {
        let (paths, sandbox) = if test_mode {
            sandbox_paths(resolver)
        } else {
            (ResolvedPaths::resolve(resolver), None)
        };

        let state = match &paths {
            Some(paths) => {
                debug!(
                    executable_dir = %paths.executable_dir().display(),
                    app_data_dir = %paths.app_data_dir().display(),
                    local_data_dir = %paths.local_data_dir().display(),
                    portable = paths.is_portable(),
                    test_mode,
                    "resolved config paths"
                );
                LoadState::PathsResolved
            }
            None => LoadState::Constructed,
        };

        Self {
            paths,
            config: Config::default(),
            session: SessionConfig::default(),
            state,
            migration: Box::new(NoopMigration),
            sandbox,
        }
    }

    /// Replace the version-migration hook.
    pub fn with_migration(mut self, migration: Box<dyn VersionMigration>) -> Self {
        self.migration = migration;
        self
    }

    /// Ensure directories exist, then load, merge and decode all three documents.
    ///
    /// On error nothing in memory changes except the reported [`LoadState`].
    pub fn load_configs(&mut self) -> Result<()> {
        match self.read_layers() {
            Ok((config, session)) => {
                info!(
                    version = %config.version,
                    notebooks = session.notebooks.len(),
                    "loaded configuration"
                );
                self.config = config;
                self.session = session;
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load configuration");
                self.state = LoadState::Failed(e.kind());
                Err(e)
            }
        }
    }

    fn read_layers(&self) -> Result<(Config, SessionConfig)> {
        let paths = self.paths.as_ref().ok_or(Error::NotInitialized)?;

        ensure_dir(paths.app_data_dir())?;
        ensure_dir(paths.local_data_dir())?;

        self.migration.migrate(paths, DEFAULT_VERSION)?;

        let mut merged = read_json_document(&paths.default_config_file())?;
        let user = read_json_document(&paths.user_config_file())?;
        let session = read_json_document(&paths.session_file())?;

        merge_json(&mut merged, &user);

        Ok((Config::from_json(&merged), SessionConfig::from_json(&session)))
    }

    /// Write the current session state to `session.json`.
    ///
    /// The document is written to a temporary file in the same directory and
    /// renamed over the destination, so readers never observe a partial file.
    pub fn save_session_config(&self) -> Result<()> {
        let paths = self.paths.as_ref().ok_or(Error::NotInitialized)?;

        let mut contents =
            serde_json::to_string_pretty(&self.session.to_json()).map_err(Error::JsonSerialize)?;
        contents.push('\n');

        let path = paths.session_file();
        write_atomic(&path, contents.as_bytes())?;

        info!(
            path = %path.display(),
            notebooks = self.session.notebooks.len(),
            "saved session"
        );
        Ok(())
    }

    /// Effective configuration (defaults overridden by the user file).
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session
    }

    /// Mutable session state; call [`save_session_config`](Self::save_session_config) to persist.
    pub fn session_config_mut(&mut self) -> &mut SessionConfig {
        &mut self.session
    }

    /// Resolved directories, or `None` if resolution failed at construction.
    pub fn paths(&self) -> Option<&ResolvedPaths> {
        self.paths.as_ref()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Whether this manager works inside a test sandbox.
    pub fn is_test_mode(&self) -> bool {
        self.sandbox.is_some()
    }
}

fn sandbox_paths(resolver: &dyn DirectoryResolver) -> (Option<ResolvedPaths>, Option<TempDir>) {
    let Some(executable_dir) = resolver.executable_dir() else {
        warn!("could not determine executable directory");
        return (None, None);
    };

    match tempfile::Builder::new().prefix("vxcore-test-").tempdir() {
        Ok(sandbox) => {
            let paths = ResolvedPaths::sandboxed(executable_dir, sandbox.path());
            (Some(paths), Some(sandbox))
        }
        Err(e) => {
            warn!(error = %e, "could not create test sandbox directory");
            (None, None)
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::io(dir, source))
}

/// Read a JSON document; a missing file reads as an empty object.
fn read_json_document(path: &Path) -> Result<Value> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), "reading config document");
            serde_json::from_slice(&bytes).map_err(|source| Error::JsonParse {
                path: path.to_path_buf(),
                source,
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "config document absent, using empty document");
            Ok(Value::Object(Map::new()))
        }
        Err(source) => Err(Error::io(path, source)),
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::io(path, io::Error::other("path has no parent directory")))?;
    ensure_dir(dir)?;

    let mut tmp = temp_file_builder()
        .tempfile_in(dir)
        .map_err(|source| Error::io(dir, source))?;

    // The replacement keeps the mode of the file it replaces
    match fs::metadata(path) {
        Ok(existing) => tmp
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|source| Error::io(tmp.path(), source))?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(Error::io(path, source)),
    }

    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|source| Error::io(tmp.path(), source))?;
    tmp.persist(path)
        .map_err(|e| Error::io(path, e.error))?;

    Ok(())
}

/// Temp files for saving are created like a plain new file: 0666 minus the umask.
#[cfg(unix)]
fn temp_file_builder() -> tempfile::Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = tempfile::Builder::new();
    builder.permissions(fs::Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn temp_file_builder() -> tempfile::Builder<'static, 'static> {
    tempfile::Builder::new()
}
