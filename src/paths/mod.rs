//! Platform directory resolution for vxcore.
//!
//! Three directories matter to the application:
//!
//! | Directory | Purpose |
//! |-----------|---------|
//! | executable dir | packaged defaults (`data/vxcore.json`), portable `config/` marker |
//! | app data dir | user overrides (`vxcore.json`) |
//! | local data dir | session state (`session.json`) |
//!
//! ## Platform policy
//!
//! | OS | app data | local data |
//! |----|----------|------------|
//! | Windows | `FOLDERID_RoamingAppData\vxcore` | `FOLDERID_LocalAppData\vxcore` |
//! | macOS | `~/Library/Application Support/vxcore` | `~/Library/Caches/vxcore` |
//! | Unix | `$XDG_DATA_HOME/vxcore` or `~/.local/share/vxcore` | `$XDG_CACHE_HOME/vxcore` or `~/.cache/vxcore` |
//!
//! ## Portable mode
//!
//! When a `config/` directory sits next to the running executable, both the
//! app data and local data directories resolve to it, regardless of what the
//! environment says.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

pub mod platform;

pub use platform::PlatformDirs;

/// Application directory name appended to every platform root.
pub const APP_NAME: &str = "vxcore";

/// Directory next to the executable that switches on portable mode.
pub const PORTABLE_CONFIG_DIR: &str = "config";

/// Directory next to the executable holding packaged defaults.
pub const PACKAGED_DATA_DIR: &str = "data";

/// File name of both the packaged default and the user config documents.
pub const CONFIG_FILE_NAME: &str = "vxcore.json";

/// File name of the session document.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Resolves the three base directories for the current platform.
///
/// Every query returns `None` when the directory cannot be determined; no
/// query ever fails loudly.
pub trait DirectoryResolver {
    /// Directory for user-level configuration.
    fn app_data_dir(&self) -> Option<PathBuf>;

    /// Directory for machine-local state and caches.
    fn local_data_dir(&self) -> Option<PathBuf>;

    /// Directory containing the running binary.
    fn executable_dir(&self) -> Option<PathBuf> {
        current_executable_dir()
    }
}

/// Parent directory of the running executable, as reported by the OS.
pub fn current_executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(Path::to_path_buf)
}

/// Returns the resolver for the platform this binary was built for.
pub fn native_resolver() -> Box<dyn DirectoryResolver> {
    Box::new(PlatformDirs::new(APP_NAME))
}

/// The effective directories a manager works with.
///
/// Computed once when a `ConfigManager` is constructed and never changed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
    executable_dir: PathBuf,
    app_data_dir: PathBuf,
    local_data_dir: PathBuf,
    portable: bool,
}

impl ResolvedPaths {
    /// Resolve paths through `resolver`, applying the portable-install override.
    ///
    /// Returns `None` if any required directory is unresolvable.
    pub fn resolve(resolver: &dyn DirectoryResolver) -> Option<Self> {
        let Some(executable_dir) = resolver.executable_dir() else {
            warn!("could not determine executable directory");
            return None;
        };

        let portable_dir = executable_dir.join(PORTABLE_CONFIG_DIR);
        if portable_dir.is_dir() {
            debug!(dir = %portable_dir.display(), "portable install detected");
            return Some(Self {
                executable_dir,
                app_data_dir: portable_dir.clone(),
                local_data_dir: portable_dir,
                portable: true,
            });
        }

        let Some(app_data_dir) = resolver.app_data_dir() else {
            warn!("could not determine app data directory");
            return None;
        };
        let Some(local_data_dir) = resolver.local_data_dir() else {
            warn!("could not determine local data directory");
            return None;
        };

        Some(Self {
            executable_dir,
            app_data_dir,
            local_data_dir,
            portable: false,
        })
    }

    /// Paths for test mode: both data directories point into `sandbox`.
    pub fn sandboxed(executable_dir: PathBuf, sandbox: &Path) -> Self {
        Self {
            executable_dir,
            app_data_dir: sandbox.to_path_buf(),
            local_data_dir: sandbox.to_path_buf(),
            portable: false,
        }
    }

    pub fn executable_dir(&self) -> &Path {
        &self.executable_dir
    }

    pub fn app_data_dir(&self) -> &Path {
        &self.app_data_dir
    }

    pub fn local_data_dir(&self) -> &Path {
        &self.local_data_dir
    }

    /// Whether the data directories come from a `config/` dir next to the executable.
    pub fn is_portable(&self) -> bool {
        self.portable
    }

    /// `<executableDir>/data/vxcore.json`
    pub fn default_config_file(&self) -> PathBuf {
        self.executable_dir
            .join(PACKAGED_DATA_DIR)
            .join(CONFIG_FILE_NAME)
    }

    /// `<appDataDir>/vxcore.json`
    pub fn user_config_file(&self) -> PathBuf {
        self.app_data_dir.join(CONFIG_FILE_NAME)
    }

    /// `<localDataDir>/session.json`
    pub fn session_file(&self) -> PathBuf {
        self.local_data_dir.join(SESSION_FILE_NAME)
    }
}
