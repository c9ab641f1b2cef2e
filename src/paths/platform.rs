//! Platform data directories backed by the `dirs` crate.
//!
//! | OS | app data (`dirs::data_dir`) | local data (`dirs::cache_dir`) |
//! |----|-----------------------------|--------------------------------|
//! | Linux, BSD | `$XDG_DATA_HOME` or `~/.local/share` | `$XDG_CACHE_HOME` or `~/.cache` |
//! | macOS | `~/Library/Application Support` | `~/Library/Caches` |
//! | Windows | `FOLDERID_RoamingAppData` | `FOLDERID_LocalAppData` |
//!
//! Relative or empty XDG values are ignored. The home directory comes from
//! `$HOME`, falling back to the account database.

use std::path::PathBuf;

use super::DirectoryResolver;

/// Resolver for the directories of the platform this binary was built for.
#[derive(Debug, Clone)]
pub struct PlatformDirs {
    app_name: String,
}

impl PlatformDirs {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

impl DirectoryResolver for PlatformDirs {
    fn app_data_dir(&self) -> Option<PathBuf> {
        dirs::data_dir().map(|base| base.join(&self.app_name))
    }

    fn local_data_dir(&self) -> Option<PathBuf> {
        dirs::cache_dir().map(|base| base.join(&self.app_name))
    }
}
