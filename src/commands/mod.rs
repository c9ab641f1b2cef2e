//! Command implementations for the vxc CLI.
//!
//! Each command takes a [`ConfigManager`], does its work through the
//! library API and returns a [`CommandResult`] for the caller to print.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::config::{Config, ConfigManager, NotebookRecord, NotebookType, SessionRecord};
use crate::paths::ResolvedPaths;
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait CommandResult {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

// === Paths ===

/// Resolved directories and the files read from them.
#[derive(Debug, Serialize)]
pub struct PathsReport {
    #[serde(flatten)]
    pub paths: ResolvedPaths,
    pub default_config_file: PathBuf,
    pub user_config_file: PathBuf,
    pub session_file: PathBuf,
    pub test_mode: bool,
}

impl CommandResult for PathsReport {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Executable dir: {}", self.paths.executable_dir().display()),
            format!("App data dir:   {}", self.paths.app_data_dir().display()),
            format!("Local data dir: {}", self.paths.local_data_dir().display()),
            String::new(),
            format!("Defaults: {}", self.default_config_file.display()),
            format!("User:     {}", self.user_config_file.display()),
            format!("Session:  {}", self.session_file.display()),
        ];
        if self.paths.is_portable() {
            lines.push(String::new());
            lines.push("Portable install: data stored next to the executable".to_string());
        }
        if self.test_mode {
            lines.push(String::new());
            lines.push("Test mode: using a temporary sandbox".to_string());
        }
        lines.join("\n")
    }
}

/// Report where configuration is read from. Does not touch the filesystem.
pub fn paths(manager: &ConfigManager) -> Result<PathsReport> {
    let paths = manager.paths().ok_or(Error::NotInitialized)?;
    Ok(PathsReport {
        default_config_file: paths.default_config_file(),
        user_config_file: paths.user_config_file(),
        session_file: paths.session_file(),
        paths: paths.clone(),
        test_mode: manager.is_test_mode(),
    })
}

// === Config ===

/// The effective configuration after merging.
#[derive(Debug)]
pub struct ConfigReport {
    pub config: Config,
}

impl CommandResult for ConfigReport {
    fn to_json(&self) -> String {
        self.config.to_json().to_string()
    }

    fn to_human(&self) -> String {
        format!(
            "Version: {}\nSearch backends: {}",
            self.config.version,
            if self.config.search.backends.is_empty() {
                "(none)".to_string()
            } else {
                self.config.search.backends.join(", ")
            }
        )
    }
}

/// Load all layers and report the effective configuration.
pub fn show_config(manager: &mut ConfigManager) -> Result<ConfigReport> {
    manager.load_configs()?;
    Ok(ConfigReport {
        config: manager.config().clone(),
    })
}

// === Session ===

fn record_human(record: &NotebookRecord) -> String {
    format!(
        "{} [{}] {}",
        record.id, record.notebook_type, record.root_folder
    )
}

/// Notebooks currently in the session.
#[derive(Debug)]
pub struct NotebookList {
    pub notebooks: Vec<NotebookRecord>,
}

impl CommandResult for NotebookList {
    fn to_json(&self) -> String {
        let notebooks: Vec<Value> = self.notebooks.iter().map(|nb| nb.to_json()).collect();
        json!({ "count": notebooks.len(), "notebooks": notebooks }).to_string()
    }

    fn to_human(&self) -> String {
        if self.notebooks.is_empty() {
            return "No notebooks open.".to_string();
        }
        let mut lines = vec![format!("{} notebook(s):", self.notebooks.len())];
        lines.extend(self.notebooks.iter().map(|nb| format!("  {}", record_human(nb))));
        lines.join("\n")
    }
}

/// List notebooks in the session.
pub fn session_list(manager: &mut ConfigManager) -> Result<NotebookList> {
    manager.load_configs()?;
    Ok(NotebookList {
        notebooks: manager.session_config().notebooks.clone(),
    })
}

/// Result of adding a notebook.
#[derive(Debug)]
pub struct NotebookAdded {
    pub notebook: NotebookRecord,
    /// False if the notebook was already in the session
    pub added: bool,
}

impl CommandResult for NotebookAdded {
    fn to_json(&self) -> String {
        json!({ "added": self.added, "notebook": self.notebook.to_json() }).to_string()
    }

    fn to_human(&self) -> String {
        if self.added {
            format!("Added notebook {}", record_human(&self.notebook))
        } else {
            format!("Notebook already open: {}", record_human(&self.notebook))
        }
    }
}

/// Add the notebook rooted at `root` and save the session.
///
/// Adding a root that is already open changes nothing and reports the
/// existing record.
pub fn session_add(
    manager: &mut ConfigManager,
    root: &Path,
    notebook_type: NotebookType,
) -> Result<NotebookAdded> {
    if !root.is_dir() {
        return Err(Error::InvalidInput(format!(
            "notebook root is not a directory: {}",
            root.display()
        )));
    }
    let root = root
        .canonicalize()
        .map_err(|source| Error::io(root, source))?;

    manager.load_configs()?;

    let record = NotebookRecord::new(&root, notebook_type);
    if let Some(existing) = manager.session_config().find_notebook(&record.id) {
        return Ok(NotebookAdded {
            notebook: existing.clone(),
            added: false,
        });
    }

    manager.session_config_mut().add_notebook(record.clone());
    manager.save_session_config()?;
    info!(id = %record.id, root = %record.root_folder, "added notebook");

    Ok(NotebookAdded {
        notebook: record,
        added: true,
    })
}

/// Result of removing a notebook.
#[derive(Debug)]
pub struct NotebookRemoved {
    pub notebook: NotebookRecord,
}

impl CommandResult for NotebookRemoved {
    fn to_json(&self) -> String {
        json!({ "removed": true, "notebook": self.notebook.to_json() }).to_string()
    }

    fn to_human(&self) -> String {
        format!("Removed notebook {}", record_human(&self.notebook))
    }
}

/// Remove the notebook with `id` and save the session.
pub fn session_remove(manager: &mut ConfigManager, id: &str) -> Result<NotebookRemoved> {
    manager.load_configs()?;

    let notebook = manager
        .session_config_mut()
        .remove_notebook(id)
        .ok_or_else(|| Error::InvalidInput(format!("no notebook with id {}", id)))?;
    manager.save_session_config()?;
    info!(id, "removed notebook");

    Ok(NotebookRemoved { notebook })
}
