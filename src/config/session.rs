//! Session state stored in `session.json`.
//!
//! The session document only knows that it holds a list of notebook records;
//! how a single record is encoded is delegated to [`SessionRecord`], so any
//! record type can be plugged in.
//!
//! ```json
//! {
//!   "notebooks": [
//!     { "id": "nb-3f2a9c01b7de", "rootFolder": "/home/u/notes", "type": "bundled" }
//!   ]
//! }
//! ```

use std::path::Path;

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Encode/decode capability for an element of the session's notebook list.
///
/// Decoding must not fail: a record that cannot be understood still decodes
/// to some value so the list keeps its length and order.
pub trait SessionRecord: Sized {
    fn from_json(value: &Value) -> Self;

    fn to_json(&self) -> Value;
}

/// Per-installation session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig<R = NotebookRecord> {
    /// Open notebooks, in the order the application keeps them
    pub notebooks: Vec<R>,
}

impl<R> Default for SessionConfig<R> {
    fn default() -> Self {
        Self {
            notebooks: Vec::new(),
        }
    }
}

impl<R: SessionRecord> SessionConfig<R> {
    /// Decode from a JSON document; an absent or non-list `notebooks` yields an empty list.
    pub fn from_json(doc: &Value) -> Self {
        let notebooks = doc
            .get("notebooks")
            .and_then(Value::as_array)
            .map(|list| list.iter().map(R::from_json).collect())
            .unwrap_or_default();

        Self { notebooks }
    }

    pub fn to_json(&self) -> Value {
        let notebooks = self.notebooks.iter().map(R::to_json).collect();
        let mut doc = Map::new();
        doc.insert("notebooks".to_string(), Value::Array(notebooks));
        Value::Object(doc)
    }
}

impl SessionConfig<NotebookRecord> {
    /// Look up a notebook by id.
    pub fn find_notebook(&self, id: &str) -> Option<&NotebookRecord> {
        self.notebooks
            .iter()
            .find(|nb| !nb.is_opaque() && nb.id == id)
    }

    /// Look up a notebook by its root folder.
    pub fn find_notebook_by_root(&self, root_folder: &str) -> Option<&NotebookRecord> {
        self.notebooks
            .iter()
            .find(|nb| !nb.is_opaque() && nb.root_folder == root_folder)
    }

    /// Append a notebook unless one with the same id is already present.
    ///
    /// Returns true if the list changed.
    pub fn add_notebook(&mut self, record: NotebookRecord) -> bool {
        if self.find_notebook(&record.id).is_some() {
            return false;
        }
        self.notebooks.push(record);
        true
    }

    /// Remove the notebook with the given id, returning it if it was present.
    pub fn remove_notebook(&mut self, id: &str) -> Option<NotebookRecord> {
        let index = self
            .notebooks
            .iter()
            .position(|nb| !nb.is_opaque() && nb.id == id)?;
        Some(self.notebooks.remove(index))
    }
}

/// Storage layout of a notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NotebookType {
    /// Notebook with its own metadata folder (default)
    #[default]
    Bundled,
    /// Plain folder of files without metadata
    Raw,
    /// A type name this build does not know, kept verbatim
    Other(String),
}

impl NotebookType {
    /// Parse a known type name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bundled" => Some(NotebookType::Bundled),
            "raw" => Some(NotebookType::Raw),
            _ => None,
        }
    }

    /// Like [`parse`](Self::parse), but unknown names become [`NotebookType::Other`].
    pub fn from_name(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| NotebookType::Other(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            NotebookType::Bundled => "bundled",
            NotebookType::Raw => "raw",
            NotebookType::Other(name) => name,
        }
    }
}

impl std::fmt::Display for NotebookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notebook the application has open.
///
/// Keys this crate does not interpret survive a decode/encode cycle, so
/// saving the session never drops data written by other versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookRecord {
    /// Stable id derived from the root folder (see [`notebook_id`])
    pub id: String,

    /// Absolute path of the notebook's root folder
    pub root_folder: String,

    pub notebook_type: NotebookType,

    /// Unknown keys, plus known keys whose value had the wrong type.
    /// Written back as they were read.
    pub extra: Map<String, Value>,

    // Element that was not a JSON object; encoded back verbatim
    opaque: Option<Value>,
}

impl NotebookRecord {
    /// Create a record for `root_folder`, deriving its id from the path.
    pub fn new(root_folder: &Path, notebook_type: NotebookType) -> Self {
        Self {
            id: notebook_id(root_folder),
            root_folder: root_folder.to_string_lossy().into_owned(),
            notebook_type,
            extra: Map::new(),
            opaque: None,
        }
    }

    /// Whether this element was not a JSON object in the session file.
    pub fn is_opaque(&self) -> bool {
        self.opaque.is_some()
    }
}

/// Remove `key` from `object` if it holds a string.
fn take_string(object: &mut Map<String, Value>, key: &str) -> Option<String> {
    let value = object.get(key)?.as_str()?.to_string();
    object.remove(key);
    Some(value)
}

impl SessionRecord for NotebookRecord {
    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self {
                id: String::new(),
                root_folder: String::new(),
                notebook_type: NotebookType::default(),
                extra: Map::new(),
                opaque: Some(value.clone()),
            };
        };

        let mut extra = object.clone();
        let id = take_string(&mut extra, "id").unwrap_or_default();
        let root_folder = take_string(&mut extra, "rootFolder").unwrap_or_default();
        let notebook_type = take_string(&mut extra, "type")
            .map(|name| NotebookType::from_name(&name))
            .unwrap_or_default();

        Self {
            id,
            root_folder,
            notebook_type,
            extra,
            opaque: None,
        }
    }

    fn to_json(&self) -> Value {
        if let Some(raw) = &self.opaque {
            return raw.clone();
        }

        let mut doc = self.extra.clone();
        let known = [
            ("id", self.id.as_str()),
            ("rootFolder", self.root_folder.as_str()),
            ("type", self.notebook_type.as_str()),
        ];
        for (key, value) in known {
            // A mistyped value left in `extra` wins over the decoded default
            doc.entry(key)
                .or_insert_with(|| Value::String(value.to_string()));
        }
        Value::Object(doc)
    }
}

/// Derive a notebook id from its root folder.
///
/// Format: `nb-<12 hex chars>` of the SHA-256 of the path, so the same folder
/// always maps to the same id.
pub fn notebook_id(root_folder: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(root_folder.to_string_lossy().as_bytes());
    let hash = hasher.finalize();
    let hash_hex = format!("{:x}", hash);
    format!("nb-{}", &hash_hex[..12])
}
