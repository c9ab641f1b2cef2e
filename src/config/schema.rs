//! JSON schema for the effective application configuration (`vxcore.json`).
//!
//! Decoding is permissive: every field is read independently and
//! falls back to its built-in default when it is absent or has the wrong
//! type. Unknown keys are ignored and are not written back by [`Config::to_json`].
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "search": { "backends": ["rg", "simple"] }
//! }
//! ```

use serde_json::{Map, Value, json};

/// Config version written by this build.
pub const DEFAULT_VERSION: &str = "0.1.0";

/// Search backends tried in order when the user configures none.
pub const DEFAULT_SEARCH_BACKENDS: [&str; 2] = ["rg", "simple"];

/// Merged application configuration (packaged defaults overridden by the user file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Schema version of the document the values came from
    pub version: String,

    /// Search settings
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            search: SearchConfig::default(),
        }
    }
}

impl Config {
    /// Decode from a JSON document, keeping defaults for anything missing or mistyped.
    pub fn from_json(doc: &Value) -> Self {
        let mut config = Self::default();

        if let Some(version) = doc.get("version").and_then(Value::as_str) {
            config.version = version.to_string();
        }

        if let Some(search) = doc.get("search") {
            config.search = SearchConfig::from_json(search);
        }

        config
    }

    /// Encode the known fields only.
    pub fn to_json(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("version".to_string(), Value::String(self.version.clone()));
        doc.insert("search".to_string(), self.search.to_json());
        Value::Object(doc)
    }
}

/// The `search` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Backend names in priority order
    pub backends: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backends: DEFAULT_SEARCH_BACKENDS
                .iter()
                .map(|b| b.to_string())
                .collect(),
        }
    }
}

impl SearchConfig {
    pub fn from_json(doc: &Value) -> Self {
        let mut search = Self::default();

        // A list with any non-string element counts as mistyped as a whole
        if let Some(backends) = doc.get("backends").and_then(Value::as_array) {
            let parsed: Option<Vec<String>> = backends
                .iter()
                .map(|b| b.as_str().map(str::to_string))
                .collect();
            if let Some(parsed) = parsed {
                search.backends = parsed;
            }
        }

        search
    }

    pub fn to_json(&self) -> Value {
        json!({ "backends": self.backends })
    }
}
