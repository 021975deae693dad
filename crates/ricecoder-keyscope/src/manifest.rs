//! Declarative scope manifests in JSON and YAML
//!
//! A manifest describes one provider and the key commands bound in it by
//! action id. Callbacks are supplied at runtime through an [`ActionTable`].
//!
//! ```json
//! {
//!   "debug_label": "editor",
//!   "element": "section",
//!   "bindings": [
//!     { "action": "editor.save", "key": "Ctrl+S" },
//!     { "action": "editor.close", "key": "Escape" }
//!   ]
//! }
//! ```
//!
//! Manifests are looked up under `<config dir>/ricecoder/keyscopes/` by
//! default.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{ConfigError, ScopeError},
    models::{CommandCallback, CommandConfig, Element, KeyCommand},
    provider::ProviderProps,
};

/// One `action -> key` binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingSpec {
    pub action: String,
    pub key: String,
}

/// Provider props plus its bindings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeManifest {
    pub debug_label: String,
    #[serde(default)]
    pub element: Option<Element>,
    #[serde(default)]
    pub bindings: Vec<BindingSpec>,
}

impl ScopeManifest {
    pub fn props(&self) -> ProviderProps {
        ProviderProps {
            debug_label: self.debug_label.clone(),
            element: self.element,
        }
    }

    /// Turn the bindings into command configs using `actions` for callbacks
    pub fn resolve(&self, actions: &ActionTable) -> Result<Vec<CommandConfig>, ScopeError> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(idx, binding)| -> Result<CommandConfig, ScopeError> {
                let command: KeyCommand = binding.key.parse()?;
                let callback = actions.get(&binding.action).ok_or_else(|| {
                    ConfigError::UnknownAction {
                        action: binding.action.clone(),
                        index: idx,
                    }
                })?;
                Ok(CommandConfig::with_callback(command, callback))
            })
            .collect()
    }
}

/// Callbacks available to manifests, keyed by action id
#[derive(Default)]
pub struct ActionTable {
    actions: HashMap<String, CommandCallback>,
}

impl ActionTable {
    pub fn new() -> Self {
        ActionTable {
            actions: HashMap::new(),
        }
    }

    pub fn register(&mut self, action: impl Into<String>, callback: impl Fn(&KeyEvent) + 'static) {
        self.actions.insert(action.into(), Rc::new(callback));
    }

    pub fn get(&self, action: &str) -> Option<CommandCallback> {
        self.actions.get(action).cloned()
    }

    pub fn contains(&self, action: &str) -> bool {
        self.actions.contains_key(action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Trait for parsing scope manifests
pub trait ManifestParser: Send + Sync {
    /// Parse a manifest from content
    fn parse(&self, content: &str) -> Result<ScopeManifest, ConfigError>;
}

/// JSON manifest parser
pub struct JsonManifestParser;

impl ManifestParser for JsonManifestParser {
    fn parse(&self, content: &str) -> Result<ScopeManifest, ConfigError> {
        let manifest: ScopeManifest =
            serde_json::from_str(content).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;
        validate(manifest)
    }
}

/// YAML manifest parser
pub struct YamlManifestParser;

impl ManifestParser for YamlManifestParser {
    fn parse(&self, content: &str) -> Result<ScopeManifest, ConfigError> {
        let manifest: ScopeManifest =
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml(e.to_string()))?;
        validate(manifest)
    }
}

fn validate(manifest: ScopeManifest) -> Result<ScopeManifest, ConfigError> {
    if manifest.debug_label.trim().is_empty() {
        return Err(ConfigError::MissingField("debug_label".to_string()));
    }
    for (idx, binding) in manifest.bindings.iter().enumerate() {
        if binding.action.is_empty() {
            return Err(ConfigError::MissingField(format!("bindings[{}].action", idx)));
        }
        if binding.key.is_empty() {
            return Err(ConfigError::MissingField(format!("bindings[{}].key", idx)));
        }
    }
    Ok(manifest)
}

/// Loads manifests by format name or file extension
pub struct ManifestLoader {
    parsers: HashMap<String, Arc<dyn ManifestParser>>,
}

impl ManifestLoader {
    /// Create a loader with JSON and YAML parsers
    pub fn new() -> Self {
        let mut parsers = HashMap::new();
        let yaml = Arc::new(YamlManifestParser) as Arc<dyn ManifestParser>;
        parsers.insert("json".to_string(), Arc::new(JsonManifestParser) as Arc<dyn ManifestParser>);
        parsers.insert("yaml".to_string(), yaml.clone());
        parsers.insert("yml".to_string(), yaml);

        ManifestLoader { parsers }
    }

    /// Register a custom parser for a format
    pub fn register(&mut self, format: impl Into<String>, parser: Arc<dyn ManifestParser>) {
        self.parsers.insert(format.into(), parser);
    }

    /// Parse content with explicit format
    pub fn parse(&self, content: &str, format: &str) -> Result<ScopeManifest, ConfigError> {
        let parser = self
            .parsers
            .get(&format.to_lowercase())
            .ok_or_else(|| ConfigError::UnsupportedFormat(format.to_string()))?;
        parser.parse(content)
    }

    /// Read a manifest file, picking the parser from its extension
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ScopeManifest, ConfigError> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;

        let content = fs::read_to_string(path)?;
        let manifest = self.parse(&content, format)?;
        debug!(
            path = %path.display(),
            scope = %manifest.debug_label,
            bindings = manifest.bindings.len(),
            "Loaded scope manifest"
        );
        Ok(manifest)
    }
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Default directory holding scope manifests
pub fn default_manifest_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("ricecoder").join("keyscopes"))
        .ok_or(ConfigError::NoConfigDir)
}
