//! Scoped key-command registration for component trees
//!
//! This crate lets nested regions of a UI declare their own active key
//! commands:
//! - A scope factory creating isolated provider/registration pairs
//! - Providers owning one command registry per mount
//! - Conflict detection inside a scope, with no silent overwrites
//! - Registration guards that remove commands on unmount or config change
//! - JSON and YAML scope manifests bound to callbacks by action id
//!
//! ```
//! use ricecoder_keyscope::{create_key_command_scope, CommandConfig, Key, KeyCommand, ProviderProps, ScopeContext};
//!
//! let editor = create_key_command_scope();
//! let provider = editor.provider(ProviderProps::new("editor"), &ScopeContext::root());
//!
//! let save = CommandConfig::new(KeyCommand::ctrl(Key::char('s')), |_| {});
//! let commands = editor.use_key_commands(provider.context(), vec![save])?;
//! assert!(provider.scope().contains(&KeyCommand::ctrl(Key::char('s'))));
//!
//! drop(commands);
//! assert!(provider.scope().is_empty());
//! # Ok::<(), ricecoder_keyscope::ScopeError>(())
//! ```

pub mod context;
pub mod error;
pub mod factory;
pub mod hook;
pub mod manifest;
pub mod models;
pub mod provider;
pub mod registry;
pub mod scope;

// Re-export public types
pub use context::ScopeContext;
pub use error::{ConfigError, ParseError, ScopeError};
pub use factory::{create_key_command_scope, KeyCommandScope};
pub use hook::KeyCommands;
pub use manifest::{
    default_manifest_dir, ActionTable, BindingSpec, JsonManifestParser, ManifestLoader,
    ManifestParser, ScopeManifest, YamlManifestParser,
};
pub use models::{
    CommandCallback, CommandConfig, Element, FunctionKey, Key, KeyChar, KeyCommand, Modifier,
};
pub use provider::{KeyCommandProvider, ProviderProps};
pub use registry::CommandRegistry;
pub use scope::{Registration, Scope, ScopeKind};
