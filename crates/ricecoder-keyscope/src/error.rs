//! Error types for key-command scopes

use thiserror::Error;

use crate::models::KeyCommand;

/// Errors that can occur while parsing key commands and element names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid key syntax: {0}")]
    InvalidKeySyntax(String),

    #[error("Invalid modifier: {0}")]
    InvalidModifier(String),

    #[error("Key command takes at most one modifier: {0}")]
    TooManyModifiers(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

/// Errors that can occur while loading scope manifests
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON syntax: {0}")]
    InvalidJson(String),

    #[error("Invalid YAML syntax: {0}")]
    InvalidYaml(String),

    #[error("Unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unknown action {action} at bindings[{index}]")]
    UnknownAction { action: String, index: usize },

    #[error("No configuration directory available")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by scope registration
#[derive(Debug, Error)]
pub enum ScopeError {
    /// Registration attempted with no enclosing provider of the same scope
    #[error(
        "Can't add key commands outside its scope. use_key_commands should be used inside its scope."
    )]
    OutsideScope,

    /// A descriptor is already registered in the target scope
    #[error("Conflicting key command for {command}")]
    Conflict { command: KeyCommand },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
