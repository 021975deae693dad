//! Per-scope command registry with duplicate detection

use std::collections::HashMap;

use crate::{
    error::ScopeError,
    models::{CommandConfig, KeyCommand},
};

/// Map from command descriptor to its configuration
///
/// A descriptor appears at most once. Adding a descriptor that is already
/// present fails instead of overwriting the live entry.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<KeyCommand, CommandConfig>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        CommandRegistry {
            commands: HashMap::new(),
        }
    }

    /// Insert every config in order
    ///
    /// Stops at the first descriptor that is already registered. Entries
    /// inserted before the conflicting one stay in the registry.
    pub fn add_commands(&mut self, configs: &[CommandConfig]) -> Result<(), ScopeError> {
        for config in configs {
            if self.commands.contains_key(&config.command) {
                return Err(ScopeError::Conflict {
                    command: config.command,
                });
            }
            self.commands.insert(config.command, config.clone());
        }
        Ok(())
    }

    /// Remove a descriptor, returning its config if it was present
    pub fn remove(&mut self, command: &KeyCommand) -> Option<CommandConfig> {
        self.commands.remove(command)
    }

    /// Remove the entry for this config's descriptor; no-op if absent
    pub fn remove_command(&mut self, config: &CommandConfig) -> Option<CommandConfig> {
        self.remove(&config.command)
    }

    pub fn contains(&self, command: &KeyCommand) -> bool {
        self.commands.contains_key(command)
    }

    pub fn get(&self, command: &KeyCommand) -> Option<&CommandConfig> {
        self.commands.get(command)
    }

    /// Get number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered descriptors in sorted order
    pub fn commands(&self) -> Vec<KeyCommand> {
        let mut commands: Vec<KeyCommand> = self.commands.keys().copied().collect();
        commands.sort();
        commands
    }
}
