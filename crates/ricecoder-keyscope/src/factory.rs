//! Scope factory producing provider/registration pairs

use tracing::debug;

use crate::{
    context::ScopeContext,
    error::ScopeError,
    hook::KeyCommands,
    models::CommandConfig,
    provider::{KeyCommandProvider, ProviderProps},
    scope::{Scope, ScopeKind},
};

/// One isolated kind of key-command scope
///
/// Commands registered through [`KeyCommandScope::use_key_commands`] only
/// reach providers mounted by the same `KeyCommandScope`.
#[derive(Debug, Clone)]
pub struct KeyCommandScope {
    kind: ScopeKind,
}

/// Create a new scope kind with its own private channel
pub fn create_key_command_scope() -> KeyCommandScope {
    let scope = KeyCommandScope {
        kind: ScopeKind::next(),
    };
    debug!(kind = scope.kind.id(), "Created key command scope kind");
    scope
}

impl KeyCommandScope {
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Mount a provider inside `parent`
    pub fn provider(&self, props: ProviderProps, parent: &ScopeContext) -> KeyCommandProvider {
        KeyCommandProvider::mount(self.kind, props, parent)
    }

    /// Register `configs` in the nearest enclosing provider of this kind
    pub fn use_key_commands(
        &self,
        context: &ScopeContext,
        configs: Vec<CommandConfig>,
    ) -> Result<KeyCommands, ScopeError> {
        KeyCommands::mount(self.kind, context, configs)
    }

    /// Nearest enclosing provider scope of this kind
    pub fn lookup(&self, context: &ScopeContext) -> Option<Scope> {
        context.lookup(self.kind)
    }
}
