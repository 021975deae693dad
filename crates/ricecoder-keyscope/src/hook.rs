//! Component-bound registration of key commands

use tracing::warn;

use crate::{
    context::ScopeContext,
    error::ScopeError,
    models::{CommandConfig, KeyCommand},
    scope::{Registration, ScopeKind},
};

/// Key commands registered on behalf of one component
///
/// Created by `KeyCommandScope::use_key_commands`. The commands stay
/// registered until the configs change through [`KeyCommands::update`] or the
/// handle is dropped when the component unmounts.
#[derive(Debug)]
pub struct KeyCommands {
    kind: ScopeKind,
    context: ScopeContext,
    configs: Vec<CommandConfig>,
    registration: Option<Registration>,
}

impl KeyCommands {
    pub(crate) fn mount(
        kind: ScopeKind,
        context: &ScopeContext,
        configs: Vec<CommandConfig>,
    ) -> Result<Self, ScopeError> {
        let mut commands = KeyCommands {
            kind,
            context: context.clone(),
            configs,
            registration: None,
        };
        commands.register()?;
        Ok(commands)
    }

    fn register(&mut self) -> Result<(), ScopeError> {
        let scope = self.context.lookup(self.kind).ok_or_else(|| {
            warn!(enclosing = ?self.context, "Key commands used outside their scope");
            ScopeError::OutsideScope
        })?;
        self.registration = Some(scope.add_commands(self.configs.clone())?);
        Ok(())
    }

    /// Re-supply the configs on a later render
    ///
    /// Unchanged configs leave the registration alone and return `false`.
    /// Otherwise the previous batch is removed before the new one is added.
    pub fn update(&mut self, configs: Vec<CommandConfig>) -> Result<bool, ScopeError> {
        if configs == self.configs {
            return Ok(false);
        }

        if let Some(previous) = self.registration.take() {
            previous.release();
        }
        self.configs = configs;
        self.register()?;
        Ok(true)
    }

    pub fn configs(&self) -> &[CommandConfig] {
        &self.configs
    }

    /// Descriptors currently held by this component
    pub fn commands(&self) -> &[KeyCommand] {
        self.registration
            .as_ref()
            .map(Registration::commands)
            .unwrap_or(&[])
    }

    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }
}
