//! Scope handles and registration guards
//!
//! A [`Scope`] is the value a provider publishes to its subtree: the
//! provider's registry together with its debug label and the add/remove
//! operations. Every successful [`Scope::add_commands`] call hands back a
//! [`Registration`] that removes exactly that batch when released or dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::{
    error::ScopeError,
    models::{CommandConfig, KeyCommand},
    registry::CommandRegistry,
};

static NEXT_KIND: AtomicU64 = AtomicU64::new(1);

/// Private identity of one scope factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeKind(u64);

impl ScopeKind {
    pub(crate) fn next() -> Self {
        ScopeKind(NEXT_KIND.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

pub(crate) struct ScopeInner {
    kind: ScopeKind,
    debug_label: String,
    parent: Option<Weak<ScopeInner>>,
    registry: RefCell<CommandRegistry>,
}

/// Shared handle to one provider's registry
#[derive(Clone)]
pub struct Scope {
    inner: Rc<ScopeInner>,
}

impl Scope {
    pub(crate) fn new(kind: ScopeKind, debug_label: String, parent: Option<&Scope>) -> Self {
        Scope {
            inner: Rc::new(ScopeInner {
                kind,
                debug_label,
                parent: parent.map(|p| Rc::downgrade(&p.inner)),
                registry: RefCell::new(CommandRegistry::new()),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<ScopeInner>) -> Self {
        Scope { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<ScopeInner> {
        Rc::downgrade(&self.inner)
    }

    pub fn kind(&self) -> ScopeKind {
        self.inner.kind
    }

    pub fn debug_label(&self) -> &str {
        &self.inner.debug_label
    }

    /// Enclosing scope at mount time, if it is still mounted
    pub fn parent(&self) -> Option<Scope> {
        self.inner
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Scope::from_inner)
    }

    /// Debug labels from the outermost live ancestor down to this scope
    pub fn path(&self) -> String {
        let mut labels = vec![self.debug_label().to_string()];
        let mut current = self.parent();
        while let Some(scope) = current {
            labels.push(scope.debug_label().to_string());
            current = scope.parent();
        }
        labels.reverse();
        labels.join(" > ")
    }

    /// Register a batch of commands
    ///
    /// Fails on the first descriptor already present in this scope; entries
    /// before it stay registered and are not covered by any guard.
    pub fn add_commands(&self, configs: Vec<CommandConfig>) -> Result<Registration, ScopeError> {
        let result = self.inner.registry.borrow_mut().add_commands(&configs);
        if let Err(err) = result {
            warn!(scope = %self.debug_label(), "{}", err);
            return Err(err);
        }

        debug!(
            scope = %self.debug_label(),
            count = configs.len(),
            "Registered key commands"
        );

        Ok(Registration {
            scope: self.downgrade(),
            commands: configs.into_iter().map(|config| config.command).collect(),
            released: false,
        })
    }

    /// Remove a single command; no-op if it is not registered
    pub fn remove_command(&self, config: &CommandConfig) {
        let removed = self.inner.registry.borrow_mut().remove_command(config);
        if removed.is_some() {
            debug!(scope = %self.debug_label(), command = %config.command, "Removed key command");
        }
    }

    pub fn contains(&self, command: &KeyCommand) -> bool {
        self.inner.registry.borrow().contains(command)
    }

    /// Config registered for a descriptor
    pub fn get(&self, command: &KeyCommand) -> Option<CommandConfig> {
        self.inner.registry.borrow().get(command).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.registry.borrow().is_empty()
    }

    pub fn commands(&self) -> Vec<KeyCommand> {
        self.inner.registry.borrow().commands()
    }

    /// True if both handles point at the same provider mount
    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("kind", &self.inner.kind)
            .field("debug_label", &self.inner.debug_label)
            .field("commands", &self.commands())
            .finish()
    }
}

/// Guard for one successful `add_commands` batch
///
/// Releasing (or dropping) the guard deletes every descriptor of the batch
/// from its scope, including ones already removed by other means. A guard
/// whose scope has been unmounted does nothing.
#[must_use = "dropping a Registration removes its commands immediately"]
pub struct Registration {
    scope: Weak<ScopeInner>,
    commands: Vec<KeyCommand>,
    released: bool,
}

impl Registration {
    /// Descriptors covered by this guard
    pub fn commands(&self) -> &[KeyCommand] {
        &self.commands
    }

    /// Remove the batch now
    pub fn release(mut self) {
        self.cleanup();
    }

    fn cleanup(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        let Some(inner) = self.scope.upgrade() else {
            return;
        };

        let removed: Vec<CommandConfig> = {
            let mut registry = inner.registry.borrow_mut();
            self.commands
                .iter()
                .filter_map(|command| registry.remove(command))
                .collect()
        };

        debug!(
            scope = %inner.debug_label,
            count = removed.len(),
            "Released key commands"
        );
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("commands", &self.commands)
            .field("released", &self.released)
            .finish()
    }
}
