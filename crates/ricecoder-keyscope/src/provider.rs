//! Scope provider component

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    context::ScopeContext,
    models::Element,
    scope::{Scope, ScopeKind},
};

/// Properties a provider is mounted with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderProps {
    /// Label identifying the scope in diagnostics
    pub debug_label: String,
    /// Host element wrapping the children, `div` when unset
    #[serde(default)]
    pub element: Option<Element>,
}

impl ProviderProps {
    pub fn new(debug_label: impl Into<String>) -> Self {
        ProviderProps {
            debug_label: debug_label.into(),
            element: None,
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }
}

/// One mounted provider
///
/// Owns the scope for as long as it is mounted. Children receive
/// [`KeyCommandProvider::context`], which publishes the scope both as the
/// nearest enclosing scope and under the factory's private kind.
pub struct KeyCommandProvider {
    scope: Scope,
    element: Element,
    context: ScopeContext,
}

impl KeyCommandProvider {
    pub(crate) fn mount(kind: ScopeKind, props: ProviderProps, parent: &ScopeContext) -> Self {
        let enclosing = parent.current();
        let scope = Scope::new(kind, props.debug_label, enclosing.as_ref());
        let context = parent.with_scope(&scope);

        debug!(
            scope = %scope.path(),
            depth = context.depth(),
            "Mounted key command scope"
        );

        KeyCommandProvider {
            scope,
            element: props.element.unwrap_or_default(),
            context,
        }
    }

    /// The published scope value
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Context handed to children of this provider
    pub fn context(&self) -> &ScopeContext {
        &self.context
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn debug_label(&self) -> &str {
        self.scope.debug_label()
    }

    /// Apply new props without remounting
    ///
    /// The registry and published scope are kept; the debug label is the one
    /// given at mount.
    pub fn rerender(&mut self, props: &ProviderProps) {
        self.element = props.element.unwrap_or_default();
    }

    /// Focus entering the wrapped element
    pub fn on_focus_capture(&self) {
        // TODO: make this the active scope once key dispatch lands
    }
}

impl Drop for KeyCommandProvider {
    fn drop(&mut self) {
        debug!(
            scope = %self.scope.debug_label(),
            remaining = self.scope.len(),
            "Unmounted key command scope"
        );
    }
}

impl std::fmt::Debug for KeyCommandProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCommandProvider")
            .field("scope", &self.scope)
            .field("element", &self.element)
            .finish()
    }
}
