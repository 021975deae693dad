//! Chain of enclosing scopes handed down the component tree
//!
//! Every provider extends the context it was mounted in with its own scope.
//! The head of the chain is the nearest enclosing scope of any kind; a
//! lookup by [`ScopeKind`] finds the nearest scope created by one factory.
//! Links hold weak references, so an unmounted provider is never found.

use std::rc::{Rc, Weak};

use crate::scope::{Scope, ScopeInner, ScopeKind};

struct ContextNode {
    kind: ScopeKind,
    scope: Weak<ScopeInner>,
    parent: Option<Rc<ContextNode>>,
}

/// Immutable, cheaply clonable view of the enclosing scopes
#[derive(Clone, Default)]
pub struct ScopeContext {
    head: Option<Rc<ContextNode>>,
}

impl ScopeContext {
    /// Context outside of any provider
    pub fn root() -> Self {
        ScopeContext { head: None }
    }

    pub(crate) fn with_scope(&self, scope: &Scope) -> Self {
        ScopeContext {
            head: Some(Rc::new(ContextNode {
                kind: scope.kind(),
                scope: scope.downgrade(),
                parent: self.head.clone(),
            })),
        }
    }

    /// Nearest enclosing scope regardless of kind
    pub fn current(&self) -> Option<Scope> {
        self.head
            .as_ref()
            .and_then(|node| node.scope.upgrade())
            .map(Scope::from_inner)
    }

    /// Nearest enclosing scope created by the factory owning `kind`
    pub fn lookup(&self, kind: ScopeKind) -> Option<Scope> {
        self.nodes()
            .find(|node| node.kind == kind)
            .and_then(|node| node.scope.upgrade())
            .map(Scope::from_inner)
    }

    /// Number of providers enclosing this context
    pub fn depth(&self) -> usize {
        self.nodes().count()
    }

    /// Live enclosing scopes, innermost first
    pub fn scopes(&self) -> Vec<Scope> {
        self.nodes()
            .filter_map(|node| node.scope.upgrade())
            .map(Scope::from_inner)
            .collect()
    }

    fn nodes(&self) -> impl Iterator<Item = &ContextNode> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
    }
}

impl std::fmt::Debug for ScopeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<String> = self
            .scopes()
            .iter()
            .map(|scope| scope.debug_label().to_string())
            .collect();
        f.debug_struct("ScopeContext")
            .field("depth", &self.depth())
            .field("scopes", &labels)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_empty() {
        let root = ScopeContext::root();
        assert!(root.current().is_none());
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn test_lookup_skips_other_kinds() {
        let outer_kind = ScopeKind::next();
        let inner_kind = ScopeKind::next();
        let outer = Scope::new(outer_kind, "outer".to_string(), None);
        let inner = Scope::new(inner_kind, "inner".to_string(), Some(&outer));

        let ctx = ScopeContext::root().with_scope(&outer).with_scope(&inner);

        assert!(ctx.current().unwrap().ptr_eq(&inner));
        assert!(ctx.lookup(outer_kind).unwrap().ptr_eq(&outer));
        assert!(ctx.lookup(ScopeKind::next()).is_none());
        assert_eq!(ctx.depth(), 2);
    }

    #[test]
    fn test_dropped_scope_is_not_found() {
        let kind = ScopeKind::next();
        let scope = Scope::new(kind, "gone".to_string(), None);
        let ctx = ScopeContext::root().with_scope(&scope);
        drop(scope);

        assert!(ctx.lookup(kind).is_none());
        assert!(ctx.current().is_none());
    }
}
