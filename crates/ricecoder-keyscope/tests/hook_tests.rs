mod common;

use common::ctrl;
use ricecoder_keyscope::{
    create_key_command_scope, Key, KeyCommand, ProviderProps, ScopeContext, ScopeError,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_with_same_configs_keeps_registration() {
        let scope = create_key_command_scope();
        let provider = scope.provider(ProviderProps::new("list"), &ScopeContext::root());
        let configs = vec![ctrl('j'), ctrl('k')];

        let mut cmds = scope
            .use_key_commands(provider.context(), configs.clone())
            .unwrap();
        assert!(!cmds.update(configs).unwrap());
        assert_eq!(provider.scope().len(), 2);
    }

    #[test]
    fn test_update_with_new_configs_swaps_commands() {
        let scope = create_key_command_scope();
        let provider = scope.provider(ProviderProps::new("list"), &ScopeContext::root());

        let mut cmds = scope
            .use_key_commands(provider.context(), vec![ctrl('j')])
            .unwrap();
        assert!(cmds.update(vec![ctrl('n')]).unwrap());

        assert_eq!(
            provider.scope().commands(),
            vec![KeyCommand::ctrl(Key::char('n'))]
        );
        assert_eq!(cmds.commands(), &[KeyCommand::ctrl(Key::char('n'))]);
    }

    #[test]
    fn test_update_rebinding_same_key_runs_cleanup_first() {
        let scope = create_key_command_scope();
        let provider = scope.provider(ProviderProps::new("list"), &ScopeContext::root());

        let mut cmds = scope
            .use_key_commands(provider.context(), vec![ctrl('s')])
            .unwrap();

        // Fresh callback for the same key: configs changed, no conflict with itself
        assert!(cmds.update(vec![ctrl('s')]).unwrap());
        assert_eq!(provider.scope().len(), 1);
    }

    #[test]
    fn test_update_into_conflict_reports_error() {
        let scope = create_key_command_scope();
        let provider = scope.provider(ProviderProps::new("list"), &ScopeContext::root());

        let _other = scope
            .use_key_commands(provider.context(), vec![ctrl('x')])
            .unwrap();
        let mut cmds = scope
            .use_key_commands(provider.context(), vec![ctrl('s')])
            .unwrap();

        let err = cmds.update(vec![ctrl('x')]).unwrap_err();
        assert!(matches!(err, ScopeError::Conflict { .. }));
        assert!(!cmds.is_registered());
        assert!(!provider.scope().contains(&KeyCommand::ctrl(Key::char('s'))));
    }

    #[test]
    fn test_drop_unregisters() {
        let scope = create_key_command_scope();
        let provider = scope.provider(ProviderProps::new("list"), &ScopeContext::root());

        {
            let cmds = scope
                .use_key_commands(provider.context(), vec![ctrl('a'), ctrl('b')])
                .unwrap();
            assert_eq!(cmds.configs().len(), 2);
            assert_eq!(provider.scope().len(), 2);
        }

        assert!(provider.scope().is_empty());
    }

    #[test]
    fn test_lookup_through_factory() {
        let scope = create_key_command_scope();
        assert!(scope.lookup(&ScopeContext::root()).is_none());

        let provider = scope.provider(ProviderProps::new("list"), &ScopeContext::root());
        let found = scope.lookup(provider.context()).unwrap();
        assert!(found.ptr_eq(provider.scope()));
        assert_eq!(found.kind(), scope.kind());
    }
}
