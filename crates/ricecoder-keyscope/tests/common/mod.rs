#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ricecoder_keyscope::{CommandConfig, Key, KeyCommand};

/// Install a test subscriber once so scope logs show up in failing tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("ricecoder_keyscope=debug")
        .try_init();
}

/// Config for Ctrl+<c> with a no-op callback
pub fn ctrl(c: char) -> CommandConfig {
    CommandConfig::new(KeyCommand::ctrl(Key::char(c)), |_| {})
}

/// Config whose callback counts invocations
pub fn counting(command: KeyCommand) -> (CommandConfig, Rc<Cell<usize>>) {
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    let config = CommandConfig::new(command, move |_| counter.set(counter.get() + 1));
    (config, hits)
}

pub fn ctrl_event(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}
