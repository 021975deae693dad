//! Core data models for key-command scopes

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Keyboard modifier attached to a key command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    /// Bare key, no modifier held
    #[default]
    None,
    Ctrl,
    Shift,
    Alt,
    Meta,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::None => write!(f, "None"),
            Modifier::Ctrl => write!(f, "Ctrl"),
            Modifier::Shift => write!(f, "Shift"),
            Modifier::Alt => write!(f, "Alt"),
            Modifier::Meta => write!(f, "Meta"),
        }
    }
}

impl FromStr for Modifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(Modifier::None),
            "ctrl" | "control" => Ok(Modifier::Ctrl),
            "shift" => Ok(Modifier::Shift),
            "alt" | "option" => Ok(Modifier::Alt),
            "meta" | "cmd" | "command" => Ok(Modifier::Meta),
            _ => Err(ParseError::InvalidModifier(s.to_string())),
        }
    }
}

/// A character key, always stored lowercase
///
/// Only built through [`Key::char`], so `S` and `s` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyChar(char);

impl KeyChar {
    pub fn get(&self) -> char {
        self.0
    }
}

/// A function key in `F1..=F12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionKey(u8);

impl FunctionKey {
    pub fn new(number: u8) -> Result<Self, ParseError> {
        if (1..=12).contains(&number) {
            Ok(FunctionKey(number))
        } else {
            Err(ParseError::InvalidKeySyntax(format!(
                "Function key must be F1-F12, got: F{}",
                number
            )))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

/// A key on the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Char(KeyChar),
    F(FunctionKey),
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Key typed by a character
    ///
    /// Letters are lowercased. Whitespace maps to the named key it types.
    pub fn char(c: char) -> Self {
        match c {
            '\t' => Key::Tab,
            '\n' | '\r' => Key::Enter,
            c if c.is_whitespace() => Key::Space,
            c => Key::Char(KeyChar(c.to_lowercase().next().unwrap_or(c))),
        }
    }

    /// Function key `F<number>`
    pub fn function(number: u8) -> Result<Self, ParseError> {
        Ok(Key::F(FunctionKey::new(number)?))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.get()),
            Key::F(n) => write!(f, "F{}", n.number()),
            Key::Space => write!(f, "Space"),
            Key::Enter => write!(f, "Enter"),
            Key::Escape => write!(f, "Escape"),
            Key::Tab => write!(f, "Tab"),
            Key::Backspace => write!(f, "Backspace"),
            Key::Delete => write!(f, "Delete"),
            Key::Home => write!(f, "Home"),
            Key::End => write!(f, "End"),
            Key::PageUp => write!(f, "PageUp"),
            Key::PageDown => write!(f, "PageDown"),
            Key::Up => write!(f, "Up"),
            Key::Down => write!(f, "Down"),
            Key::Left => write!(f, "Left"),
            Key::Right => write!(f, "Right"),
        }
    }
}

impl FromStr for Key {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::char(c));
        }

        match trimmed.to_lowercase().as_str() {
            "space" => Ok(Key::Space),
            "enter" | "return" => Ok(Key::Enter),
            "escape" | "esc" => Ok(Key::Escape),
            "tab" => Ok(Key::Tab),
            "backspace" | "bksp" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            "pageup" | "page_up" => Ok(Key::PageUp),
            "pagedown" | "page_down" => Ok(Key::PageDown),
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            s if s.starts_with('f') && s.len() > 1 => {
                let num: u8 = s[1..].parse().map_err(|_| {
                    ParseError::InvalidKeySyntax(format!("Invalid function key: {}", s))
                })?;
                Key::function(num)
            }
            s => Err(ParseError::InvalidKeySyntax(format!("Unknown key: {}", s))),
        }
    }
}

/// Command descriptor: one key plus one modifier
///
/// Two descriptors are the same command whenever key and modifier are equal.
/// `Display` and `FromStr` are inverses, and back the serde form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCommand {
    pub key: Key,
    pub modifier: Modifier,
}

impl KeyCommand {
    /// Build a descriptor from its key and modifier names, e.g. `("s", "ctrl")`
    pub fn new(key: &str, modifier: &str) -> Result<Self, ParseError> {
        Ok(KeyCommand {
            key: key.parse()?,
            modifier: modifier.parse()?,
        })
    }

    pub fn with_modifier(key: Key, modifier: Modifier) -> Self {
        KeyCommand { key, modifier }
    }

    pub fn bare(key: Key) -> Self {
        Self::with_modifier(key, Modifier::None)
    }

    pub fn ctrl(key: Key) -> Self {
        Self::with_modifier(key, Modifier::Ctrl)
    }

    pub fn alt(key: Key) -> Self {
        Self::with_modifier(key, Modifier::Alt)
    }

    pub fn shift(key: Key) -> Self {
        Self::with_modifier(key, Modifier::Shift)
    }

    pub fn meta(key: Key) -> Self {
        Self::with_modifier(key, Modifier::Meta)
    }
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.modifier {
            Modifier::None => write!(f, "{}", self.key),
            modifier => write!(f, "{}+{}", modifier, self.key),
        }
    }
}

impl FromStr for KeyCommand {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseError::InvalidKeySyntax(
                "Empty key command".to_string(),
            ));
        }

        // A trailing `+` is the plus key itself
        let (modifier, key) = if text == "+" {
            (None, text)
        } else if let Some(prefix) = text.strip_suffix("++") {
            (Some(prefix), "+")
        } else {
            match text.rsplit_once('+') {
                Some((modifier, key)) => (Some(modifier), key),
                None => (None, text),
            }
        };

        let key: Key = key.parse()?;
        match modifier {
            None => Ok(KeyCommand::bare(key)),
            Some(m) if m.contains('+') => Err(ParseError::TooManyModifiers(s.to_string())),
            Some(m) if m.trim().is_empty() => Err(ParseError::InvalidModifier(s.to_string())),
            Some(m) => Ok(KeyCommand::with_modifier(key, m.parse()?)),
        }
    }
}

impl TryFrom<String> for KeyCommand {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyCommand> for String {
    fn from(command: KeyCommand) -> Self {
        command.to_string()
    }
}

/// Shared handler invoked when a command matches
pub type CommandCallback = Rc<dyn Fn(&KeyEvent)>;

/// A command descriptor paired with the callback to run on match
#[derive(Clone)]
pub struct CommandConfig {
    pub command: KeyCommand,
    pub callback: CommandCallback,
}

impl CommandConfig {
    pub fn new(command: KeyCommand, callback: impl Fn(&KeyEvent) + 'static) -> Self {
        CommandConfig {
            command,
            callback: Rc::new(callback),
        }
    }

    /// Pair a descriptor with an already shared callback
    pub fn with_callback(command: KeyCommand, callback: CommandCallback) -> Self {
        CommandConfig { command, callback }
    }

    pub fn invoke(&self, event: &KeyEvent) {
        (self.callback)(event)
    }
}

/// Configs are equal when they name the same command and share the same callback
impl PartialEq for CommandConfig {
    fn eq(&self, other: &Self) -> bool {
        self.command == other.command && Rc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for CommandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandConfig")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

/// Host element a provider wraps its children in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    #[default]
    Div,
    Section,
    Article,
    Aside,
    Header,
    Footer,
    Main,
    Nav,
    Form,
    Span,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Element::Div => "div",
            Element::Section => "section",
            Element::Article => "article",
            Element::Aside => "aside",
            Element::Header => "header",
            Element::Footer => "footer",
            Element::Main => "main",
            Element::Nav => "nav",
            Element::Form => "form",
            Element::Span => "span",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Element {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "div" => Ok(Element::Div),
            "section" => Ok(Element::Section),
            "article" => Ok(Element::Article),
            "aside" => Ok(Element::Aside),
            "header" => Ok(Element::Header),
            "footer" => Ok(Element::Footer),
            "main" => Ok(Element::Main),
            "nav" => Ok(Element::Nav),
            "form" => Ok(Element::Form),
            "span" => Ok(Element::Span),
            _ => Err(ParseError::UnknownElement(s.to_string())),
        }
    }
}
