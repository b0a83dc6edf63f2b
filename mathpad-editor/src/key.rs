//! Keyboard bindings.

use crate::{
    edit::{CycleDirection, Direction, EditState},
    node::NodeKind,
};

/// A key pressed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Tab,
    BackTab,
    Enter,
}

impl Key {
    /// Parses the name of a key, such as `left` or `backspace`. Single characters are
    /// [`Key::Char`].
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "tab" => Key::Tab,
            "backtab" | "shift+tab" => Key::BackTab,
            "enter" => Key::Enter,
            name => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            },
        })
    }

    /// Returns the command bound to this key, given the current state. Returns [`None`] for keys
    /// with no binding.
    pub fn command(self, state: &EditState) -> Option<Command> {
        let literal = |kind, c: char| Some(Command::InsertLiteral { kind, value: c.to_string() });
        match self {
            Key::Char(c @ ('0'..='9' | '.')) => literal(NodeKind::Number, c),
            Key::Char('/') => {
                let after_division = state.active_node()
                    .is_some_and(|node| node.kind == NodeKind::Operator && node.value == "/");
                if after_division {
                    Some(Command::DivisionToFraction)
                } else {
                    literal(NodeKind::Operator, '/')
                }
            },
            Key::Char(c @ ('+' | '-' | '*' | '=')) => literal(NodeKind::Operator, c),
            Key::Char(c) if c.is_ascii_alphabetic() => literal(NodeKind::Variable, c),
            Key::Char('(') => Some(Command::InsertStructure { kind: NodeKind::Group, function: None }),
            Key::Char(')') => Some(Command::CloseParen),
            Key::Char('^') => Some(Command::InsertStructure { kind: NodeKind::Power, function: None }),
            Key::Char(',') => Some(Command::InsertArgument),
            Key::Char(';') => Some(Command::InsertSeparator),
            Key::Char(_) => None,
            Key::Backspace | Key::Delete => Some(Command::Delete),
            Key::Left => Some(Command::Navigate(Direction::Left)),
            Key::Right => Some(Command::Navigate(Direction::Right)),
            Key::Up => Some(Command::Navigate(Direction::Up)),
            Key::Down => Some(Command::Navigate(Direction::Down)),
            Key::Tab => Some(Command::Cycle(CycleDirection::Forward)),
            Key::BackTab => Some(Command::Cycle(CycleDirection::Backward)),
            Key::Enter => Some(Command::Calculate),
        }
    }
}

/// A command of the [`Calculator`](crate::Calculator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    InsertLiteral { kind: NodeKind, value: String },
    InsertStructure { kind: NodeKind, function: Option<String> },
    DivisionToFraction,
    InsertArgument,
    InsertSeparator,
    Delete,
    Navigate(Direction),
    Cycle(CycleDirection),
    CloseParen,
    Calculate,
}
