use std::fmt;
use std::str::FromStr;

use crate::domain::error::AppError;
use crate::interfaces::content::page::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.shift || self.alt || self.meta)
    }

    /// Every required modifier is held; extra ones are tolerated.
    fn held_in(&self, event: &KeyEvent) -> bool {
        (!self.ctrl || event.ctrl)
            && (!self.shift || event.shift)
            && (!self.alt || event.alt)
            && (!self.meta || event.meta)
    }
}

/// Trigger combination such as `Ctrl+Shift` or `Alt+T`.
///
/// Without a key the shortcut fires on any key press while the modifiers
/// are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub modifiers: Modifiers,
    pub key: Option<char>,
}

impl Default for Shortcut {
    fn default() -> Self {
        Self {
            modifiers: Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::default()
            },
            key: None,
        }
    }
}

impl Shortcut {
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !self.modifiers.held_in(event) {
            return false;
        }
        match (self.key, event.key) {
            (None, _) => true,
            (Some(expected), Some(pressed)) => expected.eq_ignore_ascii_case(&pressed),
            (Some(_), None) => false,
        }
    }
}

impl FromStr for Shortcut {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_shortcut(input).map_err(AppError::ConfigError)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.meta {
            parts.push("Meta".to_string());
        }
        if let Some(key) = self.key {
            parts.push(key.to_ascii_uppercase().to_string());
        }
        write!(f, "{}", parts.join("+"))
    }
}

fn parse_modifier(part: &str, modifiers: &mut Modifiers) -> bool {
    match part.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => modifiers.ctrl = true,
        "alt" | "option" => modifiers.alt = true,
        "shift" => modifiers.shift = true,
        "cmd" | "meta" | "win" | "super" => modifiers.meta = true,
        _ => return false,
    }
    true
}

fn parse_shortcut(input: &str) -> Result<Shortcut, String> {
    let parts: Vec<&str> = input
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        return Err("Shortcut is empty.".to_string());
    }

    let mut modifiers = Modifiers::default();
    let mut key = None;

    for (index, part) in parts.iter().enumerate() {
        if parse_modifier(part, &mut modifiers) {
            continue;
        }
        if index != parts.len() - 1 {
            return Err(format!("Unknown modifier: {part}"));
        }
        key = Some(parse_key(part)?);
    }

    if modifiers.is_empty() {
        return Err("Shortcut needs at least one modifier.".to_string());
    }

    Ok(Shortcut { modifiers, key })
}

fn parse_key(key: &str) -> Result<char, String> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_alphanumeric() || ch.is_ascii_punctuation() => Ok(ch),
        _ => Err(format!("Unsupported key: {key}")),
    }
}
