use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use crate::config::keybindings::{HostCommand, Modifier, ModifierSet};
use crate::error::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
}

impl MouseButton {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Button1" => Self::Button1,
            "Button2" => Self::Button2,
            "Button3" => Self::Button3,
            "Button4" => Self::Button4,
            "Button5" => Self::Button5,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Button1 => "Button1",
            Self::Button2 => "Button2",
            Self::Button3 => "Button3",
            Self::Button4 => "Button4",
            Self::Button5 => "Button5",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseKind {
    Drag,
    Click,
}

/// A mouse binding as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MouseEntry {
    pub kind: MouseKind,
    #[serde(default)]
    pub mods: Vec<String>,
    pub button: String,
    pub action: String,
    /// Drag only: command whose result seeds the drag.
    pub start: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Drag {
        action: HostCommand,
        start: Option<HostCommand>,
    },
    Click {
        action: HostCommand,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MouseBinding {
    pub mods: ModifierSet,
    pub button: MouseButton,
    pub action: MouseAction,
}

fn command(path: &str) -> Result<HostCommand, LoadError> {
    HostCommand::from_path(path).ok_or_else(|| LoadError::UnknownAction(path.to_owned()))
}

/// Resolve mouse entries, rejecting repeated (modifiers, button) pairs.
pub fn build_mouse(entries: &[MouseEntry], mod_key: Modifier) -> Result<Vec<MouseBinding>, LoadError> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut bindings = Vec::with_capacity(entries.len());
    for entry in entries {
        let mods = ModifierSet::parse(&entry.mods, mod_key)?;
        let button = MouseButton::from_name(&entry.button).ok_or_else(|| {
            LoadError::InvalidBinding {
                key: entry.button.clone(),
                reason: "unknown mouse button".to_owned(),
            }
        })?;
        let action = match entry.kind {
            MouseKind::Drag => MouseAction::Drag {
                action: command(&entry.action)?,
                start: entry.start.as_deref().map(command).transpose()?,
            },
            MouseKind::Click => {
                if entry.start.is_some() {
                    return Err(LoadError::InvalidBinding {
                        key: entry.button.clone(),
                        reason: "`start` only applies to drag bindings".to_owned(),
                    });
                }
                MouseAction::Click {
                    action: command(&entry.action)?,
                }
            }
        };
        if !seen.insert((mods.clone(), button)) {
            let label = if mods.is_empty() {
                button.to_string()
            } else {
                format!("{mods}+{button}")
            };
            return Err(LoadError::DuplicateMouseBinding(label));
        }
        bindings.push(MouseBinding {
            mods,
            button,
            action,
        });
    }
    Ok(bindings)
}
