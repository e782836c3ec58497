use std::path::PathBuf;

use thiserror::Error;

use crate::color::ColorParseError;

/// The requested theme is not in the theme table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {name:?}; available: {}", available.join(", "))]
pub struct UnknownThemeError {
    pub name: String,
    pub available: Vec<String>,
}

/// A colour slot reference points past the end of the active theme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("color slot {index} out of range for theme {theme:?} ({len} slots)")]
pub struct IndexOutOfRange {
    pub theme: String,
    pub index: i64,
    pub len: usize,
}

/// Two bindings claim the same modifier set and key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate binding for {combo}: {first} conflicts with {second}")]
pub struct DuplicateBindingError {
    pub combo: String,
    pub first: String,
    pub second: String,
}

/// An option that is not in the schema of the widget or layout kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: unknown option {option:?}")]
pub struct UnknownOptionError {
    pub kind: String,
    pub option: String,
}

/// An option whose value does not have the type its schema expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}.{option}: expected {expected}, found {found}")]
pub struct TypeMismatchError {
    pub kind: String,
    pub option: String,
    pub expected: String,
    pub found: String,
}

/// Any failure that aborts a configuration load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing TOML from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    UnknownTheme(#[from] UnknownThemeError),

    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),

    #[error(transparent)]
    DuplicateBinding(#[from] DuplicateBindingError),

    #[error(transparent)]
    UnknownOption(#[from] UnknownOptionError),

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),

    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),

    #[error("theme {name:?} has {found} color slots, expected {expected}")]
    InvalidTheme {
        name: String,
        found: usize,
        expected: usize,
    },

    #[error("unknown action {0:?}")]
    UnknownAction(String),

    #[error("action {action:?} requires {argument:?}")]
    MissingArgument { action: String, argument: String },

    #[error("action {action:?} does not take {argument:?}")]
    UnexpectedArgument { action: String, argument: String },

    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),

    #[error("unknown group {0:?}")]
    UnknownGroup(String),

    #[error("duplicate group {0:?}")]
    DuplicateGroup(String),

    #[error("invalid group name {0:?}")]
    InvalidGroup(String),

    #[error("invalid binding for key {key:?}: {reason}")]
    InvalidBinding { key: String, reason: String },

    #[error("unknown widget kind {0:?}")]
    UnknownWidgetKind(String),

    #[error("unknown layout kind {0:?}")]
    UnknownLayoutKind(String),

    #[error("duplicate mouse binding for {0}")]
    DuplicateMouseBinding(String),
}
