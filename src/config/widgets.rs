use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::mouse::MouseButton;
use crate::config::options::{
    self, OptionType, OptionValue, Options, Schema, ValidationContext,
};
use crate::error::LoadError;
use crate::hooks::Callback;

use OptionType::{Bool, Color, Float, Int, MouseCallbacks, Str};

// ---------------------------------------------------------------------------
// Schemas
// ---------------------------------------------------------------------------

/// Options every widget accepts. `[widget_defaults]` is checked against this.
pub const COMMON: Schema = &[
    ("font", Str),
    ("fontsize", Int),
    ("fontshadow", Color),
    ("padding", Int),
    ("foreground", Color),
    ("background", Color),
    ("fmt", Str),
    ("name", Str),
    ("mouse_callbacks", MouseCallbacks),
];

const IMAGE: Schema = &[
    ("filename", Str),
    ("scale", Bool),
    ("margin", Int),
    ("rotate", Float),
];

const PROMPT: Schema = &[
    ("prompt", Str),
    ("cursor", Bool),
    ("cursor_color", Color),
    ("record_history", Bool),
    ("max_history", Int),
];

const GROUP_BOX: Schema = &[
    ("margin_x", Int),
    ("margin_y", Int),
    ("padding_x", Int),
    ("padding_y", Int),
    ("borderwidth", Int),
    ("active", Color),
    ("inactive", Color),
    ("rounded", Bool),
    ("highlight_color", Color),
    (
        "highlight_method",
        OptionType::Enum(&["border", "block", "text", "line"]),
    ),
    ("this_current_screen_border", Color),
    ("this_screen_border", Color),
    ("other_current_screen_border", Color),
    ("other_screen_border", Color),
    ("urgent_border", Color),
    ("disable_drag", Bool),
    ("hide_unused", Bool),
];

const TEXT_BOX: Schema = &[("text", Str)];

const WINDOW_NAME: Schema = &[
    ("format", Str),
    ("max_chars", Int),
    ("empty_group_string", Str),
    ("for_current_screen", Bool),
];

const GEN_POLL_TEXT: Schema = &[
    ("func", OptionType::Callback),
    ("update_interval", Float),
];

const SPACER: Schema = &[("length", Int)];

const CPU: Schema = &[("format", Str), ("update_interval", Float)];

const MEMORY: Schema = &[
    ("format", Str),
    ("measure_mem", OptionType::Enum(&["K", "M", "G"])),
    ("measure_swap", OptionType::Enum(&["K", "M", "G"])),
    ("update_interval", Float),
];

const DF: Schema = &[
    ("partition", Str),
    ("format", Str),
    ("measure", OptionType::Enum(&["K", "M", "G"])),
    ("update_interval", Float),
    ("visible_on_warn", Bool),
    ("warn_space", Int),
    ("warn_color", Color),
];

const VOLUME: Schema = &[
    ("channel", Str),
    ("cardid", Int),
    ("device", Str),
    ("step", Int),
    ("update_interval", Float),
    ("mute_command", Str),
    ("volume_up_command", Str),
    ("volume_down_command", Str),
];

const KEYBOARD_LAYOUT: Schema = &[("update_interval", Float), ("option", Str)];

const CLOCK: Schema = &[
    ("format", Str),
    ("timezone", Str),
    ("update_interval", Float),
];

const SYSTRAY: Schema = &[("icon_size", Int)];

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Image,
    Prompt,
    GroupBox,
    TextBox,
    WindowName,
    GenPollText,
    Spacer,
    Cpu,
    Memory,
    Df,
    Volume,
    KeyboardLayout,
    Clock,
    Systray,
}

impl WidgetKind {
    /// Parse a widget kind from the config string. The host's class names
    /// (`GroupBox`, `CPU`, ...) are accepted as aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "image" | "Image" => Self::Image,
            "prompt" | "Prompt" => Self::Prompt,
            "group_box" | "GroupBox" => Self::GroupBox,
            "text_box" | "TextBox" => Self::TextBox,
            "window_name" | "WindowName" => Self::WindowName,
            "gen_poll_text" | "GenPollText" => Self::GenPollText,
            "spacer" | "Spacer" => Self::Spacer,
            "cpu" | "CPU" => Self::Cpu,
            "memory" | "Memory" => Self::Memory,
            "df" | "DF" => Self::Df,
            "volume" | "Volume" => Self::Volume,
            "keyboard_layout" | "KeyboardLayout" => Self::KeyboardLayout,
            "clock" | "Clock" => Self::Clock,
            "systray" | "Systray" => Self::Systray,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Prompt => "prompt",
            Self::GroupBox => "group_box",
            Self::TextBox => "text_box",
            Self::WindowName => "window_name",
            Self::GenPollText => "gen_poll_text",
            Self::Spacer => "spacer",
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Df => "df",
            Self::Volume => "volume",
            Self::KeyboardLayout => "keyboard_layout",
            Self::Clock => "clock",
            Self::Systray => "systray",
        }
    }

    /// Options specific to this kind, on top of [`COMMON`].
    pub fn schema(self) -> Schema {
        match self {
            Self::Image => IMAGE,
            Self::Prompt => PROMPT,
            Self::GroupBox => GROUP_BOX,
            Self::TextBox => TEXT_BOX,
            Self::WindowName => WINDOW_NAME,
            Self::GenPollText => GEN_POLL_TEXT,
            Self::Spacer => SPACER,
            Self::Cpu => CPU,
            Self::Memory => MEMORY,
            Self::Df => DF,
            Self::Volume => VOLUME,
            Self::KeyboardLayout => KEYBOARD_LAYOUT,
            Self::Clock => CLOCK,
            Self::Systray => SYSTRAY,
        }
    }

    pub fn accepts(self, option: &str) -> bool {
        options::lookup(&[COMMON, self.schema()], option).is_some()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A widget as written in the config file: `kind` plus its options.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetEntry {
    pub kind: String,
    #[serde(flatten)]
    pub options: toml::Table,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedWidget {
    pub kind: WidgetKind,
    pub options: Options,
}

impl ValidatedWidget {
    pub fn get(&self, option: &str) -> Option<&OptionValue> {
        self.options.get(option)
    }

    /// The periodic function of a polling widget.
    pub fn poll_callback(&self) -> Option<&Callback> {
        match self.options.get("func") {
            Some(OptionValue::Callback(cb)) => Some(cb),
            _ => None,
        }
    }

    pub fn mouse_callbacks(&self) -> Option<&IndexMap<MouseButton, Callback>> {
        match self.options.get("mouse_callbacks") {
            Some(OptionValue::MouseCallbacks(cbs)) => Some(cbs),
            _ => None,
        }
    }
}

/// Check a widget's options against its kind's schema.
///
/// Colour slots resolve through the context theme here, so a bad slot fails
/// the load rather than the first repaint.
pub fn validate_widget(
    kind: &str,
    options: &toml::Table,
    ctx: &ValidationContext<'_>,
) -> Result<ValidatedWidget, LoadError> {
    let widget_kind =
        WidgetKind::from_name(kind).ok_or_else(|| LoadError::UnknownWidgetKind(kind.to_owned()))?;
    let options =
        options::validate_options(kind, &[COMMON, widget_kind.schema()], options, ctx)?;
    Ok(ValidatedWidget {
        kind: widget_kind,
        options,
    })
}

/// Check `[widget_defaults]` against the options common to all widgets.
pub fn validate_defaults(
    defaults: &toml::Table,
    ctx: &ValidationContext<'_>,
) -> Result<Options, LoadError> {
    options::validate_options("widget_defaults", &[COMMON], defaults, ctx)
}

/// Fill in defaults the widget does not set itself.
pub(crate) fn with_defaults(entry: &WidgetEntry, defaults: &toml::Table) -> toml::Table {
    let mut merged = entry.options.clone();
    let Some(kind) = WidgetKind::from_name(&entry.kind) else {
        return merged;
    };
    for (name, value) in defaults {
        if kind.accepts(name) && !merged.contains_key(name) {
            merged.insert(name.clone(), value.clone());
        }
    }
    merged
}
