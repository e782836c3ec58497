use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::bar::{Screen, ScreenEntry};
use crate::config::builtin_themes;
use crate::config::groups::{Group, GroupsSpec};
use crate::config::keybindings::{BindingTable, KeyEntry, Modifier};
use crate::config::layouts::{Layout, LayoutEntry};
use crate::config::mouse::{MouseBinding, MouseEntry};
use crate::config::options::Options;
use crate::floating::{FloatRule, FloatRules};
use crate::hooks::Hooks;
use crate::theme::{Theme, ThemeSpec};

// ---------------------------------------------------------------------------
// File shape
// ---------------------------------------------------------------------------

/// The config file as parsed from TOML, before validation.
///
/// Unknown keys are rejected: a misspelt option should stop the load, not
/// vanish.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub modifier: String,
    pub terminal: String,
    pub theme: String,
    pub themes: IndexMap<String, ThemeSpec>,
    pub groups: GroupsSpec,
    pub keys: Vec<KeyEntry>,
    pub mouse: Vec<MouseEntry>,
    pub layouts: Vec<LayoutEntry>,
    pub widget_defaults: toml::Table,
    pub screens: Vec<ScreenEntry>,
    pub default_float_rules: bool,
    pub float_rules: Vec<FloatRule>,
    /// Executable run once when the session starts.
    pub autostart: Option<String>,
    pub settings: Settings,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            modifier: "mod4".to_owned(),
            terminal: "xterm".to_owned(),
            theme: builtin_themes::DEFAULT.to_owned(),
            themes: IndexMap::new(),
            groups: GroupsSpec::default(),
            keys: Vec::new(),
            mouse: Vec::new(),
            layouts: Vec::new(),
            widget_defaults: toml::Table::new(),
            screens: Vec::new(),
            default_float_rules: true,
            float_rules: Vec::new(),
            autostart: None,
            settings: Settings::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FocusOnActivation {
    #[default]
    Smart,
    Focus,
    Urgent,
    Never,
}

/// Scalar toggles passed straight to the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub follow_mouse_focus: bool,
    pub bring_front_click: bool,
    pub floats_kept_above: bool,
    pub cursor_warp: bool,
    pub auto_fullscreen: bool,
    pub focus_on_window_activation: FocusOnActivation,
    pub reconfigure_screens: bool,
    pub auto_minimize: bool,
    pub wmname: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            follow_mouse_focus: true,
            bring_front_click: false,
            floats_kept_above: true,
            cursor_warp: false,
            auto_fullscreen: true,
            focus_on_window_activation: FocusOnActivation::Smart,
            reconfigure_screens: true,
            auto_minimize: true,
            wmname: "LG3D".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validated config
// ---------------------------------------------------------------------------

/// A fully validated configuration snapshot. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub modifier: Modifier,
    pub terminal: String,
    pub theme: Theme,
    pub groups: Vec<Group>,
    pub keys: BindingTable,
    pub mouse: Vec<MouseBinding>,
    pub layouts: Vec<Layout>,
    pub widget_defaults: Options,
    pub screens: Vec<Screen>,
    pub float_rules: FloatRules,
    pub settings: Settings,
    pub hooks: Hooks,
}

impl Config {
    pub fn is_floating(&self, class: &str, title: &str) -> bool {
        self.float_rules.is_floating(class, title)
    }
}
