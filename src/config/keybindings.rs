use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Deserialize;

use crate::config::groups::Group;
use crate::error::{DuplicateBindingError, LoadError};

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// An X11 modifier key.
///
/// Declaration order is display order: `mod4+shift+h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Mod1,
    Mod2,
    Mod3,
    Mod4,
    Mod5,
    Control,
    Shift,
    Lock,
}

impl Modifier {
    /// Parse a modifier name from the config string.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "mod1" | "alt" => Self::Mod1,
            "mod2" => Self::Mod2,
            "mod3" => Self::Mod3,
            "mod4" | "super" => Self::Mod4,
            "mod5" => Self::Mod5,
            "control" | "ctrl" => Self::Control,
            "shift" => Self::Shift,
            "lock" => Self::Lock,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Mod1 => "mod1",
            Self::Mod2 => "mod2",
            Self::Mod3 => "mod3",
            Self::Mod4 => "mod4",
            Self::Mod5 => "mod5",
            Self::Control => "control",
            Self::Shift => "shift",
            Self::Lock => "lock",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The modifiers held for a binding. Never empty once parsed from config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ModifierSet(BTreeSet<Modifier>);

impl ModifierSet {
    pub fn new(mods: impl IntoIterator<Item = Modifier>) -> Self {
        Self(mods.into_iter().collect())
    }

    /// Parse config names. `"mod"` stands for the configured modifier key.
    pub fn parse<S: AsRef<str>>(names: &[S], mod_key: Modifier) -> Result<Self, LoadError> {
        let mut set = BTreeSet::new();
        for name in names {
            let name = name.as_ref();
            let m = if name == "mod" {
                mod_key
            } else {
                Modifier::from_name(name)
                    .ok_or_else(|| LoadError::UnknownModifier(name.to_owned()))?
            };
            set.insert(m);
        }
        Ok(Self(set))
    }

    pub fn contains(&self, m: Modifier) -> bool {
        self.0.contains(&m)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

/// A modifier set plus a key symbol; the identity of a binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub mods: ModifierSet,
    pub key: String,
}

impl KeyCombo {
    pub fn new(mods: ModifierSet, key: impl Into<String>) -> Self {
        Self {
            mods,
            key: key.into(),
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            f.write_str(&self.key)
        } else {
            write!(f, "{}+{}", self.mods, self.key)
        }
    }
}

// ---------------------------------------------------------------------------
// Host action namespace
// ---------------------------------------------------------------------------

/// A zero-argument command in the host's action namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    // Focus
    LayoutLeft,
    LayoutRight,
    LayoutDown,
    LayoutUp,
    LayoutNext,
    LayoutPrevious,
    // Move
    ShuffleLeft,
    ShuffleRight,
    ShuffleDown,
    ShuffleUp,
    // Resize
    GrowLeft,
    GrowRight,
    GrowDown,
    GrowUp,
    Normalize,
    ToggleSplit,
    // Layouts
    NextLayout,
    PrevLayout,
    // Window
    Kill,
    ToggleFullscreen,
    ToggleFloating,
    BringToFront,
    SetPositionFloating,
    SetSizeFloating,
    GetPosition,
    GetSize,
    // Session
    ReloadConfig,
    Shutdown,
    SpawnCmd,
}

impl HostCommand {
    /// Parse a namespace path such as `"layout.left"`.
    pub fn from_path(path: &str) -> Option<Self> {
        Some(match path {
            "layout.left" => Self::LayoutLeft,
            "layout.right" => Self::LayoutRight,
            "layout.down" => Self::LayoutDown,
            "layout.up" => Self::LayoutUp,
            "layout.next" => Self::LayoutNext,
            "layout.previous" => Self::LayoutPrevious,
            "layout.shuffle_left" => Self::ShuffleLeft,
            "layout.shuffle_right" => Self::ShuffleRight,
            "layout.shuffle_down" => Self::ShuffleDown,
            "layout.shuffle_up" => Self::ShuffleUp,
            "layout.grow_left" => Self::GrowLeft,
            "layout.grow_right" => Self::GrowRight,
            "layout.grow_down" => Self::GrowDown,
            "layout.grow_up" => Self::GrowUp,
            "layout.normalize" => Self::Normalize,
            "layout.toggle_split" => Self::ToggleSplit,
            "next_layout" => Self::NextLayout,
            "prev_layout" => Self::PrevLayout,
            "window.kill" => Self::Kill,
            "window.toggle_fullscreen" => Self::ToggleFullscreen,
            "window.toggle_floating" => Self::ToggleFloating,
            "window.bring_to_front" => Self::BringToFront,
            "window.set_position_floating" => Self::SetPositionFloating,
            "window.set_size_floating" => Self::SetSizeFloating,
            "window.get_position" => Self::GetPosition,
            "window.get_size" => Self::GetSize,
            "reload_config" => Self::ReloadConfig,
            "shutdown" => Self::Shutdown,
            "spawncmd" => Self::SpawnCmd,
            _ => return None,
        })
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::LayoutLeft => "layout.left",
            Self::LayoutRight => "layout.right",
            Self::LayoutDown => "layout.down",
            Self::LayoutUp => "layout.up",
            Self::LayoutNext => "layout.next",
            Self::LayoutPrevious => "layout.previous",
            Self::ShuffleLeft => "layout.shuffle_left",
            Self::ShuffleRight => "layout.shuffle_right",
            Self::ShuffleDown => "layout.shuffle_down",
            Self::ShuffleUp => "layout.shuffle_up",
            Self::GrowLeft => "layout.grow_left",
            Self::GrowRight => "layout.grow_right",
            Self::GrowDown => "layout.grow_down",
            Self::GrowUp => "layout.grow_up",
            Self::Normalize => "layout.normalize",
            Self::ToggleSplit => "layout.toggle_split",
            Self::NextLayout => "next_layout",
            Self::PrevLayout => "prev_layout",
            Self::Kill => "window.kill",
            Self::ToggleFullscreen => "window.toggle_fullscreen",
            Self::ToggleFloating => "window.toggle_floating",
            Self::BringToFront => "window.bring_to_front",
            Self::SetPositionFloating => "window.set_position_floating",
            Self::SetSizeFloating => "window.set_size_floating",
            Self::GetPosition => "window.get_position",
            Self::GetSize => "window.get_size",
            Self::ReloadConfig => "reload_config",
            Self::Shutdown => "shutdown",
            Self::SpawnCmd => "spawncmd",
        }
    }

    /// Human-readable description, used when a binding has none.
    pub fn description(self) -> &'static str {
        match self {
            Self::LayoutLeft => "Move focus to left",
            Self::LayoutRight => "Move focus to right",
            Self::LayoutDown => "Move focus down",
            Self::LayoutUp => "Move focus up",
            Self::LayoutNext => "Move window focus to other window",
            Self::LayoutPrevious => "Move window focus to previous window",
            Self::ShuffleLeft => "Move window to the left",
            Self::ShuffleRight => "Move window to the right",
            Self::ShuffleDown => "Move window down",
            Self::ShuffleUp => "Move window up",
            Self::GrowLeft => "Grow window to the left",
            Self::GrowRight => "Grow window to the right",
            Self::GrowDown => "Grow window down",
            Self::GrowUp => "Grow window up",
            Self::Normalize => "Reset all window sizes",
            Self::ToggleSplit => "Toggle between split and unsplit sides of stack",
            Self::NextLayout => "Toggle between layouts",
            Self::PrevLayout => "Previous layout",
            Self::Kill => "Kill focused window",
            Self::ToggleFullscreen => "Toggle fullscreen on the focused window",
            Self::ToggleFloating => "Toggle floating on the focused window",
            Self::BringToFront => "Bring window to front",
            Self::SetPositionFloating => "Move floating window",
            Self::SetSizeFloating => "Resize floating window",
            Self::GetPosition => "Current window position",
            Self::GetSize => "Current window size",
            Self::ReloadConfig => "Reload the config",
            Self::Shutdown => "Shutdown the window manager",
            Self::SpawnCmd => "Spawn a command using a prompt widget",
        }
    }
}

/// What a key binding asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Command(HostCommand),
    Spawn(String),
    GroupToScreen(String),
    WindowToGroup { group: String, switch_group: bool },
}

impl Action {
    /// Build an action from its namespace path and arguments. An argument the
    /// action does not take is an error.
    pub fn from_parts(
        path: &str,
        command: Option<&str>,
        group: Option<&str>,
        switch_group: bool,
    ) -> Result<Self, LoadError> {
        let missing = |argument: &str| LoadError::MissingArgument {
            action: path.to_owned(),
            argument: argument.to_owned(),
        };
        let action = match path {
            "spawn" => Self::Spawn(command.ok_or_else(|| missing("command"))?.to_owned()),
            "group.toscreen" => {
                Self::GroupToScreen(group.ok_or_else(|| missing("group"))?.to_owned())
            }
            "window.togroup" => Self::WindowToGroup {
                group: group.ok_or_else(|| missing("group"))?.to_owned(),
                switch_group,
            },
            _ => HostCommand::from_path(path)
                .map(Self::Command)
                .ok_or_else(|| LoadError::UnknownAction(path.to_owned()))?,
        };

        let given = [
            ("command", command.is_some(), matches!(action, Self::Spawn(_))),
            ("group", group.is_some(), action.group().is_some()),
            (
                "switch_group",
                switch_group,
                matches!(action, Self::WindowToGroup { .. }),
            ),
        ];
        if let Some(&(argument, ..)) = given.iter().find(|(_, set, takes)| *set && !takes) {
            return Err(LoadError::UnexpectedArgument {
                action: path.to_owned(),
                argument: argument.to_owned(),
            });
        }
        Ok(action)
    }

    /// Namespace path with arguments, e.g. `group["3"].toscreen`.
    pub fn path(&self) -> String {
        match self {
            Self::Command(c) => c.path().to_owned(),
            Self::Spawn(cmd) => format!("spawn({cmd:?})"),
            Self::GroupToScreen(g) => format!("group[{g:?}].toscreen"),
            Self::WindowToGroup {
                group,
                switch_group,
            } => format!("window.togroup({group:?}, switch_group={switch_group})"),
        }
    }

    /// The group this action refers to, if any.
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::GroupToScreen(g) | Self::WindowToGroup { group: g, .. } => Some(g),
            _ => None,
        }
    }

    fn default_description(&self) -> String {
        match self {
            Self::Command(c) => c.description().to_owned(),
            Self::Spawn(cmd) => format!("Spawn {cmd}"),
            Self::GroupToScreen(g) => format!("Switch to group {g}"),
            Self::WindowToGroup { group, .. } => {
                format!("Switch to & move focused window to group {group}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// A key binding as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyEntry {
    #[serde(default)]
    pub mods: Vec<String>,
    pub key: String,
    pub action: String,
    pub command: Option<String>,
    pub group: Option<String>,
    #[serde(default)]
    pub switch_group: bool,
    pub desc: Option<String>,
}

/// Where a binding came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingOrigin {
    Declared(usize),
    SwitchToGroup(String),
    MoveToGroup(String),
}

impl fmt::Display for BindingOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared(i) => write!(f, "keys[{i}]"),
            Self::SwitchToGroup(g) => write!(f, "group {g:?} switch binding"),
            Self::MoveToGroup(g) => write!(f, "group {g:?} move binding"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub combo: KeyCombo,
    pub action: Action,
    pub desc: String,
    pub origin: BindingOrigin,
}

impl KeyBinding {
    /// A base binding. [`build_bindings`] sets its position in `origin`.
    pub fn new(combo: KeyCombo, action: Action, desc: Option<String>) -> Self {
        let desc = desc.unwrap_or_else(|| action.default_description());
        Self {
            combo,
            action,
            desc,
            origin: BindingOrigin::Declared(0),
        }
    }

    fn label(&self) -> String {
        format!("{} ({:?} -> {})", self.origin, self.desc, self.action.path())
    }
}

/// Values substituted into spawn commands.
#[derive(Debug, Clone, Default)]
pub struct TemplateVars {
    pub terminal: String,
}

/// Expand `{{.Var}}` template variables in a command string.
pub fn expand_template(template: &str, vars: &TemplateVars) -> String {
    template.replace("{{.Terminal}}", &vars.terminal)
}

/// Turn config entries into bindings, in declaration order.
///
/// Rejects unknown modifiers and actions, empty modifier sets, blank keys and
/// references to groups that are not declared.
pub fn resolve_entries(
    entries: &[KeyEntry],
    mod_key: Modifier,
    groups: &[Group],
    vars: &TemplateVars,
) -> Result<Vec<KeyBinding>, LoadError> {
    let mut bindings = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        if entry.key.is_empty() {
            return Err(LoadError::InvalidBinding {
                key: entry.key.clone(),
                reason: format!("keys[{i}] has an empty key symbol"),
            });
        }
        let mods = ModifierSet::parse(&entry.mods, mod_key)?;
        if mods.is_empty() {
            return Err(LoadError::InvalidBinding {
                key: entry.key.clone(),
                reason: format!("keys[{i}] has no modifiers"),
            });
        }
        let command = entry.command.as_deref().map(|c| expand_template(c, vars));
        let action = Action::from_parts(
            &entry.action,
            command.as_deref(),
            entry.group.as_deref(),
            entry.switch_group,
        )?;
        if let Some(g) = action.group()
            && !groups.iter().any(|group| group.name == g)
        {
            return Err(LoadError::UnknownGroup(g.to_owned()));
        }
        bindings.push(KeyBinding::new(
            KeyCombo::new(mods, entry.key.clone()),
            action,
            entry.desc.clone(),
        ));
    }
    Ok(bindings)
}

// ---------------------------------------------------------------------------
// Binding table
// ---------------------------------------------------------------------------

/// Result of looking up a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Bound(&'a Action),
    /// The host passes the key through to the focused window.
    NotBound,
}

impl<'a> Lookup<'a> {
    pub fn action(self) -> Option<&'a Action> {
        match self {
            Self::Bound(a) => Some(a),
            Self::NotBound => None,
        }
    }
}

/// Every key binding of a config, with an exact-match index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingTable {
    bindings: Vec<KeyBinding>,
    index: HashMap<KeyCombo, usize>,
}

impl BindingTable {
    pub fn resolve(&self, mods: &ModifierSet, key: &str) -> Lookup<'_> {
        let combo = KeyCombo::new(mods.clone(), key);
        match self.index.get(&combo) {
            Some(&i) => Lookup::Bound(&self.bindings[i].action),
            None => Lookup::NotBound,
        }
    }

    /// Bindings in declaration order, then per-group bindings in group order.
    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn push(&mut self, binding: KeyBinding) -> Result<(), DuplicateBindingError> {
        if let Some(&existing) = self.index.get(&binding.combo) {
            return Err(DuplicateBindingError {
                combo: binding.combo.to_string(),
                first: self.bindings[existing].label(),
                second: binding.label(),
            });
        }
        self.index.insert(binding.combo.clone(), self.bindings.len());
        self.bindings.push(binding);
        Ok(())
    }
}

/// Build the binding table from base bindings plus two synthesised bindings
/// per group: `[mod] + <group>` switches to it and `[mod, shift] + <group>`
/// sends the focused window there. Base bindings are labelled `keys[i]` by
/// position in collision errors.
pub fn build_bindings(
    base: Vec<KeyBinding>,
    groups: &[Group],
    mod_key: Modifier,
) -> Result<BindingTable, DuplicateBindingError> {
    let mut table = BindingTable {
        bindings: Vec::with_capacity(base.len() + 2 * groups.len()),
        index: HashMap::with_capacity(base.len() + 2 * groups.len()),
    };
    for (i, mut binding) in base.into_iter().enumerate() {
        binding.origin = BindingOrigin::Declared(i);
        table.push(binding)?;
    }
    for group in groups {
        let name = &group.name;
        table.push(KeyBinding {
            combo: KeyCombo::new(ModifierSet::new([mod_key]), name.clone()),
            action: Action::GroupToScreen(name.clone()),
            desc: format!("Switch to group {name}"),
            origin: BindingOrigin::SwitchToGroup(name.clone()),
        })?;
        table.push(KeyBinding {
            combo: KeyCombo::new(ModifierSet::new([mod_key, Modifier::Shift]), name.clone()),
            action: Action::WindowToGroup {
                group: name.clone(),
                switch_group: false,
            },
            desc: format!("Switch to & move focused window to group {name}"),
            origin: BindingOrigin::MoveToGroup(name.clone()),
        })?;
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
