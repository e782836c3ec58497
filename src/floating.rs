use serde::Deserialize;

/// A predicate that exempts matching windows from tiling.
///
/// Written in TOML as `{ wm_class = "confirmreset" }` or
/// `{ title = "pinentry" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatRule {
    WmClass(String),
    Title(String),
}

impl FloatRule {
    pub fn matches(&self, class: &str, title: &str) -> bool {
        match self {
            Self::WmClass(c) => c == class,
            Self::Title(t) => t == title,
        }
    }
}

/// Window classes the host floats unless told otherwise.
const DEFAULT_CLASSES: &[&str] = &[
    "confirm",
    "dialog",
    "download",
    "error",
    "file_progress",
    "notification",
    "splash",
    "toolbar",
];

/// Ordered floating rules; the first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FloatRules {
    rules: Vec<FloatRule>,
}

impl FloatRules {
    pub fn new(rules: Vec<FloatRule>) -> Self {
        Self { rules }
    }

    /// `user` rules, prefixed by the host defaults when `with_defaults`.
    pub fn build(user: &[FloatRule], with_defaults: bool) -> Self {
        let defaults = DEFAULT_CLASSES
            .iter()
            .filter(|_| with_defaults)
            .map(|c| FloatRule::WmClass((*c).to_owned()));
        Self {
            rules: defaults.chain(user.iter().cloned()).collect(),
        }
    }

    pub fn is_floating(&self, class: &str, title: &str) -> bool {
        self.first_match(class, title).is_some()
    }

    /// The rule that makes a window float, if any.
    pub fn first_match(&self, class: &str, title: &str) -> Option<&FloatRule> {
        self.rules.iter().find(|r| r.matches(class, title))
    }

    pub fn rules(&self) -> &[FloatRule] {
        &self.rules
    }
}
