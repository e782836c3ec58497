use std::path::{Path, PathBuf};

use crate::config::bar;
use crate::config::groups;
use crate::config::keybindings::{self, Modifier, TemplateVars};
use crate::config::layouts;
use crate::config::mouse;
use crate::config::options::ValidationContext;
use crate::config::types::{Config, ConfigFile};
use crate::config::widgets;
use crate::error::LoadError;
use crate::floating::FloatRules;
use crate::hooks::{Callback, Hooks};
use crate::theme::{Theme, ThemeTable};

/// The configuration used when no config file is found.
pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Parse and validate a configuration.
///
/// All-or-nothing: any failure aborts the load and nothing partial is
/// returned.
pub fn load(source: &str) -> Result<Config, LoadError> {
    load_named(source, "<inline>")
}

/// Like [`load`], with `origin` naming the source in parse errors.
pub fn load_named(source: &str, origin: &str) -> Result<Config, LoadError> {
    let file: ConfigFile = toml::from_str(source).map_err(|source| LoadError::Parse {
        origin: origin.to_owned(),
        source,
    })?;
    let config = build(&file)?;
    tracing::debug!(
        origin,
        theme = config.theme.name(),
        keys = config.keys.len(),
        screens = config.screens.len(),
        "config loaded"
    );
    Ok(config)
}

/// Read and load a config file.
pub fn load_file(path: &Path) -> Result<Config, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    load_named(&contents, &path.display().to_string())
}

/// The smallest valid configuration: defaults only, no keys, no bars.
///
/// A host can fall back to this when the user's config fails at startup.
pub fn minimal() -> Result<Config, LoadError> {
    load_named("", "<minimal>")
}

/// Validate a parsed file into a [`Config`].
pub fn build(file: &ConfigFile) -> Result<Config, LoadError> {
    let modifier = Modifier::from_name(&file.modifier)
        .ok_or_else(|| LoadError::UnknownModifier(file.modifier.clone()))?;

    let theme = select_theme(file)?;

    let groups = groups::build_groups(&file.groups.names())?;
    let vars = TemplateVars {
        terminal: file.terminal.clone(),
    };

    let base = keybindings::resolve_entries(&file.keys, modifier, &groups, &vars)?;
    let keys = keybindings::build_bindings(base, &groups, modifier)?;
    let mouse = mouse::build_mouse(&file.mouse, modifier)?;

    let ctx = ValidationContext::new(&theme, &vars);
    let layouts = layouts::build_layouts(&file.layouts, &ctx)?;
    let widget_defaults = widgets::validate_defaults(&file.widget_defaults, &ctx)?;
    let screens = bar::build_screens(&file.screens, &file.widget_defaults, &ctx)?;

    let float_rules = FloatRules::build(&file.float_rules, file.default_float_rules);

    let hooks = Hooks {
        startup_once: file
            .autostart
            .as_deref()
            .map(|path| Callback::program(expand_tilde(path))),
    };

    Ok(Config {
        modifier,
        terminal: file.terminal.clone(),
        theme,
        groups,
        keys,
        mouse,
        layouts,
        widget_defaults,
        screens,
        float_rules,
        settings: file.settings.clone(),
        hooks,
    })
}

/// Built-in themes plus the file's own, then the one the file names.
fn select_theme(file: &ConfigFile) -> Result<Theme, LoadError> {
    let mut table = ThemeTable::with_builtins()?;
    for (name, spec) in &file.themes {
        table.insert(Theme::from_spec(name, spec)?);
    }
    Ok(table.select(&file.theme)?.clone())
}

/// Find the user's config file.
///
/// Priority:
/// 1. `$TILERC_CONFIG` environment variable
/// 2. `$XDG_CONFIG_HOME/tilerc/config.toml`
/// 3. `~/.config/tilerc/config.toml`
pub fn find_config() -> Option<PathBuf> {
    let env = |name: &str| std::env::var_os(name).map(PathBuf::from);
    [
        env("TILERC_CONFIG"),
        env("XDG_CONFIG_HOME").map(|xdg| xdg.join("tilerc/config.toml")),
        env("HOME").map(|home| home.join(".config/tilerc/config.toml")),
    ]
    .into_iter()
    .flatten()
    .find(|candidate| candidate.is_file())
}

/// Resolve a leading `~/` against `$HOME`; anything else is taken as is.
pub(crate) fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_modifier_key_rejected() {
        let err = load(r#"modifier = "hyper""#).unwrap_err();
        assert!(matches!(err, LoadError::UnknownModifier(ref m) if m == "hyper"));
    }

    #[test]
    fn user_theme_can_shadow_builtin() {
        let colors = r##"["#010101", "#010101"]"##;
        let slots = std::iter::repeat_n(colors, 9).collect::<Vec<_>>().join(", ");
        let src = format!("theme = \"nord\"\n[themes.nord]\ncolors = [{slots}]\n");
        let config = load(&src).unwrap();
        assert_eq!(config.theme.color_at(0).unwrap().primary.to_string(), "#010101");
    }

    #[test]
    fn autostart_registers_startup_hook() {
        let config = load(r#"autostart = "/usr/local/bin/autostart.sh""#).unwrap();
        let hook = config.hooks.startup_once.unwrap();
        assert_eq!(hook.descriptor(), "exec: /usr/local/bin/autostart.sh");
    }

    #[test]
    fn minimal_config_has_group_bindings_only() {
        let config = minimal().unwrap();
        assert_eq!(config.groups.len(), 9);
        assert_eq!(config.keys.len(), 18);
        assert!(config.screens.is_empty());
    }

    #[test]
    fn tilde_expands_against_home() {
        let Some(home) = std::env::var_os("HOME").map(PathBuf::from) else {
            return;
        };
        assert_eq!(expand_tilde("~/x.sh"), home.join("x.sh"));
        assert_eq!(expand_tilde("/abs/x.sh"), PathBuf::from("/abs/x.sh"));
    }
}
