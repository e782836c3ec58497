/// Look up a built-in theme by name, returning its TOML source.
///
/// Theme names correspond to files in `themes/`.
/// Pass a bare name (e.g. `"dracula"`), not the full filename.
pub fn get(name: &str) -> Option<&'static str> {
    match name {
        "doom-one" => Some(include_str!("../../themes/doom-one.toml")),
        "dracula" => Some(include_str!("../../themes/dracula.toml")),
        "gruvbox-dark" => Some(include_str!("../../themes/gruvbox-dark.toml")),
        "monokai-pro" => Some(include_str!("../../themes/monokai-pro.toml")),
        "nord" => Some(include_str!("../../themes/nord.toml")),
        "oceanic-next" => Some(include_str!("../../themes/oceanic-next.toml")),
        "palenight" => Some(include_str!("../../themes/palenight.toml")),
        "solarized-dark" => Some(include_str!("../../themes/solarized-dark.toml")),
        "solarized-light" => Some(include_str!("../../themes/solarized-light.toml")),
        "tomorrow-night" => Some(include_str!("../../themes/tomorrow-night.toml")),
        _ => None,
    }
}

/// List all built-in theme names in alphabetical order.
pub fn list() -> &'static [&'static str] {
    &[
        "doom-one",
        "dracula",
        "gruvbox-dark",
        "monokai-pro",
        "nord",
        "oceanic-next",
        "palenight",
        "solarized-dark",
        "solarized-light",
        "tomorrow-night",
    ]
}

/// Theme used when a config does not name one.
pub const DEFAULT: &str = "doom-one";
