use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::builtin_themes;
use crate::error::{IndexOutOfRange, LoadError, UnknownThemeError};

/// Number of colour slots every theme must provide.
pub const THEME_SLOTS: usize = 9;

/// A display colour and the colour used where the host cannot blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPair {
    pub primary: Color,
    pub fallback: Color,
}

/// Shape of a theme as written in TOML: `colors = [["#282c34", "#282c34"], ...]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeSpec {
    #[serde(default)]
    pub colors: Vec<[String; 2]>,
}

/// A named palette of exactly [`THEME_SLOTS`] colour pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    name: String,
    slots: Vec<ColorPair>,
}

impl Theme {
    /// Build a theme, rejecting palettes with the wrong number of slots.
    pub fn new(name: impl Into<String>, slots: Vec<ColorPair>) -> Result<Self, LoadError> {
        let name = name.into();
        if slots.len() != THEME_SLOTS {
            return Err(LoadError::InvalidTheme {
                name,
                found: slots.len(),
                expected: THEME_SLOTS,
            });
        }
        Ok(Self { name, slots })
    }

    /// Parse the hex strings of a [`ThemeSpec`].
    pub fn from_spec(name: &str, spec: &ThemeSpec) -> Result<Self, LoadError> {
        let mut slots = Vec::with_capacity(spec.colors.len());
        for (i, [primary, fallback]) in spec.colors.iter().enumerate() {
            let field = format!("themes.{name}.colors[{i}]");
            slots.push(ColorPair {
                primary: Color::parse(primary, &field)?,
                fallback: Color::parse(fallback, &field)?,
            });
        }
        Self::new(name, slots)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> &[ColorPair] {
        &self.slots
    }

    /// Look up a slot by index.
    ///
    /// Signed so that a negative index from a config file reports as out of
    /// range instead of failing to convert.
    pub fn color_at(&self, index: i64) -> Result<ColorPair, IndexOutOfRange> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.slots.get(i).copied())
            .ok_or_else(|| IndexOutOfRange {
                theme: self.name.clone(),
                index,
                len: self.slots.len(),
            })
    }
}

/// All themes known to a configuration, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeTable {
    themes: IndexMap<String, Theme>,
}

impl ThemeTable {
    /// A table holding every built-in theme.
    pub fn with_builtins() -> Result<Self, LoadError> {
        let mut table = Self::default();
        for &name in builtin_themes::list() {
            let Some(src) = builtin_themes::get(name) else {
                continue;
            };
            let spec: ThemeSpec = toml::from_str(src).map_err(|source| LoadError::Parse {
                origin: format!("builtin theme {name:?}"),
                source,
            })?;
            table.insert(Theme::from_spec(name, &spec)?);
        }
        Ok(table)
    }

    /// Add a theme, replacing any theme with the same name.
    pub fn insert(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    pub fn select(&self, name: &str) -> Result<&Theme, UnknownThemeError> {
        self.themes.get(name).ok_or_else(|| UnknownThemeError {
            name: name.to_owned(),
            available: self.names().map(str::to_owned).collect(),
        })
    }

    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(n: usize) -> ThemeSpec {
        ThemeSpec {
            colors: (0..n)
                .map(|_| ["#000000".to_owned(), "#ffffff".to_owned()])
                .collect(),
        }
    }

    #[test]
    fn wrong_slot_count_rejected() {
        let err = Theme::from_spec("short", &spec(8)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidTheme {
                found: 8,
                expected: 9,
                ..
            }
        ));
    }

    #[test]
    fn negative_index_is_out_of_range() {
        let theme = Theme::from_spec("t", &spec(9)).unwrap();
        let err = theme.color_at(-1).unwrap_err();
        assert_eq!(err.index, -1);
        assert_eq!(err.len, 9);
    }

    #[test]
    fn insert_replaces_same_name() {
        let mut table = ThemeTable::default();
        table.insert(Theme::from_spec("t", &spec(9)).unwrap());
        let mut other = spec(9);
        other.colors[0] = ["#111111".to_owned(), "#111111".to_owned()];
        table.insert(Theme::from_spec("t", &other).unwrap());
        assert_eq!(table.len(), 1);
        let first = table.select("t").unwrap().color_at(0).unwrap();
        assert_eq!(first.primary, Color::rgb(0x11, 0x11, 0x11));
    }
}
