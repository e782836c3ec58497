use serde::Deserialize;

use crate::config::options::{self, ColorValue, OptionType, OptionValue, ValidationContext};
use crate::config::widgets::{self, ValidatedWidget, WidgetEntry};
use crate::error::LoadError;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BarEntry {
    pub height: u32,
    pub background: Option<toml::Value>,
    #[serde(default)]
    pub widgets: Vec<WidgetEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenEntry {
    pub top: Option<BarEntry>,
    pub bottom: Option<BarEntry>,
}

/// A panel of widgets along one screen edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub height: u32,
    pub background: Option<ColorValue>,
    pub widgets: Vec<ValidatedWidget>,
}

/// A declared screen. The host maps these positionally onto outputs and
/// ignores any beyond the outputs it has.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub index: usize,
    pub top: Option<Bar>,
    pub bottom: Option<Bar>,
}

fn build_bar(
    entry: &BarEntry,
    defaults: &toml::Table,
    ctx: &ValidationContext<'_>,
) -> Result<Bar, LoadError> {
    let background = match &entry.background {
        None => None,
        Some(value) => {
            match options::validate_value("bar", "background", OptionType::Color, value, ctx)? {
                OptionValue::Color(c) => Some(c),
                _ => None,
            }
        }
    };
    let widgets = entry
        .widgets
        .iter()
        .map(|w| widgets::validate_widget(&w.kind, &widgets::with_defaults(w, defaults), ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Bar {
        height: entry.height,
        background,
        widgets,
    })
}

/// Validate every bar of every screen. `defaults` must already have passed
/// [`widgets::validate_defaults`].
pub fn build_screens(
    entries: &[ScreenEntry],
    defaults: &toml::Table,
    ctx: &ValidationContext<'_>,
) -> Result<Vec<Screen>, LoadError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<Screen, LoadError> {
            Ok(Screen {
                index,
                top: entry
                    .top
                    .as_ref()
                    .map(|b| build_bar(b, defaults, ctx))
                    .transpose()?,
                bottom: entry
                    .bottom
                    .as_ref()
                    .map(|b| build_bar(b, defaults, ctx))
                    .transpose()?,
            })
        })
        .collect()
}
