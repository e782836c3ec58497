use serde::Deserialize;

use crate::config::options::{self, OptionType, Options, Schema, ValidationContext};
use crate::error::LoadError;

use OptionType::{Bool, Color, Float, Int, Str};

const COMMON: Schema = &[
    ("name", Str),
    ("border_width", Int),
    ("border_focus", Color),
    ("border_normal", Color),
    ("margin", Int),
];

const COLUMNS: Schema = &[
    ("border_focus_stack", Color),
    ("border_normal_stack", Color),
    ("border_on_single", Bool),
    ("margin_on_single", Int),
    ("num_columns", Int),
    ("grow_amount", Int),
    ("fair", Bool),
    ("split", Bool),
    ("insert_position", Int),
    ("wrap_focus_columns", Bool),
    ("wrap_focus_rows", Bool),
    ("wrap_focus_stacks", Bool),
];

const MONAD: Schema = &[
    ("ratio", Float),
    ("min_ratio", Float),
    ("max_ratio", Float),
    ("change_ratio", Float),
    ("change_size", Int),
    ("single_border_width", Int),
    ("single_margin", Int),
    ("new_client_position", OptionType::Enum(&["after_current", "before_current", "top", "bottom"])),
];

const BSP: Schema = &[
    ("border_on_single", Bool),
    ("margin_on_single", Int),
    ("fair", Bool),
    ("grow_amount", Int),
    ("lower_right", Bool),
    ("ratio", Float),
    ("wrap_clients", Bool),
];

const MAX: Schema = &[("only_focused", Bool)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Columns,
    Max,
    MonadTall,
    MonadWide,
    Bsp,
}

impl LayoutKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "columns" => Self::Columns,
            "max" => Self::Max,
            "monad_tall" => Self::MonadTall,
            "monad_wide" => Self::MonadWide,
            "bsp" => Self::Bsp,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Columns => "columns",
            Self::Max => "max",
            Self::MonadTall => "monad_tall",
            Self::MonadWide => "monad_wide",
            Self::Bsp => "bsp",
        }
    }

    fn schema(self) -> Schema {
        match self {
            Self::Columns => COLUMNS,
            Self::Max => MAX,
            Self::MonadTall | Self::MonadWide => MONAD,
            Self::Bsp => BSP,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LayoutEntry {
    pub kind: String,
    #[serde(flatten)]
    pub options: toml::Table,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub kind: LayoutKind,
    pub options: Options,
}

/// Validate layouts in cycling order. No entries means columns then max.
pub fn build_layouts(
    entries: &[LayoutEntry],
    ctx: &ValidationContext<'_>,
) -> Result<Vec<Layout>, LoadError> {
    if entries.is_empty() {
        return Ok(vec![
            Layout {
                kind: LayoutKind::Columns,
                options: Options::new(),
            },
            Layout {
                kind: LayoutKind::Max,
                options: Options::new(),
            },
        ]);
    }
    entries
        .iter()
        .map(|entry| -> Result<Layout, LoadError> {
            let kind = LayoutKind::from_name(&entry.kind)
                .ok_or_else(|| LoadError::UnknownLayoutKind(entry.kind.clone()))?;
            let options =
                options::validate_options(&entry.kind, &[COMMON, kind.schema()], &entry.options, ctx)?;
            Ok(Layout { kind, options })
        })
        .collect()
}
