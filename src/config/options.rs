use indexmap::IndexMap;

use crate::color::Color;
use crate::config::keybindings::{TemplateVars, expand_template};
use crate::config::mouse::MouseButton;
use crate::error::{LoadError, TypeMismatchError, UnknownOptionError};
use crate::hooks::Callback;
use crate::theme::{ColorPair, Theme};

/// Expected type of a widget or layout option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Str,
    Int,
    /// Accepts integers too.
    Float,
    Bool,
    /// A theme slot index or a `#rrggbb` literal.
    Color,
    Enum(&'static [&'static str]),
    /// `{ shell = "..." }` or `{ spawn = "..." }`.
    Callback,
    /// A table of mouse button name to callback.
    MouseCallbacks,
}

impl OptionType {
    fn expected(self) -> String {
        match self {
            Self::Str => "string".to_owned(),
            Self::Int => "integer".to_owned(),
            Self::Float => "number".to_owned(),
            Self::Bool => "boolean".to_owned(),
            Self::Color => "color slot index or hex string".to_owned(),
            Self::Enum(values) => format!("one of {}", values.join(", ")),
            Self::Callback => "callback table with `shell` or `spawn`".to_owned(),
            Self::MouseCallbacks => "table of mouse button to callback".to_owned(),
        }
    }
}

/// Accepted options of one kind: name and expected type.
pub type Schema = &'static [(&'static str, OptionType)];

/// A resolved colour option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorValue {
    Slot { index: usize, pair: ColorPair },
    Literal(Color),
}

impl ColorValue {
    pub fn primary(self) -> Color {
        match self {
            Self::Slot { pair, .. } => pair.primary,
            Self::Literal(c) => c,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Color(ColorValue),
    Enum(String),
    Callback(Callback),
    MouseCallbacks(IndexMap<MouseButton, Callback>),
}

/// Validated options in declaration order.
pub type Options = IndexMap<String, OptionValue>;

/// What option values are resolved against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub theme: &'a Theme,
    pub vars: &'a TemplateVars,
}

impl<'a> ValidationContext<'a> {
    pub fn new(theme: &'a Theme, vars: &'a TemplateVars) -> Self {
        Self { theme, vars }
    }
}

pub(crate) fn lookup(schemas: &[Schema], name: &str) -> Option<OptionType> {
    schemas
        .iter()
        .flat_map(|s| s.iter())
        .find(|(n, _)| *n == name)
        .map(|&(_, ty)| ty)
}

/// Validate every entry of `raw` against the union of `schemas`.
pub(crate) fn validate_options(
    kind: &str,
    schemas: &[Schema],
    raw: &toml::Table,
    ctx: &ValidationContext<'_>,
) -> Result<Options, LoadError> {
    let mut options = Options::with_capacity(raw.len());
    for (name, value) in raw {
        let ty = lookup(schemas, name).ok_or_else(|| UnknownOptionError {
            kind: kind.to_owned(),
            option: name.clone(),
        })?;
        options.insert(name.clone(), validate_value(kind, name, ty, value, ctx)?);
    }
    Ok(options)
}

/// Check one value against its expected type, resolving colours and
/// callbacks.
pub(crate) fn validate_value(
    kind: &str,
    name: &str,
    ty: OptionType,
    value: &toml::Value,
    ctx: &ValidationContext<'_>,
) -> Result<OptionValue, LoadError> {
    use toml::Value;

    let mismatch = || -> LoadError {
        TypeMismatchError {
            kind: kind.to_owned(),
            option: name.to_owned(),
            expected: ty.expected(),
            found: describe(value),
        }
        .into()
    };

    Ok(match (ty, value) {
        (OptionType::Str, Value::String(s)) => OptionValue::Str(s.clone()),
        (OptionType::Int, Value::Integer(n)) => OptionValue::Int(*n),
        (OptionType::Float, Value::Float(f)) => OptionValue::Float(*f),
        #[allow(clippy::cast_precision_loss)]
        (OptionType::Float, Value::Integer(n)) => OptionValue::Float(*n as f64),
        (OptionType::Bool, Value::Boolean(b)) => OptionValue::Bool(*b),
        (OptionType::Color, Value::Integer(n)) => {
            let pair = ctx.theme.color_at(*n)?;
            // color_at succeeded, so the index is a valid usize.
            let index = usize::try_from(*n).unwrap_or_default();
            OptionValue::Color(ColorValue::Slot { index, pair })
        }
        (OptionType::Color, Value::String(s)) => {
            let color = Color::parse(s, name).map_err(|_| mismatch())?;
            OptionValue::Color(ColorValue::Literal(color))
        }
        (OptionType::Enum(allowed), Value::String(s)) if allowed.contains(&s.as_str()) => {
            OptionValue::Enum(s.clone())
        }
        (OptionType::Callback, Value::Table(t)) => {
            OptionValue::Callback(parse_callback(t, ctx.vars).ok_or_else(mismatch)?)
        }
        (OptionType::MouseCallbacks, Value::Table(t)) => {
            let mut callbacks = IndexMap::with_capacity(t.len());
            for (button, cb) in t {
                let button = MouseButton::from_name(button).ok_or_else(mismatch)?;
                let cb = match cb {
                    Value::Table(cb) => parse_callback(cb, ctx.vars),
                    _ => None,
                }
                .ok_or_else(mismatch)?;
                callbacks.insert(button, cb);
            }
            OptionValue::MouseCallbacks(callbacks)
        }
        _ => return Err(mismatch()),
    })
}

/// A callback table has exactly one key, `shell` or `spawn`, with a string.
fn parse_callback(table: &toml::Table, vars: &TemplateVars) -> Option<Callback> {
    if table.len() != 1 {
        return None;
    }
    let (key, value) = table.iter().next()?;
    let command = value.as_str()?;
    match key.as_str() {
        "shell" => Some(Callback::shell(expand_template(command, vars))),
        "spawn" => Some(Callback::spawn(expand_template(command, vars))),
        _ => None,
    }
}

fn describe(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => format!("string {s:?}"),
        toml::Value::Integer(n) => format!("integer {n}"),
        toml::Value::Boolean(b) => format!("boolean {b}"),
        other => other.type_str().to_owned(),
    }
}
