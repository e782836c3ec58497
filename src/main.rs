use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use tilerc::config::Config;
use tilerc::config::builtin_themes;
use tilerc::session::{ConfigSource, ConfigStore};
use tilerc::theme::{ColorPair, ThemeTable};

#[derive(Parser)]
#[command(
    name = "tilerc",
    version,
    about = "Validate and inspect tiling window manager configurations"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to stderr.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the configuration (the default).
    Check,
    /// List available built-in themes.
    Themes {
        /// Emit every theme's colour slots as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective key bindings.
    Keys {
        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Report whether a window would float.
    Float {
        /// X11 WM_CLASS of the window.
        #[arg(long, default_value = "")]
        class: String,
        /// Window title.
        #[arg(long, default_value = "")]
        title: String,
    },
}

#[derive(Serialize)]
struct ThemeRow<'a> {
    name: &'a str,
    colors: &'a [ColorPair],
}

#[derive(Serialize)]
struct KeyRow<'a> {
    combo: String,
    action: String,
    desc: &'a str,
}

fn key_rows(config: &Config) -> Vec<KeyRow<'_>> {
    config
        .keys
        .bindings()
        .iter()
        .map(|b| KeyRow {
            combo: b.combo.to_string(),
            action: b.action.path(),
            desc: &b.desc,
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    // Themes don't need a config.
    if let Some(Commands::Themes { json }) = cli.command {
        if json {
            let table = ThemeTable::with_builtins()?;
            let rows = table
                .themes()
                .map(|t| ThemeRow {
                    name: t.name(),
                    colors: t.slots(),
                })
                .collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for name in builtin_themes::list() {
                println!("{name}");
            }
        }
        return Ok(());
    }

    let source = ConfigSource::discover(cli.config.as_deref());
    let store = ConfigStore::open(source.clone())
        .with_context(|| format!("failed to load config from {}", source.describe()))?;
    let config = store.current();

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Check | Commands::Themes { .. } => {
            println!(
                "{}: ok ({} groups, {} keys, {} screens, theme {})",
                source.describe(),
                config.groups.len(),
                config.keys.len(),
                config.screens.len(),
                config.theme.name(),
            );
        }
        Commands::Keys { json } => {
            let rows = key_rows(&config);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                let width = rows.iter().map(|r| r.combo.len()).max().unwrap_or(0);
                for row in &rows {
                    println!("{:<width$}  {}", row.combo, row.desc);
                }
            }
        }
        Commands::Float { class, title } => match config.float_rules.first_match(&class, &title) {
            Some(rule) => println!("floating ({rule:?})"),
            None => println!("tiled"),
        },
    }

    Ok(())
}
