use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;

use crate::config::loader;
use crate::config::types::Config;
use crate::error::LoadError;

/// Where a session reads its configuration from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Source text held in memory.
    Inline(String),
    /// A file re-read on every load.
    File(PathBuf),
    /// The bundled default configuration.
    Builtin,
}

impl ConfigSource {
    /// Pick a source: an explicit path wins, then the discovered user file,
    /// then the bundled default.
    pub fn discover(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return Self::File(path.to_owned());
        }
        match loader::find_config() {
            Some(path) => Self::File(path),
            None => Self::Builtin,
        }
    }

    pub fn load(&self) -> Result<Config, LoadError> {
        match self {
            Self::Inline(source) => loader::load(source),
            Self::File(path) => loader::load_file(path),
            Self::Builtin => loader::load_named(loader::DEFAULT_CONFIG, "<default>"),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Inline(_) => "<inline>".to_owned(),
            Self::File(path) => path.display().to_string(),
            Self::Builtin => "<default>".to_owned(),
        }
    }
}

/// The active configuration of a running session.
///
/// Readers take cheap snapshots with [`ConfigStore::current`]. A reload
/// replaces the snapshot only when the new load succeeds; readers holding
/// the old snapshot keep it.
pub struct ConfigStore {
    source: ConfigSource,
    active: ArcSwap<Config>,
    started: AtomicBool,
}

impl ConfigStore {
    /// Load `source` for the first time. Fails if the initial load fails.
    pub fn open(source: ConfigSource) -> Result<Self, LoadError> {
        let config = source.load()?;
        tracing::info!(source = %source.describe(), "configuration active");
        Ok(Self {
            source,
            active: ArcSwap::from_pointee(config),
            started: AtomicBool::new(false),
        })
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    pub fn current(&self) -> Arc<Config> {
        self.active.load_full()
    }

    /// Re-read the session's source and swap it in.
    pub fn reload(&self) -> Result<Arc<Config>, LoadError> {
        self.install(self.source.load())
    }

    /// Validate `source` text and swap it in, leaving the session source as
    /// it was.
    pub fn reload_with(&self, source: &str) -> Result<Arc<Config>, LoadError> {
        self.install(loader::load_named(source, "<reload>"))
    }

    fn install(&self, loaded: Result<Config, LoadError>) -> Result<Arc<Config>, LoadError> {
        match loaded {
            Ok(config) => {
                let config = Arc::new(config);
                self.active.store(Arc::clone(&config));
                tracing::info!(source = %self.source.describe(), "configuration reloaded");
                Ok(config)
            }
            Err(e) => {
                tracing::error!(
                    source = %self.source.describe(),
                    error = %e,
                    "reload failed; keeping previous configuration"
                );
                Err(e)
            }
        }
    }

    /// Run the startup-once hook of the active config, at most once per
    /// store. Returns whether the hook ran on this call.
    pub fn fire_startup_once(&self) -> bool {
        if self.started.swap(true, Ordering::AcqRel) {
            return false;
        }
        let config = self.current();
        match &config.hooks.startup_once {
            Some(hook) => {
                tracing::debug!(hook = hook.descriptor(), "running startup hook");
                hook.call();
                true
            }
            None => false,
        }
    }
}
