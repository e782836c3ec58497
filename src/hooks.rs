use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::process;

type CallbackFn = dyn Fn() -> Option<String> + Send + Sync;

/// An opaque zero-argument function handed to the host.
///
/// The loader never calls it. Equality and `Debug` go through the
/// descriptor, so two loads of the same source compare equal.
#[derive(Clone)]
pub struct Callback {
    descriptor: String,
    func: Arc<CallbackFn>,
}

impl Callback {
    pub fn new(
        descriptor: impl Into<String>,
        func: impl Fn() -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            descriptor: descriptor.into(),
            func: Arc::new(func),
        }
    }

    /// Run `command` through the shell and yield its output, for polling
    /// widgets. A failing command yields `None`.
    pub fn shell(command: impl Into<String>) -> Self {
        let command = command.into();
        let descriptor = format!("shell: {command}");
        Self::new(descriptor, move || match process::shell_output(&command) {
            Ok(out) => Some(out),
            Err(e) => {
                tracing::warn!(command = %command, error = %e, "poll command failed");
                None
            }
        })
    }

    /// Start `command` and return immediately.
    pub fn spawn(command: impl Into<String>) -> Self {
        let command = command.into();
        let descriptor = format!("spawn: {command}");
        Self::new(descriptor, move || {
            process::spawn_shell(&command);
            None
        })
    }

    /// Start an executable directly (no shell), e.g. an autostart script.
    pub fn program(path: PathBuf) -> Self {
        let descriptor = format!("exec: {}", path.display());
        Self::new(descriptor, move || {
            process::spawn_program(&path);
            None
        })
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn call(&self) -> Option<String> {
        (self.func)()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.descriptor).finish()
    }
}

/// Event hooks declared by a configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hooks {
    /// Runs once when the session starts, never on reload.
    pub startup_once: Option<Callback>,
}
