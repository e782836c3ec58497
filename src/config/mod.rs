pub mod bar;
pub mod builtin_themes;
pub mod groups;
pub mod keybindings;
pub mod layouts;
pub mod loader;
pub mod mouse;
pub mod options;
pub mod types;
pub mod widgets;

pub use loader::{load, load_file};
pub use types::Config;
