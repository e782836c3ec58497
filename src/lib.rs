// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod color;
pub mod config;
pub mod error;
pub mod floating;
pub mod hooks;
pub(crate) mod process;
pub mod session;
pub mod theme;
