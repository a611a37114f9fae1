//! Configuration for the Stratum progression system.
//!
//! Loading never fails: a missing file is created with defaults, an
//! unreadable or unparsable file falls back to the in-memory defaults with
//! a warning, and an unrecognized storage backend selector falls back to
//! the embedded database. Startup only aborts later, when the selected
//! backend fails to initialize.

mod config;
mod loader;
mod messages;

pub use config::*;
pub use messages::{render, MessageVars};
