//! Octolist terminal front-end
//!
//! Stands in for the presentation layer: every command drives the
//! coordinators through their intents and prints the resulting state.

pub mod app;
pub mod config;
pub mod error;
pub mod render;

pub use app::App;
pub use config::AppConfig;
pub use error::{CliError, Result};
