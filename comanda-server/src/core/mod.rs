//! Core server components
//!
//! - [`Config`] - environment-driven configuration
//! - [`AppState`] - shared application state (store, bus, versions)
//! - [`Server`] - router assembly and HTTP serving

mod config;
mod server;
mod state;

pub use config::Config;
pub use server::{Server, build_router};
pub use state::{AppState, ResourceVersions};
