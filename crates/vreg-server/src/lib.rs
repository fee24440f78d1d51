//! Registry preview server for vreg.
//!
//! Serves the built registry directory over HTTP so installer CLIs can fetch
//! items from it, and optionally rebuilds the registry whenever component
//! sources or the configuration change.

pub mod dev;
pub mod server;
pub mod watcher;

pub use dev::{DevServer, DevServerConfig};
pub use server::{registry_router, RegistryServer, ServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
