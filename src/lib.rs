//! Library exports for the filter-sync controller, its hosts and transport.
/// Application directory resolution.
pub mod app_dirs;
/// TOML configuration for the controller and transport.
pub mod config;
/// Filter-sync controller and its event handlers.
pub mod controller;
/// Filter form values and query-string state.
pub mod filter;
/// Page hosts the controller drives.
pub mod host;
pub(crate) mod http_client;
/// Tracing subscriber setup.
pub mod logging;
/// Portal wire contract and HTTP transport.
pub mod portal;

pub use controller::FilterSyncController;
pub use http_client::REQUEST_DEADLINE;
