//! Movie catalog client: query state, list synchronization and view models
//! over a paginated REST catalog.

pub mod backends;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod events;
pub mod mapper;
pub mod models;
pub mod services;
pub mod ui;
pub mod utils;

pub use backends::{CatalogBackend, RestBackend};
pub use config::Config;
pub use crate::core::{CatalogViewModel, FetchOutcome, FetchStatus};
pub use utils::{CatalogError, CatalogResult};
