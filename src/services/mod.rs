pub mod demo;
pub mod health;
pub mod initialization;

pub use health::{ServerStatus, check_health};
pub use initialization::{InitialLoad, initialize_catalog};
