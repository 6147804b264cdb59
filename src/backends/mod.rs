pub mod rest;
pub mod traits;

pub use rest::RestBackend;
pub use traits::CatalogBackend;
