//! Pure mappings from catalog models to view models
//!
//! Nothing in here performs I/O; the render layer formats these structs.

pub mod movie_card;
pub mod movie_details;
pub mod transformers;

pub use movie_card::{MovieCard, cards};
pub use movie_details::{MovieDetailsView, WatchLink};
