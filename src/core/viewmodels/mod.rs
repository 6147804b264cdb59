pub mod catalog_view_model;
pub mod details_view_model;
pub mod property;
pub mod search_view_model;

pub use catalog_view_model::{CatalogViewModel, FetchOutcome, FetchStatus};
pub use details_view_model::DetailsViewModel;
pub use property::{Property, PropertySubscriber};
pub use search_view_model::SearchViewModel;
