pub mod pagination;
pub mod query_encoder;
pub mod viewmodels;

pub use pagination::Pagination;
pub use query_encoder::{ParameterSet, encode};
pub use viewmodels::{CatalogViewModel, DetailsViewModel, FetchOutcome, FetchStatus, SearchViewModel};
