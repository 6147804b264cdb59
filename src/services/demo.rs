//! Built-in sample movies shown when the catalog cannot be reached at startup

use crate::models::{MovieId, MovieSummary, Platform};

pub const DEMO_NOTICE: &str = "Demo mode: showing sample movies";

pub fn sample_movies() -> Vec<MovieSummary> {
    vec![
        MovieSummary {
            id: MovieId::new(1),
            canonical_key: None,
            title: "Inception".to_string(),
            release_year: Some(2010),
            imdb_rating: Some(8.8),
            genre: Some("Science Fiction, Thriller".to_string()),
            description: Some(
                "Dream thief Cobb is offered a chance to have his past crimes forgiven...".to_string(),
            ),
            poster_url: Some(
                "https://m.media-amazon.com/images/M/MV5BMjAxMzY3NjcxNF5BMl5BanBnXkFtZTcwNTI5OTM0Mw@@._V1_SX300.jpg"
                    .to_string(),
            ),
            sources: [Platform::Imdb, Platform::Netflix].into_iter().collect(),
            num_sources: Some(2),
            netflix_id: None,
            amazon_id: None,
            imdb_id: None,
        },
        MovieSummary {
            id: MovieId::new(2),
            canonical_key: None,
            title: "Interstellar".to_string(),
            release_year: Some(2014),
            imdb_rating: Some(8.6),
            genre: Some("Drama, Adventure".to_string()),
            description: Some(
                "Farmer and former NASA pilot Cooper sets out on a journey through space...".to_string(),
            ),
            poster_url: Some(
                "https://m.media-amazon.com/images/M/MV5BZjdkOTU3MDktN2IxOS00OGEyLWFmMjktY2FiMmZkNWIyODZiXkEyXkFqcGdeQXVyMTMxODk2OTU@._V1_SX300.jpg"
                    .to_string(),
            ),
            sources: [Platform::Imdb, Platform::Amazon].into_iter().collect(),
            num_sources: Some(2),
            netflix_id: None,
            amazon_id: None,
            imdb_id: None,
        },
    ]
}
