//! Grid card view model

use crate::constants::{CARD_DESCRIPTION_CHARS, NO_DESCRIPTION, PLACEHOLDER_POSTER_URL, UNKNOWN_YEAR};
use crate::mapper::transformers::{GenreTransformer, RatingTransformer, TextTransformer};
use crate::models::{MovieId, MovieSummary, Platform};

/// Everything the render layer needs to draw one movie card.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub id: MovieId,
    pub title: String,
    pub year_label: String,
    pub rating_badge: Option<String>,
    pub stars: String,
    pub primary_genre: Option<String>,
    /// Canonical platform order.
    pub badges: Vec<Platform>,
    pub description: String,
    pub poster_url: String,
}

impl From<&MovieSummary> for MovieCard {
    fn from(movie: &MovieSummary) -> Self {
        let description = TextTransformer::non_blank(movie.description.as_deref())
            .map(|d| TextTransformer::truncate(d, CARD_DESCRIPTION_CHARS))
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Self {
            id: movie.id,
            title: movie.title.clone(),
            year_label: movie
                .release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| UNKNOWN_YEAR.to_string()),
            rating_badge: RatingTransformer::badge(movie.imdb_rating),
            stars: RatingTransformer::stars(movie.imdb_rating),
            primary_genre: GenreTransformer::primary(movie.genre.as_deref()),
            badges: movie.sources.iter().copied().collect(),
            description,
            poster_url: TextTransformer::non_blank(movie.poster_url.as_deref())
                .unwrap_or(PLACEHOLDER_POSTER_URL)
                .to_string(),
        }
    }
}

impl From<MovieSummary> for MovieCard {
    fn from(movie: MovieSummary) -> Self {
        MovieCard::from(&movie)
    }
}

impl MovieCard {
    pub fn badge_names(&self) -> Vec<&'static str> {
        self.badges.iter().map(Platform::display_name).collect()
    }
}

pub fn cards(movies: &[MovieSummary]) -> Vec<MovieCard> {
    movies.iter().map(MovieCard::from).collect()
}
