//! Detail view model for a single movie

use crate::constants::{NO_DESCRIPTION, PLACEHOLDER_POSTER_URL};
use crate::mapper::transformers::{GenreTransformer, RatingTransformer, TextTransformer};
use crate::models::{MovieDetail, MovieId, Platform, PlatformMetadata};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchLink {
    pub platform: Platform,
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailsView {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<String>,
    pub imdb_votes: Option<u64>,
    pub duration: Option<String>,
    pub genres: Vec<String>,
    pub description: String,
    pub cast: Option<String>,
    pub director: Option<String>,
    pub language: Option<String>,
    pub poster_url: String,
    /// Only platforms the movie is listed on and that carry an id.
    pub watch_links: Vec<WatchLink>,
    pub platform_metadata: Vec<(Platform, PlatformMetadata)>,
}

impl From<&MovieDetail> for MovieDetailsView {
    fn from(detail: &MovieDetail) -> Self {
        let movie = &detail.summary;

        let watch_links = movie
            .sources
            .iter()
            .filter_map(|&platform| {
                movie.platform_id(platform).map(|id| WatchLink {
                    platform,
                    label: platform.watch_label(),
                    url: platform.watch_url(id),
                })
            })
            .collect();

        let platform_metadata = Platform::ALL
            .into_iter()
            .filter_map(|platform| detail.platform_metadata(platform).map(|m| (platform, m)))
            .collect();

        Self {
            id: movie.id,
            title: movie.title.clone(),
            year: movie.release_year,
            rating: RatingTransformer::badge(movie.imdb_rating),
            imdb_votes: detail.imdb_votes,
            duration: TextTransformer::first_non_blank([
                detail.duration.as_deref(),
                detail.netflix_duration.as_deref(),
                detail.amazon_duration.as_deref(),
            ]),
            genres: GenreTransformer::split(movie.genre.as_deref()),
            description: TextTransformer::non_blank(movie.description.as_deref())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            cast: TextTransformer::first_non_blank([
                detail.cast.as_deref(),
                detail.netflix_cast.as_deref(),
                detail.amazon_cast.as_deref(),
            ]),
            director: TextTransformer::first_non_blank([
                detail.director.as_deref(),
                detail.netflix_director.as_deref(),
                detail.amazon_director.as_deref(),
            ]),
            language: TextTransformer::first_non_blank([detail.language.as_deref()]),
            poster_url: TextTransformer::non_blank(movie.poster_url.as_deref())
                .unwrap_or(PLACEHOLDER_POSTER_URL)
                .to_string(),
            watch_links,
            platform_metadata,
        }
    }
}

impl From<MovieDetail> for MovieDetailsView {
    fn from(detail: MovieDetail) -> Self {
        MovieDetailsView::from(&detail)
    }
}
