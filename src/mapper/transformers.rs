//! Field transformers shared by the card and detail mappings

pub struct RatingTransformer;

impl RatingTransformer {
    pub const MAX_STARS: usize = 5;

    /// One-decimal badge text. A missing or zero rating has no badge.
    pub fn badge(rating: Option<f32>) -> Option<String> {
        rating
            .filter(|r| r.is_finite() && *r > 0.0)
            .map(|r| format!("{:.1}", r))
    }

    /// Number of filled stars out of five for a 0-10 rating.
    pub fn star_count(rating: Option<f32>) -> usize {
        let rating = rating.filter(|r| r.is_finite()).unwrap_or(0.0);
        ((rating / 2.0).round().max(0.0) as usize).min(Self::MAX_STARS)
    }

    pub fn stars(rating: Option<f32>) -> String {
        let filled = Self::star_count(rating);
        format!(
            "{}{}",
            "★".repeat(filled),
            "☆".repeat(Self::MAX_STARS - filled)
        )
    }
}

pub struct TextTransformer;

impl TextTransformer {
    /// Trimmed value, with blank strings treated as missing.
    pub fn non_blank(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// First present value of a fallback chain.
    pub fn first_non_blank<'a>(
        values: impl IntoIterator<Item = Option<&'a str>>,
    ) -> Option<String> {
        values
            .into_iter()
            .find_map(Self::non_blank)
            .map(str::to_string)
    }

    /// Cut to `max_chars` characters and mark the cut with `...`.
    pub fn truncate(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        }
    }
}

pub struct GenreTransformer;

impl GenreTransformer {
    /// The first entry of a comma-separated genre list.
    pub fn primary(genre: Option<&str>) -> Option<String> {
        TextTransformer::non_blank(genre)
            .and_then(|g| g.split(',').map(str::trim).find(|g| !g.is_empty()))
            .map(str::to_string)
    }

    pub fn split(genre: Option<&str>) -> Vec<String> {
        genre
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect()
    }
}
