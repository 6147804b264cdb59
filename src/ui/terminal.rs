//! Plain-text rendering of catalog view models.
//!
//! Every function returns the text instead of printing it so the binary decides
//! where output goes.

use crate::core::Pagination;
use crate::mapper::{MovieCard, MovieDetailsView};
use crate::models::{ActiveFilter, CatalogStats, Platform, Suggestion};
use crate::services::ServerStatus;
use crate::services::demo::DEMO_NOTICE;

const RULE: &str = "----------------------------------------";

pub fn render_card(card: &MovieCard) -> String {
    let mut header = format!("#{} {} ({})", card.id, card.title, card.year_label);
    if let Some(badge) = &card.rating_badge {
        header.push_str(&format!("  {} {}", card.stars, badge));
    }

    let mut lines = vec![header];
    let mut meta = Vec::new();
    if let Some(genre) = &card.primary_genre {
        meta.push(genre.clone());
    }
    if !card.badges.is_empty() {
        meta.push(format!("[{}]", card.badge_names().join("] [")));
    }
    if !meta.is_empty() {
        lines.push(format!("    {}", meta.join("  ")));
    }
    lines.push(format!("    {}", card.description));
    lines.join("\n")
}

pub fn render_movie_list(
    cards: &[MovieCard],
    pagination: &Pagination,
    results_label: &str,
    active_filters: &[ActiveFilter],
) -> String {
    let mut sections = Vec::new();

    if !active_filters.is_empty() {
        let filters: Vec<String> = active_filters.iter().map(ToString::to_string).collect();
        sections.push(format!("Filters: {}", filters.join(" | ")));
    }

    if cards.is_empty() {
        sections.push("No movies found. Try changing the filters.".to_string());
        return sections.join("\n");
    }

    sections.push(results_label.to_string());
    sections.push(RULE.to_string());
    sections.extend(cards.iter().map(render_card));
    sections.push(RULE.to_string());

    let mut nav = pagination.label();
    if pagination.has_previous() {
        nav = format!("< {}", nav);
    }
    if pagination.has_next() {
        nav.push_str(" >");
    }
    sections.push(nav);
    sections.join("\n")
}

pub fn render_demo(cards: &[MovieCard], reason: &str) -> String {
    let mut sections = vec![
        format!("Could not load the catalog: {}", reason),
        DEMO_NOTICE.to_string(),
        RULE.to_string(),
    ];
    sections.extend(cards.iter().map(render_card));
    sections.join("\n")
}

pub fn render_details(view: &MovieDetailsView) -> String {
    let mut title = view.title.clone();
    if let Some(year) = view.year {
        title.push_str(&format!(" ({})", year));
    }

    let mut meta = Vec::new();
    if let Some(rating) = &view.rating {
        match view.imdb_votes {
            Some(votes) => meta.push(format!("IMDb {} ({} votes)", rating, votes)),
            None => meta.push(format!("IMDb {}", rating)),
        }
    }
    if let Some(duration) = &view.duration {
        meta.push(duration.clone());
    }
    if !view.genres.is_empty() {
        meta.push(view.genres.join(", "));
    }

    let mut lines = vec![title];
    if !meta.is_empty() {
        lines.push(meta.join(" | "));
    }
    lines.push(RULE.to_string());
    lines.push(view.description.clone());

    if let Some(cast) = &view.cast {
        lines.push(format!("Cast: {}", cast));
    }
    if let Some(director) = &view.director {
        lines.push(format!("Director: {}", director));
    }
    if let Some(language) = &view.language {
        lines.push(format!("Language: {}", language));
    }

    for (platform, metadata) in &view.platform_metadata {
        let details: Vec<String> = [
            metadata.country.as_deref().map(|c| format!("country {}", c)),
            metadata.rating.as_deref().map(|r| format!("rated {}", r)),
            metadata.date_added.as_deref().map(|d| format!("added {}", d)),
            metadata.listed_in.as_deref().map(|l| format!("listed in {}", l)),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !details.is_empty() {
            lines.push(format!("{}: {}", platform.display_name(), details.join(", ")));
        }
    }

    if !view.watch_links.is_empty() {
        lines.push("Where to watch:".to_string());
        lines.extend(
            view.watch_links
                .iter()
                .map(|link| format!("  {}: {}", link.label, link.url)),
        );
    }
    lines.join("\n")
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "No suggestions.".to_string();
    }
    suggestions
        .iter()
        .map(|s| match (s.id, s.release_year) {
            (Some(id), Some(year)) => format!("#{} {} ({})", id, s.title, year),
            (Some(id), None) => format!("#{} {}", id, s.title),
            (None, Some(year)) => format!("{} ({})", s.title, year),
            (None, None) => s.title.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_genres(genres: &[String]) -> String {
    if genres.is_empty() {
        return "No genres.".to_string();
    }
    genres.join("\n")
}

pub fn render_stats(stats: &CatalogStats) -> String {
    let mut lines = vec![
        format!("Movies: {}", stats.total_movies),
        format!("Average rating: {:.1}", stats.average_rating),
    ];
    match (stats.year_range.min, stats.year_range.max) {
        (Some(min), Some(max)) => lines.push(format!("Years: {}-{}", min, max)),
        (Some(min), None) => lines.push(format!("Years: from {}", min)),
        (None, Some(max)) => lines.push(format!("Years: until {}", max)),
        (None, None) => {}
    }
    for platform in Platform::ALL {
        lines.push(format!(
            "{}: {}",
            platform.display_name(),
            stats.platforms.get(platform)
        ));
    }
    lines.join("\n")
}

pub fn render_health(status: &ServerStatus) -> String {
    match status.notice() {
        Some(notice) => format!("Server {}\n{}", status, notice),
        None => format!("Server {}", status),
    }
}
