use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{FilterUpdate, MovieId, Platform, YearRange};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "kinoteka",
    version,
    about = "Browse a movie catalog from the terminal",
    long_about = "Kinoteka lists, filters and searches movies served by a catalog REST API.\n\nExamples:\n  kinoteka list --genre Drama --years 2010-2019 --min-rating 7.5\n  kinoteka list --source netflix --source imdb --page 2\n  kinoteka show 42\n  kinoteka --api-url http://catalog.local:5000/api health"
)]
pub struct Cli {
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to config file (defaults to <config dir>/kinoteka/config.toml)."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "api-url",
        value_name = "URL",
        global = true,
        help = "Catalog API base URL, overriding the config file."
    )]
    pub api_url: Option<String>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        help = "Increase log verbosity (-v, -vv). RUST_LOG takes precedence."
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List movies, best rated first.
    List(ListArgs),
    /// Show the details of one movie.
    Show {
        #[arg(value_name = "ID")]
        id: MovieId,
    },
    /// Search-as-you-type title suggestions.
    Suggest {
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// List the known genres.
    Genres,
    /// Catalog statistics.
    Stats,
    /// Check whether the catalog server is reachable.
    Health,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(short = 's', long = "search", value_name = "TEXT", help = "Title search.")]
    pub search: Option<String>,

    #[arg(short = 'g', long = "genre", value_name = "GENRE", help = "Only this genre.")]
    pub genre: Option<String>,

    #[arg(
        short = 'y',
        long = "years",
        value_name = "FROM-TO",
        allow_hyphen_values = true,
        help = "Release year range: 2010-2019, 2010- or -1999."
    )]
    pub years: Option<YearRange>,

    #[arg(short = 'r', long = "min-rating", value_name = "RATING", help = "Minimum IMDb rating.")]
    pub min_rating: Option<f32>,

    #[arg(
        long = "source",
        value_name = "PLATFORM",
        action = ArgAction::Append,
        help = "Only movies on this platform (repeatable): netflix, amazon, imdb. Defaults to all."
    )]
    pub sources: Vec<Platform>,

    #[arg(short = 'p', long = "page", value_name = "N", default_value_t = 1, help = "Page to show.")]
    pub page: u32,
}

impl ListArgs {
    /// Filters given on the command line. Platforms default to all of them.
    pub fn filter_update(&self) -> FilterUpdate {
        let mut update = FilterUpdate::new();
        if let Some(search) = &self.search {
            update = update.search(search.clone());
        }
        if let Some(genre) = &self.genre {
            update = update.genre(genre.clone());
        }
        if self.years.is_some() {
            update = update.year_range(self.years);
        }
        if self.min_rating.is_some() {
            update = update.min_rating(self.min_rating);
        }
        if !self.sources.is_empty() {
            update = update.sources(self.sources.iter().copied());
        }
        update
    }
}
