use anyhow::{Context, Result, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

use kinoteka::backends::{CatalogBackend, RestBackend};
use kinoteka::cli::{Cli, Command, ListArgs};
use kinoteka::config::Config;
use kinoteka::constants::DEFAULT_LOG_FILTER;
use kinoteka::core::{CatalogViewModel, DetailsViewModel, FetchOutcome, SearchViewModel};
use kinoteka::events::EventBus;
use kinoteka::mapper::{MovieDetailsView, cards};
use kinoteka::models::{MovieId, QueryState};
use kinoteka::services::{InitialLoad, check_health, initialize_catalog};
use kinoteka::ui::terminal;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is up before the config is read so its messages are not lost.
    let source = filter_source(std::env::var("RUST_LOG").ok(), cli.verbose);
    let filter_handle = init_tracing(&source);
    info!("Starting kinoteka {}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.clone();
        config.validate().context("Invalid --api-url")?;
    }
    if source == FilterSource::Config {
        apply_config_filter(&filter_handle, &config.logging.filter);
    }

    let backend: Arc<dyn CatalogBackend> = Arc::new(
        RestBackend::from_config(&config.api).context("Failed to set up the catalog client")?,
    );
    let event_bus = Arc::new(EventBus::default());

    let output = match cli.command {
        Command::List(args) => {
            list(backend, event_bus, config.catalog.items_per_page, &args).await?
        }
        Command::Show { id } => show(backend, event_bus, id).await?,
        Command::Suggest { query } => {
            let search = SearchViewModel::new(backend, event_bus);
            if !SearchViewModel::is_searchable(&query) {
                "Type at least 2 characters to get suggestions.".to_string()
            } else {
                let suggestions = search.update_query(&query).await?;
                terminal::render_suggestions(&suggestions)
            }
        }
        Command::Genres => {
            let catalog = CatalogViewModel::new(backend, event_bus, config.catalog.items_per_page);
            terminal::render_genres(&catalog.load_genres().await?)
        }
        Command::Stats => {
            let catalog = CatalogViewModel::new(backend, event_bus, config.catalog.items_per_page);
            terminal::render_stats(&catalog.load_stats().await?)
        }
        Command::Health => terminal::render_health(&check_health(backend.as_ref(), &event_bus).await),
    };

    println!("{}", output);
    Ok(())
}

/// Where the log filter comes from. `RUST_LOG` wins, then `-v`, then the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterSource {
    Env(String),
    Verbosity(&'static str),
    Config,
}

fn filter_source(rust_log: Option<String>, verbose: u8) -> FilterSource {
    match rust_log.filter(|directives| !directives.trim().is_empty()) {
        Some(directives) => FilterSource::Env(directives),
        None => match verbose {
            0 => FilterSource::Config,
            1 => FilterSource::Verbosity("kinoteka=debug"),
            _ => FilterSource::Verbosity("kinoteka=trace"),
        },
    }
}

/// Install the stderr subscriber. A config-sourced filter starts at the default
/// level and is swapped in through the returned handle once the config is read.
fn init_tracing(source: &FilterSource) -> reload::Handle<EnvFilter, Registry> {
    let (filter, invalid_env) = match source {
        FilterSource::Env(directives) => match EnvFilter::try_new(directives) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
        },
        FilterSource::Verbosity(directives) => (EnvFilter::new(*directives), None),
        FilterSource::Config => (EnvFilter::new(DEFAULT_LOG_FILTER), None),
    };

    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(e) = invalid_env {
        warn!("Ignoring invalid RUST_LOG: {}", e);
    }
    handle
}

fn apply_config_filter(handle: &reload::Handle<EnvFilter, Registry>, directives: &str) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                warn!("Failed to apply logging.filter: {}", e);
            }
        }
        Err(e) => warn!("Ignoring invalid logging.filter {:?}: {}", directives, e),
    }
}

async fn list(
    backend: Arc<dyn CatalogBackend>,
    event_bus: Arc<EventBus>,
    page_size: u32,
    args: &ListArgs,
) -> Result<String> {
    let mut query = QueryState::new(page_size);
    query.set_filters(args.filter_update());
    let catalog = CatalogViewModel::with_query(backend, event_bus, query);

    if let InitialLoad::Demo { movies, reason } = initialize_catalog(&catalog).await {
        return Ok(terminal::render_demo(&cards(&movies), &reason));
    }

    if args.page > 1 {
        match catalog.change_page(i64::from(args.page) - 1).await {
            Some(FetchOutcome::Failed(message)) => bail!("Failed to load page {}: {}", args.page, message),
            Some(_) => {}
            None => warn!(
                "Page {} is out of range (1-{}), showing page 1",
                args.page,
                catalog.list_result().total_pages
            ),
        }
    }

    let result = catalog.list_result();
    let query = catalog.query().await;
    Ok(terminal::render_movie_list(
        &cards(&result.items),
        &catalog.pagination().await,
        &catalog.results_label().await,
        &query.active_filters(),
    ))
}

async fn show(backend: Arc<dyn CatalogBackend>, event_bus: Arc<EventBus>, id: MovieId) -> Result<String> {
    let details = DetailsViewModel::new(backend, event_bus);
    let view: MovieDetailsView = details
        .load_movie(id)
        .await
        .with_context(|| format!("Failed to load movie {}", id))?;
    Ok(terminal::render_details(&view))
}
