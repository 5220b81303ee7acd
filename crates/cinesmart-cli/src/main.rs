//! cinesmart - movie search and browsing CLI.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use cinesmart_api::backend::BackendClient;
use cinesmart_api::catalog::{GenreFilter, Listing, MovieCatalog};
use cinesmart_api::tmdb::TmdbClient;
use cinesmart_view::{DetailController, MovieList, MovieModal, SearchConfig, render_results};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, SourceKind, resolve_config_dir, resolve_config_path};
use crate::tui::run_browser;

/// Log file written while the browser owns the terminal.
const BROWSE_LOG_FILE: &str = "cinesmart.log";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Catalog to query (default: `[source] kind` from config.toml).
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,

    /// Catalog base URL (default: `[source] base_url` from config.toml).
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Debounce delay in milliseconds (default: `[search] debounce_ms`).
    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    /// Minimum trimmed query length (default: `[search] min_query_len`).
    #[arg(long, global = true)]
    min_query_len: Option<usize>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Pipeline settings from `config` with the command-line overrides applied.
    fn search_config(&self, config: &AppConfig) -> SearchConfig {
        let mut search_config = config.search_config();
        if let Some(ms) = self.debounce_ms {
            search_config.delay = Duration::from_millis(ms);
        }
        if let Some(len) = self.min_query_len {
            search_config.min_query_len = len;
        }
        search_config
    }
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movies by title.
    Search(SearchArgs),
    /// Show the details of one movie.
    Movie(MovieArgs),
    /// Show a listing page.
    List(ListCommand),
    /// Browse movies interactively via TUI.
    Browse,
    /// Manage config.toml.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (e.g. "batman").
    query: String,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// Movie ID (e.g. 268).
    id: u64,
}

/// Arguments for the `list` subcommand.
#[derive(clap::Args)]
struct ListCommand {
    /// Listing to show.
    #[command(subcommand)]
    command: ListSubcommands,
}

/// Available listings.
#[derive(Subcommand)]
enum ListSubcommands {
    /// Popular movies.
    Popular,
    /// Upcoming movies.
    Upcoming,
    /// Top rated movies.
    TopRated,
    /// Popular movies of one genre.
    Genre(GenreArgs),
}

/// Arguments for the `list genre` subcommand.
#[derive(clap::Args)]
struct GenreArgs {
    /// Genre name (e.g. "action", "scifi").
    name: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the effective configuration.
    Show,
    /// Write the default configuration to config.toml.
    Init(InitArgs),
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// Overwrite an existing config.toml.
    #[arg(long)]
    force: bool,
}

/// User-Agent sent by both catalog clients.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds a TMDB client from environment variables.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(base_url: Option<Url>) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder().api_token(api_token).user_agent(USER_AGENT);
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build TMDB client")
}

/// Builds a client for the cinesmart web backend.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
fn build_backend_client(base_url: Option<Url>) -> Result<BackendClient> {
    let mut builder = BackendClient::builder().user_agent(USER_AGENT);
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build backend client")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is too short or the request fails.
#[instrument(skip_all)]
async fn run_search<C>(catalog: &C, args: &SearchArgs, config: &SearchConfig) -> Result<()>
where
    C: MovieCatalog + Sync,
{
    let query = args.query.trim();
    if query.chars().count() < config.min_query_len {
        bail!(
            "query must be at least {} characters",
            config.min_query_len
        );
    }

    let results = catalog
        .search(query)
        .await
        .context("search request failed")?;

    let list = MovieList::new();
    render_results(&list, &results, &config.empty_message, &config.posters);
    log_list(&list);
    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the movie details cannot be fetched.
#[instrument(skip_all)]
async fn run_movie<C>(catalog: Arc<C>, args: &MovieArgs, config: &SearchConfig) -> Result<()>
where
    C: MovieCatalog + Sync + 'static,
{
    let modal = Arc::new(MovieModal::new());
    let details = DetailController::new(catalog, Arc::clone(&modal), config.posters.clone());
    if !details.open_movie(args.id).await {
        bail!("failed to fetch movie {}", args.id);
    }

    if let Some(body) = modal.state().body {
        tracing::info!("{}", body.title);
        tracing::info!("{}", body.rating_label());
        tracing::info!("{}", body.release_label());
        tracing::info!("Genres: {}", body.genres.join(", "));
        tracing::info!("{}", body.overview);
    }
    tracing::info!("{}", modal.markup());
    Ok(())
}

/// Runs the `list` subcommand.
///
/// # Errors
///
/// Returns an error if the genre is unknown or the listing cannot be fetched.
#[instrument(skip_all)]
async fn run_list<C>(catalog: &C, command: &ListSubcommands, config: &SearchConfig) -> Result<()>
where
    C: MovieCatalog + Sync,
{
    let listing = match command {
        ListSubcommands::Popular => Listing::Popular,
        ListSubcommands::Upcoming => Listing::Upcoming,
        ListSubcommands::TopRated => Listing::TopRated,
        ListSubcommands::Genre(args) => Listing::Genre(args.name.parse::<GenreFilter>()?),
    };

    let list = MovieList::new();
    if !cinesmart_view::load_listing(catalog, listing, &list, &config.posters).await {
        bail!("failed to fetch {}", listing.heading());
    }
    tracing::info!("{}", listing.heading());
    log_list(&list);
    Ok(())
}

/// Logs one line per card (or the placeholder), then the container markup.
fn log_list(list: &MovieList) {
    for fragment in list.snapshot() {
        match fragment.as_card() {
            Some(card) => tracing::info!(
                "{}\t{}\t{}\t{}",
                card.movie_id,
                card.title,
                card.rating_label(),
                card.release_date.as_deref().unwrap_or("-"),
            ),
            None => tracing::info!("{}", fragment.text()),
        }
    }
    tracing::debug!(markup = %list.markup(), "rendered movie list");
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or serialized.
fn run_config_show(config_path: &Path, config: &AppConfig) -> Result<()> {
    tracing::info!("# {}", config_path.display());
    for line in config.to_toml()?.lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
fn run_config_init(config_path: &Path, args: &InitArgs) -> Result<()> {
    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    AppConfig::default()
        .save(config_path)
        .context("failed to save config")?;
    tracing::info!("Wrote default config to {}", config_path.display());
    Ok(())
}

/// Runs a catalog-backed subcommand against `catalog`.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
async fn run_with_catalog<C>(catalog: C, cli: &Cli, config: &AppConfig) -> Result<()>
where
    C: MovieCatalog + Sync + 'static,
{
    let catalog = Arc::new(catalog);
    let search_config = cli.search_config(config);
    match &cli.command {
        Commands::Search(args) => run_search(catalog.as_ref(), args, &search_config).await,
        Commands::Movie(args) => run_movie(catalog, args, &search_config).await,
        Commands::List(list) => run_list(catalog.as_ref(), &list.command, &search_config).await,
        Commands::Browse => run_browser(catalog, search_config)
            .await
            .context("movie browser TUI failed"),
        Commands::Config(_) => Ok(()),
    }
}

/// Opens the browse log file in the config directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
fn open_browse_log(dir: Option<&PathBuf>) -> Result<File> {
    let config_dir = resolve_config_dir(dir).context("failed to resolve config directory")?;
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("failed to create directory {}", config_dir.display()))?;
    let path = config_dir.join(BROWSE_LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))
}

/// Installs the global tracing subscriber.
///
/// Events go to stdout, or to `log_file` when given.
fn init_tracing(log_file: Option<File>) {
    let ansi = log_file.is_none();
    let writer = log_file.map_or_else(
        || BoxMakeWriter::new(std::io::stdout),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = if matches!(cli.command, Commands::Browse) {
        Some(open_browse_log(cli.dir.as_ref())?)
    } else {
        None
    };
    init_tracing(log_file);

    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;

    if let Commands::Config(cmd) = &cli.command {
        return match &cmd.command {
            ConfigSubcommands::Show => {
                let config = AppConfig::load(&config_path).context("failed to load config")?;
                run_config_show(&config_path, &config)
            }
            ConfigSubcommands::Init(args) => run_config_init(&config_path, args),
        };
    }

    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let source = cli.source.unwrap_or(config.source.kind);
    let base_url = match &cli.base_url {
        Some(url) => Some(url.clone()),
        None => config
            .source
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .context("invalid [source] base_url in config.toml")?,
    };
    tracing::debug!(?source, base_url = ?base_url.as_ref().map(Url::as_str), "catalog selected");

    match source {
        SourceKind::Backend => {
            run_with_catalog(build_backend_client(base_url)?, &cli, &config).await
        }
        SourceKind::Tmdb => run_with_catalog(build_tmdb_client(base_url)?, &cli, &config).await,
    }
}
