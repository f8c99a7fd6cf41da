//! # Discovery Search Main Driver
//!
//! ## Purpose
//! Command-line entry point for the document-discovery search engine. Loads
//! the catalog, wires the local index and remote client into a search
//! session, and runs either a single query or an interactive prompt.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file, command line arguments, environment
//!   variables, query text (argument or stdin)
//! - **Output**: Ranked results on stdout, structured logs on stderr
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Load the document catalog
//! 4. Wire the local index, remote client, and orchestrator
//! 5. Run one-shot or interactive mode
//! 6. Shut the session down cleanly

use clap::{Arg, Command};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use discovery_search::remote::{DisabledRemoteSearch, HttpRemoteSearch, RemoteSearch};
use discovery_search::{
    Config, DiscoveryError, DisplayState, DocumentCatalog, LocalIndexSearch, Locale,
    OrchestratorHandle, QueryNormalizer, Result, SearchOrchestrator,
};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("discovery-search")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Multilingual document-discovery search for legal document templates")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("locale")
                .short('l')
                .long("locale")
                .value_name("LOCALE")
                .help("Search locale (en or es)"),
        )
        .arg(
            Arg::new("query")
                .short('q')
                .long("query")
                .value_name("TEXT")
                .help("Run a single query and exit"),
        )
        .arg(
            Arg::new("no-remote")
                .long("no-remote")
                .help("Disable the remote semantic search path")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("config.toml");
    let config = Config::from_file(config_path)?;

    init_logging(&config)?;
    info!("Starting discovery search v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", config_path);

    let locale = match matches.get_one::<String>("locale") {
        Some(raw) => raw.parse::<Locale>()?,
        None => config.catalog.default_locale,
    };

    let catalog = Arc::new(DocumentCatalog::from_file(&config.catalog.path)?);
    if catalog.is_empty() {
        return Err(DiscoveryError::CatalogLoadFailed {
            path: config.catalog.path.display().to_string(),
            details: "catalog contains no documents".to_string(),
        });
    }

    let normalizer = QueryNormalizer::new(config.search.max_query_length)?;
    let local = Arc::new(LocalIndexSearch::new(
        catalog,
        normalizer,
        config.search.max_results,
    ));

    let remote: Arc<dyn RemoteSearch> =
        if config.remote.enabled && !matches.get_flag("no-remote") {
            Arc::new(HttpRemoteSearch::new(&config.remote)?)
        } else {
            info!("Remote semantic search disabled");
            Arc::new(DisabledRemoteSearch)
        };

    let handle = SearchOrchestrator::spawn(local, remote, locale, config.debounce.quiet_period());

    if let Some(query) = matches.get_one::<String>("query") {
        run_single_query(&handle, query).await;
    } else {
        run_interactive(&handle).await?;
    }

    handle.shutdown();
    info!("Discovery search shut down");
    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.level))
        .map_err(|_| DiscoveryError::Config {
            message: format!("Invalid log level: {}", config.logging.level),
        })?;

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(layer.json().with_filter(filter))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(layer.with_filter(filter))
            .init();
    }

    Ok(())
}

/// Submit one query, wait for the session to settle, print the answer.
async fn run_single_query(handle: &OrchestratorHandle, query: &str) {
    let mut display = handle.subscribe();
    handle.submit(query);

    loop {
        if display.changed().await.is_err() {
            return;
        }
        let state = display.borrow().clone();
        if !state.searching {
            print_state(&state);
            return;
        }
    }
}

/// Read queries from stdin until EOF or Ctrl-C, printing each settled answer.
async fn run_interactive(handle: &OrchestratorHandle) -> Result<()> {
    let mut display = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Enter a query (empty line clears, Ctrl-D exits):");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(text) => handle.submit(&text),
                    None => break,
                }
            }
            changed = display.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = display.borrow().clone();
                if !state.searching {
                    print_state(&state);
                }
            }
            _ = signal::ctrl_c() => {
                info!("Received SIGINT, shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn print_state(state: &DisplayState) {
    if state.no_results {
        println!("No matching documents.");
        return;
    }
    if state.fallback {
        println!("Showing instant keyword matches (semantic search unavailable):");
    }
    for (rank, result) in state.results.iter().enumerate() {
        println!(
            "{:>2}. [{:.2}] {} - {} ({})",
            rank + 1,
            result.confidence,
            result.title,
            result.category,
            result.document_id
        );
    }
}
