// src/main.rs
mod utils;
mod elibrary;
mod extractors;
mod pipeline;
mod storage;

use clap::Parser;
use std::path::PathBuf;
use utils::AppError;
use utils::error::TransportError;
use elibrary::client::{self, ContractSource, ElibraryClient};
use storage::{Cache, DiskCache, MemoryCache, StorageManager};

const DEFAULT_CONTRACT: &str = "GS-10F-0247K";

/// Command Line Interface for the GSA eLibrary contract scraper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Contract number to look up
    #[arg(default_value = DEFAULT_CONTRACT)]
    contract: String,

    /// Directory for cached URLs and pages
    #[arg(long, default_value = ".cache/elibrary")]
    cache_dir: PathBuf,

    /// Keep the cache in memory only (nothing is written to disk, so no debug dumps either)
    #[arg(long)]
    no_cache: bool,

    /// Also save the record as JSON into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Debug mode - save annotated HTML when extraction fails
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    // 3. Site root, overridable for mirrors
    let base_url = std::env::var("ELIBRARY_BASE_URL")
        .unwrap_or_else(|_| client::DEFAULT_BASE_URL.to_string());
    tracing::debug!("Using eLibrary base URL {}", base_url);
    let source = ElibraryClient::new(&base_url)
        .map_err(|e| AppError::Config(format!("Invalid ELIBRARY_BASE_URL '{}': {}", base_url, e)))?;

    // 4. Run the lookup against the selected cache backend
    if args.no_cache {
        run(&args, &MemoryCache::new(), &source).await
    } else {
        let cache = DiskCache::new(&args.cache_dir).map_err(|e| match e {
            TransportError::Cache(io) => AppError::Io(io),
            other => AppError::Transport(other),
        })?;
        tracing::debug!("Using disk cache at {}", cache.dir().display());
        run(&args, &cache, &source).await
    }
}

async fn run<C: Cache, S: ContractSource>(args: &Args, cache: &C, source: &S) -> Result<(), AppError> {
    let contract_id = args.contract.trim();
    if contract_id.is_empty() {
        return Err(AppError::Config("Contract number must not be empty".to_string()));
    }

    let contract = match pipeline::get_contract_info(cache, source, contract_id).await {
        Ok(contract) => contract,
        Err(AppError::Extraction(e)) => {
            tracing::error!("Failed to extract contract {}: {}", contract_id, e);
            if let Some(path) = debug_dump_path(args, contract_id) {
                // The page is cached by now, so this does not hit the network again.
                let html = pipeline::get_contract_html(cache, source, contract_id).await?;
                if let Err(e) = utils::html_debug::create_debug_html(&html, &path, utils::html_debug::LAYOUT_PATTERNS) {
                    tracing::warn!("Failed to create debug HTML: {}", e);
                }
            }
            return Err(e.into());
        }
        Err(e) => return Err(e),
    };

    let rendered = serde_json::to_string_pretty(&contract)
        .map_err(|e| AppError::Config(format!("Could not render record: {}", e)))?;
    println!("{}", rendered);

    if let Some(dir) = &args.output_dir {
        let storage = StorageManager::new(dir)?;
        storage.save_contract(&contract)?;
    }

    Ok(())
}

/// Where `--debug` writes the annotated page, if anywhere.
fn debug_dump_path(args: &Args, contract_id: &str) -> Option<PathBuf> {
    if !args.debug {
        return None;
    }
    if args.no_cache {
        tracing::warn!("--debug ignored with --no-cache; nothing is written to disk");
        return None;
    }
    Some(args.cache_dir.join("debug").join(format!("{}_annotated.html", contract_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sample_contract() {
        let args = Args::try_parse_from(["elibrary_scraper"]).unwrap();
        assert_eq!(args.contract, DEFAULT_CONTRACT);
        assert!(!args.no_cache);
        assert_eq!(args.cache_dir, PathBuf::from(".cache/elibrary"));
    }

    #[test]
    fn accepts_positional_contract() {
        let args = Args::try_parse_from(["elibrary_scraper", "GS-35F-0001X", "--no-cache", "-o", "out"]).unwrap();
        assert_eq!(args.contract, "GS-35F-0001X");
        assert!(args.no_cache);
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn debug_dump_goes_under_cache_dir() {
        let args = Args::try_parse_from(["elibrary_scraper", "--debug", "--cache-dir", "c"]).unwrap();
        assert_eq!(
            debug_dump_path(&args, "GS-1"),
            Some(PathBuf::from("c").join("debug").join("GS-1_annotated.html"))
        );
    }

    #[test]
    fn no_cache_disables_debug_dump() {
        let args = Args::try_parse_from(["elibrary_scraper", "--debug", "--no-cache"]).unwrap();
        assert_eq!(debug_dump_path(&args, "GS-1"), None);

        let args = Args::try_parse_from(["elibrary_scraper"]).unwrap();
        assert_eq!(debug_dump_path(&args, "GS-1"), None);
    }
}
