use clap::Parser;
use omada::core::config::{self, ResolvedConfig};
use omada::core::photo_list::{ListState, PhotoList, Query};
use omada::core::repository::{FlickrRepository, PhotoRepository};
use omada::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "omada", about = "Browse and search Flickr photos from the terminal")]
struct Args {
    /// Search text to open with (omit for the recent photos feed)
    #[arg(short, long)]
    search: Option<String>,

    /// Flickr API key (overrides FLICKR_API_KEY and the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Print photos to stdout instead of starting the interactive UI
    #[arg(long)]
    print: bool,

    /// Number of pages to load in --print mode
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to omada.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("omada.log") {
        let _ = WriteLogger::init(log_level(), log_config, log_file);
    }

    // Report once, as a plain message, instead of main's Debug output.
    if let Err(e) = run(args).await {
        log::error!("Fatal: {}", e);
        eprintln!("omada: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let file_config = config::load_config()?;
    let resolved = config::resolve(&file_config, args.api_key.as_deref(), args.search.as_deref());

    log::info!(
        "Omada starting up: search={:?}, print={}",
        resolved.initial_search,
        args.print
    );

    let repository: Arc<dyn PhotoRepository> = Arc::new(FlickrRepository::from_config(&resolved)?);

    if args.print {
        let mut stdout = std::io::stdout().lock();
        return print_photos(repository.as_ref(), &resolved, args.pages, &mut stdout).await;
    }

    tui::run(repository, resolved)?;
    Ok(())
}

/// `OMADA_LOG` picks the file log level; defaults to debug.
fn log_level() -> LevelFilter {
    std::env::var("OMADA_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Debug)
}

/// Headless mode: load `pages` pages and write one photo per line.
async fn print_photos(
    repository: &dyn PhotoRepository,
    config: &ResolvedConfig,
    pages: u32,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut list = PhotoList::new();
    if let ListState::Error(message) = list
        .refresh(repository, Query::from_text(&config.initial_search))
        .await
    {
        return Err(message.clone().into());
    }

    for _ in 1..pages.max(1) {
        let before = list.len();
        if !list.load_next(repository).await || list.len() == before {
            break;
        }
    }

    for photo in list.photos() {
        writeln!(out, "{}\t{}\t{}", photo.id, photo.title, photo.url)?;
    }
    log::info!("Printed {} photos", list.len());
    Ok(())
}
