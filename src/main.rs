//! Collection Pages CLI
//!
//! Usage:
//!   collection-pages [OPTIONS] <PATH>
//!
//! Options:
//!   -c, --catalog <FILE>  Catalog file (TOML format)
//!   -t, --tag <TAG>       Select a tag in the tag filter
//!   -s, --search <QUERY>  Type a query into the search box
//!   --without <SLOT>      Leave a slot out of the page shell
//!   --fragment            Write only the body content
//!   --compact             Disable indentation
//!   -v, --verbose         Debug logging on stderr
//!   -h, --help            Print help

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use collection_pages::{render_page, Catalog, HtmlConfig, RenderConfig, Slot};

#[derive(Parser)]
#[command(name = "collection-pages")]
#[command(about = "Render the collection pages of a static content site")]
struct Cli {
    /// Page path to render, e.g. "/research-talks/" or "/"
    path: String,

    /// Catalog file (TOML format); the bundled sample is used otherwise
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Select a tag in the tag filter after rendering
    #[arg(short, long)]
    tag: Option<String>,

    /// Type a query into the search box after rendering
    #[arg(short, long)]
    search: Option<String>,

    /// Leave a slot out of the page shell (repeatable)
    #[arg(long, value_name = "SLOT")]
    without: Vec<Slot>,

    /// Write only the body content, without the document wrapper
    #[arg(long)]
    fragment: bool,

    /// Disable indentation
    #[arg(long)]
    compact: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error initializing logging: {}", e);
    }

    // Load catalog
    let catalog = match &cli.catalog {
        Some(path) => {
            let source = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading catalog '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            };
            match Catalog::from_str(&source) {
                Ok(catalog) => catalog,
                Err(e) => {
                    let filename = path.display().to_string();
                    eprintln!("{}", e.format(&source, &filename));
                    std::process::exit(1);
                }
            }
        }
        None => Catalog::default(),
    };
    tracing::debug!(items = catalog.len(), "catalog loaded");

    let slots = Slot::ALL
        .into_iter()
        .filter(|slot| !cli.without.contains(slot));

    let html = HtmlConfig::new()
        .with_standalone(!cli.fragment)
        .with_pretty_print(!cli.compact)
        .with_title(catalog.name.clone().unwrap_or_else(|| "Collections".to_string()));

    let mut config = RenderConfig::new()
        .with_slots(slots)
        .with_html(html)
        .with_catalog(catalog);
    config.tag_filter = cli.tag;
    config.search = cli.search;

    let output = render_page(&cli.path, &config);
    println!("{}", output.trim_end());
}
