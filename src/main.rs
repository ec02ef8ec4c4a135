//! Modscout command-line interface
//!
//! A thin harness over the library surface: scrape a listing page, inspect
//! one mod, dump its raw file records, or resolve a dependency set.

use clap::{Parser, Subcommand};
use modscout::config::load_config;
use modscout::scraper::ScraperService;
use modscout::{Config, ModDependency, ModSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Modscout: mod metadata scraper and dependency resolver
#[derive(Parser, Debug)]
#[command(name = "modscout")]
#[command(version = "1.0.0")]
#[command(about = "Scrape mod metadata and resolve mod dependencies", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults apply without one)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape one listing page of mod summaries with details
    List {
        /// Listing page number
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Search term to filter the listing
        #[arg(long)]
        search: Option<String>,
    },

    /// Fully populate one mod from its page URL
    Details {
        /// The mod's page URL
        url: String,

        /// Game versions to keep download options for
        #[arg(long = "game-version")]
        versions: Vec<String>,
    },

    /// Dump the raw embedded file records of one mod page
    Files {
        /// The mod's page URL
        url: String,
    },

    /// Resolve dependency pages against target game versions
    Resolve {
        /// Dependency page URLs
        urls: Vec<String>,

        /// Game versions to keep download options for
        #[arg(long = "game-version")]
        versions: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    let service = ScraperService::new(config)?;

    match cli.command {
        Command::List { page, search } => {
            let mods = service.list_mods(page, search.as_deref()).await?;
            print_summaries(&mods);
        }
        Command::Details { url, versions } => {
            let summary = service.get_mod_details(&url, &versions).await?;
            print_details(&summary);
        }
        Command::Files { url } => {
            let records = service.mod_file_records(&url).await?;
            for record in &records {
                println!(
                    "{}  {}  {}  {}  {}",
                    record.version, record.loader, record.size, record.date, record.download_url
                );
            }
            println!("{} file records", records.len());
        }
        Command::Resolve { urls, versions } => {
            let stubs = urls
                .iter()
                .map(|url| ModDependency::stub(url.clone(), stub_name(url)))
                .collect();
            let resolved = service.resolve_dependencies(stubs, &versions).await?;
            for dep in &resolved {
                print_dependency(dep, 0);
            }
        }
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("modscout=info,warn"),
            1 => EnvFilter::new("modscout=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Derives a display name for a stub from its URL slug
fn stub_name(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .trim_end_matches(".html")
        .to_string()
}

fn print_summaries(mods: &[ModSummary]) {
    for summary in mods {
        println!("{}", summary.name);
        println!("  {}", summary.page_link);
        if !summary.versions.is_empty() {
            println!("  versions: {}", summary.versions.join(", "));
        }
        if !summary.loaders.is_empty() {
            println!("  loaders: {}", summary.loaders.join(", "));
        }
        println!("  files: {}", summary.downloads.len());
    }
    println!("\n{} mods", mods.len());
}

fn print_details(summary: &ModSummary) {
    println!("{}", summary.name);
    println!("  {}", summary.page_link);
    if !summary.versions.is_empty() {
        println!("  versions: {}", summary.versions.join(", "));
    }
    for option in &summary.downloads {
        let count = if option.download_count.is_empty() {
            String::new()
        } else {
            format!("  ({} downloads)", option.download_count)
        };
        println!("  [{}] {} {}{}", option.version, option.loader, option.url, count);
    }
    for shot in &summary.screenshots {
        println!("  screenshot: {}", shot);
    }
    for dep in &summary.dependencies {
        println!("  requires: {} ({})", dep.name, dep.page_link);
    }
}

fn print_dependency(dep: &ModDependency, indent: usize) {
    let pad = "  ".repeat(indent);
    println!("{}{} ({})", pad, dep.name, dep.page_link);
    for option in &dep.downloads {
        println!("{}  [{}] {}", pad, option.version, option.url);
    }
    for sub in &dep.sub_dependencies {
        print_dependency(sub, indent + 1);
    }
}
