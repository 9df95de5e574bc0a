use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use coinafrique_scraper::cleaner::{format_fcfa, TableSummary};
use coinafrique_scraper::config::Config;
use coinafrique_scraper::export::{export_file_name, write_csv};
use coinafrique_scraper::models::Category;
use coinafrique_scraper::scrapers::{page_url, CoinAfriqueScraper};
use coinafrique_scraper::session::{Session, TableKind};
use coinafrique_scraper::utils::http::HttpFetcher;

#[derive(Parser)]
#[command(name = "coinafrique-scraper")]
#[command(version, about = "Scrape, clean and export CoinAfrique animal listings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a category and export it as CSV
    Scrape {
        /// Category display name or URL segment (e.g. "Chiens", "autres-animaux")
        #[arg(short, long)]
        category: Category,

        /// Number of pages to fetch (1-50)
        #[arg(short, long, default_value_t = 3)]
        pages: u32,

        /// Table to export: raw or clean
        #[arg(short, long, default_value_t = TableKind::Clean)]
        table: TableKind,

        /// Output file; defaults to coinafrique_<category>_<table>.csv
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print listing count, average price and top locations
        #[arg(long)]
        summary: bool,

        /// Print the summary as JSON
        #[arg(long, requires = "summary")]
        json: bool,
    },

    /// List the supported categories and their listing URLs
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coinafrique_scraper=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Arc::new(Config::load().context("Failed to load configuration")?);

    match cli.command {
        Commands::Categories => {
            for category in Category::ALL {
                println!(
                    "{:<24} {}",
                    category.display_name(),
                    page_url(&config.base_url, category, 1)?
                );
            }
        }
        Commands::Scrape {
            category,
            pages,
            table,
            output,
            summary,
            json,
        } => {
            let fetcher = HttpFetcher::from_config(&config)?;
            let scraper = CoinAfriqueScraper::new(config.clone());

            let batch = scraper
                .scrape_with(&fetcher, category, pages, None, |progress| {
                    info!(
                        "Scraping {} - Page {}/{} ({:.0}%)",
                        category,
                        progress.page,
                        progress.total,
                        progress.fraction() * 100.0
                    );
                })
                .await
                .with_context(|| format!("Failed to scrape {}", category))?;

            let mut session = Session::new();
            let current = session.replace(batch);

            for skip in &current.batch.skipped {
                warn!("{}", skip);
            }
            if !current.clean.dropped_columns.is_empty() {
                let dropped: Vec<_> = current
                    .clean
                    .dropped_columns
                    .iter()
                    .map(|c| c.header())
                    .collect();
                info!("Columns dropped (no data available): {}", dropped.join(", "));
            }
            info!(
                "Scraping finished! {} listings found ({} pages failed, {} cards skipped)",
                current.batch.table.len(),
                current.batch.pages_failed(),
                current.batch.cards_skipped()
            );

            let view = session
                .view(table)
                .context("No batch in the current session")?;

            if summary {
                let stats = TableSummary::from_view(view);
                if json {
                    println!("{}", serde_json::to_string_pretty(&stats)?);
                } else {
                    println!("Listings:      {}", stats.listing_count);
                    println!("Average price: {}", format_fcfa(stats.average_price));
                    println!("Category:      {}", category);
                    println!("Top locations:");
                    for (location, count) in &stats.top_locations {
                        println!("  {:<30} {}", location, count);
                    }
                }
            }

            let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(category, table)));
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(view, BufWriter::new(file))?;
            info!("Wrote {} rows to {}", view.len(), path.display());
        }
    }

    Ok(())
}
