mod crawler;
mod fetcher;
mod parser;
mod settings;
mod store;
mod text;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use crawler::Crawler;
use fetcher::HttpFetcher;
use settings::Settings;
use store::OutputLayout;

#[derive(Parser)]
#[command(
    name = "condition_scraper",
    about = "Scrape Mayo Clinic condition pages into a JSON file"
)]
struct Cli {
    /// Output file, rewritten after every extracted page
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output shape: nested ([[{...}], ...]) or flat ([{...}, ...])
    #[arg(short, long)]
    layout: Option<OutputLayout>,
    /// Max condition pages to fetch (default: all)
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(output) = cli.output {
        settings.output = output;
    }
    if let Some(layout) = cli.layout {
        settings.layout = layout;
    }
    if cli.limit.is_some() {
        settings.limit = cli.limit;
    }
    info!(?settings, "Starting condition scraper");

    let fetcher = HttpFetcher::new();
    let mut crawler = Crawler::new(&fetcher, &settings);
    let stats = crawler.run()?;

    println!(
        "Done: {} records written to {} ({} letter pages, {} skipped; {} condition pages, {} failed, {} without content) in {:.1}s",
        crawler.results().len(),
        settings.output.display(),
        stats.letters,
        stats.letters_skipped,
        stats.conditions,
        stats.conditions_skipped,
        stats.missing_structure,
        t0.elapsed().as_secs_f64()
    );
    Ok(())
}
