mod error;
mod export;
mod fetch;
mod job;
mod model;
mod nlp;
mod orchestrator;
mod parser;
mod pipeline;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};

use crate::fetch::PageFetcher;
use crate::nlp::TextNormalizer;
use crate::pipeline::ScrapeConfig;

#[derive(Parser)]
#[command(name = "filme-scraper", about = "AdoroCinema film and review scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ScrapeArgs {
    /// Listing pages to scan
    #[arg(long, default_value_t = 2)]
    pages: u32,
    /// Max reviews collected per film
    #[arg(long, default_value_t = 40)]
    max_reviews: usize,
    /// Directory for the exported tables
    #[arg(long, default_value = "/tmp/filmes_csv")]
    out_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape films and reviews, export the two CSV tables
    Run(ScrapeArgs),
    /// Run, then tokenize/stem/lemmatize every summary and review
    Enrich(ScrapeArgs),
    /// Submit the SageMaker processing job that runs the scraper remotely
    Trigger,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let fetcher = PageFetcher::new()?;
            let config = ScrapeConfig {
                pages: args.pages,
                max_reviews: args.max_reviews,
            };
            let status = job::run_job(fetcher, config, &args.out_dir).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Enrich(args) => {
            let fetcher = PageFetcher::new()?;
            let config = ScrapeConfig {
                pages: args.pages,
                max_reviews: args.max_reviews,
            };
            let normalizer = TextNormalizer::new();
            let status =
                job::run_enriched_job(fetcher, config, &args.out_dir, &normalizer).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Commands::Trigger => {
            let status = orchestrator::trigger_job().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("Done in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
