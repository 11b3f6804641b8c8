mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "zuni")]
#[command(about = "Import marketplace products into the Zuni catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract product data from a marketplace page and print it as JSON
    Extract {
        /// Product page URL
        url: String,
        /// Saved copy of the rendered page to read instead of fetching `url`
        #[arg(long)]
        html_file: Option<PathBuf>,
    },
    /// Extract a product and submit it to the catalog
    Import {
        /// Product page URL
        url: String,
        /// Purchase link shown on the storefront
        #[arg(long)]
        affiliate_url: String,
        /// Saved copy of the rendered page to read instead of fetching `url`
        #[arg(long)]
        html_file: Option<PathBuf>,
        /// Print the payload without submitting it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the affiliate link for an item id or product URL
    AffiliateLink {
        item: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = zuni_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract { url, html_file } => {
            commands::extract::run_extract(&config, &url, html_file.as_deref()).await
        }
        Commands::Import {
            url,
            affiliate_url,
            html_file,
            dry_run,
        } => {
            commands::import::run_import(
                &config,
                &url,
                &affiliate_url,
                html_file.as_deref(),
                dry_run,
            )
            .await
        }
        Commands::AffiliateLink { item } => {
            let link = zuni_core::build_affiliate_url(&item, &config.affiliate_code)?;
            println!("{link}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
