mod format;
mod sale;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wvshop_core::{Currency, Locale};

#[derive(Debug, Parser)]
#[command(name = "wvshop-cli")]
#[command(about = "Fetch Weverse Shop sale data from the command line")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch sale (product) information by ID or URL
    Sale(SaleArgs),
    /// Print the storefront's current Next.js build ID
    BuildId {
        /// Bypass the cache and re-read the entry page
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(Debug, Args)]
#[command(group(
    clap::ArgGroup::new("target")
        .required(true)
        .args(["sale_id", "url"]),
))]
struct SaleArgs {
    /// Sale ID to fetch
    #[arg(short = 's', long)]
    sale_id: Option<i64>,
    /// Sale page URL, e.g. https://shop.weverse.io/en/shop/USD/artists/3/sales/43782
    #[arg(short = 'u', long)]
    url: Option<String>,
    /// Owning artist ID; detected automatically when omitted
    #[arg(short = 'a', long)]
    artist_id: Option<i64>,
    /// Locale (en, ko, ja, zh-CN, zh-tw, es); defaults to WVSHOP_DEFAULT_LOCALE
    #[arg(short = 'l', long)]
    locale: Option<Locale>,
    /// Currency (USD, KRW, JPY, CNY, MXN); defaults to WVSHOP_DEFAULT_CURRENCY
    #[arg(short = 'c', long)]
    currency: Option<Currency>,
    /// Print the validated record as JSON instead of formatted text
    #[arg(long)]
    json: bool,
    /// Refresh the build ID cache before fetching
    #[arg(long)]
    refresh_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = wvshop_core::load_app_config()?;
    config.build_id_cache_path = with_default_cache_path(config.build_id_cache_path.take());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        cache_path = ?config.build_id_cache_path,
        base_url = %config.base_url,
        "starting wvshop-cli"
    );
    let client = wvshop_scraper::ShopClient::from_config(&config)?;

    match cli.command {
        Commands::Sale(args) => sale::run_sale(&client, &config, &args).await,
        Commands::BuildId { refresh } => sale::run_build_id(&client, refresh).await,
    }
}

/// The binary persists the build ID across runs: without an explicit
/// `WVSHOP_BUILD_ID_CACHE_PATH` it uses the platform cache directory.
fn with_default_cache_path(configured: Option<PathBuf>) -> Option<PathBuf> {
    configured.or_else(|| dirs::cache_dir().map(|dir| dir.join("wvshop").join("buildid.json")))
}

#[cfg(test)]
mod tests;
