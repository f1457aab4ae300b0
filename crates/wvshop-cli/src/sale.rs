//! `sale` and `build-id` command handlers.

use anyhow::Context;
use wvshop_core::AppConfig;
use wvshop_scraper::{SaleOptions, ShopClient};

use crate::format::format_sale;
use crate::SaleArgs;

/// Resolves the target sale from `--sale-id` or `--url`.
pub(crate) fn target_sale_id(args: &SaleArgs) -> anyhow::Result<i64> {
    if let Some(sale_id) = args.sale_id {
        return Ok(sale_id);
    }
    let url = args.url.as_deref().unwrap_or_default();
    wvshop_core::sale_id_from_url(url)
        .ok_or_else(|| anyhow::anyhow!("could not find a sale ID in URL '{url}'"))
}

/// Builds per-call options, falling back to the configured defaults.
pub(crate) fn sale_options(args: &SaleArgs, config: &AppConfig) -> SaleOptions {
    SaleOptions {
        artist_id: args.artist_id,
        locale: args.locale.unwrap_or(config.default_locale),
        currency: args.currency.unwrap_or(config.default_currency),
    }
}

/// Fetches one sale and prints it.
///
/// Progress lines go to stderr so `--json` output can be piped.
///
/// # Errors
///
/// Returns an error if the sale ID cannot be determined or the fetch fails.
pub(crate) async fn run_sale(
    client: &ShopClient,
    config: &AppConfig,
    args: &SaleArgs,
) -> anyhow::Result<()> {
    let sale_id = target_sale_id(args)?;
    let options = sale_options(args, config);
    tracing::info!(
        sale_id,
        artist_id = ?options.artist_id,
        locale = %options.locale,
        currency = %options.currency,
        "fetching sale"
    );

    if args.refresh_cache {
        eprintln!("Refreshing build ID cache...");
        let build_id = client.resolve_build_id(true).await?;
        tracing::info!(%build_id, "build ID cache refreshed");
        eprintln!("New build ID: {build_id}");
    }

    eprintln!("Fetching sale data for ID: {sale_id}...");
    let sale = client
        .get_sale(sale_id, &options)
        .await
        .with_context(|| format!("failed to fetch sale {sale_id}"))?;
    tracing::debug!(
        sale_id,
        name = %sale.name,
        options = sale.options().len(),
        "sale fetched"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sale)?);
    } else {
        println!("{}", format_sale(&sale, options.currency));
    }

    Ok(())
}

/// Prints the current build ID.
///
/// # Errors
///
/// Returns an error if the entry page cannot be fetched or parsed.
pub(crate) async fn run_build_id(client: &ShopClient, refresh: bool) -> anyhow::Result<()> {
    let build_id = client.resolve_build_id(refresh).await?;
    tracing::debug!(%build_id, forced = refresh, "build ID resolved");
    println!("{build_id}");
    Ok(())
}
