//! Human-readable rendering of a sale for the terminal.

use wvshop_core::{Currency, StockStatus};
use wvshop_scraper::{SaleOption, SaleRecord};

const RULE: &str =
    "================================================================================";

/// Formats a price with the currency's symbol and thousands separators.
/// Fractions are kept to at most two digits, trailing zeros dropped.
pub(crate) fn format_price(price: f64, currency: Currency) -> String {
    let sign = if price < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part.is_empty() {
        format!("{sign}{}{grouped}", currency.symbol())
    } else {
        format!("{sign}{}{grouped}.{frac_part}", currency.symbol())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn option_line(option: &SaleOption, currency: Currency) -> String {
    let status = match option.stock_status() {
        StockStatus::InStock => "[In Stock]",
        StockStatus::SoldOut => "[SOLD OUT]",
    };
    let limit = option
        .option_order_limit
        .as_ref()
        .map(|l| format!(", max {} per order", l.max_order_quantity))
        .unwrap_or_default();
    format!(
        "     - {} {status} ({}{limit})",
        option.sale_option_name,
        format_price(option.option_sale_price, currency)
    )
}

fn options_summary(sale: &SaleRecord) -> String {
    let total = sale.options().len();
    if total == 0 {
        return "   Options:  None".to_string();
    }
    let sold_out = sale.sold_out_count();
    let available = total - sold_out;
    if sold_out > 0 {
        format!("   Options:  {available} available ({sold_out} sold out) of {total} total")
    } else {
        format!("   Options:  {available} available of {total} total")
    }
}

/// Renders the sale as a sectioned text report.
pub(crate) fn format_sale(sale: &SaleRecord, currency: Currency) -> String {
    let artist = &sale.label_artist_info;
    let price = &sale.price;

    let mut lines = vec![
        RULE.to_string(),
        "  WEVERSE SHOP - SALE INFORMATION".to_string(),
        RULE.to_string(),
        String::new(),
        "  [Product Details]".to_string(),
        format!("   ID:       {}", sale.sale_id),
        format!("   Name:     {}", sale.name),
        format!("   Status:   {}", sale.status),
        format!("   Type:     {}", sale.section_type),
        format!("   Partner:  {}", sale.partner_code),
        String::new(),
        "  [Artist]".to_string(),
        format!("   Name:     {} ({})", artist.name, artist.short_name),
        format!("   ID:       {}", artist.label_artist_id),
        String::new(),
        "  [Pricing]".to_string(),
        format!("   Price:    {}", format_price(price.sale_price, currency)),
    ];
    if price.discount_percent > 0.0 {
        lines.push(format!(
            "   Discount: {}% off (Original: {})",
            price.discount_percent,
            format_price(price.original_price, currency)
        ));
    }
    lines.extend([
        format!(
            "   Cash:     {} earned",
            format_price(price.earned_cash, currency)
        ),
        format!(
            "   Tax:      {}",
            if price.is_tax_included {
                "Included"
            } else {
                "Not included"
            }
        ),
        String::new(),
        "  [Availability]".to_string(),
        format!("   Sale Start: {}", sale.sale_start_at),
        format!(
            "   Cart:       {}",
            if sale.is_cart_usable {
                "Available"
            } else {
                "Not available"
            }
        ),
        format!(
            "   Shipping:   {}",
            if sale.is_shipping_address_required {
                "Required"
            } else {
                "Not required"
            }
        ),
        String::new(),
        "  [Options]".to_string(),
        options_summary(sale),
    ]);
    lines.extend(sale.options().iter().map(|o| option_line(o, currency)));

    lines.push(String::new());
    lines.push("  [Order Limits]".to_string());
    if sale.order_limit_info.descriptions.is_empty() {
        lines.push("   None".to_string());
    } else {
        lines.extend(
            sale.order_limit_info
                .descriptions
                .iter()
                .map(|d| format!("   - {d}")),
        );
    }

    lines.extend([
        String::new(),
        "  [Features]".to_string(),
        format!("   - Digital Live: {}", yes_no(sale.is_digital_live)),
        format!(
            "   - Membership Benefit: {}",
            yes_no(sale.is_membership_benefit)
        ),
        format!("   - Share Enabled: {}", yes_no(sale.is_share_enable)),
        String::new(),
        "  [Images]".to_string(),
        format!("   Thumbnails: {}", sale.thumbnail_image_urls.len()),
        format!("   Details:    {}", sale.detail_images.len()),
        String::new(),
        RULE.to_string(),
    ]);

    lines.join("\n")
}
