//! Typed sale payload returned by the storefront's Next.js data endpoint.
//!
//! ## Observed shape (`GET:/api/v1/sales/:saleId` query)
//!
//! ### Numbers
//! IDs, stock IDs and image dimensions are always integers. Prices are
//! integers in KRW/JPY shops but may carry a fractional part in USD/MXN, so
//! every price field is modelled as `f64`.
//!
//! ### Opaque arrays
//! `emblems`, `eventGuides`, `cautionInfos`, `option.variants` and
//! `variantOptionLocation` change shape between sale types and carry nothing
//! the watcher needs. They are kept as raw JSON values.
//!
//! ### Optional fields
//! `descriptionInfos`, `returnInfosId`, `relatedSaleGroupId`, `metaTag` and
//! `optionOrderLimit` are omitted entirely (never `null`) when not set.
//!
//! The payload is checked against [`crate::schema`] before it is deserialized
//! into these types, so every violation is reported at once instead of serde's
//! first-error-wins behaviour.

use serde::{Deserialize, Serialize};
use wvshop_core::StockStatus;

/// A single sale (product page) on the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub sale_id: i64,
    pub partner_code: String,
    /// Storefront section, e.g. `"MERCH"` or `"ALBUM"`.
    pub section_type: String,
    pub thumbnail_image_urls: Vec<String>,
    /// Display status such as `"SALE"` or `"SOLD_OUT"`.
    pub status: String,
    pub status_code: String,
    pub label_artist_info: ArtistInfo,
    pub name: String,
    pub price: PriceInfo,
    pub icons: Vec<String>,
    pub emblems: Vec<serde_json::Value>,
    /// ISO-8601 timestamp string exactly as the storefront returns it.
    pub sale_start_at: String,
    pub event_guides: Vec<serde_json::Value>,
    pub shipping: ShippingInfo,
    pub order_limit_info: OrderLimitInfo,
    pub detail_images: Vec<DetailImage>,
    pub is_share_enable: bool,
    pub is_digital_live: bool,
    pub is_membership_benefit: bool,
    pub is_cart_usable: bool,
    pub is_cart_button_display: bool,
    pub is_shipping_address_required: bool,
    pub is_order_limited_per_user: bool,
    pub is_seo_report: bool,
    pub option: OptionInfo,
    pub caution_infos: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_infos: Option<Vec<DescriptionInfo>>,
    pub notification_infos: Vec<NotificationInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_infos_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_sale_group_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_tag: Option<serde_json::Map<String, serde_json::Value>>,
}

impl SaleRecord {
    /// Artist (owning entity) this sale belongs to.
    #[must_use]
    pub fn artist_id(&self) -> i64 {
        self.label_artist_info.label_artist_id
    }

    #[must_use]
    pub fn options(&self) -> &[SaleOption] {
        &self.option.options
    }

    /// Options that can currently be purchased.
    pub fn available_options(&self) -> impl Iterator<Item = &SaleOption> {
        self.option.options.iter().filter(|o| !o.is_sold_out)
    }

    #[must_use]
    pub fn sold_out_count(&self) -> usize {
        self.option.options.iter().filter(|o| o.is_sold_out).count()
    }

    /// `true` if at least one option is in stock.
    #[must_use]
    pub fn has_stock(&self) -> bool {
        self.available_options().next().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInfo {
    pub label_artist_id: i64,
    pub name: String,
    pub short_name: String,
    pub logo_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    pub original_price: f64,
    pub sale_price: f64,
    pub discount_percent: f64,
    pub is_discount_display: bool,
    pub earned_cash: f64,
    pub is_tax_included: bool,
    pub is_tax_deductible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailImage {
    pub image_url: String,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub shipping_group_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLimitInfo {
    pub descriptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionOrderLimit {
    pub order_limit_type: String,
    pub max_order_quantity: i64,
}

/// One purchasable option (size, member version, ...) of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOption {
    pub sale_stock_id: i64,
    pub sale_stock_ids: Vec<i64>,
    pub sale_option_name: String,
    pub is_sold_out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_order_limit: Option<OptionOrderLimit>,
    pub variant_option_location: Vec<serde_json::Value>,
    pub option_add_price: f64,
    pub option_sale_price: f64,
}

impl SaleOption {
    #[must_use]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::from_sold_out(self.is_sold_out)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionInfo {
    /// e.g. `"SINGLE"` or `"COMBINATION"`.
    pub option_selection_type: String,
    pub options: Vec<SaleOption>,
    pub has_option_add_price: bool,
    pub variants: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInfo {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionInfo {
    pub descriptions: Vec<String>,
}
