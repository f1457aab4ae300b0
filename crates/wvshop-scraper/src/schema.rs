//! Field-level schema for the sale payload.
//!
//! `serde` stops at the first mismatch; when the storefront changes its payload
//! we want the full list of broken fields in one error. The schema below
//! mirrors [`crate::types::SaleRecord`] and is walked over the raw JSON value
//! before deserialization.

use serde_json::Value;

use crate::error::ValidationIssue;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Kind {
    /// JSON number without a fractional part.
    Integer,
    Number,
    Bool,
    String,
    /// Any JSON value, including `null`.
    Any,
    /// JSON object with arbitrary keys and values.
    Record,
    Object(&'static [Field]),
    Array(&'static Kind),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    name: &'static str,
    kind: Kind,
    required: bool,
}

const fn req(name: &'static str, kind: Kind) -> Field {
    Field {
        name,
        kind,
        required: true,
    }
}

/// May be absent; `null` is still a violation when present.
const fn opt(name: &'static str, kind: Kind) -> Field {
    Field {
        name,
        kind,
        required: false,
    }
}

const STRINGS: Kind = Kind::Array(&Kind::String);
const INTEGERS: Kind = Kind::Array(&Kind::Integer);
const ANYS: Kind = Kind::Array(&Kind::Any);

const PRICE: &[Field] = &[
    req("originalPrice", Kind::Number),
    req("salePrice", Kind::Number),
    req("discountPercent", Kind::Number),
    req("isDiscountDisplay", Kind::Bool),
    req("earnedCash", Kind::Number),
    req("isTaxIncluded", Kind::Bool),
    req("isTaxDeductible", Kind::Bool),
];

const ARTIST: &[Field] = &[
    req("labelArtistId", Kind::Integer),
    req("name", Kind::String),
    req("shortName", Kind::String),
    req("logoImageUrl", Kind::String),
];

const DETAIL_IMAGE: &[Field] = &[
    req("imageUrl", Kind::String),
    req("width", Kind::Integer),
    req("height", Kind::Integer),
];

const SHIPPING: &[Field] = &[req("shippingGroupId", Kind::Integer)];

const DESCRIPTIONS: &[Field] = &[req("descriptions", STRINGS)];

const OPTION_ORDER_LIMIT: &[Field] = &[
    req("orderLimitType", Kind::String),
    req("maxOrderQuantity", Kind::Integer),
];

const SALE_OPTION: &[Field] = &[
    req("saleStockId", Kind::Integer),
    req("saleStockIds", INTEGERS),
    req("saleOptionName", Kind::String),
    req("isSoldOut", Kind::Bool),
    opt("optionOrderLimit", Kind::Object(OPTION_ORDER_LIMIT)),
    req("variantOptionLocation", ANYS),
    req("optionAddPrice", Kind::Number),
    req("optionSalePrice", Kind::Number),
];

const OPTION_INFO: &[Field] = &[
    req("optionSelectionType", Kind::String),
    req("options", Kind::Array(&Kind::Object(SALE_OPTION))),
    req("hasOptionAddPrice", Kind::Bool),
    req("variants", ANYS),
];

const NOTIFICATION: &[Field] = &[
    req("title", Kind::String),
    req("description", Kind::String),
];

const SALE: &[Field] = &[
    req("saleId", Kind::Integer),
    req("partnerCode", Kind::String),
    req("sectionType", Kind::String),
    req("thumbnailImageUrls", STRINGS),
    req("status", Kind::String),
    req("statusCode", Kind::String),
    req("labelArtistInfo", Kind::Object(ARTIST)),
    req("name", Kind::String),
    req("price", Kind::Object(PRICE)),
    req("icons", STRINGS),
    req("emblems", ANYS),
    req("saleStartAt", Kind::String),
    req("eventGuides", ANYS),
    req("shipping", Kind::Object(SHIPPING)),
    req("orderLimitInfo", Kind::Object(DESCRIPTIONS)),
    req("detailImages", Kind::Array(&Kind::Object(DETAIL_IMAGE))),
    req("isShareEnable", Kind::Bool),
    req("isDigitalLive", Kind::Bool),
    req("isMembershipBenefit", Kind::Bool),
    req("isCartUsable", Kind::Bool),
    req("isCartButtonDisplay", Kind::Bool),
    req("isShippingAddressRequired", Kind::Bool),
    req("isOrderLimitedPerUser", Kind::Bool),
    req("isSeoReport", Kind::Bool),
    req("option", Kind::Object(OPTION_INFO)),
    req("cautionInfos", ANYS),
    opt("descriptionInfos", Kind::Array(&Kind::Object(DESCRIPTIONS))),
    req("notificationInfos", Kind::Array(&Kind::Object(NOTIFICATION))),
    opt("returnInfosId", Kind::Integer),
    opt("relatedSaleGroupId", Kind::Integer),
    opt("metaTag", Kind::Record),
];

/// Checks `payload` against the sale schema and returns every violation found,
/// in field declaration order. An empty vector means the payload is valid.
pub(crate) fn validate_sale(payload: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check(payload, Kind::Object(SALE), "", &mut issues);
    issues
}

fn check(value: &Value, kind: Kind, path: &str, issues: &mut Vec<ValidationIssue>) {
    match kind {
        Kind::Any => {}
        Kind::Integer => {
            if !(value.is_i64() || value.is_u64()) {
                mismatch("integer", value, path, issues);
            }
        }
        Kind::Number => {
            if !value.is_number() {
                mismatch("number", value, path, issues);
            }
        }
        Kind::Bool => {
            if !value.is_boolean() {
                mismatch("boolean", value, path, issues);
            }
        }
        Kind::String => {
            if !value.is_string() {
                mismatch("string", value, path, issues);
            }
        }
        Kind::Record => {
            if !value.is_object() {
                mismatch("object", value, path, issues);
            }
        }
        Kind::Array(item) => {
            let Some(items) = value.as_array() else {
                mismatch("array", value, path, issues);
                return;
            };
            for (idx, element) in items.iter().enumerate() {
                check(element, *item, &join(path, &idx.to_string()), issues);
            }
        }
        Kind::Object(fields) => {
            let Some(map) = value.as_object() else {
                mismatch("object", value, path, issues);
                return;
            };
            for field in fields {
                let field_path = join(path, field.name);
                match map.get(field.name) {
                    Some(v) => check(v, field.kind, &field_path, issues),
                    None if field.required => issues.push(ValidationIssue {
                        path: field_path,
                        message: "required".to_string(),
                    }),
                    None => {}
                }
            }
        }
    }
}

fn mismatch(expected: &str, value: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    issues.push(ValidationIssue {
        path: path.to_string(),
        message: format!("expected {expected}, received {}", json_type(value)),
    });
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "non-integer number",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
