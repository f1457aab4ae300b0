//! Weverse Shop sale scraper.
//!
//! The storefront is a Next.js app; sale details are read from its
//! `/_next/data/{buildId}/...` endpoint, which needs the current deployment's
//! build ID. [`ShopClient`] resolves and caches that ID, fetches the sale and
//! validates the payload into a [`SaleRecord`].

pub mod build_id;
pub mod cache;
pub mod client;
pub mod error;
mod http;
pub mod parse;
mod schema;
pub mod types;

pub use build_id::{extract_build_id, BuildIdResolver};
pub use cache::{BuildIdCache, BuildIdStore, CacheEntry, FileStore, MemoryStore};
pub use client::{sale_data_url, SaleOptions, SaleRequest, ShopClient, PLACEHOLDER_ARTIST_ID};
pub use error::{ShopError, ValidationIssue};
pub use parse::{decode_body, extract_artist_id, extract_sale};
pub use types::{ArtistInfo, PriceInfo, SaleOption, SaleRecord};
