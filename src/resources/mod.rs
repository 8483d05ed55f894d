//! Shortcuts for the admin REST resources.
//!
//! Each helper only shapes the path and payload; signing and dispatch are
//! left to [`Client::call`](crate::Client::call). Paths are scoped to the
//! `all` store view.

mod categories;
mod orders;
mod products;
mod shipments;

/// A sensible page size for [`Client::get_products`](crate::Client::get_products).
pub const DEFAULT_PAGE_SIZE: u32 = 100;

pub(crate) const REST_PREFIX: &str = "/rest/all/V1";

pub(crate) fn path(suffix: &str) -> String {
    format!("{}/{}", REST_PREFIX, suffix)
}
