//! Normalization from raw Trading API records to [`yarnshop_core::Product`].
//!
//! Every rule carries a deterministic fallback, so normalization never
//! fails: a record missing all optional fields still yields a structurally
//! valid product. The one exception is a record without an item id, which
//! is skipped entirely — a product with no identity cannot be carted or
//! linked back to the marketplace.

use yarnshop_core::Product;

use crate::types::RawListing;

const DEFAULT_CURRENCY: &str = "GBP";
const LISTING_URL_BASE: &str = "https://www.ebay.co.uk/itm";

/// The size token the thumbnail rewrite targets.
const LARGE_SIZE_TOKEN: &str = "s-l800";

/// Normalizes one raw listing. Returns `None` only when the item id is
/// absent or empty.
#[must_use]
pub fn normalize_listing(raw: &RawListing) -> Option<Product> {
    let id = raw
        .item_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_owned();

    let (price, price_value) = normalize_price(raw.price_text.as_deref());
    let currency = raw
        .currency
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());

    let image = raw
        .picture_urls
        .first()
        .cloned()
        .or_else(|| raw.gallery_url.clone())
        .filter(|u| !u.is_empty());
    let image_large = image.as_deref().map(upscale_image_url);

    let url = raw
        .view_item_url
        .clone()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| format!("{LISTING_URL_BASE}/{id}"));

    let quantity = raw
        .quantity
        .clone()
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| "0".to_owned());

    Some(Product {
        id,
        title: raw.title.clone().unwrap_or_default(),
        price,
        price_value,
        currency,
        image,
        image_large,
        url: Some(url),
        quantity,
        description: None,
        platform: Some("eBay".to_owned()),
        category: None,
    })
}

/// Parses the upstream price text into the canonical pair of a
/// two-decimal string and a numeric value.
///
/// Missing, unparseable, or negative input collapses to `("0.00", 0.0)`.
fn normalize_price(text: Option<&str>) -> (String, f64) {
    match text.and_then(|t| t.trim().parse::<f64>().ok()) {
        Some(value) if value.is_finite() && value >= 0.0 => (format!("{value:.2}"), value),
        _ => ("0.00".to_owned(), 0.0),
    }
}

/// Rewrites an eBay CDN thumbnail URL to its large variant.
///
/// The CDN encodes the image size in the filename as `s-l<digits>.<ext>`;
/// rewriting the token to `s-l800` requests the 800px rendition of the same
/// image. Total function: any input that does not match the pattern is
/// returned unchanged, so this step can never fail a normalization.
#[must_use]
pub fn upscale_image_url(url: &str) -> String {
    let Some(token_at) = url.rfind("s-l") else {
        return url.to_owned();
    };
    let digits_start = token_at + 3;
    let rest = &url[digits_start..];
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return url.to_owned();
    }
    let suffix = &rest[digits_len..];
    if !suffix.starts_with('.') {
        return url.to_owned();
    }
    format!("{}{LARGE_SIZE_TOKEN}{suffix}", &url[..token_at])
}
