//! Intermediate shapes between the Trading API wire format and the canonical
//! [`yarnshop_core::Product`].
//!
//! ## Observed shape of `GetSellerListResponse`
//!
//! ### Item container
//! Items arrive under `<ItemArray><Item>…</Item></ItemArray>`. A page with a
//! single listing has one `<Item>` element rather than a list; the streaming
//! parser appends a record per `<Item>` start tag, so both cardinalities
//! take the same path.
//!
//! ### Price
//! `<SellingStatus><CurrentPrice currencyID="GBP">24.99</CurrentPrice>` —
//! the amount is element text, the currency an attribute. Either may be
//! absent on malformed or ended listings.
//!
//! ### Pictures
//! `<PictureDetails>` carries zero or more `<PictureURL>` elements plus an
//! optional `<GalleryURL>` thumbnail. Picture URLs point at the eBay CDN
//! with a size token in the filename (`s-l140`, `s-l300`, …).
//!
//! ### Pagination
//! `<PaginationResult><TotalNumberOfPages>` is the loop-termination signal.
//! Some responses omit it entirely; that means the page at hand is the last.

/// The unparsed body of one listings page, plus the HTTP status it arrived
/// with. Error-bearing 2xx bodies are handed to the parser verbatim — the
/// Trading API reports most failures inside the XML, not via the status.
#[derive(Debug, Clone)]
pub struct RawListingPage {
    pub status: u16,
    pub body: String,
}

/// One `<Item>` as extracted from the page, before normalization. Every
/// field is optional at this stage; fallback rules are applied in
/// [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub item_id: Option<String>,
    pub title: Option<String>,
    /// Text content of `CurrentPrice`, e.g. `"24.99"`.
    pub price_text: Option<String>,
    /// The `currencyID` attribute on the price node.
    pub currency: Option<String>,
    /// All `PictureURL` values in document order.
    pub picture_urls: Vec<String>,
    pub gallery_url: Option<String>,
    pub view_item_url: Option<String>,
    pub quantity: Option<String>,
}

/// A parsed listings page: its records plus pagination metadata.
#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub listings: Vec<RawListing>,
    /// Page number reported by `PaginationResult`, when present.
    pub page_number: Option<u32>,
    /// Total page count reported by `PaginationResult`. Absent means the
    /// response did not say, which we treat as "this was the last page".
    pub total_pages: Option<u32>,
    /// The response `Ack` value (`Success`, `Warning`, `Failure`), kept for
    /// diagnostics only.
    pub ack: Option<String>,
}

impl ParsedPage {
    /// Whether more pages follow the given current page.
    #[must_use]
    pub fn has_more(&self, current_page: u32) -> bool {
        self.total_pages.is_some_and(|total| current_page < total)
    }
}
