//! Streaming parser for `GetSellerListResponse` pages.
//!
//! Uses the quick-xml event reader rather than a DOM mapping. That choice
//! sidesteps the classic single-vs-list container ambiguity: every `<Item>`
//! start tag appends one record, so a page with exactly one listing flows
//! through the same path as a page with two hundred. Tag names are
//! case-normalized before matching.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::EbayError;
use crate::types::{ParsedPage, RawListing};

/// Parses one listings page into records plus pagination metadata.
///
/// Scalar item fields are first-wins: the first `Title` seen inside an
/// `<Item>` is the item title, and later occurrences in nested structures
/// (variations, shipping details) are ignored. `PictureURL` accumulates.
///
/// # Errors
///
/// Returns [`EbayError::Xml`] when the document is not well-formed. The
/// caller treats that as fatal for the whole multi-page fetch.
pub fn parse_page(xml: &str) -> Result<ParsedPage, EbayError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut listings = Vec::new();
    let mut current: Option<RawListing> = None;
    let mut in_pagination = false;
    let mut current_tag = String::new();
    let mut page_number = None;
    let mut total_pages = None;
    let mut ack = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = tag_name(&e);
                match name.as_str() {
                    "item" => current = Some(RawListing::default()),
                    "paginationresult" => in_pagination = true,
                    "currentprice" => {
                        if let Some(listing) = current.as_mut() {
                            if listing.currency.is_none() {
                                listing.currency = currency_attr(&e);
                            }
                        }
                    }
                    _ => {}
                }
                current_tag = name;
            }
            Ok(Event::Empty(e)) => {
                // Self-closing price nodes still carry the currency attribute.
                if tag_name(&e) == "currentprice" {
                    if let Some(listing) = current.as_mut() {
                        if listing.currency.is_none() {
                            listing.currency = currency_attr(&e);
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = String::from_utf8_lossy(&name_buf).to_ascii_lowercase();
                match name.as_str() {
                    "item" => {
                        if let Some(listing) = current.take() {
                            listings.push(listing);
                        }
                    }
                    "paginationresult" => in_pagination = false,
                    _ => {}
                }
                // Text after a child closes belongs to the parent, which we
                // never capture; clearing avoids misattribution.
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default().trim().to_owned();
                if text.is_empty() {
                    continue;
                }
                if in_pagination {
                    match current_tag.as_str() {
                        "totalnumberofpages" => total_pages = text.parse().ok(),
                        "pagenumber" => page_number = text.parse().ok(),
                        _ => {}
                    }
                } else if let Some(listing) = current.as_mut() {
                    apply_item_text(listing, &current_tag, text);
                } else {
                    // Top-level response fields. PageNumber lives beside
                    // PaginationResult, not inside it.
                    match current_tag.as_str() {
                        "ack" if ack.is_none() => ack = Some(text),
                        "pagenumber" if page_number.is_none() => {
                            page_number = text.parse().ok();
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(EbayError::Xml(e)),
            _ => {}
        }
    }

    Ok(ParsedPage {
        listings,
        page_number,
        total_pages,
        ack,
    })
}

/// Lowercased local tag name of a start/empty event.
fn tag_name(e: &BytesStart<'_>) -> String {
    let name_buf = e.name().as_ref().to_vec();
    String::from_utf8_lossy(&name_buf).to_ascii_lowercase()
}

/// The `currencyID` attribute of a price node, when present and non-empty.
fn currency_attr(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .filter_map(Result::ok)
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(b"currencyid"))
        .and_then(|attr| attr.unescape_value().ok())
        .map(|v| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Routes element text into the current record. Scalars are first-wins.
fn apply_item_text(listing: &mut RawListing, tag: &str, text: String) {
    match tag {
        "itemid" => set_if_none(&mut listing.item_id, text),
        "title" => set_if_none(&mut listing.title, text),
        "currentprice" => set_if_none(&mut listing.price_text, text),
        "pictureurl" => listing.picture_urls.push(text),
        "galleryurl" => set_if_none(&mut listing.gallery_url, text),
        "viewitemurl" => set_if_none(&mut listing.view_item_url, text),
        "quantity" => set_if_none(&mut listing.quantity, text),
        _ => {}
    }
}

fn set_if_none(slot: &mut Option<String>, value: String) {
    if slot.is_none() {
        *slot = Some(value);
    }
}
