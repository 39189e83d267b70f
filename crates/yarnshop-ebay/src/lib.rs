pub mod catalog;
pub mod client;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod token;
pub mod types;

pub use catalog::{CatalogOutcome, CatalogService, MAX_PAGES};
pub use client::TradingClient;
pub use error::EbayError;
pub use normalize::{normalize_listing, upscale_image_url};
pub use parse::parse_page;
pub use token::TokenProvider;
pub use types::{ParsedPage, RawListing, RawListingPage};
