use serde::{Deserialize, Serialize};

/// A storefront product, normalized from an eBay listing or taken from the
/// built-in mock catalog.
///
/// This is the exact JSON shape the catalog UI and the cart consume. Field
/// names are part of that contract, hence the camelCase renames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// eBay item ID (or mock ID). Never empty; records without one are
    /// dropped during normalization.
    pub id: String,
    pub title: String,
    /// Price as a decimal string with two decimal places, e.g. `"24.99"`.
    pub price: String,
    /// Numeric price for cart arithmetic. `0.0` when the upstream price
    /// text was missing or unparseable.
    #[serde(rename = "priceValue")]
    pub price_value: f64,
    /// ISO 4217 currency code. Defaults to `"GBP"` for this UK seller.
    pub currency: String,
    /// Primary listing image URL, if the listing carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Upsized variant of `image` when the eBay CDN thumbnail pattern is
    /// present in the URL; otherwise identical to `image`.
    #[serde(rename = "imageLarge", default, skip_serializing_if = "Option::is_none")]
    pub image_large: Option<String>,
    /// Canonical listing URL on the marketplace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Quantity available, as reported upstream. `"0"` when absent.
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source platform label shown in the UI, e.g. `"eBay"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Returns `true` when this product passes the given filters.
    ///
    /// Platform and category are exact matches with `"all"` (or `None`)
    /// meaning "no filter". The search term is a case-insensitive substring
    /// match against title and description.
    #[must_use]
    pub fn matches(
        &self,
        platform: Option<&str>,
        category: Option<&str>,
        search: Option<&str>,
    ) -> bool {
        if let Some(p) = platform.filter(|p| *p != "all") {
            if self.platform.as_deref() != Some(p) {
                return false;
            }
        }
        if let Some(c) = category.filter(|c| *c != "all") {
            if self.category.as_deref() != Some(c) {
                return false;
            }
        }
        if let Some(term) = search.filter(|t| !t.is_empty()) {
            let needle = term.to_lowercase();
            let in_title = self.title.to_lowercase().contains(&needle);
            let in_description = self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }
}

/// Filters a product list by platform, category, and search term.
#[must_use]
pub fn filter_products(
    products: Vec<Product>,
    platform: Option<&str>,
    category: Option<&str>,
    search: Option<&str>,
) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| p.matches(platform, category, search))
        .collect()
}

fn mock_product(
    id: &str,
    title: &str,
    price: &str,
    price_value: f64,
    image_slug: &str,
    description: &str,
    platform: &str,
    category: &str,
) -> Product {
    Product {
        id: id.to_owned(),
        title: title.to_owned(),
        price: price.to_owned(),
        price_value,
        currency: "GBP".to_owned(),
        image: Some(format!(
            "https://via.placeholder.com/300x300?text={image_slug}"
        )),
        image_large: Some(format!(
            "https://via.placeholder.com/300x300?text={image_slug}"
        )),
        url: None,
        quantity: "1".to_owned(),
        description: Some(description.to_owned()),
        platform: Some(platform.to_owned()),
        category: Some(category.to_owned()),
    }
}

/// The built-in catalog served when the eBay integration is unavailable.
///
/// Kept intentionally small: enough for the storefront to render a sensible
/// page instead of a hard error while the marketplace side is down.
#[must_use]
pub fn mock_catalog() -> Vec<Product> {
    vec![
        mock_product(
            "tik1",
            "Luxury Merino Wool Yarn",
            "19.99",
            19.99,
            "Merino+Wool",
            "Premium 100% merino wool yarn, perfect for knitting and crocheting",
            "TikTok Shop",
            "Wool",
        ),
        mock_product(
            "tik2",
            "Organic Cotton Yarn",
            "14.99",
            14.99,
            "Organic+Cotton",
            "Soft and eco-friendly cotton yarn",
            "TikTok Shop",
            "Cotton",
        ),
        mock_product(
            "eb1",
            "Alpaca Blend Yarn",
            "24.99",
            24.99,
            "Alpaca+Blend",
            "Luxurious alpaca blend yarn, perfect for winter projects",
            "eBay",
            "Wool",
        ),
        mock_product(
            "eb2",
            "Silk Yarn",
            "29.99",
            29.99,
            "Silk+Yarn",
            "Luxurious silk yarn for special projects",
            "eBay",
            "Silk",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_catalog_has_four_products_with_unique_ids() {
        let catalog = mock_catalog();
        assert_eq!(catalog.len(), 4);
        let mut ids: Vec<_> = catalog.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn mock_catalog_products_default_to_gbp() {
        assert!(mock_catalog().iter().all(|p| p.currency == "GBP"));
    }

    #[test]
    fn serializes_with_ui_field_names() {
        let product = &mock_catalog()[0];
        let json = serde_json::to_value(product).expect("serialize");
        assert!(json["priceValue"].is_number());
        assert!(json["imageLarge"].is_string());
        assert!(json.get("price_value").is_none());
    }

    #[test]
    fn absent_optional_fields_are_omitted() {
        let mut product = mock_catalog()[0].clone();
        product.image = None;
        product.image_large = None;
        product.url = None;
        let json = serde_json::to_value(&product).expect("serialize");
        assert!(json.get("image").is_none());
        assert!(json.get("imageLarge").is_none());
        assert!(json.get("url").is_none());
    }

    #[test]
    fn platform_filter_is_exact_match() {
        let filtered = filter_products(mock_catalog(), Some("eBay"), None, None);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.platform.as_deref() == Some("eBay")));
    }

    #[test]
    fn all_sentinel_disables_platform_filter() {
        let filtered = filter_products(mock_catalog(), Some("all"), None, None);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn category_filter_is_exact_match() {
        let filtered = filter_products(mock_catalog(), None, Some("Wool"), None);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let filtered = filter_products(mock_catalog(), None, None, Some("SILK"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "eb2");
    }

    #[test]
    fn search_matches_description() {
        let filtered = filter_products(mock_catalog(), None, None, Some("eco-friendly"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "tik2");
    }

    #[test]
    fn filters_compose() {
        let filtered = filter_products(mock_catalog(), Some("eBay"), Some("Wool"), Some("alpaca"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "eb1");
    }

    #[test]
    fn empty_search_term_matches_everything() {
        let filtered = filter_products(mock_catalog(), None, None, Some(""));
        assert_eq!(filtered.len(), 4);
    }
}
