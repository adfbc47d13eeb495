use csv::ReaderBuilder;
use tracing::warn;

use super::{clean_price, FeedError, FeedProduct, FeedReport, PLACEHOLDER_IMAGE};

/// Parse a partner CSV feed.
///
/// Headers differ per network, so every field is resolved through a
/// case-insensitive fallback chain. Rows never fail: missing titles become
/// "Unknown Product", unreadable prices 0, missing images a placeholder.
/// Rows without an id get their 1-based row number.
pub fn parse_csv(content: &str) -> Result<FeedReport, FeedError> {
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut products = Vec::new();
    let mut missing_images = 0;
    let mut invalid_prices = 0;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 1;

        let field = |names: &[&str]| -> Option<String> {
            for name in names {
                if let Some(position) = headers.iter().position(|h| h == name) {
                    if let Some(value) = record.get(position) {
                        let value = value.trim();
                        if !value.is_empty() {
                            return Some(value.to_string());
                        }
                    }
                }
            }
            None
        };

        let title = field(&["title", "name", "product_name"])
            .unwrap_or_else(|| "Unknown Product".to_string());

        let price_text = field(&["price", "sale_price"]).unwrap_or_else(|| "0".to_string());
        let price = match clean_price(&price_text) {
            Some(price) => price,
            None => {
                warn!(row, price = %price_text, "invalid price, defaulting to 0");
                invalid_prices += 1;
                0.0
            }
        };

        let image_url = match field(&["image_url", "image", "thumbnail"]) {
            Some(url) => url,
            None => {
                warn!(row, "missing image URL, using placeholder");
                missing_images += 1;
                PLACEHOLDER_IMAGE.to_string()
            }
        };

        let id = field(&["id", "product_id"])
            .and_then(|v| v.parse().ok())
            .unwrap_or(row as i64);

        products.push(FeedProduct {
            id,
            title,
            price,
            image_url,
            category: field(&["category", "categories"]).unwrap_or_else(|| "Other".to_string()),
            affiliate_link: field(&["url", "link", "product_url"]).unwrap_or_default(),
            description: field(&["description"]),
            brand: field(&["merchant", "brand"]),
        });
    }

    Ok(FeedReport { products, missing_images, invalid_prices })
}
