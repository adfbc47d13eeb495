use regex::RegexBuilder;
use tracing::warn;

use super::{clean_price, FeedError, FeedProduct, FeedReport, PLACEHOLDER_IMAGE};

/// Parse a Google-Shopping-style XML feed by scraping `<item>` blocks.
///
/// This is deliberately not an XML parser: partner feeds are too sloppy for
/// one (unescaped ampersands, stray markup), so each field is pulled out
/// with a tag regex that handles both CDATA and plain text. Items without a
/// title or link are dropped.
pub fn parse_xml(content: &str) -> Result<FeedReport, FeedError> {
    let item_pattern = RegexBuilder::new(r"<item>(.*?)</item>")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()?;

    let mut products = Vec::new();
    let mut missing_images = 0;
    let mut invalid_prices = 0;

    for (index, item) in item_pattern.find_iter(content).enumerate() {
        let item = item.as_str();

        let title = tag_with_fallback(item, &["title", "g:title"])?;
        let link = tag_with_fallback(item, &["link", "g:link"])?;
        let (Some(title), Some(link)) = (title, link) else {
            continue;
        };

        let price_text =
            tag_with_fallback(item, &["price", "g:price"])?.unwrap_or_else(|| "0".to_string());
        let price = match clean_price(&price_text) {
            Some(price) => price,
            None => {
                warn!(item = index + 1, price = %price_text, "invalid price, defaulting to 0");
                invalid_prices += 1;
                0.0
            }
        };

        let image_url = match tag_with_fallback(item, &["image_link", "g:image_link"])? {
            Some(url) => url,
            None => {
                missing_images += 1;
                PLACEHOLDER_IMAGE.to_string()
            }
        };

        let id = tag_with_fallback(item, &["id", "g:id"])?
            .and_then(|v| v.parse().ok())
            .unwrap_or((index + 1) as i64);

        products.push(FeedProduct {
            id,
            title,
            price,
            image_url,
            category: tag_with_fallback(item, &["category", "g:product_type"])?
                .unwrap_or_else(|| "Other".to_string()),
            affiliate_link: link,
            description: tag_with_fallback(item, &["description", "g:description"])?,
            brand: tag_with_fallback(item, &["brand", "g:brand"])?,
        });
    }

    Ok(FeedReport { products, missing_images, invalid_prices })
}

fn tag_with_fallback(item: &str, tags: &[&str]) -> Result<Option<String>, FeedError> {
    for tag in tags {
        if let Some(value) = extract_tag(item, tag)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// `<tag><![CDATA[...]]></tag>` or `<tag>...</tag>`, case-insensitive.
fn extract_tag(item: &str, tag: &str) -> Result<Option<String>, FeedError> {
    let pattern =
        format!(r"<{tag}[^>]*><!\[CDATA\[(.*?)\]\]></{tag}>|<{tag}[^>]*>(.*?)</{tag}>");
    let regex = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()?;

    Ok(regex
        .captures(item)
        .and_then(|captures| captures.get(1).or_else(|| captures.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xml_plain_and_cdata() {
        let feed = r#"<?xml version="1.0"?>
<rss><channel>
  <item>
    <g:id>101</g:id>
    <title><![CDATA[Laptop ASUS VivoBook]]></title>
    <link>https://shop/101</link>
    <g:price>2499.00 RON</g:price>
    <g:image_link>https://img/101.jpg</g:image_link>
    <g:product_type>Electronics</g:product_type>
    <g:brand>ASUS</g:brand>
  </item>
  <item>
    <title>Rochie de vara</title>
    <link>https://shop/102</link>
    <price>149 RON</price>
  </item>
</channel></rss>"#;

        let report = parse_xml(feed).unwrap();
        assert_eq!(report.products.len(), 2);

        let first = &report.products[0];
        assert_eq!(first.id, 101);
        assert_eq!(first.title, "Laptop ASUS VivoBook");
        assert_eq!(first.price, 2499.0);
        assert_eq!(first.category, "Electronics");
        assert_eq!(first.brand.as_deref(), Some("ASUS"));

        let second = &report.products[1];
        // no id tag: falls back to the item index
        assert_eq!(second.id, 2);
        assert_eq!(second.category, "Other");
        assert_eq!(second.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(report.missing_images, 1);
    }

    #[test]
    fn test_parse_xml_drops_incomplete_items() {
        let feed = "<item><title>Fara link</title></item><item><link>https://x</link></item>";
        let report = parse_xml(feed).unwrap();
        assert!(report.products.is_empty());
    }

    #[test]
    fn test_extract_tag_case_insensitive() {
        let item = "<ITEM><Title>Produs</Title></ITEM>";
        assert_eq!(extract_tag(item, "title").unwrap().as_deref(), Some("Produs"));
    }
}
