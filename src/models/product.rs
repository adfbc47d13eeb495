use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One entry of `data/products.json`, exactly as the feed converter wrote it.
///
/// The file is partner-derived and messy: prices arrive as numbers or as
/// display strings, key casing differs between feed runs, and most fields can
/// be absent. Only the numeric `id` is required; everything else falls back
/// to an empty value.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default)]
    pub price: Option<PriceValue>,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "imageURL", alias = "image_url")]
    pub image_url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, rename = "affiliateLink", alias = "affiliate_link")]
    pub affiliate_link: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub ean: Option<String>,
}

impl RawProduct {
    /// Price in RON, whatever shape the feed delivered it in. Malformed
    /// prices are 0.
    pub fn price_ron(&self) -> f64 {
        self.price.as_ref().map(PriceValue::as_ron).unwrap_or(0.0)
    }
}

/// Feed prices are either plain numbers or display strings ("1.299 RON").
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    pub fn as_ron(&self) -> f64 {
        match self {
            PriceValue::Number(n) => *n,
            PriceValue::Text(s) => parse_price_text(s),
        }
    }
}

/// Lenient parse for display prices: keep digits and dots, read the leading
/// number. Anything unreadable is 0.
fn parse_price_text(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + 1;
    }

    cleaned[..end].parse().unwrap_or(0.0)
}

/// Fully derived product, built from a [`RawProduct`] at query time.
/// Never stored anywhere.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub ean: Option<String>,
    pub category: CategoryInfo,
    pub price_cents: i64,
    pub old_price_cents: Option<i64>,
    pub discount_percent: i32,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub meta_title: String,
    pub meta_description: String,
    pub h1_title: String,
    pub image_url: String,
    pub affiliate_link: String,
    pub affiliate_network: &'static str,
    pub commission_percent: i32,
    pub in_stock: bool,
    pub stock_status: &'static str,
    pub views_count: u64,
    pub clicks_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mapped category, derived from the feed's free-text label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: i64,
    pub slug: &'static str,
    pub name: &'static str,
}
