//! Partner feed conversion: CSV and XML product feeds become the flat
//! `data/products.json` array the catalog serves from.

pub mod csv;
pub mod xml;

use std::fmt;

use serde::Serialize;

/// Placeholder used when a feed row carries no image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x400?text=No+Image";

/// One converted feed entry, serialized in the raw catalog schema.
#[derive(Debug, Clone, Serialize)]
pub struct FeedProduct {
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    pub category: String,
    #[serde(rename = "affiliateLink")]
    pub affiliate_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// Conversion result plus the data-quality counters the tool reports.
#[derive(Debug)]
pub struct FeedReport {
    pub products: Vec<FeedProduct>,
    pub missing_images: usize,
    pub invalid_prices: usize,
}

/// Feed prices carry currency text and decimal commas ("1.299,00 Lei").
pub fn clean_price(text: &str) -> Option<f64> {
    text.replace("RON", "")
        .replace("Lei", "")
        .replace(',', ".")
        .trim()
        .parse()
        .ok()
}

#[derive(Debug)]
pub enum FeedError {
    Io(std::io::Error),
    Csv(::csv::Error),
    Pattern(regex::Error),
    Json(serde_json::Error),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Io(err) => write!(f, "I/O error: {err}"),
            FeedError::Csv(err) => write!(f, "CSV error: {err}"),
            FeedError::Pattern(err) => write!(f, "regex error: {err}"),
            FeedError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError::Io(err)
    }
}

impl From<::csv::Error> for FeedError {
    fn from(err: ::csv::Error) -> Self {
        FeedError::Csv(err)
    }
}

impl From<regex::Error> for FeedError {
    fn from(err: regex::Error) -> Self {
        FeedError::Pattern(err)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Json(err)
    }
}
