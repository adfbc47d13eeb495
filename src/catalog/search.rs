//! Linear-scan filter/sort/paginate pipeline over the raw catalog snapshot.
//! No index; acceptable because the dataset is small enough for per-request
//! scans.

use std::cmp::Reverse;

use crate::catalog::convert;
use crate::catalog::facets::subcategory_rule;
use crate::models::product::{Product, RawProduct};

pub const DEFAULT_PAGE_SIZE: usize = 36;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Input order preserved.
    #[default]
    Relevant,
    PriceAsc,
    PriceDesc,
    Newest,
    Popular,
}

impl SortKey {
    /// Unknown values fall back to [`SortKey::Relevant`].
    pub fn parse(value: &str) -> Self {
        match value {
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "newest" => SortKey::Newest,
            "popular" => SortKey::Popular,
            _ => SortKey::Relevant,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<String>,
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: SortKey,
    pub page: usize,
    pub limit: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            category: None,
            subcategory: None,
            search: None,
            brand: None,
            min_price: None,
            max_price: None,
            sort: SortKey::Relevant,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug)]
pub struct SearchOutcome {
    /// Converted products for the requested page only.
    pub products: Vec<Product>,
    /// Filtered count before pagination (and before the brand filter).
    pub total: usize,
    pub has_more: bool,
}

/// Run the whole pipeline: filter the raw list, paginate, convert only the
/// current page, then apply the brand filter and sort to that page.
///
/// The brand filter runs after pagination because the brand is only known
/// post-conversion; a brand-filtered page may come back shorter than
/// `limit`. `total` and `has_more` always refer to the pre-brand count.
pub fn search(products: &[RawProduct], params: &SearchParams) -> SearchOutcome {
    let mut filtered: Vec<&RawProduct> = products.iter().collect();

    let category = params
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "All");

    if let Some(category) = category {
        let needle = category.to_lowercase();
        filtered.retain(|p| p.category.to_lowercase().contains(&needle));

        if let Some(rule) = params
            .subcategory
            .as_deref()
            .and_then(|name| subcategory_rule(category, name))
        {
            if !rule.keywords.is_empty() {
                filtered.retain(|p| {
                    let title = p.title.to_lowercase();
                    rule.keywords.iter().any(|keyword| title.contains(keyword))
                });
            }
        }
    }

    if let Some(query) = params.search.as_deref().filter(|q| !q.is_empty()) {
        let needle = query.to_lowercase();
        filtered.retain(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        });
    }

    if let Some(min) = params.min_price {
        filtered.retain(|p| p.price_ron() >= min);
    }
    if let Some(max) = params.max_price {
        filtered.retain(|p| p.price_ron() <= max);
    }

    let total = filtered.len();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, MAX_PAGE_SIZE);
    let start = (page - 1) * limit;
    let end = (start + limit).min(total);
    let has_more = start + limit < total;

    let mut page_products: Vec<Product> = if start < total {
        filtered[start..end].iter().map(|p| convert::convert(p)).collect()
    } else {
        Vec::new()
    };

    if let Some(brand) = params.brand.as_deref().filter(|b| !b.is_empty()) {
        let brand = brand.to_lowercase();
        page_products.retain(|p| {
            p.brand
                .as_deref()
                .is_some_and(|b| b.to_lowercase() == brand)
        });
    }

    sort_page(&mut page_products, params.sort);

    SearchOutcome { products: page_products, total, has_more }
}

fn sort_page(products: &mut [Product], sort: SortKey) {
    match sort {
        SortKey::PriceAsc => products.sort_by_key(|p| p.price_cents),
        SortKey::PriceDesc => products.sort_by_key(|p| Reverse(p.price_cents)),
        SortKey::Newest => products.sort_by_key(|p| Reverse(p.created_at)),
        SortKey::Popular => products.sort_by_key(|p| Reverse(p.views_count)),
        SortKey::Relevant => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::PriceValue;

    fn raw(id: i64, title: &str, price: f64, category: &str) -> RawProduct {
        RawProduct {
            id,
            title: title.to_string(),
            price: Some(PriceValue::Number(price)),
            description: String::new(),
            image_url: String::new(),
            category: category.to_string(),
            affiliate_link: String::new(),
            brand: None,
            model: None,
            ean: None,
        }
    }

    fn catalog() -> Vec<RawProduct> {
        vec![
            raw(1, "Laptop ASUS VivoBook 15", 2499.0, "Electronics"),
            raw(2, "Laptop Lenovo IdeaPad 3", 1899.0, "Electronics"),
            raw(3, "Smartphone Samsung Galaxy A54", 1599.0, "Electronics"),
            raw(4, "Rochie de vara", 149.0, "Fashion"),
            raw(5, "Sampon Keune Care", 89.0, "Fashion"),
            raw(6, "Canapea extensibila", 3299.0, "Home"),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let outcome = search(&catalog(), &SearchParams::default());
        assert_eq!(outcome.total, 6);
        assert_eq!(outcome.products.len(), 6);
        assert!(!outcome.has_more);
    }

    #[test]
    fn test_category_substring_match() {
        let params = SearchParams {
            category: Some("electr".to_string()),
            ..Default::default()
        };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.total, 3);
    }

    #[test]
    fn test_category_all_is_no_filter() {
        let params = SearchParams {
            category: Some("All".to_string()),
            ..Default::default()
        };
        assert_eq!(search(&catalog(), &params).total, 6);
    }

    #[test]
    fn test_subcategory_keyword_filter() {
        let params = SearchParams {
            category: Some("Electronics".to_string()),
            subcategory: Some("Laptops".to_string()),
            ..Default::default()
        };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.total, 2);
        assert!(outcome.products.iter().all(|p| p.title.contains("Laptop")));
    }

    #[test]
    fn test_unknown_subcategory_is_ignored() {
        let params = SearchParams {
            category: Some("Electronics".to_string()),
            subcategory: Some("Drone".to_string()),
            ..Default::default()
        };
        assert_eq!(search(&catalog(), &params).total, 3);
    }

    #[test]
    fn test_text_search_title_and_description() {
        let mut products = catalog();
        products[5].description = "canapea cu lada de depozitare galaxy".to_string();

        let params = SearchParams {
            search: Some("galaxy".to_string()),
            ..Default::default()
        };
        let outcome = search(&products, &params);
        assert_eq!(outcome.total, 2);
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let params = SearchParams {
            min_price: Some(149.0),
            max_price: Some(1899.0),
            ..Default::default()
        };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.total, 3);
    }

    #[test]
    fn test_pagination_and_has_more() {
        let params = SearchParams { limit: 4, ..Default::default() };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.products.len(), 4);
        assert_eq!(outcome.total, 6);
        assert!(outcome.has_more);

        let params = SearchParams { page: 2, limit: 4, ..Default::default() };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.products.len(), 2);
        assert!(!outcome.has_more);

        // exact fit: last page present, nothing more
        let params = SearchParams { page: 3, limit: 2, ..Default::default() };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.products.len(), 2);
        assert!(!outcome.has_more);
    }

    #[test]
    fn test_page_beyond_range_is_empty() {
        let params = SearchParams { page: 99, ..Default::default() };
        let outcome = search(&catalog(), &params);
        assert!(outcome.products.is_empty());
        assert_eq!(outcome.total, 6);
        assert!(!outcome.has_more);
    }

    #[test]
    fn test_page_zero_is_clamped() {
        let params = SearchParams { page: 0, limit: 3, ..Default::default() };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.products.len(), 3);
        assert_eq!(outcome.products[0].id, 1);
    }

    #[test]
    fn test_brand_filter_shrinks_page_not_total() {
        let params = SearchParams {
            brand: Some("samsung".to_string()),
            ..Default::default()
        };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.total, 6);
        assert_eq!(outcome.products.len(), 1);
        assert_eq!(outcome.products[0].id, 3);
    }

    #[test]
    fn test_sort_price_asc_and_desc() {
        let params = SearchParams { sort: SortKey::PriceAsc, ..Default::default() };
        let outcome = search(&catalog(), &params);
        let prices: Vec<i64> = outcome.products.iter().map(|p| p.price_cents).collect();
        assert_eq!(prices, vec![8900, 14900, 159900, 189900, 249900, 329900]);

        let params = SearchParams { sort: SortKey::PriceDesc, ..Default::default() };
        let outcome = search(&catalog(), &params);
        assert_eq!(outcome.products[0].id, 6);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::parse("price-asc"), SortKey::PriceAsc);
        assert_eq!(SortKey::parse("popular"), SortKey::Popular);
        assert_eq!(SortKey::parse("whatever"), SortKey::Relevant);
    }
}
