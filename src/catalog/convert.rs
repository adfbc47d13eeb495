use chrono::Utc;

use crate::models::product::{CategoryInfo, Product, RawProduct};

/// Brands looked for in product titles when the feed carries no brand field.
/// Checked in order; first hit wins.
const KNOWN_BRANDS: &[&str] = &[
    "Apple", "Samsung", "Xiaomi", "Huawei", "OnePlus", "Oppo", "Vivo",
    "Dell", "HP", "Lenovo", "ASUS", "Acer", "MSI", "Razer",
    "Sony", "LG", "Philips", "Bosch", "Whirlpool", "Electrolux",
    "Nike", "Adidas", "Puma", "Reebok", "Under Armour",
    "Zara", "H&M", "Mango", "Bershka",
];

/// Keyword table mapping the feed's free-text category label onto the site
/// taxonomy. Checked in order, substring match on the lowercased label, so
/// "laptops" has to come before "laptop".
const CATEGORY_MAPPINGS: &[(&str, CategoryInfo)] = &[
    ("electronics", CategoryInfo { id: 1, slug: "electronice-it", name: "Electronice & IT" }),
    ("laptops", CategoryInfo { id: 1, slug: "electronice-it/laptopuri-calculatoare", name: "Laptopuri" }),
    ("laptop", CategoryInfo { id: 1, slug: "electronice-it/laptopuri-calculatoare", name: "Laptopuri" }),
    ("phones", CategoryInfo { id: 1, slug: "electronice-it/telefoane-tablete", name: "Telefoane" }),
    ("phone", CategoryInfo { id: 1, slug: "electronice-it/telefoane-tablete", name: "Telefoane" }),
    ("fashion", CategoryInfo { id: 2, slug: "moda-imbracaminte", name: "Moda & Îmbrăcăminte" }),
    ("clothing", CategoryInfo { id: 2, slug: "moda-imbracaminte", name: "Moda & Îmbrăcăminte" }),
    ("home", CategoryInfo { id: 3, slug: "casa-gradina", name: "Casa & Grădina" }),
    ("sports", CategoryInfo { id: 5, slug: "sport-fitness", name: "Sport & Fitness" }),
    ("books", CategoryInfo { id: 8, slug: "carti-media", name: "Cărți & Media" }),
    ("toys", CategoryInfo { id: 7, slug: "jucarii-copii", name: "Jucării & Copii" }),
];

/// Catch-all for labels no keyword matches.
pub const FALLBACK_CATEGORY: CategoryInfo = CategoryInfo {
    id: 0,
    slug: "diverse",
    name: "Diverse",
};

/// Map a feed category label onto the site taxonomy.
pub fn map_category(label: &str) -> CategoryInfo {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return FALLBACK_CATEGORY;
    }
    for (keyword, info) in CATEGORY_MAPPINGS {
        if label.contains(keyword) {
            return info.clone();
        }
    }
    FALLBACK_CATEGORY
}

/// Best-effort brand: whitelist match anywhere in the title, else the first
/// word. Inherently noisy, good enough for faceting.
pub fn extract_brand(title: &str) -> Option<String> {
    if title.is_empty() {
        return None;
    }
    let title_upper = title.to_uppercase();
    for brand in KNOWN_BRANDS {
        if title_upper.contains(&brand.to_uppercase()) {
            return Some((*brand).to_string());
        }
    }
    title.split_whitespace().next().map(str::to_string)
}

/// Lowercase, fold Romanian diacritics, squash everything else into single
/// dashes. Other accented characters simply drop out.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.to_lowercase().chars() {
        let c = match c {
            'ă' | 'â' => 'a',
            'î' => 'i',
            'ș' | 'ş' => 's',
            'ț' | 'ţ' => 't',
            other => other,
        };
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// SEO slug for a product page, brand-prefixed, capped at 100 chars.
pub fn product_slug(title: &str, brand: Option<&str>) -> String {
    let full = match brand {
        Some(brand) => format!("{brand} {title}"),
        None => title.to_string(),
    };
    let mut slug = slugify(&full);
    if slug.len() > 100 {
        // slugs are pure ASCII at this point
        slug.truncate(100);
    }
    slug
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// `<brand> <title> - <price> RON | Vitrina`, capped at 60 chars.
pub fn meta_title(title: &str, brand: Option<&str>, price: f64) -> String {
    let brand_prefix = brand.map(|b| format!("{b} ")).unwrap_or_default();
    let price_part = if price > 0.0 {
        format!(" - {price:.0} RON")
    } else {
        String::new()
    };
    truncate_chars(&format!("{brand_prefix}{title}{price_part} | Vitrina"), 60)
}

/// Storefront meta description, capped at 160 chars.
pub fn meta_description(
    title: &str,
    brand: Option<&str>,
    price: f64,
    description: &str,
) -> String {
    let brand_part = brand.map(|b| format!("{b} ")).unwrap_or_default();
    let price_part = if price > 0.0 {
        format!(" la doar {price:.0} RON")
    } else {
        String::new()
    };
    let excerpt = truncate_chars(description, 80);
    truncate_chars(
        &format!("{brand_part}{title}{price_part} pe Vitrina.ro. {excerpt} Comandă acum cu livrare rapidă!"),
        160,
    )
}

/// Derive the full product from its raw feed entry.
///
/// Tolerant by design: missing titles become "Produs", malformed prices 0,
/// unknown categories "Diverse". Analytics counters and timestamps are
/// synthetic since nothing persists them.
pub fn convert(raw: &RawProduct) -> Product {
    let price = raw.price_ron();
    let price_cents = (price * 100.0).round() as i64;

    let title = if raw.title.is_empty() {
        "Produs".to_string()
    } else {
        raw.title.clone()
    };

    let brand = raw.brand.clone().or_else(|| extract_brand(&title));
    let category = map_category(&raw.category);

    let description = (!raw.description.is_empty()).then(|| raw.description.clone());
    let short_description = description.as_deref().map(|d| truncate_chars(d, 200));

    let h1_title = match &brand {
        Some(brand) => format!("{brand} {title}"),
        None => title.clone(),
    };

    let affiliate_link = if raw.affiliate_link.is_empty() {
        "#".to_string()
    } else {
        raw.affiliate_link.clone()
    };

    let now = Utc::now();

    Product {
        id: raw.id,
        slug: product_slug(&title, brand.as_deref()),
        meta_title: meta_title(&title, brand.as_deref(), price),
        meta_description: meta_description(&title, brand.as_deref(), price, &raw.description),
        h1_title,
        title,
        brand,
        model: raw.model.clone(),
        ean: raw.ean.clone(),
        category,
        price_cents,
        old_price_cents: None,
        discount_percent: 0,
        description,
        short_description,
        image_url: raw.image_url.clone(),
        affiliate_link,
        affiliate_network: "json",
        commission_percent: 5,
        in_stock: true,
        stock_status: "in_stock",
        views_count: 0,
        clicks_count: 0,
        created_at: now,
        updated_at: now,
    }
}
