//! Derived browsing structure: categories, subcategories, brands and price
//! ranges are all computed from the flat product list at request time.
//! There is no stored taxonomy; reclassification happens silently whenever
//! the keyword tables change.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::convert::{extract_brand, map_category, slugify};
use crate::models::product::RawProduct;

/// Subcategory detection rule: any keyword hit in the product title counts.
/// Keywords are stored lowercased.
#[derive(Debug)]
pub struct SubcategoryRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

const ELECTRONICS_RULES: &[SubcategoryRule] = &[
    SubcategoryRule { name: "Laptops", keywords: &["laptop", "notebook", "ultrabook"] },
    SubcategoryRule { name: "Telefoane", keywords: &["telefon mobil", "smartphone", "iphone", "samsung galaxy", "xiaomi redmi", "xiaomi mi", "oppo", "realme", "oneplus"] },
    SubcategoryRule { name: "TV & Audio", keywords: &["televizor", "tv", "smart tv", "boxe", "soundbar", "home cinema"] },
    SubcategoryRule { name: "Calculatoare", keywords: &["calculator", "desktop", "pc gaming", "all-in-one"] },
    SubcategoryRule { name: "Tablete", keywords: &["tableta", "tablet", "ipad"] },
    SubcategoryRule { name: "Smartwatch", keywords: &["smartwatch", "ceas inteligent", "apple watch", "galaxy watch"] },
    SubcategoryRule { name: "Componente PC", keywords: &["placa video", "procesor", "ram", "ssd", "hdd", "carcasa", "sursa"] },
    SubcategoryRule { name: "Periferice", keywords: &["mouse", "tastatura", "headset", "casti gaming", "webcam", "monitor"] },
    SubcategoryRule { name: "Camere", keywords: &["camera foto", "aparat foto", "dslr", "mirrorless", "obiectiv"] },
    SubcategoryRule { name: "Gaming", keywords: &["consola", "playstation", "xbox", "nintendo", "controller"] },
    SubcategoryRule { name: "Imprimante", keywords: &["imprimanta", "scanner", "multifunctionala"] },
    SubcategoryRule { name: "Electrocasnice", keywords: &["frigider", "masina de spalat", "aragazz", "cuptor", "aspirator"] },
];

const FASHION_RULES: &[SubcategoryRule] = &[
    SubcategoryRule { name: "Îngrijire Păr", keywords: &["sampon", "balsam", "masca par", "ser par", "spray par", "lotiune par"] },
    SubcategoryRule { name: "Extensii Păr", keywords: &["extensii", "extensie", "clip-on", "clip on", "peruca"] },
    SubcategoryRule { name: "Îmbrăcăminte Femei", keywords: &["rochie", "bluza dama", "pantaloni dama", "fusta", "geaca dama"] },
    SubcategoryRule { name: "Îmbrăcăminte Bărbați", keywords: &["camasa", "tricou barbati", "pantaloni barbati", "geaca barbati", "costum"] },
    SubcategoryRule { name: "Încălțăminte", keywords: &["pantofi", "adidasi", "sandale", "cizme", "ghete", "bocanci"] },
    SubcategoryRule { name: "Accesorii", keywords: &["geanta", "portofel", "curea", "esarfa", "palarie", "sapca"] },
    SubcategoryRule { name: "Bijuterii", keywords: &["inel", "colier", "bratara", "cercei", "pandantiv"] },
    SubcategoryRule { name: "Cosmetice", keywords: &["crema", "fond ten", "mascara", "ruj", "parfum", "apa toaleta"] },
    SubcategoryRule { name: "Styling", keywords: &["placa par", "ondulator", "uscator par", "perie"] },
];

const HOME_RULES: &[SubcategoryRule] = &[
    SubcategoryRule { name: "Tratare Apă", keywords: &["dedurizator", "statie deferizare", "filtru apa", "purificator"] },
    SubcategoryRule { name: "Mobilier", keywords: &["canapea", "fotoliu", "masa", "scaun", "dulap", "pat"] },
    SubcategoryRule { name: "Decorațiuni", keywords: &["tablou", "rama foto", "vaza", "lumanare", "perna decorativa"] },
    SubcategoryRule { name: "Bucătărie", keywords: &["set vase", "tigaie", "oala", "cutite", "mixer", "blender"] },
    SubcategoryRule { name: "Iluminat", keywords: &["lustra", "lampa", "aplica", "bec led", "spoturi"] },
    SubcategoryRule { name: "Textile", keywords: &["perdele", "draperii", "lenjerie pat", "prosop", "covor"] },
    SubcategoryRule { name: "Grădină", keywords: &["motocoasa", "masina tuns iarba", "gratar", "mobilier gradina"] },
];

/// The fixed set of main categories the storefront browses by. Products with
/// any other label are invisible to the tree.
pub const MAIN_CATEGORIES: &[&str] = &["Electronics", "Fashion", "Home"];

pub const SUBCATEGORY_RULES: &[(&str, &[SubcategoryRule])] = &[
    ("Electronics", ELECTRONICS_RULES),
    ("Fashion", FASHION_RULES),
    ("Home", HOME_RULES),
];

pub fn rules_for(category: &str) -> Option<&'static [SubcategoryRule]> {
    SUBCATEGORY_RULES
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, rules)| *rules)
}

pub fn subcategory_rule(category: &str, name: &str) -> Option<&'static SubcategoryRule> {
    rules_for(category)?.iter().find(|rule| rule.name == name)
}

/// First rule whose keywords hit the title, in table order.
pub fn detect_subcategory(title: &str, category: &str) -> Option<&'static str> {
    let rules = rules_for(category)?;
    let title = title.to_lowercase();
    for rule in rules {
        if rule.keywords.iter().any(|k| title.contains(k)) {
            return Some(rule.name);
        }
    }
    None
}

pub fn category_slug(name: &str) -> String {
    slugify(name)
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTree {
    pub name: String,
    pub slug: String,
    pub count: u64,
    pub subcategories: Vec<SubcategoryInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubcategoryInfo {
    pub name: String,
    pub slug: String,
    pub count: u64,
    pub parent: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandCount {
    pub name: String,
    pub count: u64,
}

/// Rounded price bounds for the categories endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceBounds {
    pub min: i64,
    pub max: i64,
    pub avg: i64,
}

/// Exact price bounds for the filters endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

/// One pass over all products: bucket counts per main category, then count
/// subcategory keyword hits per title. Subcategories come back sorted by
/// count, largest first.
pub fn build_category_tree(products: &[RawProduct]) -> Vec<CategoryTree> {
    let mut tree: Vec<CategoryTree> = MAIN_CATEGORIES
        .iter()
        .map(|name| CategoryTree {
            name: (*name).to_string(),
            slug: category_slug(name),
            count: 0,
            subcategories: Vec::new(),
        })
        .collect();

    let mut subcategory_counts: Vec<HashMap<&'static str, u64>> =
        vec![HashMap::new(); MAIN_CATEGORIES.len()];

    for product in products {
        let category = if product.category.is_empty() {
            "Electronics"
        } else {
            product.category.as_str()
        };
        let Some(index) = MAIN_CATEGORIES.iter().position(|c| *c == category) else {
            continue;
        };

        tree[index].count += 1;

        if let Some(subcategory) = detect_subcategory(&product.title, category) {
            *subcategory_counts[index].entry(subcategory).or_insert(0) += 1;
        }
    }

    for (index, counts) in subcategory_counts.into_iter().enumerate() {
        let node = &mut tree[index];
        let parent = node.name.clone();
        node.subcategories = counts
            .into_iter()
            .map(|(name, count)| SubcategoryInfo {
                name: name.to_string(),
                slug: category_slug(name),
                count,
                parent: parent.clone(),
            })
            .collect();
        node.subcategories
            .sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    }

    tree
}

/// Brands the storefront's facet counter recognizes in raw titles.
const COMMON_BRANDS: &[&str] = &[
    "ASUS", "Lenovo", "HP", "Dell", "Acer", "Apple", "Samsung", "Xiaomi",
    "Huawei", "LG", "Sony", "Philips", "Canon", "Nikon", "Microsoft",
    "Intel", "AMD", "NVIDIA", "Kingston", "Corsair", "Logitech", "Razer",
    "Nike", "Adidas", "Puma", "Zara", "H&M", "Levis", "Calvin Klein",
    "Keune", "Schwarzkopf", "Garnier", "Loreal", "Maybelline",
];

/// Counts in first-seen order so that equal counts keep a stable ordering.
struct BrandCounter {
    counts: Vec<BrandCount>,
    index: HashMap<String, usize>,
}

impl BrandCounter {
    fn new() -> Self {
        Self { counts: Vec::new(), index: HashMap::new() }
    }

    fn bump(&mut self, name: String) {
        match self.index.get(&name) {
            Some(&i) => self.counts[i].count += 1,
            None => {
                self.index.insert(name.clone(), self.counts.len());
                self.counts.push(BrandCount { name, count: 1 });
            }
        }
    }

    fn top(mut self, min_count: u64, cap: usize) -> Vec<BrandCount> {
        self.counts.retain(|b| b.count >= min_count);
        self.counts.sort_by(|a, b| b.count.cmp(&a.count));
        self.counts.truncate(cap);
        self.counts
    }
}

/// Brand facet over raw titles: whitelist match first, else the first word
/// of the title when longer than two characters. Keeps brands with at least
/// ten products, top 100 by count.
pub fn extract_brands<'a>(products: impl IntoIterator<Item = &'a RawProduct>) -> Vec<BrandCount> {
    let mut counter = BrandCounter::new();

    for product in products {
        let title = product.title.as_str();
        let title_lower = title.to_lowercase();

        let known = COMMON_BRANDS
            .iter()
            .find(|brand| title_lower.contains(&brand.to_lowercase()));

        match known {
            Some(brand) => counter.bump((*brand).to_string()),
            None => {
                let Some(first_word) = title.split_whitespace().next() else {
                    continue;
                };
                if first_word.chars().count() > 2 {
                    counter.bump(first_word.to_string());
                }
            }
        }
    }

    counter.top(10, 100)
}

fn mapped_slug_matches(product: &RawProduct, needle: &str) -> bool {
    map_category(&product.category).slug.contains(needle)
}

fn active_category(category: Option<&str>) -> Option<String> {
    category
        .filter(|c| !c.is_empty() && *c != "All")
        .map(str::to_lowercase)
}

/// Brands available inside a category, derived the same way product
/// conversion derives them. The category is matched against the mapped
/// category slug. Keeps brands with at least three products, top 50.
pub fn available_brands(products: &[RawProduct], category: Option<&str>) -> Vec<BrandCount> {
    let needle = active_category(category);
    let mut counter = BrandCounter::new();

    for product in products {
        if let Some(needle) = &needle {
            if !mapped_slug_matches(product, needle) {
                continue;
            }
        }

        let title = if product.title.is_empty() { "Produs" } else { product.title.as_str() };
        let brand = product.brand.clone().or_else(|| extract_brand(title));
        if let Some(brand) = brand {
            counter.bump(brand);
        }
    }

    counter.top(3, 50)
}

/// Rounded price stats for a category (raw label substring match).
/// Zero-priced products are excluded; an empty set gets placeholder bounds.
pub fn price_ranges(products: &[RawProduct], category: Option<&str>) -> PriceBounds {
    let needle = active_category(category);

    let prices: Vec<f64> = products
        .iter()
        .filter(|p| match &needle {
            Some(needle) => p.category.to_lowercase().contains(needle),
            None => true,
        })
        .map(RawProduct::price_ron)
        .filter(|price| *price > 0.0)
        .collect();

    if prices.is_empty() {
        return PriceBounds { min: 0, max: 10000, avg: 500 };
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;

    PriceBounds {
        min: min.floor() as i64,
        max: max.ceil() as i64,
        avg: avg.round() as i64,
    }
}

/// Exact price stats for a category (mapped-slug match), on cent-rounded
/// prices like the rest of the converted pipeline.
pub fn price_range(products: &[RawProduct], category: Option<&str>) -> PriceRange {
    let needle = active_category(category);

    let prices: Vec<f64> = products
        .iter()
        .filter(|p| match &needle {
            Some(needle) => mapped_slug_matches(p, needle),
            None => true,
        })
        .map(|p| (p.price_ron() * 100.0).round() / 100.0)
        .collect();

    if prices.is_empty() {
        return PriceRange { min: 0.0, max: 10000.0, avg: 0.0 };
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = prices.iter().sum::<f64>() / prices.len() as f64;

    PriceRange { min, max, avg }
}
