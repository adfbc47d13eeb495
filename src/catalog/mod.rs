//! Catalog domain: loading the product snapshot, deriving full products
//! from raw feed entries, the search pipeline and the facet builders.

pub mod convert;
pub mod facets;
pub mod search;
pub mod store;
