//! Upstream feed schema. Mirrors the JSON shape exactly; unknown fields
//! are ignored (no `deny_unknown_fields` here, only the config loader
//! rejects unknown keys).

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedImage {
    pub src: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Variant {
    pub id: i64,
    pub title: String,
    pub available: bool,
    pub price: String,
    pub featured_image: Option<FeaturedImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub title: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductsWrapper {
    pub products: Vec<Product>,
}
