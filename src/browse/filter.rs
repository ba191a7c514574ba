use crate::data::models::category::slugify;
use crate::data::models::product::Product;
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Name,
    PriceLow,
    PriceHigh,
    Popularity,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Popularity => "popularity",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(SortKey::Name),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "popularity" => Ok(SortKey::Popularity),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(with = "bigdecimal::serde::json_num")]
    pub min: BigDecimal,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub max: BigDecimal,
}

impl PriceRange {
    pub fn contains(&self, price: &BigDecimal) -> bool {
        price >= &self.min && price <= &self.max
    }
}

/// Filter options available for a product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    #[serde(with = "bigdecimal::serde::json_num")]
    pub max_price: BigDecimal,
}

impl Facets {
    /// Distinct non-empty colors and materials in first-seen order, plus the
    /// highest price (zero for an empty listing).
    pub fn from_products(products: &[Product]) -> Self {
        let mut colors: Vec<String> = Vec::new();
        let mut materials: Vec<String> = Vec::new();
        let mut max_price = BigDecimal::zero();

        for p in products {
            if !p.color.is_empty() && !colors.contains(&p.color) {
                colors.push(p.color.clone());
            }
            if !p.material.is_empty() && !materials.contains(&p.material) {
                materials.push(p.material.clone());
            }
            if p.price > max_price {
                max_price = p.price.clone();
            }
        }

        Facets {
            colors,
            materials,
            max_price,
        }
    }

    pub fn default_price_range(&self) -> PriceRange {
        PriceRange {
            min: BigDecimal::zero(),
            max: self.max_price.clone(),
        }
    }
}

/// Case-insensitive, substring-tolerant match of a product's category
/// against a URL slug.
pub fn category_matches(product: &Product, slug: &str) -> bool {
    if product.category.is_empty() {
        return false;
    }

    let wanted = slug.trim().to_lowercase();
    let lower = product.category.to_lowercase();
    let category_slug = slugify(&product.category);

    category_slug == wanted || category_slug.contains(&wanted) || lower.contains(&wanted)
}

pub fn filter_by_category_slug(products: &[Product], slug: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| category_matches(p, slug))
        .cloned()
        .collect()
}

/// Stable sort in place.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    match key {
        SortKey::Name => products.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortKey::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Popularity => products.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
    }
}

/// Listing refinements applied after the category match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub price_range: Option<PriceRange>,
    pub colors: Vec<String>,
    pub materials: Vec<String>,
    pub sort: SortKey,
}

impl ProductFilter {
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut filtered: Vec<Product> = products
            .iter()
            .filter(|p| {
                self.price_range
                    .as_ref()
                    .map_or(true, |range| range.contains(&p.price))
            })
            .filter(|p| self.colors.is_empty() || self.colors.contains(&p.color))
            .filter(|p| self.materials.is_empty() || self.materials.contains(&p.material))
            .cloned()
            .collect();

        sort_products(&mut filtered, self.sort);
        filtered
    }

    pub fn is_refined(&self, facets: &Facets) -> bool {
        let narrowed_price = self.price_range.as_ref().is_some_and(|r| {
            r.min.cmp(&BigDecimal::zero()) == Ordering::Greater || r.max < facets.max_price
        });

        narrowed_price || !self.colors.is_empty() || !self.materials.is_empty()
    }
}

/// Up to `limit` products to show next to `product`: same category first,
/// then anything else.
pub fn related_products(all: &[Product], product: &Product, limit: usize) -> Vec<Product> {
    let others = all.iter().filter(|p| p.id != product.id);

    let same_category: Vec<Product> = others
        .clone()
        .filter(|p| !product.category.is_empty() && p.category == product.category)
        .take(limit)
        .cloned()
        .collect();

    if !same_category.is_empty() {
        return same_category;
    }

    others.take(limit).cloned().collect()
}
