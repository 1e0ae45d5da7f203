//! Product Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Collection a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Menswear,
    Womenswear,
    Accessories,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Menswear => "menswear",
            Self::Womenswear => "womenswear",
            Self::Accessories => "accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a category keyword.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised category `{0}`")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menswear" => Ok(Self::Menswear),
            "womenswear" => Ok(Self::Womenswear),
            "accessories" => Ok(Self::Accessories),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// Product Model
///
/// The catalogue is the read-only source of the name/price snapshots copied
/// into cart and order lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Price in minor units.
    pub price: u64,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub sku: Option<String>,
    pub material: Option<String>,
    pub care_instructions: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: u64,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub sku: Option<String>,
    pub material: Option<String>,
    pub care_instructions: Option<String>,
}

/// Product Update Model
///
/// The admin form submits the full listing; updates replace every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: u64,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub in_stock: bool,
    pub featured: bool,
    pub sku: Option<String>,
    pub material: Option<String>,
    pub care_instructions: Option<String>,
}

/// Filter for catalogue listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub featured: Option<bool>,
    pub in_stock: Option<bool>,
}

/// Catalogue counters for the back office.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogueStats {
    pub total: u64,
    pub in_stock: u64,
    pub featured: u64,
}

impl CatalogueStats {
    #[must_use]
    pub fn out_of_stock(self) -> u64 {
        self.total - self.in_stock
    }
}
