//! The product entity, category codes and availability status.
//!
//! Category codes are stored as free text in `products.category`; the known
//! codes below only drive the human-readable label. A row carrying an
//! unknown code is still listed and displays its raw code.

use std::fmt;

use crate::types::{DbId, Price, Timestamp};

// ---------------------------------------------------------------------------
// Category codes
// ---------------------------------------------------------------------------

/// Hand-tied bouquets.
pub const CATEGORY_BOUQUET: &str = "bouquet";

/// Single stems.
pub const CATEGORY_SINGLE: &str = "single";

/// Arrangements and compositions.
pub const CATEGORY_COMPOSITION: &str = "composition";

/// Known category codes paired with their display labels, in menu order.
pub const CATEGORIES: &[(&str, &str)] = &[
    (CATEGORY_BOUQUET, "Букеты"),
    (CATEGORY_SINGLE, "Одиночные цветы"),
    (CATEGORY_COMPOSITION, "Композиции"),
];

/// Resolve the display label for a category code.
///
/// Unknown codes fall back to the code itself.
pub fn category_display(code: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |(_, label)| label)
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// Status shown for products with stock left.
pub const STATUS_AVAILABLE: &str = "Доступен";

/// Status shown for products with nothing left to order.
pub const STATUS_UNAVAILABLE: &str = "Не доступен";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A catalog product as read from the product store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub price: Price,
    pub category: String,
    pub created_at: Timestamp,
    pub quantity_sold: i32,
    pub available_quantity: i32,
    /// Blank when the product has no description.
    pub description: String,
    /// Path relative to the media root; blank when there is no image.
    pub image: String,
}

impl Product {
    /// Whether any units are left to order.
    pub fn is_available(&self) -> bool {
        self.available_quantity > 0
    }

    pub fn availability_status(&self) -> &'static str {
        if self.is_available() {
            STATUS_AVAILABLE
        } else {
            STATUS_UNAVAILABLE
        }
    }

    pub fn category_display(&self) -> &str {
        category_display(&self.category)
    }

    /// The image path, or `None` when the product has no image.
    pub fn image_path(&self) -> Option<&str> {
        let path = self.image.trim();
        (!path.is_empty()).then_some(path)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
