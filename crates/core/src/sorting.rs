//! Sort order allow-list for catalog listings.
//!
//! `sort_by` arrives as a field name optionally prefixed with `-` for
//! descending order. Only the fields in [`SortField::ALL`] are accepted;
//! anything else resolves to [`SortOrder::DEFAULT`] and is never forwarded
//! to the storage layer.

use std::cmp::Ordering;
use std::fmt;

use crate::product::Product;

/// Prefix marking a descending sort in the `sort_by` parameter.
pub const DESCENDING_PREFIX: char = '-';

/// Product columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Price,
    Category,
    CreatedAt,
    QuantitySold,
    AvailableQuantity,
}

impl SortField {
    pub const ALL: &'static [SortField] = &[
        SortField::Id,
        SortField::Name,
        SortField::Price,
        SortField::Category,
        SortField::CreatedAt,
        SortField::QuantitySold,
        SortField::AvailableQuantity,
    ];

    /// The field name as it appears in `sort_by`, identical to the column name.
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::Category => "category",
            SortField::CreatedAt => "created_at",
            SortField::QuantitySold => "quantity_sold",
            SortField::AvailableQuantity => "available_quantity",
        }
    }

    pub fn parse(name: &str) -> Option<SortField> {
        SortField::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Price => a.price.cmp(&b.price),
            SortField::Category => a.category.cmp(&b.category),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::QuantitySold => a.quantity_sold.cmp(&b.quantity_sold),
            SortField::AvailableQuantity => a.available_quantity.cmp(&b.available_quantity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A validated ordering. Ties are always broken by ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    /// Best sellers first.
    pub const DEFAULT: SortOrder = SortOrder {
        field: SortField::QuantitySold,
        direction: SortDirection::Descending,
    };

    /// Parse a `sort_by` value such as `price` or `-created_at`.
    ///
    /// Returns `None` for blank input or fields outside the allow-list.
    pub fn parse(raw: &str) -> Option<SortOrder> {
        let raw = raw.trim();
        let (direction, name) = match raw.strip_prefix(DESCENDING_PREFIX) {
            Some(rest) => (SortDirection::Descending, rest),
            None => (SortDirection::Ascending, raw),
        };
        SortField::parse(name).map(|field| SortOrder { field, direction })
    }

    /// Resolve an optional `sort_by` parameter, falling back to the default.
    pub fn from_param(raw: Option<&str>) -> SortOrder {
        raw.and_then(SortOrder::parse).unwrap_or_default()
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }

    /// Compare two products under this ordering, then by ascending id.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self.direction {
            SortDirection::Ascending => self.field.compare(a, b),
            SortDirection::Descending => self.field.compare(b, a),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::DEFAULT
    }
}

/// Formats back to the `sort_by` parameter form.
impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_descending() {
            write!(f, "{DESCENDING_PREFIX}")?;
        }
        f.write_str(self.field.as_str())
    }
}
