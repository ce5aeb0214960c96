//! Item entity type - a single stocked unit held by a warehouse

use chrono::NaiveDateTime;

/// Wire format for `date_of_stock` values in data files
pub const STOCK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One physical unit of stock.
///
/// Immutable after creation except for the `sold` flag, which is flipped by
/// the order engine when the unit is sold. A sold item stays in its
/// warehouse's list but no longer counts toward occupancy, search results,
/// or browse tallies.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Condition of the unit (e.g. "New", "Used")
    pub state: String,

    /// Product category (e.g. "Monitor", "Mouse")
    pub category: String,

    /// ID of the warehouse holding the unit
    pub warehouse_id: u32,

    /// When the unit entered stock
    pub date_of_stock: NaiveDateTime,

    /// Whether the unit has been sold this session
    pub sold: bool,
}

impl Item {
    pub fn new(
        state: impl Into<String>,
        category: impl Into<String>,
        warehouse_id: u32,
        date_of_stock: NaiveDateTime,
    ) -> Self {
        Self {
            state: state.into(),
            category: category.into(),
            warehouse_id,
            date_of_stock,
            sold: false,
        }
    }

    /// The composite identity used to aggregate counts across duplicates.
    pub fn key(&self) -> ItemKey {
        ItemKey {
            state: self.state.clone(),
            category: self.category.clone(),
            warehouse_id: self.warehouse_id,
        }
    }

    /// Case-insensitive substring match against the category.
    pub fn matches(&self, term: &str) -> bool {
        self.category.to_lowercase().contains(&term.to_lowercase())
    }

    /// Whole days the unit has been in stock as of `now`.
    pub fn days_in_stock(&self, now: NaiveDateTime) -> i64 {
        (now - self.date_of_stock).num_days()
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.state, self.category)
    }
}

/// Composite item identity: `(state, category, warehouse_id)`.
///
/// Renders as `"{state} {category} (Warehouse {warehouse_id})"`, the form
/// shown in order listings and used to key available-quantity counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub state: String,
    pub category: String,
    pub warehouse_id: u32,
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} (Warehouse {})",
            self.state, self.category, self.warehouse_id
        )
    }
}
