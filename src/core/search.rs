//! Search and browse - full-text item search and category aggregation

use std::io;

use crate::core::console::Console;
use crate::core::inventory::InventoryIndex;
use crate::entities::actor::Actor;
use crate::entities::item::{Item, ItemKey};

/// Insertion-ordered tally of available quantity per item key.
///
/// Recomputed for every search; the order engine decrements it as orders
/// are placed so the listing a user selects from stays consistent for the
/// lifetime of that search. Enumeration order is first-seen order, which
/// keeps ordinals stable across re-prompts.
#[derive(Debug, Clone, Default)]
pub struct ItemCounts {
    entries: Vec<(ItemKey, usize)>,
}

impl ItemCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more unit under `key`.
    pub fn add(&mut self, key: ItemKey) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *count += 1;
        } else {
            self.entries.push((key, 1));
        }
    }

    /// Units currently available under `key`; zero for unknown keys.
    pub fn get(&self, key: &ItemKey) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Remove `quantity` units from `key`. Saturates at zero only in the
    /// sense that callers must validate first; the count itself is never
    /// allowed to underflow.
    pub fn decrement(&mut self, key: &ItemKey, quantity: usize) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, count)) if *count >= quantity => {
                *count -= quantity;
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemKey, usize)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Result of one search: the matching items and their availability tally.
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    /// Matching unsold items, in warehouse-then-insertion order
    pub items: Vec<Item>,

    /// Available quantity per composite key
    pub counts: ItemCounts,
}

/// Scan every warehouse for unsold items whose category contains `term`,
/// case-insensitively. The tally is the canonical available-quantity
/// signal the order engine consumes.
pub fn search_item(index: &InventoryIndex, term: &str) -> SearchHits {
    let mut hits = SearchHits::default();
    for warehouse in index.warehouses() {
        for item in warehouse.search(term) {
            hits.counts.add(item.key());
            hits.items.push(item.clone());
        }
    }
    hits
}

/// Tally all unsold items by lower-cased category, in first-seen order.
pub fn category_tally(index: &InventoryIndex) -> Vec<(String, usize)> {
    let mut tally: Vec<(String, usize)> = Vec::new();
    for warehouse in index.warehouses() {
        for item in warehouse.items().iter().filter(|item| !item.sold) {
            let category = item.category.to_lowercase();
            if let Some((_, count)) = tally.iter_mut().find(|(c, _)| *c == category) {
                *count += 1;
            } else {
                tally.push((category, 1));
            }
        }
    }
    tally
}

/// Interactive browse-by-category flow.
///
/// Presents a 1-based category menu and lists the chosen category's items.
/// `cancel` aborts silently; out-of-range or non-numeric input reports a
/// recoverable error and returns to the menu. A successful browse updates
/// the actor's browse cursor.
pub fn browse_by_category(
    index: &InventoryIndex,
    actor: &mut Actor,
    console: &mut dyn Console,
) -> io::Result<()> {
    let tally = category_tally(index);

    console.write_line("Available categories:");
    for (i, (category, count)) in tally.iter().enumerate() {
        console.write_line(&format!("{}. {category} ({count} items)", i + 1));
    }

    let choice =
        console.read_line("Type the number of the category to browse (or 'cancel' to go back): ")?;
    if choice.eq_ignore_ascii_case("cancel") {
        return Ok(());
    }

    let Ok(ordinal) = choice.parse::<usize>() else {
        console.write_line("Invalid input. Please enter a number.");
        return Ok(());
    };
    if ordinal < 1 || ordinal > tally.len() {
        console.write_line("Invalid category number. Please enter a valid number.");
        return Ok(());
    }

    let (category, count) = &tally[ordinal - 1];
    actor.cursors_mut().last_browsed = Some((category.clone(), *count));

    console.write_line(&format!("List of {category}s available:"));
    for warehouse in index.warehouses() {
        for item in warehouse.items() {
            if !item.sold && item.category.to_lowercase() == *category {
                console.write_line(&format!(
                    "{} ({}) - Stocked on: {}",
                    item.state, item.category, item.date_of_stock
                ));
            }
        }
    }
    Ok(())
}
