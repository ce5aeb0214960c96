//! Inventory index - the collection of warehouses a session queries

use thiserror::Error;

use crate::core::console::Console;
use crate::entities::item::ItemKey;
use crate::entities::warehouse::Warehouse;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("warehouse {0} is already registered")]
    DuplicateWarehouse(u32),
}

/// All warehouses known to the session, keyed by unique id.
///
/// Iteration order is registration order, which makes every listing
/// deterministic for a given data source.
#[derive(Debug, Clone, Default)]
pub struct InventoryIndex {
    warehouses: Vec<Warehouse>,
}

impl InventoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a warehouse. Ids must be unique.
    pub fn register(&mut self, warehouse: Warehouse) -> Result<(), InventoryError> {
        if self.get(warehouse.id()).is_some() {
            return Err(InventoryError::DuplicateWarehouse(warehouse.id()));
        }
        self.warehouses.push(warehouse);
        Ok(())
    }

    /// The warehouse with `id`, creating and registering an empty one on
    /// first sight. Used when materializing stock records in file order.
    pub fn get_or_insert(&mut self, id: u32) -> &mut Warehouse {
        if let Some(pos) = self.warehouses.iter().position(|w| w.id() == id) {
            return &mut self.warehouses[pos];
        }
        self.warehouses.push(Warehouse::new(id));
        let last = self.warehouses.len() - 1;
        &mut self.warehouses[last]
    }

    pub fn get(&self, id: u32) -> Option<&Warehouse> {
        self.warehouses.iter().find(|w| w.id() == id)
    }

    /// Warehouses in registration order.
    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn len(&self) -> usize {
        self.warehouses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warehouses.is_empty()
    }

    /// Sum of all warehouse occupancies.
    pub fn total_occupancy(&self) -> usize {
        self.warehouses.iter().map(Warehouse::occupancy).sum()
    }

    /// Mark up to `quantity` unsold units matching `key` as sold in the
    /// owning warehouse. Returns how many units were marked.
    pub fn mark_sold(&mut self, key: &ItemKey, quantity: usize) -> usize {
        match self
            .warehouses
            .iter_mut()
            .find(|w| w.id() == key.warehouse_id)
        {
            Some(warehouse) => warehouse.mark_sold(key, quantity),
            None => 0,
        }
    }
}

/// List every warehouse with its stock count, then a total line.
///
/// Emits `"Warehouse <id> - Stock Count: <occupancy>"` per warehouse and
/// returns (and emits) `"Listed <total> items."`.
pub fn display_warehouses(index: &InventoryIndex, console: &mut dyn Console) -> String {
    let mut total = 0;
    for warehouse in index.warehouses() {
        let count = warehouse.occupancy();
        total += count;
        console.write_line(&format!("{warehouse} - Stock Count: {count}"));
    }
    let summary = format!("Listed {total} items.");
    console.write_line(&summary);
    summary
}
