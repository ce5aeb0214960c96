//! Data source collaborator - JSON records loaded once at startup
//!
//! The core consumes already-parsed record sequences; where they came from
//! (a user-supplied file or the embedded demo fixture) is decided here and
//! nowhere else.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::inventory::InventoryIndex;
use crate::entities::item::{Item, STOCK_DATE_FORMAT};

const DEMO_STOCK: &str = include_str!("../../data/stock.json");
const DEMO_PERSONNEL: &str = include_str!("../../data/personnel.json");

/// Wire shape of one stock entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub state: String,
    pub category: String,
    pub warehouse: u32,
    pub date_of_stock: String,
}

/// Wire shape of one personnel entry; `head_of` nests subordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub user_name: String,
    pub password: String,
    #[serde(default)]
    pub head_of: Vec<EmployeeRecord>,
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("invalid date_of_stock '{value}' (expected {STOCK_DATE_FORMAT}): {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },
}

/// Parse stock records from JSON content; `filename` names the source in
/// error messages.
pub fn parse_stock(content: &str, filename: &str) -> Result<Vec<ItemRecord>, LoaderError> {
    serde_json::from_str(content).map_err(|source| LoaderError::Parse {
        path: filename.to_string(),
        source,
    })
}

/// Parse personnel records from JSON content.
pub fn parse_personnel(content: &str, filename: &str) -> Result<Vec<EmployeeRecord>, LoaderError> {
    serde_json::from_str(content).map_err(|source| LoaderError::Parse {
        path: filename.to_string(),
        source,
    })
}

pub fn load_stock(path: &Path) -> Result<Vec<ItemRecord>, LoaderError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoaderError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_stock(&content, &path.display().to_string())
}

pub fn load_personnel(path: &Path) -> Result<Vec<EmployeeRecord>, LoaderError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoaderError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_personnel(&content, &path.display().to_string())
}

/// The embedded demo stock, used when no `--stock` file is given.
pub fn demo_stock() -> Result<Vec<ItemRecord>, LoaderError> {
    parse_stock(DEMO_STOCK, "<built-in stock>")
}

/// The embedded demo personnel, used when no `--personnel` file is given.
pub fn demo_personnel() -> Result<Vec<EmployeeRecord>, LoaderError> {
    parse_personnel(DEMO_PERSONNEL, "<built-in personnel>")
}

/// Materialize stock records into an inventory index. Warehouses appear
/// in first-seen order of their ids.
pub fn build_index(records: &[ItemRecord]) -> Result<InventoryIndex, LoaderError> {
    let mut index = InventoryIndex::new();
    for record in records {
        let date = NaiveDateTime::parse_from_str(&record.date_of_stock, STOCK_DATE_FORMAT)
            .map_err(|source| LoaderError::InvalidDate {
                value: record.date_of_stock.clone(),
                source,
            })?;
        index
            .get_or_insert(record.warehouse)
            .add_item(Item::new(&record.state, &record.category, record.warehouse, date));
    }
    debug!(
        warehouses = index.len(),
        items = index.total_occupancy(),
        "stock loaded"
    );
    Ok(index)
}
