//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a stockroom command
pub fn stockroom() -> Command {
    Command::new(cargo::cargo_bin!("stockroom"))
}

/// A small stock fixture: two blue mice and a red mouse in warehouse 1,
/// one orange keyboard in warehouse 2.
pub const SMALL_STOCK: &str = r#"[
  {"state": "Blue", "category": "Mouse", "warehouse": 1,
   "date_of_stock": "2024-02-01 08:00:00"},
  {"state": "Blue", "category": "Mouse", "warehouse": 1,
   "date_of_stock": "2024-02-02 08:00:00"},
  {"state": "Red", "category": "Mouse", "warehouse": 1,
   "date_of_stock": "2024-02-03 08:00:00"},
  {"state": "Orange", "category": "Keyboard", "warehouse": 2,
   "date_of_stock": "2024-02-04 08:00:00"}
]"#;

/// A one-employee roster matching the login scenarios.
pub const SMALL_PERSONNEL: &str = r#"[
  {"user_name": "Jeremy", "password": "coppers",
   "head_of": [{"user_name": "Olga", "password": "optimus"}]}
]"#;

/// Write a stock fixture into the temp dir and return its path.
pub fn write_stock(tmp: &TempDir, json: &str) -> PathBuf {
    let path = tmp.path().join("stock.json");
    std::fs::write(&path, json).unwrap();
    path
}

/// Write a personnel fixture into the temp dir and return its path.
pub fn write_personnel(tmp: &TempDir, json: &str) -> PathBuf {
    let path = tmp.path().join("personnel.json");
    std::fs::write(&path, json).unwrap();
    path
}

/// A stockroom command wired to the small fixtures, logging disabled.
pub fn stockroom_with_fixtures(tmp: &TempDir) -> Command {
    let stock = write_stock(tmp, SMALL_STOCK);
    let personnel = write_personnel(tmp, SMALL_PERSONNEL);
    let mut cmd = stockroom();
    cmd.arg("--stock")
        .arg(stock)
        .arg("--personnel")
        .arg(personnel)
        .arg("--no-log");
    cmd
}
