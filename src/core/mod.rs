//! Core module - the session-scoped inventory query/order engine

pub mod auth;
pub mod console;
pub mod inventory;
pub mod loader;
pub mod order;
pub mod report;
pub mod roster;
pub mod search;

pub use auth::{ensure_can_order, login, AuthError, LoginOutcome};
pub use console::{Console, ReplayConsole, StdConsole};
pub use inventory::{display_warehouses, InventoryError, InventoryIndex};
pub use loader::{
    build_index, demo_personnel, demo_stock, load_personnel, load_stock, EmployeeRecord,
    ItemRecord, LoaderError,
};
pub use order::{place_order, search_and_order, OrderError, OrderFlow, OrderOutcome, OrderState};
pub use report::{default_log_dir, ReportError, SessionReport};
pub use roster::{Roster, RosterError};
pub use search::{browse_by_category, category_tally, search_item, ItemCounts, SearchHits};
