//! Entity types for the warehouse domain

pub mod actor;
pub mod item;
pub mod warehouse;

pub use actor::{Actor, ActorError, Cursors, LastOrder, Role};
pub use item::{Item, ItemKey, STOCK_DATE_FORMAT};
pub use warehouse::Warehouse;
