//! Order engine - quantity validation and stock decrement for one order
//!
//! An order attempt moves through an explicit state machine:
//! `SearchPending -> ItemSelected -> QuantityPending -> Placed`, with
//! `Cancelled` and `Rejected` as terminal exits. The engine is the only
//! code allowed to decrement stock, and it validates before every
//! decrement, so a search-result count can never go negative.

use std::io;

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::core::auth::ensure_can_order;
use crate::core::console::Console;
use crate::core::inventory::InventoryIndex;
use crate::core::search::{search_item, ItemCounts, SearchHits};
use crate::entities::actor::{Actor, LastOrder};
use crate::entities::item::ItemKey;

/// States of one order attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderState {
    #[default]
    SearchPending,
    ItemSelected,
    QuantityPending,
    Placed,
    Cancelled,
    Rejected,
}

/// How an order attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// An order was placed and stock decremented.
    Placed {
        key: ItemKey,
        quantity: usize,
    },
    /// The actor backed out; nothing was mutated.
    Cancelled,
    /// The actor is not allowed to order; nothing was prompted.
    Rejected,
}

/// Recoverable user-input errors inside the order flow. The rendered text
/// is the stable message shown to the actor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderInputError {
    #[error("Invalid input. Please enter a number for item selection.")]
    SelectionNotNumeric,

    #[error("Invalid item number. Please enter a valid item number.")]
    SelectionOutOfRange,

    #[error("Invalid input. Please enter a number for quantity.")]
    QuantityNotNumeric,

    #[error("Invalid quantity. Please enter a valid quantity.")]
    QuantityOutOfRange,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("Not enough quantity available for the order.")]
    InsufficientQuantity { requested: usize, available: usize },
}

/// One step of the selection prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum SelectStep {
    Cancelled,
    Invalid(OrderInputError),
    /// Zero-based index into the search hits.
    Selected(usize),
}

/// One step of the quantity prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum QuantityStep {
    Cancelled,
    Invalid(OrderInputError),
    Accepted(usize),
}

/// The per-attempt state machine. Transitions happen only through
/// `select` and `quantity`; invalid input leaves the state unchanged so
/// the caller can re-prompt.
#[derive(Debug, Default)]
pub struct OrderFlow {
    state: OrderState,
}

impl OrderFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Resolve an ordinal selection against `hit_count` search hits.
    pub fn select(&mut self, input: &str, hit_count: usize) -> SelectStep {
        if input.eq_ignore_ascii_case("cancel") {
            self.state = OrderState::Cancelled;
            return SelectStep::Cancelled;
        }
        let Ok(ordinal) = input.parse::<usize>() else {
            return SelectStep::Invalid(OrderInputError::SelectionNotNumeric);
        };
        if ordinal < 1 || ordinal > hit_count {
            return SelectStep::Invalid(OrderInputError::SelectionOutOfRange);
        }
        self.state = OrderState::ItemSelected;
        SelectStep::Selected(ordinal - 1)
    }

    /// Move on to the quantity prompt for the selected item. This
    /// transition always succeeds.
    pub fn prompt_quantity(&mut self) {
        if self.state == OrderState::ItemSelected {
            self.state = OrderState::QuantityPending;
        }
    }

    /// Resolve a quantity against the available count for the selection.
    pub fn quantity(&mut self, input: &str, available: usize) -> QuantityStep {
        if input.eq_ignore_ascii_case("cancel") {
            self.state = OrderState::Cancelled;
            return QuantityStep::Cancelled;
        }
        let Ok(quantity) = input.parse::<usize>() else {
            return QuantityStep::Invalid(OrderInputError::QuantityNotNumeric);
        };
        if quantity < 1 || quantity > available {
            return QuantityStep::Invalid(OrderInputError::QuantityOutOfRange);
        }
        self.state = OrderState::Placed;
        QuantityStep::Accepted(quantity)
    }
}

/// Commit an order: validate against the search-result tally, mark the
/// units sold in their warehouse, and decrement the tally.
pub fn place_order(
    index: &mut InventoryIndex,
    counts: &mut ItemCounts,
    key: &ItemKey,
    quantity: usize,
) -> Result<(), OrderError> {
    let available = counts.get(key);
    if quantity < 1 || quantity > available {
        return Err(OrderError::InsufficientQuantity {
            requested: quantity,
            available,
        });
    }

    // Live stock is the source of truth; if it drifted below the tally,
    // refuse rather than oversell.
    let marked = index.mark_sold(key, quantity);
    if marked < quantity {
        return Err(OrderError::InsufficientQuantity {
            requested: quantity,
            available: marked,
        });
    }
    counts.decrement(key, quantity);
    debug!(key = %key, quantity, "order placed");
    Ok(())
}

/// Interactive search-and-order flow.
///
/// Refuses outright for actors without the order capability. Otherwise
/// loops on the search prompt until the actor cancels or an order is
/// placed, updating the actor's search and order cursors along the way.
pub fn search_and_order(
    index: &mut InventoryIndex,
    actor: &mut Actor,
    console: &mut dyn Console,
) -> io::Result<OrderOutcome> {
    if let Err(err) = ensure_can_order(actor) {
        console.write_line(&err.to_string());
        return Ok(OrderOutcome::Rejected);
    }

    loop {
        let term =
            console.read_line("Enter the item you want to search (or 'cancel' to go back): ")?;
        if term.eq_ignore_ascii_case("cancel") {
            return Ok(OrderOutcome::Cancelled);
        }

        let hits = search_item(index, &term);
        if hits.items.is_empty() {
            console.write_line("Item not found.");
            continue;
        }
        if let Some(last) = hits.items.last() {
            actor.cursors_mut().last_searched = Some(last.to_string());
        }

        return order_items(index, actor, console, hits);
    }
}

/// Selection and quantity prompts over an existing search result.
fn order_items(
    index: &mut InventoryIndex,
    actor: &mut Actor,
    console: &mut dyn Console,
    mut hits: SearchHits,
) -> io::Result<OrderOutcome> {
    let now = Utc::now().naive_utc();
    let mut flow = OrderFlow::new();

    loop {
        console.write_line("Available items:");
        for (i, item) in hits.items.iter().enumerate() {
            let key = item.key();
            console.write_line(&format!(
                "{}. {key}, Days in Stock: {} days, Available: {} pcs",
                i + 1,
                item.days_in_stock(now),
                hits.counts.get(&key),
            ));
        }

        let choice = console
            .read_line("Enter the number of the item you want to order (or 'cancel' to go back): ")?;
        let selected = match flow.select(&choice, hits.items.len()) {
            SelectStep::Cancelled => return Ok(OrderOutcome::Cancelled),
            SelectStep::Invalid(err) => {
                console.write_line(&err.to_string());
                continue;
            }
            SelectStep::Selected(i) => i,
        };

        let key = hits.items[selected].key();
        let available = hits.counts.get(&key);
        console.write_line(&format!("You have selected: {key}, Available: {available}"));
        flow.prompt_quantity();

        loop {
            let input = console.read_line("Enter the quantity you want to order: ")?;
            let quantity = match flow.quantity(&input, hits.counts.get(&key)) {
                QuantityStep::Cancelled => return Ok(OrderOutcome::Cancelled),
                QuantityStep::Invalid(err) => {
                    console.write_line(&err.to_string());
                    continue;
                }
                QuantityStep::Accepted(quantity) => quantity,
            };

            match place_order(index, &mut hits.counts, &key, quantity) {
                Ok(()) => {
                    console.write_line(&format!("Order placed for {quantity} of '{key}'"));
                    actor.cursors_mut().last_ordered = Some(LastOrder {
                        state: key.state.clone(),
                        category: key.category.clone(),
                        quantity,
                    });
                    return Ok(OrderOutcome::Placed { key, quantity });
                }
                Err(err) => {
                    console.write_line(&err.to_string());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::console::ReplayConsole;
    use crate::entities::item::{Item, STOCK_DATE_FORMAT};
    use chrono::NaiveDateTime;

    fn stocked_index(mice: usize) -> InventoryIndex {
        let date =
            NaiveDateTime::parse_from_str("2024-02-01 08:00:00", STOCK_DATE_FORMAT).unwrap();
        let mut index = InventoryIndex::new();
        for _ in 0..mice {
            index
                .get_or_insert(1)
                .add_item(Item::new("Blue", "Mouse", 1, date));
        }
        index
    }

    fn blue_mouse_key() -> ItemKey {
        ItemKey {
            state: "Blue".to_string(),
            category: "Mouse".to_string(),
            warehouse_id: 1,
        }
    }

    fn authenticated_employee() -> Actor {
        let mut actor = Actor::employee("Jeremy", "coppers").unwrap();
        actor.authenticate("coppers");
        actor
    }

    #[test]
    fn test_flow_transitions() {
        let mut flow = OrderFlow::new();
        assert_eq!(flow.state(), OrderState::SearchPending);

        // Invalid selections leave the state unchanged
        assert_eq!(
            flow.select("abc", 2),
            SelectStep::Invalid(OrderInputError::SelectionNotNumeric)
        );
        assert_eq!(
            flow.select("3", 2),
            SelectStep::Invalid(OrderInputError::SelectionOutOfRange)
        );
        assert_eq!(flow.state(), OrderState::SearchPending);

        assert_eq!(flow.select("2", 2), SelectStep::Selected(1));
        assert_eq!(flow.state(), OrderState::ItemSelected);

        flow.prompt_quantity();
        assert_eq!(flow.state(), OrderState::QuantityPending);

        assert_eq!(
            flow.quantity("0", 5),
            QuantityStep::Invalid(OrderInputError::QuantityOutOfRange)
        );
        assert_eq!(
            flow.quantity("six", 5),
            QuantityStep::Invalid(OrderInputError::QuantityNotNumeric)
        );
        assert_eq!(flow.state(), OrderState::QuantityPending);

        assert_eq!(flow.quantity("5", 5), QuantityStep::Accepted(5));
        assert_eq!(flow.state(), OrderState::Placed);
    }

    #[test]
    fn test_flow_cancel_is_terminal() {
        let mut flow = OrderFlow::new();
        assert_eq!(flow.select("cancel", 3), SelectStep::Cancelled);
        assert_eq!(flow.state(), OrderState::Cancelled);
    }

    #[test]
    fn test_place_order_decrements_counts_and_stock() {
        // Five in stock, order three, two remain
        let mut index = stocked_index(5);
        let mut hits = search_item(&index, "mouse");
        let key = blue_mouse_key();

        place_order(&mut index, &mut hits.counts, &key, 3).unwrap();

        assert_eq!(hits.counts.get(&key), 2);
        assert_eq!(index.get(1).unwrap().occupancy(), 2);

        // A fresh search sees the decremented stock, not a restock
        let fresh = search_item(&index, "mouse");
        assert_eq!(fresh.counts.get(&key), 2);
    }

    #[test]
    fn test_place_order_never_oversells() {
        let mut index = stocked_index(2);
        let mut hits = search_item(&index, "mouse");
        let key = blue_mouse_key();

        assert_eq!(
            place_order(&mut index, &mut hits.counts, &key, 3),
            Err(OrderError::InsufficientQuantity {
                requested: 3,
                available: 2
            })
        );
        assert_eq!(
            place_order(&mut index, &mut hits.counts, &key, 0),
            Err(OrderError::InsufficientQuantity {
                requested: 0,
                available: 2
            })
        );
        assert_eq!(hits.counts.get(&key), 2);
        assert_eq!(index.get(1).unwrap().occupancy(), 2);
    }

    #[test]
    fn test_search_and_order_rejects_unauthenticated() {
        let mut index = stocked_index(1);
        let mut actor = Actor::employee("Jeremy", "coppers").unwrap();
        let mut console = ReplayConsole::default();

        let outcome = search_and_order(&mut index, &mut actor, &mut console).unwrap();

        assert_eq!(outcome, OrderOutcome::Rejected);
        assert_eq!(
            console.output(),
            &["You need to be authenticated to search and order items."]
        );
    }

    #[test]
    fn test_search_and_order_full_flow() {
        let mut index = stocked_index(5);
        let mut actor = authenticated_employee();
        let mut console = ReplayConsole::new(["mouse", "1", "3"]);

        let outcome = search_and_order(&mut index, &mut actor, &mut console).unwrap();

        assert_eq!(
            outcome,
            OrderOutcome::Placed {
                key: blue_mouse_key(),
                quantity: 3
            }
        );
        assert_eq!(
            actor.cursors().last_ordered,
            Some(LastOrder {
                state: "Blue".to_string(),
                category: "Mouse".to_string(),
                quantity: 3
            })
        );
        assert_eq!(
            actor.cursors().last_searched.as_deref(),
            Some("Blue Mouse")
        );

        let text = console.output_text();
        assert!(text.contains("Available items:"));
        assert!(text.contains("You have selected: Blue Mouse (Warehouse 1), Available: 5"));
        assert!(text.contains("Order placed for 3 of 'Blue Mouse (Warehouse 1)'"));
    }

    #[test]
    fn test_search_and_order_not_found_reprompts() {
        let mut index = stocked_index(1);
        let mut actor = authenticated_employee();
        let mut console = ReplayConsole::new(["tablet", "cancel"]);

        let outcome = search_and_order(&mut index, &mut actor, &mut console).unwrap();

        assert_eq!(outcome, OrderOutcome::Cancelled);
        assert!(console.output_text().contains("Item not found."));
    }

    #[test]
    fn test_search_and_order_invalid_inputs_reprompt() {
        let mut index = stocked_index(2);
        let mut actor = authenticated_employee();
        let mut console =
            ReplayConsole::new(["mouse", "nine", "9", "1", "abc", "0", "7", "2"]);

        let outcome = search_and_order(&mut index, &mut actor, &mut console).unwrap();

        assert_eq!(
            outcome,
            OrderOutcome::Placed {
                key: blue_mouse_key(),
                quantity: 2
            }
        );
        let text = console.output_text();
        assert!(text.contains("Invalid input. Please enter a number for item selection."));
        assert!(text.contains("Invalid item number. Please enter a valid item number."));
        assert!(text.contains("Invalid input. Please enter a number for quantity."));
        assert!(text.contains("Invalid quantity. Please enter a valid quantity."));
    }

    #[test]
    fn test_cancel_mid_flow_mutates_nothing() {
        let mut index = stocked_index(3);
        let mut actor = authenticated_employee();
        let mut console = ReplayConsole::new(["mouse", "1", "cancel"]);

        let outcome = search_and_order(&mut index, &mut actor, &mut console).unwrap();

        assert_eq!(outcome, OrderOutcome::Cancelled);
        assert!(actor.cursors().last_ordered.is_none());
        assert_eq!(index.get(1).unwrap().occupancy(), 3);
    }
}
