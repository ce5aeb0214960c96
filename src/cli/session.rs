//! Interactive session - entry menu, operation loop, and exit report

use std::io;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{debug, info};

use crate::cli::args::Cli;
use crate::core::auth::{login, LoginOutcome};
use crate::core::console::{Console, StdConsole};
use crate::core::inventory::{display_warehouses, InventoryIndex};
use crate::core::loader;
use crate::core::order::{search_and_order, OrderOutcome};
use crate::core::report::{default_log_dir, SessionReport};
use crate::core::roster::Roster;
use crate::core::search::browse_by_category;
use crate::entities::actor::Actor;

/// Menu operations, in the order they are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    ListWarehouses,
    SearchAndOrder,
    BrowseByCategory,
    Exit,
}

impl Operation {
    fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Operation::ListWarehouses),
            "2" => Some(Operation::SearchAndOrder),
            "3" => Some(Operation::BrowseByCategory),
            "4" => Some(Operation::Exit),
            _ => None,
        }
    }
}

fn greet_guest(actor: &Actor, console: &mut dyn Console) {
    console.write_line(&format!("Hello, {}!", actor.name()));
    console.write_line("Welcome to our Warehouse.");
    console.write_line(
        "If you don't find what you are looking for, please ask one of our staff \
         members to assist you.",
    );
}

fn greet_employee(console: &mut dyn Console) {
    console.write_line(
        "If you experience a problem with the system, please contact technical support.",
    );
}

/// Entry menu: loop until the visitor enters as a guest or authenticates
/// as an employee. A failed login is recoverable and returns here.
fn entry_menu(roster: &mut Roster, console: &mut dyn Console) -> io::Result<Actor> {
    loop {
        console.write_line("1. Enter as Guest");
        console.write_line("2. Enter as Authenticated User");
        let choice = console.read_line("Enter your choice: ")?;

        match choice.as_str() {
            "1" => {
                let name = console.read_line("Enter your name: ")?;
                let guest = Actor::guest(name);
                greet_guest(&guest, console);
                return Ok(guest);
            }
            "2" => {
                let name = console.read_line("Enter your name: ")?;
                let password = console.read_line("Enter your password: ")?;
                match login(roster, &name, &password) {
                    LoginOutcome::Authenticated(index) => {
                        console
                            .write_line(&format!("Welcome, {name}! You are authenticated."));
                        greet_employee(console);
                        // The session works on its own copy; the roster
                        // keeps the authenticated flag for its records.
                        if let Some(employee) = roster.get(index) {
                            return Ok(employee.clone());
                        }
                    }
                    LoginOutcome::Failed => {
                        console
                            .write_line(&format!("Authentication failed for user {name}."));
                    }
                }
            }
            _ => console.write_line("Invalid choice. Please select option 1 or 2."),
        }
    }
}

/// Operation menu: loop until a valid operation code is entered.
fn read_operation(console: &mut dyn Console) -> io::Result<Operation> {
    loop {
        console.write_line("1. Display Warehouses");
        console.write_line("2. Search and Order Item");
        console.write_line("3. Browse by Category");
        console.write_line("4. Exit");
        let choice = console.read_line("Enter your choice: ")?;

        match Operation::from_choice(&choice) {
            Some(operation) => return Ok(operation),
            None => console.write_line("Invalid choice. Please select a valid option."),
        }
    }
}

/// Run one full session: login, the operation loop, and the exit report.
///
/// Returns the accumulated report so the caller decides whether and where
/// to persist it.
pub fn run(
    index: &mut InventoryIndex,
    roster: &mut Roster,
    console: &mut dyn Console,
) -> io::Result<SessionReport> {
    let mut actor = entry_menu(roster, console)?;
    debug!(actor = actor.name(), authenticated = actor.is_authenticated(), "session started");

    let mut report = SessionReport::new(&actor);

    loop {
        match read_operation(console)? {
            Operation::ListWarehouses => {
                display_warehouses(index, console);
                report.add_action("Listed warehouses");
            }
            Operation::SearchAndOrder => {
                if let OrderOutcome::Placed { .. } =
                    search_and_order(index, &mut actor, console)?
                {
                    report.add_action("Searched and Ordered");
                    if let Some(name) = &actor.cursors().last_searched {
                        report.record_searched_item(name.clone());
                    }
                    if let Some(order) = &actor.cursors().last_ordered {
                        report.record_ordered_item(
                            order.state.clone(),
                            order.category.clone(),
                            order.quantity,
                        );
                    }
                }
            }
            Operation::BrowseByCategory => {
                let before = actor.cursors().last_browsed.clone();
                browse_by_category(index, &mut actor, console)?;
                let after = actor.cursors().last_browsed.clone();
                if after.is_some() && after != before {
                    report.add_action("Browsed Items");
                    if let Some((category, _)) = after {
                        report.record_browsed_item(category);
                    }
                }
            }
            Operation::Exit => {
                report.display_report(console);
                return Ok(report);
            }
        }
    }
}

/// Binary entry point: load the data source, run the session on the real
/// terminal, and persist the report.
pub fn run_cli(cli: Cli) -> Result<()> {
    let stock = match &cli.stock {
        Some(path) => loader::load_stock(path),
        None => loader::demo_stock(),
    }
    .into_diagnostic()
    .wrap_err("loading stock data")?;

    let personnel = match &cli.personnel {
        Some(path) => loader::load_personnel(path),
        None => loader::demo_personnel(),
    }
    .into_diagnostic()
    .wrap_err("loading personnel data")?;

    let mut index = loader::build_index(&stock).into_diagnostic()?;
    let mut roster = Roster::from_records(&personnel).into_diagnostic()?;

    let mut console = StdConsole::new();
    let report = run(&mut index, &mut roster, &mut console).into_diagnostic()?;

    if cli.no_log {
        return Ok(());
    }
    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    let path = report
        .save_to_log(&log_dir)
        .into_diagnostic()
        .wrap_err("persisting session report")?;
    info!(path = %path.display(), "session report appended");
    eprintln!(
        "{} session report appended to {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}
