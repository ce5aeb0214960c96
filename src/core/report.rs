//! Session report - the accumulated record of one actor's session
//!
//! Created once at login, appended to by every successful operation, and
//! rendered (and optionally persisted) once at exit. Rendering is
//! idempotent; it never clears the accumulated state.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use ulid::Ulid;

use crate::core::console::Console;
use crate::entities::actor::{Actor, LastOrder};

/// Timestamp format for persisted log lines.
const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write session log to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SessionReport {
    session_id: Ulid,
    actor_name: String,
    employee_session: bool,
    actions: Vec<String>,
    items_searched: Vec<String>,
    items_browsed: Vec<String>,
    items_ordered: Vec<LastOrder>,
}

impl SessionReport {
    /// Start a report for an actor. The actor class recorded here decides
    /// which log file the report is appended to at exit.
    pub fn new(actor: &Actor) -> Self {
        Self {
            session_id: Ulid::new(),
            actor_name: actor.name().to_string(),
            employee_session: actor.is_authenticated(),
            actions: Vec::new(),
            items_searched: Vec::new(),
            items_browsed: Vec::new(),
            items_ordered: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Ulid {
        self.session_id
    }

    pub fn actor_name(&self) -> &str {
        &self.actor_name
    }

    pub fn add_action(&mut self, description: impl Into<String>) {
        self.actions.push(description.into());
    }

    pub fn record_searched_item(&mut self, item_name: impl Into<String>) {
        self.items_searched.push(item_name.into());
    }

    pub fn record_browsed_item(&mut self, item_name: impl Into<String>) {
        self.items_browsed.push(item_name.into());
    }

    pub fn record_ordered_item(
        &mut self,
        state: impl Into<String>,
        category: impl Into<String>,
        quantity: usize,
    ) {
        self.items_ordered.push(LastOrder {
            state: state.into(),
            category: category.into(),
            quantity,
        });
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    /// Render the report as the lines shown at exit.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![format!("Thank you for your visit, {}!", self.actor_name)];

        if self.actions.is_empty() {
            return lines;
        }

        lines.push("In this session, you have:".to_string());
        for (i, action) in self.actions.iter().enumerate() {
            lines.push(format!("{}. {action}", i + 1));
        }

        if !self.items_searched.is_empty() {
            lines.push("Items Searched:".to_string());
            for (i, name) in self.items_searched.iter().enumerate() {
                lines.push(format!("{}. Searched for item: {name}", i + 1));
            }
        }

        if !self.items_browsed.is_empty() {
            lines.push("Items Browsed:".to_string());
            for (i, name) in self.items_browsed.iter().enumerate() {
                lines.push(format!("{}. Browsed item: {name}", i + 1));
            }
        }

        if !self.items_ordered.is_empty() {
            lines.push("Items Ordered:".to_string());
            for (i, order) in self.items_ordered.iter().enumerate() {
                lines.push(format!(
                    "{}. Ordered {} of item: {} {}",
                    i + 1,
                    order.quantity,
                    order.state,
                    order.category
                ));
            }
        }

        lines
    }

    /// Print the rendered report. Safe to call more than once.
    pub fn display_report(&self, console: &mut dyn Console) {
        for line in self.render() {
            console.write_line(&line);
        }
    }

    /// Log file this session appends to, keyed by actor class.
    pub fn log_file_name(&self) -> &'static str {
        if self.employee_session {
            "employee_log.txt"
        } else {
            "user_log.txt"
        }
    }

    /// Append the rendered report to the actor-class log under `dir`,
    /// one wall-clock-stamped line per rendered line, preceded by a
    /// session marker. I/O failures propagate; the report is never
    /// silently dropped.
    pub fn save_to_log(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        let path = dir.join(self.log_file_name());
        let write_err = |source| ReportError::Write {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(dir).map_err(write_err)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(write_err)?;

        let stamp = Utc::now().format(LOG_TIME_FORMAT);
        writeln!(file, "[{stamp}] Session {}", self.session_id).map_err(write_err)?;
        for line in self.render() {
            writeln!(file, "[{stamp}] {line}").map_err(write_err)?;
        }
        Ok(path)
    }
}

/// Default per-user directory for session logs.
pub fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "jackhale", "stockroom")
        .map(|dirs| dirs.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
