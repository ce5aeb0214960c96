//! Authentication - the login flow and the ordering capability guard

use thiserror::Error;
use tracing::debug;

use crate::core::roster::Roster;
use crate::entities::actor::Actor;

/// Typed rejection returned by capability guards.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("You need to be authenticated to search and order items.")]
    NotAuthenticated,
}

/// Result of a login attempt against the roster.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Index of the now-authenticated employee in the roster.
    Authenticated(usize),
    /// No matching name, or the password did not match. Deliberately
    /// carries no detail; the caller reports a generic failure.
    Failed,
}

/// Find the first employee named `name` and try to authenticate it.
///
/// There is no lockout, rate limiting, or case normalization; a failure
/// leaves every actor exactly as it was.
pub fn login(roster: &mut Roster, name: &str, password: &str) -> LoginOutcome {
    let Some(index) = roster.find_by_name(name) else {
        debug!(name, "login failed: unknown name");
        return LoginOutcome::Failed;
    };
    match roster.get_mut(index) {
        Some(employee) => {
            if employee.authenticate(password) {
                debug!(name, "login succeeded");
                LoginOutcome::Authenticated(index)
            } else {
                debug!(name, "login failed: password mismatch");
                LoginOutcome::Failed
            }
        }
        _ => {
            debug!(name, "login failed: password mismatch");
            LoginOutcome::Failed
        }
    }
}

/// Explicit guard for capabilities that require authentication.
pub fn ensure_can_order(actor: &Actor) -> Result<(), AuthError> {
    if actor.can_order() {
        Ok(())
    } else {
        Err(AuthError::NotAuthenticated)
    }
}
