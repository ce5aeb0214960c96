//! Actor entity type - the guest or employee driving a session

use thiserror::Error;

/// Errors refusing to construct an inconsistent actor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActorError {
    #[error("an employee requires a non-empty name")]
    MissingName,

    #[error("an employee requires a non-empty password")]
    MissingPassword,
}

/// What kind of actor this is, and the credential state for employees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// Read-only visitor; never authenticated.
    Guest,

    /// Staff member; may order once authenticated.
    Employee { password: String, authenticated: bool },
}

/// Record of the last placed order, kept for the session report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastOrder {
    pub state: String,
    pub category: String,
    pub quantity: usize,
}

/// "Last action" cursors updated by search, browse, and order operations.
#[derive(Debug, Clone, Default)]
pub struct Cursors {
    /// Display name of the most recently matched search item
    pub last_searched: Option<String>,

    /// Most recently browsed category and how many units it held
    pub last_browsed: Option<(String, usize)>,

    /// Most recently placed order
    pub last_ordered: Option<LastOrder>,
}

/// A session actor: a guest or an employee.
///
/// Authentication is a one-way transition; once an employee authenticates,
/// the flag never reverts within the session. Capabilities are checked with
/// explicit predicates (`can_order`) rather than by variant matching at
/// call sites.
#[derive(Debug, Clone)]
pub struct Actor {
    name: String,
    role: Role,
    cursors: Cursors,
}

impl Actor {
    /// A guest actor. An empty name falls back to "Anonymous".
    pub fn guest(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            "Anonymous".to_string()
        } else {
            name
        };
        Self {
            name,
            role: Role::Guest,
            cursors: Cursors::default(),
        }
    }

    /// An employee actor. Refuses empty names or passwords so an
    /// inconsistent actor never enters a session.
    pub fn employee(
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ActorError> {
        let name = name.into();
        let password = password.into();
        if name.trim().is_empty() {
            return Err(ActorError::MissingName);
        }
        if password.is_empty() {
            return Err(ActorError::MissingPassword);
        }
        Ok(Self {
            name,
            role: Role::Employee {
                password,
                authenticated: false,
            },
            cursors: Cursors::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_employee(&self) -> bool {
        matches!(self.role, Role::Employee { .. })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(
            self.role,
            Role::Employee {
                authenticated: true,
                ..
            }
        )
    }

    /// Ordering is gated on an authenticated employee.
    pub fn can_order(&self) -> bool {
        self.is_authenticated()
    }

    /// Exact name match, used to locate a login candidate.
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }

    /// Authenticate with a password. Sets the flag only on an exact match
    /// and never clears it; guests always stay unauthenticated.
    pub fn authenticate(&mut self, provided_password: &str) -> bool {
        if let Role::Employee {
            password,
            authenticated,
        } = &mut self.role
        {
            if provided_password == password {
                *authenticated = true;
            }
            *authenticated
        } else {
            false
        }
    }

    pub fn cursors(&self) -> &Cursors {
        &self.cursors
    }

    pub fn cursors_mut(&mut self) -> &mut Cursors {
        &mut self.cursors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_defaults_to_anonymous() {
        assert_eq!(Actor::guest("").name(), "Anonymous");
        assert_eq!(Actor::guest("  ").name(), "Anonymous");
        assert_eq!(Actor::guest("Maya").name(), "Maya");
    }

    #[test]
    fn test_employee_requires_credentials() {
        assert_eq!(
            Actor::employee("", "secret").unwrap_err(),
            ActorError::MissingName
        );
        assert_eq!(
            Actor::employee("Jeremy", "").unwrap_err(),
            ActorError::MissingPassword
        );
        assert!(Actor::employee("Jeremy", "coppers").is_ok());
    }

    #[test]
    fn test_authentication_is_exact_and_one_way() {
        let mut employee = Actor::employee("Jeremy", "coppers").unwrap();
        assert!(!employee.is_authenticated());

        assert!(!employee.authenticate("wrong"));
        assert!(!employee.is_authenticated());

        assert!(employee.authenticate("coppers"));
        assert!(employee.is_authenticated());

        // A later mismatch never reverts the flag
        assert!(employee.authenticate("wrong"));
        assert!(employee.is_authenticated());
    }

    #[test]
    fn test_guest_cannot_authenticate_or_order() {
        let mut guest = Actor::guest("Maya");
        assert!(!guest.authenticate("anything"));
        assert!(!guest.can_order());
    }

    #[test]
    fn test_can_order_requires_authentication() {
        let mut employee = Actor::employee("Jeremy", "coppers").unwrap();
        assert!(!employee.can_order());
        employee.authenticate("coppers");
        assert!(employee.can_order());
    }

    #[test]
    fn test_is_named_is_exact() {
        let employee = Actor::employee("Jeremy", "coppers").unwrap();
        assert!(employee.is_named("Jeremy"));
        assert!(!employee.is_named("jeremy"));
    }
}
