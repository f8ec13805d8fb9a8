// Person Domain Model

use serde::{Deserialize, Serialize};

/// Person identifier (opaque to the core)
pub type PersonId = String;

/// An address capable of receiving a notification (E.164 phone number)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact(String);

impl Contact {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person known to the directory; carries zero-or-one contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub contact: Option<Contact>,
}

impl Person {
    pub fn new(id: impl Into<String>, contact: Option<Contact>) -> Self {
        Self {
            id: id.into(),
            contact,
        }
    }

    /// Person with a contact address
    pub fn with_contact(id: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            contact: Some(Contact::new(contact)),
        }
    }

    /// Person without any contact address (skipped by notification dispatch)
    pub fn without_contact(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            contact: None,
        }
    }
}
