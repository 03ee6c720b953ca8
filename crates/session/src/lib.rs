//! Shared application contexts: device position, user identity, auth token.
//!
//! The surrounding application owns and mutates these; the screens only read
//! them and react to change notifications. Everything here is single-threaded
//! (the UI model has exactly one thread), hence `Rc` + `RefCell`.

pub mod observable;

pub use observable::{Observable, Subscription};

use foundation::LatLon;

/// The identity name the backend uses for an unauthenticated visitor.
pub const GUEST_NAME: &str = "Visitante";

/// The active user identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
}

impl User {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn guest() -> Self {
        Self::named(GUEST_NAME)
    }

    /// Whether this identity is the unauthenticated placeholder.
    pub fn is_guest(&self) -> bool {
        self.name == GUEST_NAME
    }
}

/// An opaque bearer token issued at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The externally-owned contexts a screen can observe.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub position: Observable<Option<LatLon>>,
    pub user: Observable<Option<User>>,
    pub token: Observable<Option<AuthToken>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
