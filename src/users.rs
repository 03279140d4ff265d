use std::collections::HashMap;

use dashmap::DashMap;

/// A registered user, built from the signup form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Build a user from decoded form parameters.
    ///
    /// Missing fields become empty strings; the signup form is trusted to
    /// send all four.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let field = |key: &str| params.get(key).cloned().unwrap_or_default();
        Self {
            id: field("userId"),
            password: field("password"),
            name: field("name"),
            email: field("email"),
        }
    }
}

/// User store shared by every connection coroutine.
///
/// Backed by a lock-free concurrent map so concurrent signups and logins
/// never corrupt it. Adding a user under an existing id overwrites the
/// previous entry (last write wins).
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: DashMap<String, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn find_by_id(&self, id: &str) -> Option<User> {
        self.users.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
