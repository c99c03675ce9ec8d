//! Verified identities supplied by the authentication boundary.
//!
//! Nothing here checks credentials. A [`Caller`] is trusted as given.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of a customer or operator, as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

/// The acting principal of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: UserId,
    pub role: Role,
}

impl Caller {
    pub fn customer(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            role: Role::Customer,
        }
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            role: Role::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners read their own records; admins read everything.
    pub fn can_read(&self, owner: &UserId) -> bool {
        self.is_admin() || &self.id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_and_admin_can_read() {
        let owner = UserId::from("u-1");
        assert!(Caller::customer("u-1").can_read(&owner));
        assert!(Caller::admin("ops").can_read(&owner));
        assert!(!Caller::customer("u-2").can_read(&owner));
    }
}
