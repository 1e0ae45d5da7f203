//! Actor identity and authorization predicates.
//!
//! The identity provider itself is an external collaborator; it hands the
//! surrounding layer an opaque user id and a role. Services consume the
//! predicates here instead of re-checking roles at each call site.

/// Role assigned to an authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    Admin,
}

/// An authenticated caller, as resolved by the identity layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Opaque identity supplied by the external identity provider.
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub fn customer(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Customer,
        }
    }

    #[must_use]
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Admin,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owner-or-admin check used for order access and cancellation.
    #[must_use]
    pub fn may_manage(&self, owner_id: &str) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}
