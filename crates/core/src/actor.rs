//! The caller identity passed explicitly into every workflow operation.
//!
//! The HTTP layer builds an [`ActorContext`] from the bearer token (or the
//! lack of one); nothing below it reads ambient identity state.

use serde::Serialize;

use crate::error::CoreError;
use crate::roles::is_elevated_role;
use crate::types::DbId;

/// Who is performing an operation and what they are allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActorContext {
    /// The user id, `None` for anonymous callers.
    pub id: Option<DbId>,
    pub is_authenticated: bool,
    /// Superuser-equivalent capability.
    pub is_elevated: bool,
}

impl ActorContext {
    /// An unauthenticated caller.
    pub fn anonymous() -> Self {
        Self {
            id: None,
            is_authenticated: false,
            is_elevated: false,
        }
    }

    /// An authenticated caller without the elevated capability.
    pub fn user(id: DbId) -> Self {
        Self {
            id: Some(id),
            is_authenticated: true,
            is_elevated: false,
        }
    }

    /// An authenticated superuser-equivalent caller.
    pub fn elevated(id: DbId) -> Self {
        Self {
            id: Some(id),
            is_authenticated: true,
            is_elevated: true,
        }
    }

    /// Build a context from a verified user id and role name.
    pub fn from_role(id: DbId, role: &str) -> Self {
        Self {
            id: Some(id),
            is_authenticated: true,
            is_elevated: is_elevated_role(role),
        }
    }

    /// The user id to store as a weak reference (anonymous callers store NULL).
    pub fn user_id(&self) -> Option<DbId> {
        if self.is_authenticated {
            self.id
        } else {
            None
        }
    }

    /// Whether this actor is the owner recorded on an entity.
    ///
    /// An entity whose owner was deleted (`None`) has no owner.
    pub fn is_owner(&self, owner: Option<DbId>) -> bool {
        self.is_authenticated && owner.is_some() && self.id == owner
    }

    /// Owner-or-superuser check used for delete and rollback.
    pub fn can_manage(&self, owner: Option<DbId>) -> bool {
        self.is_authenticated && (self.is_elevated || self.is_owner(owner))
    }

    /// Whether this actor may edit entries held by a moderation lock.
    pub fn can_bypass_lock(&self) -> bool {
        self.is_authenticated && self.is_elevated
    }

    /// Fail with `Forbidden` unless the caller is authenticated.
    pub fn require_authenticated(&self, action: &str) -> Result<(), CoreError> {
        if self.is_authenticated {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "Authentication is required to {action}"
            )))
        }
    }

    /// Fail with `Forbidden` unless the caller holds the elevated capability.
    pub fn require_elevated(&self, action: &str) -> Result<(), CoreError> {
        if self.is_authenticated && self.is_elevated {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "Only superusers can {action}"
            )))
        }
    }
}
