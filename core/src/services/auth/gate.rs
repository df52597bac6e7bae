//! Access gate: pure authorization checks over a resolved principal
//!
//! Each check is independent and composable in whatever order a route
//! needs. None of them fetch anything: the principal comes from the
//! resolver, and any resource ownership id comes from the handler that
//! already loaded the resource.

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult};

/// Requires that a principal was resolved for the request
pub fn require_authenticated(principal: Option<&User>) -> DomainResult<&User> {
    principal.ok_or_else(|| AuthError::Unauthenticated.into())
}

/// Requires that the principal is not banned
pub fn require_not_banned(principal: &User) -> DomainResult<()> {
    if principal.is_banned {
        return Err(AuthError::Banned.into());
    }
    Ok(())
}

/// Requires administrator privileges
pub fn require_admin(principal: &User) -> DomainResult<()> {
    if !principal.is_admin {
        return Err(AuthError::Forbidden.into());
    }
    Ok(())
}

/// Requires that the principal owns the resource or is an administrator
pub fn require_owner_or_admin(principal: &User, resource_owner_id: Uuid) -> DomainResult<()> {
    if principal.id == resource_owner_id || principal.is_admin {
        return Ok(());
    }
    Err(AuthError::Forbidden.into())
}
