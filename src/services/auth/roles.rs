use std::collections::HashSet;

use crate::services::auth::claims::Claims;
use crate::services::auth::error::AuthError;

/// Allow-list of roles. Membership is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct RoleGate {
    allowed: HashSet<String>,
}

impl RoleGate {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, claims: &Claims) -> bool {
        self.allowed.contains(claims.role())
    }

    pub fn check(&self, claims: &Claims) -> Result<(), AuthError> {
        if self.allows(claims) {
            Ok(())
        } else {
            Err(AuthError::InsufficientRole)
        }
    }
}
