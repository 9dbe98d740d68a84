//! Credential lookup used by the login endpoint.
//!
//! Handlers only see the `CredentialStore` trait; a database-backed store can
//! replace the in-memory one without touching them.
use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::config::UserEntry;

/// Principal resolved by a successful credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Normalized email as stored; used as the token subject.
    pub email: String,
    pub role: String,
}

#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    // Returns the stored principal when `password` matches.
    async fn verify(&self, email: &str, password: &str) -> Option<Principal>;

    // Number of known principals (for start-up diagnostics).
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct StoredUser {
    password_sha256: [u8; 32],
    role: String,
}

/// Store seeded once at start-up; keeps only password digests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: HashMap<String, StoredUser>,
}

impl InMemoryCredentialStore {
    pub fn new(entries: &[UserEntry]) -> Self {
        let users = entries
            .iter()
            .map(|e| {
                (
                    e.email.trim().to_ascii_lowercase(),
                    StoredUser {
                        password_sha256: digest(&e.password),
                        role: e.role.clone(),
                    },
                )
            })
            .collect();

        Self { users }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn verify(&self, email: &str, password: &str) -> Option<Principal> {
        let (email, user) = self.users.get_key_value(&email.trim().to_ascii_lowercase())?;
        digests_match(&user.password_sha256, &digest(password)).then(|| Principal {
            email: email.clone(),
            role: user.role.clone(),
        })
    }

    fn len(&self) -> usize {
        self.users.len()
    }
}

fn digest(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

// Compares every byte regardless of where the first difference is.
fn digests_match(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryCredentialStore {
        InMemoryCredentialStore::new(&[
            UserEntry {
                email: "Admin@Example.com".into(),
                password: "hunter2".into(),
                role: "admin".into(),
            },
            UserEntry {
                email: "user@example.com".into(),
                password: "password123".into(),
                role: "user".into(),
            },
        ])
    }

    fn principal(email: &str, role: &str) -> Option<Principal> {
        Some(Principal {
            email: email.into(),
            role: role.into(),
        })
    }

    #[tokio::test]
    async fn correct_password_yields_principal() {
        let store = store();
        assert_eq!(
            store.verify("user@example.com", "password123").await,
            principal("user@example.com", "user")
        );
    }

    #[tokio::test]
    async fn email_lookup_ignores_ascii_case_and_returns_stored_form() {
        let store = store();
        assert_eq!(
            store.verify("admin@example.COM", "hunter2").await,
            principal("admin@example.com", "admin")
        );
        assert_eq!(
            store.verify("ADMIN@EXAMPLE.COM", "hunter2").await,
            principal("admin@example.com", "admin")
        );
    }

    #[tokio::test]
    async fn wrong_password_or_unknown_user_is_rejected() {
        let store = store();
        assert_eq!(store.verify("user@example.com", "Password123").await, None);
        assert_eq!(store.verify("nobody@example.com", "password123").await, None);
    }

    #[tokio::test]
    async fn empty_store_rejects_everything() {
        let store = InMemoryCredentialStore::default();
        assert!(store.is_empty());
        assert_eq!(store.verify("user@example.com", "password123").await, None);
    }
}
