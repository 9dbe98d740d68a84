/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Cheap to clone: everything heavy sits behind Arc
 * - Built once at start-up; nothing in here is mutated afterwards
 */
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppEnv;
use crate::services::auth::{TokenIssuer, TokenVerifier};
use crate::services::credentials::CredentialStore;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub issuer: Arc<TokenIssuer>,
    pub credentials: Arc<dyn CredentialStore>,
    pub app_env: AppEnv,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        verifier: Arc<TokenVerifier>,
        issuer: Arc<TokenIssuer>,
        credentials: Arc<dyn CredentialStore>,
        app_env: AppEnv,
    ) -> Self {
        Self {
            verifier,
            issuer,
            credentials,
            app_env,
            started_at: Instant::now(),
        }
    }
}
