/*
 * Responsibility
 * - auth: per-route wrappers (with_auth / with_role_auth)
 * - http / cors / security_headers: router-wide layers applied in app.rs
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
