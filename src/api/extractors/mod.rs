/*!
 * Request extractors
 *
 * - AuthUser: identity placed in extensions by the auth wrappers
 * - MaybeAuthUser: optional authentication for public routes
 */
mod auth_user;

pub use auth_user::{AuthUser, MaybeAuthUser};
