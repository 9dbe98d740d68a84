pub mod claims;
pub mod error;
pub mod issuer;
pub mod roles;
pub mod verifier;

pub use claims::Claims;
pub use error::AuthError;
pub use issuer::TokenIssuer;
pub use roles::RoleGate;
pub use verifier::{TokenVerifier, bearer_token};
