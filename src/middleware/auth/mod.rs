pub mod access;
pub mod roles;

pub use access::with_auth;
pub use roles::with_role_auth;
