pub mod auth;
pub mod envelope;
pub mod protected;

pub use envelope::ApiResponse;
