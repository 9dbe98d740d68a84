use serde::Serialize;

/// Success envelope: `{ "success": true, "data": ... }`.
///
/// Errors use `crate::error::ErrorResponse` instead.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
