use serde::Serialize;

use crate::services::auth::Claims;

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub role: String,
}

impl From<&Claims> for UserSummary {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.subject().to_string(),
            role: claims.role().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponse {
    pub message: &'static str,
    pub user: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_time: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResponse {
    pub message: &'static str,
    pub processed_by: String,
    pub received_data: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}
