use axum::Json;

use crate::api::{
    dto::{
        ApiResponse,
        protected::{UserSummary, WhoAmIResponse},
    },
    extractors::MaybeAuthUser,
};

pub async fn whoami(MaybeAuthUser(claims): MaybeAuthUser) -> Json<ApiResponse<WhoAmIResponse>> {
    Json(ApiResponse::ok(WhoAmIResponse {
        authenticated: claims.is_some(),
        user: claims.as_ref().map(UserSummary::from),
    }))
}
