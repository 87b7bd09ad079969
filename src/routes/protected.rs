use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::auth::Claims;

#[derive(Serialize)]
pub struct ProtectedResponse {
    pub message: String,
    pub user: Claims,
}

/// GET /api/protected
///
/// Requires `Authorization: Bearer <access_token>`; claims are injected by
/// `JwtMiddleware`.
pub async fn protected(claims: web::ReqData<Claims>) -> HttpResponse {
    HttpResponse::Ok().json(ProtectedResponse {
        message: "Access granted".to_string(),
        user: claims.into_inner(),
    })
}
