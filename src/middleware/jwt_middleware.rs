/// Bearer Token Middleware
///
/// Validates the access token from the Authorization header and injects
/// its claims into request extensions for use by route handlers.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::TokenVerifier;
use crate::error::{AppError, AuthError};

/// Middleware for routes that require a valid access token.
///
/// Missing header answers 401; a bad or expired token answers 403.
pub struct JwtMiddleware {
    verifier: web::Data<TokenVerifier>,
}

impl JwtMiddleware {
    pub fn new(verifier: web::Data<TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    verifier: web::Data<TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = match bearer_token(req.headers()) {
            None => Err(AuthError::MissingToken),
            Some(token) => self.verifier.verify_access(&token),
        };

        match outcome {
            Ok(claims) => {
                tracing::debug!(username = %claims.username, "Access token validated");
                req.extensions_mut().insert(claims);

                let service = self.service.clone();
                Box::pin(async move { service.call(req).await })
            }
            Err(e) => {
                let err: Error = AppError::from(e).into();
                Box::pin(async move { Err::<ServiceResponse<B>, Error>(err) })
            }
        }
    }
}

/// Extract the credential from `Authorization: Bearer <token>`.
/// The scheme name is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let (scheme, token) = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?
        .split_once(' ')?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_extracted() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_srv_request();

        assert_eq!(bearer_token(req.headers()), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        for value in ["bearer abc.def.ghi", "BEARER abc.def.ghi", "BeArEr abc.def.ghi"] {
            let req = TestRequest::default()
                .insert_header((AUTHORIZATION, value))
                .to_srv_request();
            assert_eq!(
                bearer_token(req.headers()),
                Some("abc.def.ghi".to_string()),
                "rejected {:?}",
                value
            );
        }
    }

    #[test]
    fn test_missing_header() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(bearer_token(req.headers()), None);
    }

    #[test]
    fn test_other_scheme_or_empty_token() {
        for value in ["Basic YWxpY2U6cHcx", "Bearer ", "abc.def.ghi"] {
            let req = TestRequest::default()
                .insert_header((AUTHORIZATION, value))
                .to_srv_request();
            assert_eq!(bearer_token(req.headers()), None, "accepted {:?}", value);
        }
    }
}
