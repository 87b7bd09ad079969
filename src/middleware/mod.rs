/// Middleware module
///
/// Custom middleware for bearer authentication.

mod jwt_middleware;

pub use jwt_middleware::JwtMiddleware;
