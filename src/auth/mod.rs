/// Authentication module
///
/// Handles JWT issuing/verification and password hashing.

mod claims;
mod jwt;
mod password;

pub use claims::Claims;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use password::PasswordHasher;
