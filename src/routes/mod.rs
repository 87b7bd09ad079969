mod auth;
mod health_check;
mod protected;

pub use auth::{refresh, signin, signup};
pub use health_check::health_check;
pub use protected::protected;
