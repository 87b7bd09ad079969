use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenIssuer, TokenVerifier};
use crate::configuration::{JwtSettings, PasswordSettings};
use crate::logger::LoggerMiddleware;
use crate::middleware::JwtMiddleware;
use crate::routes::{health_check, protected, refresh, signin, signup};
use crate::store::CredentialStore;

/// Build the HTTP server on an already bound listener.
///
/// Secrets and the store handle are injected here; handlers receive them
/// through `web::Data`.
pub fn run(
    listener: TcpListener,
    store: Arc<dyn CredentialStore>,
    jwt_config: &JwtSettings,
    password_config: PasswordSettings,
) -> Result<Server, std::io::Error> {
    let store: web::Data<dyn CredentialStore> = web::Data::from(store);
    let issuer = web::Data::new(TokenIssuer::new(jwt_config));
    let verifier = web::Data::new(TokenVerifier::new(jwt_config));
    let hasher = web::Data::new(PasswordHasher::new(password_config.hash_cost));

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(store.clone())
            .app_data(issuer.clone())
            .app_data(verifier.clone())
            .app_data(hasher.clone())

            // Public routes
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/api/auth")
                    .route("/signup", web::post().to(signup))
                    .route("/signin", web::post().to(signin))
                    .route("/tokens/refresh", web::post().to(refresh)),
            )

            // Protected routes (require a valid access token)
            .service(
                web::resource("/api/protected")
                    .wrap(JwtMiddleware::new(verifier.clone()))
                    .route(web::get().to(protected)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
