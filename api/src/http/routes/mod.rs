/// Route modules

pub mod health;
pub mod profile;
pub mod sessions;
pub mod statements;
pub mod users;
pub mod version;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthz", web::get().to(health::healthz))
        .route("/readyz", web::get().to(health::readyz))
        .route("/version", web::get().to(version::version))
        .service(
            web::scope("/api/v1")
                .route("/users", web::post().to(users::create_user))
                .route("/sessions", web::post().to(sessions::create_session))
                .route("/profile", web::get().to(profile::show_profile))
                .service(
                    web::scope("/statements")
                        .route("/deposit", web::post().to(statements::deposit))
                        .route("/withdraw", web::post().to(statements::withdraw))
                        .route("/balance", web::get().to(statements::balance))
                        .route("/{statement_id}", web::get().to(statements::get_statement)),
                ),
        );
}
