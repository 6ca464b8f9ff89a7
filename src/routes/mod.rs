use actix_web::web;

pub mod account;
pub mod health;
pub mod plan;
pub mod rides;
pub mod trips;

/// Route tree shared by the server and the integration tests. The caller
/// registers the key-value store as app data before applying this.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health)).service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(account::signup))
                    .route("/signin", web::post().to(account::signin))
                    .route("/session", web::get().to(account::session))
                    .route("/logout", web::post().to(account::logout)),
            )
            .route("/plan", web::post().to(plan::create_plan))
            .service(web::scope("/rides").route("/compare", web::post().to(rides::compare)))
            .service(
                web::scope("/trips")
                    .service(
                        web::resource("")
                            .route(web::get().to(trips::get_all))
                            .route(web::post().to(trips::save)),
                    )
                    .route("/{id}", web::delete().to(trips::delete)),
            ),
    );
}
