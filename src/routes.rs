use crate::{
    api::{attendance, insights, preferences, users},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Public routes
    cfg.service(
        web::scope("/auth").service(web::resource("/login").route(web::post().to(handlers::login))),
    );

    cfg.service(
        web::scope("/preferences")
            .service(
                web::resource("/theme")
                    .route(web::get().to(preferences::get_theme))
                    .route(web::put().to(preferences::set_theme)),
            )
            .service(
                web::resource("/theme/toggle").route(web::post().to(preferences::toggle_theme)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .service(web::resource("/me").route(web::get().to(handlers::me)))
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(web::resource("").route(web::get().to(attendance::list_records)))
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/check-out").route(web::post().to(attendance::check_out)),
                    )
                    .service(web::resource("/today").route(web::get().to(attendance::today)))
                    .service(web::resource("/recent").route(web::get().to(attendance::recent)))
                    .service(web::resource("/summary").route(web::get().to(attendance::summary)))
                    .service(
                        web::resource("/overview").route(web::get().to(attendance::overview)),
                    ),
            )
            .service(
                web::scope("/users")
                    // /users
                    .service(
                        web::resource("")
                            .route(web::get().to(users::list_users))
                            .route(web::post().to(users::create_user)),
                    )
                    // /users/{id}
                    .service(web::resource("/{id}").route(web::delete().to(users::delete_user))),
            )
            .service(web::resource("/insights").route(web::post().to(insights::generate_report))),
    );
}

// LOGIN
//  └─ access_token (ACCESS_TOKEN_TTL, default 8h)

// API REQUEST
//  └─ Authorization: Bearer access_token

// EXPIRED
//  └─ log in again
