//! HTTP inbound adapter exposing the user REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register the JSON extractor configuration and every route.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use user_api::inbound::http::{configure, health::HealthState, state::HttpState};
/// use user_api::outbound::persistence::InMemoryUserRepository;
///
/// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .app_data(web::Data::new(HealthState::new()))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(health::ping)
        .service(health::ready)
        .service(health::live)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user);
}
