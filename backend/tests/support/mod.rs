//! Shared helpers for backend integration tests.
//!
//! Each file under `backend/tests/` compiles as its own crate, so helpers are
//! pulled in with `mod support;` and not every crate uses every item.
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use user_api::Trace;
use user_api::domain::{User, UserId, UserName};
use user_api::inbound::http::configure;
use user_api::inbound::http::health::HealthState;
use user_api::inbound::http::state::HttpState;
use user_api::outbound::persistence::InMemoryUserRepository;

/// Variable naming a disposable PostgreSQL database for Diesel tests.
pub const TEST_DATABASE_URL_VAR: &str = "USER_API_TEST_DATABASE_URL";

pub fn user(id: u64, name: &str, age: u32) -> User {
    User::new(
        UserId::new(id),
        UserName::new(name).expect("valid name"),
        age,
        None,
    )
}

/// Full application over an in-memory store holding `users`.
pub fn test_app(
    users: Vec<User>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let repository = Arc::new(InMemoryUserRepository::with_users(users));
    let health = HealthState::new();
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(HttpState::from_repository(repository)))
        .app_data(web::Data::new(health))
        .wrap(Trace)
        .configure(configure)
}

/// Database URL for Diesel tests, or `None` with a skip marker when unset.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_VAR) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL_VAR} is not set");
            None
        }
    }
}
