//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI at `/docs` in debug builds and printed by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::users::{CreateUserRequest, UpdateUserRequest};

/// OpenAPI document covering every route and payload.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        description = "CRUD service for user records with health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::ping,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
    ),
    components(schemas(User, Error, ErrorCode, CreateUserRequest, UpdateUserRequest)),
    tags(
        (name = "users", description = "User records"),
        (name = "health", description = "Ping and orchestration probes")
    )
)]
pub struct ApiDoc;
