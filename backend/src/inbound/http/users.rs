//! User CRUD handlers.
//!
//! ```text
//! GET    /users
//! GET    /user/{id}
//! POST   /user        {"name":"Bob","age":20,"email":"bob@example.com"}
//! PATCH  /user/{id}   {"age":21}
//! DELETE /user/{id}
//! ```
//!
//! The id routes match any remaining path so an empty or malformed segment
//! reaches [`parse_user_id`] and is reported as a 400 rather than a routing
//! miss.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Email, Error, NewUser, User, UserError, UserName, UserPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_age, parse_user_id};

/// Body of `POST /user`.
///
/// Fields are optional at the decoding stage so that a missing field is
/// reported by name instead of as a generic decoding failure.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Bob")]
    pub name: Option<String>,
    #[schema(example = 20)]
    pub age: Option<i64>,
    #[schema(example = "bob@example.com")]
    pub email: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let name = value.name.ok_or(UserError::MissingField { field: "name" })?;
        let name = UserName::new(name)?;
        let age = value.age.ok_or(UserError::MissingField { field: "age" })?;
        let age = parse_age(age)?;
        let email = value.email.map(Email::new).transpose()?;
        Ok(NewUser::new(name, age).with_email(email))
    }
}

/// Body of `PATCH /user/{id}`.
///
/// Absent or blank fields keep stored values, as does an age below the
/// minimum or outside the `u32` range.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    #[schema(example = "Robert")]
    pub name: Option<String>,
    #[schema(example = 21)]
    pub age: Option<i64>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = UserError;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        let name = value
            .name
            .filter(|name| !name.trim().is_empty())
            .map(UserName::new)
            .transpose()?;
        let age = value.age.and_then(|raw| u32::try_from(raw).ok());
        Ok(UserPatch { name, age })
    }
}

/// List every user in insertion order.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Missing or malformed id", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id:.*}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let user = state.users_query.get_user(id).await?;
    Ok(web::Json(user))
}

/// Create a user.
///
/// Names must be unique; ages must be at least 14.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Name or email already registered", body = Error),
        (status = 500, description = "Body is not JSON or internal failure", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    ensure_name_free(&state, new_user.name()).await?;
    let created = state.users_command.create_user(new_user).await?;
    Ok(HttpResponse::Created().json(created))
}

async fn ensure_name_free(state: &HttpState, name: &UserName) -> Result<(), Error> {
    match state.users_query.get_user_by_name(name.as_ref()).await {
        Ok(existing) => {
            debug!(user_id = %existing.id(), "user name already taken");
            Err(UserError::NameTaken {
                name: name.to_string(),
            }
            .into())
        }
        Err(UserError::NotFound { .. }) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Partially update a user.
#[utoipa::path(
    patch,
    path = "/user/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/user/{id:.*}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let patch = UserPatch::try_from(payload.into_inner())?;
    let user = state.users_command.update_user(id, patch).await?;
    Ok(web::Json(user))
}

/// Delete a user. Responds 200 with an empty body.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Missing or malformed id", body = Error),
        (status = 404, description = "No such user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id:.*}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users_query.get_user(id).await?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::Ok().finish())
}
