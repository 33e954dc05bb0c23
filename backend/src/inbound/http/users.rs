//! Users API handlers.
//!
//! ```text
//! GET    /v1/users/{user_id}
//! PATCH  /v1/users/{user_id} {"username":"grace","email":"grace@example.com"}
//! DELETE /v1/users/{user_id}
//! ```

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, delete, get, patch, web};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_store_error;
use crate::inbound::http::state::HttpState;

/// Longest username accepted on update, in characters.
pub const MAX_USERNAME_CHARS: usize = 35;

const USER_ID_PARAM: &str = "user_id";

fn parse_user_id(raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>().map_err(|_| {
        Error::invalid_request("user id must be an integer")
            .with_details(json!({ "field": USER_ID_PARAM, "value": raw }))
    })
}

/// The user addressed by the `{user_id}` path segment, loaded from the store.
///
/// Extraction fails with 400 for a non-numeric id and 404 for an unknown one.
pub struct UserContext(User);

impl UserContext {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for UserContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let raw_id = req.match_info().get(USER_ID_PARAM).unwrap_or_default().to_owned();

        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let id = parse_user_id(&raw_id)?;
            let user = state
                .storage
                .users
                .get_by_id(id)
                .await
                .map_err(|err| map_store_error(err, "user"))?;
            Ok(Self(user))
        })
    }
}

/// Partial update body for `PATCH /v1/users/{user_id}`. Absent fields keep
/// their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    #[schema(max_length = 35)]
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UpdateUserRequest {
    fn validate(&self) -> Result<(), Error> {
        if let Some(username) = &self.username
            && username.chars().count() > MAX_USERNAME_CHARS
        {
            return Err(Error::invalid_request(format!(
                "username must be at most {MAX_USERNAME_CHARS} characters"
            ))
            .with_details(json!({ "field": "username", "code": "too_long" })));
        }

        if let Some(email) = &self.email
            && !is_plausible_email(email)
        {
            return Err(Error::invalid_request("email address is invalid")
                .with_details(json!({ "field": "email", "code": "invalid_email" })));
        }

        Ok(())
    }

    fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Malformed user id", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{user_id}")]
pub async fn get_user(user: UserContext) -> ApiResult<web::Json<User>> {
    Ok(web::Json(user.into_inner()))
}

/// Change a user's username and/or email.
///
/// The update is guarded by the `updated_at` value just read, so a
/// concurrent change in between surfaces as 404.
#[utoipa::path(
    patch,
    path = "/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid payload", body = Error),
        (status = 404, description = "Unknown or concurrently modified user", body = Error),
        (status = 409, description = "Username or email already in use", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{user_id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    user: UserContext,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let changes = payload.into_inner();
    changes.validate()?;

    let mut user = user.into_inner();
    changes.apply(&mut user);
    state
        .storage
        .users
        .update(&mut user)
        .await
        .map_err(|err| map_store_error(err, "user"))?;

    info!(user_id = user.id, "user updated");
    Ok(web::Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/v1/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed user id", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{user_id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    user_id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&user_id)?;
    state
        .storage
        .users
        .delete(id)
        .await
        .map_err(|err| map_store_error(err, "user"))?;

    info!(user_id = id, "user deleted");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
