//! User registry handlers.
//!
//! Both handlers run their whole body through `RequestInstrumentation`, so
//! body validation failures are counted like any other failed call.

use crate::errors::RegistryError;
use crate::models::{CreateUserRequest, User};
use crate::repositories::users;
use crate::routes::AppState;
use crate::services::OperationKind;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;
use tracing::{debug, instrument};

const NAME_REQUIRED: &str = "Invalid request: 'name' is required";

/// Handler for POST /users
///
/// Inserts on the write primary.
///
/// ## Errors
///
/// - 400 if the body is not JSON, lacks `name`, or `name` is blank
/// - 500 `DATABASE_ERROR` on store failure or injected fault
#[instrument(skip_all, name = "registry.users.create")]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), RegistryError> {
    let pool = state.write_pool.clone();

    let user = state
        .instrumentation
        .run(OperationKind::Write, move || async move {
            let request = match payload {
                Ok(Json(request)) => request,
                Err(rejection) => {
                    debug!(target: "registry.users", error = %rejection, "Rejected create body");
                    return Err(RegistryError::BadRequest(NAME_REQUIRED.to_string()));
                }
            };

            let name = request.name.trim();
            if name.is_empty() {
                return Err(RegistryError::BadRequest(NAME_REQUIRED.to_string()));
            }

            users::create_user(&pool, name).await
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for GET /users
///
/// Lists every user from the read replica, ordered by id.
#[instrument(skip_all, name = "registry.users.list")]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, RegistryError> {
    let pool = state.read_pool.clone();

    let listed = state
        .instrumentation
        .run(OperationKind::Read, move || async move {
            users::list_users(&pool).await
        })
        .await?;

    Ok(Json(listed))
}
