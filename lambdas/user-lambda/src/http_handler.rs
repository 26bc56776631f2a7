use contacts_shared::{error::ServiceError, responses, AppState};
use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, RequestExt, Response,
};
use std::sync::Arc;

use crate::users::{self, DeleteSelector};

/// Main Lambda handler - routes single-user requests by method
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let body = event.body();
    let store = state.store.as_ref();
    tracing::info!(
        "User lambda invoked - Method: {} Path: {}",
        method,
        event.uri().path()
    );

    let result = match method {
        // GET /users/{userID}
        &Method::GET => match path_user_id(&event) {
            Some(user_id) => users::get_user(store, user_id).await,
            None => invalid_path(),
        },
        // POST /users
        &Method::POST => users::create_user(store, body).await,
        // PATCH /users/{userID} - a missing ID fails validation
        &Method::PATCH => {
            let user_id = path_user_id(&event).unwrap_or_default();
            users::update_user(store, user_id, body).await
        }
        // DELETE /users?userID=|firstName=|lastName=
        &Method::DELETE => match event.query_string_parameters_ref() {
            Some(params) => {
                let selector = DeleteSelector::from_params(
                    params.first("userID"),
                    params.first("firstName"),
                    params.first("lastName"),
                );
                users::delete_users(store, selector).await
            }
            None => invalid_path(),
        },
        _ => invalid_path(),
    };

    if let Ok(resp) = &result {
        if resp.status() == StatusCode::BAD_REQUEST {
            tracing::warn!("Rejected {} request: {}", method, resp.status());
        }
    }

    responses::finish(result)
}

fn path_user_id(event: &Request) -> Option<&str> {
    event
        .path_parameters_ref()
        .and_then(|params| params.first("userID"))
        .filter(|user_id| !user_id.is_empty())
}

fn invalid_path() -> Result<Response<Body>, ServiceError> {
    Ok(responses::text(StatusCode::BAD_REQUEST, "invalid path requested")?)
}
