use contacts_shared::{
    error::ServiceError,
    records::{item_to_user, items_to_users, user_to_item, SecondaryIndex},
    responses,
    store::RecordStore,
    types::User,
};
use lambda_http::{http::StatusCode, Body, Response};

/// Which users a DELETE request targets.
/// `userID` wins over `firstName`, which wins over `lastName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteSelector {
    ById(String),
    ByFirstName(String),
    ByLastName(String),
    Missing,
}

impl DeleteSelector {
    pub fn from_params(
        user_id: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Self {
        let given = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

        if let Some(user_id) = given(user_id) {
            DeleteSelector::ById(user_id)
        } else if let Some(first_name) = given(first_name) {
            DeleteSelector::ByFirstName(first_name)
        } else if let Some(last_name) = given(last_name) {
            DeleteSelector::ByLastName(last_name)
        } else {
            DeleteSelector::Missing
        }
    }
}

/// Fetch a single user by ID
pub async fn get_user(
    store: &dyn RecordStore,
    user_id: &str,
) -> Result<Response<Body>, ServiceError> {
    let Some(item) = store.get_item(user_id).await? else {
        return Ok(responses::text(StatusCode::NOT_FOUND, "user not found")?);
    };

    let user = match item_to_user(&item) {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to decode user {}: {}", user_id, e);
            return Ok(responses::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                "unmarshal error from db response to struct",
            )?);
        }
    };

    match responses::encode(&user) {
        Some(body) => Ok(responses::json_body(StatusCode::OK, body)?),
        None => Ok(responses::text(
            StatusCode::INTERNAL_SERVER_ERROR,
            "marshall error from struct to json",
        )?),
    }
}

/// Create a user from a full JSON record
pub async fn create_user(
    store: &dyn RecordStore,
    body: &[u8],
) -> Result<Response<Body>, ServiceError> {
    let user = match parse_user(body) {
        Ok(user) => user,
        Err(resp) => return Ok(resp?),
    };

    store.put_item(user_to_item(&user)).await?;
    tracing::info!("User saved: {}", user.user_id);

    Ok(responses::text(StatusCode::CREATED, "user saved successfully")?)
}

/// Replace a user wholesale. The path ID always overrides any `userID` in the body.
pub async fn update_user(
    store: &dyn RecordStore,
    user_id: &str,
    body: &[u8],
) -> Result<Response<Body>, ServiceError> {
    let user = match parse_user_with_id(body, user_id) {
        Ok(user) => user,
        Err(resp) => return Ok(resp?),
    };

    store.put_item(user_to_item(&user)).await?;
    tracing::info!("User updated: {}", user.user_id);

    Ok(responses::text(StatusCode::CREATED, "user updated successfully")?)
}

/// Delete one user by ID, or every user matching a first or last name
pub async fn delete_users(
    store: &dyn RecordStore,
    selector: DeleteSelector,
) -> Result<Response<Body>, ServiceError> {
    match selector {
        DeleteSelector::ById(user_id) => {
            // No existence check: deleting an absent key still succeeds
            store.delete_item(&user_id).await?;
            tracing::info!("User deleted: {}", user_id);
            Ok(responses::text(StatusCode::OK, "user deleted successfully")?)
        }
        DeleteSelector::ByFirstName(first_name) => {
            delete_matching(store, SecondaryIndex::FirstName, &first_name).await
        }
        DeleteSelector::ByLastName(last_name) => {
            delete_matching(store, SecondaryIndex::LastName, &last_name).await
        }
        DeleteSelector::Missing => Ok(responses::text(
            StatusCode::BAD_REQUEST,
            "provide at least one of userID, firstName, or lastName",
        )?),
    }
}

/// Delete each user found through `index`, one at a time.
///
/// Best effort: a failed delete is logged and skipped, earlier deletes are
/// not rolled back, and the reported count covers only what was removed.
/// If nothing could be removed the last store error is returned.
async fn delete_matching(
    store: &dyn RecordStore,
    index: SecondaryIndex,
    value: &str,
) -> Result<Response<Body>, ServiceError> {
    let items = store.query_index(index, value).await?;
    let users = match items_to_users(&items) {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to decode {} matches: {}", index.index_name(), e);
            return Ok(responses::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                "unmarshal error from db response to struct",
            )?);
        }
    };

    if users.is_empty() {
        return Ok(responses::text(
            StatusCode::NOT_FOUND,
            format!("no user found for given {}", index.attribute()),
        )?);
    }

    let mut deleted = 0;
    let mut last_error = None;
    for user in &users {
        match store.delete_item(&user.user_id).await {
            Ok(()) => deleted += 1,
            Err(e) => {
                tracing::warn!("Failed to delete user {}: {}", user.user_id, e);
                last_error = Some(e);
            }
        }
    }

    if deleted == 0 {
        if let Some(e) = last_error {
            return Err(e.into());
        }
    }

    tracing::info!(
        "Deleted {} of {} users matching {} = {}",
        deleted,
        users.len(),
        index.attribute(),
        value
    );

    Ok(responses::text(
        StatusCode::CREATED,
        format!("{} items deleted successfully", deleted),
    )?)
}

type Rejection = Result<Response<Body>, lambda_http::http::Error>;

// A `null` body decodes to an empty user and fails validation instead
fn decode_user(body: &[u8]) -> Result<User, Rejection> {
    let user: Option<User> = serde_json::from_slice(body)
        .map_err(|_| responses::text(StatusCode::BAD_REQUEST, "invalid request body"))?;
    Ok(user.unwrap_or_default())
}

fn parse_user(body: &[u8]) -> Result<User, Rejection> {
    validate(decode_user(body)?)
}

fn parse_user_with_id(body: &[u8], user_id: &str) -> Result<User, Rejection> {
    let mut user = decode_user(body)?;
    user.user_id = user_id.to_string();
    validate(user)
}

fn validate(user: User) -> Result<User, Rejection> {
    if user.is_complete() {
        Ok(user)
    } else {
        Err(responses::text(StatusCode::BAD_REQUEST, "missing required fields"))
    }
}
