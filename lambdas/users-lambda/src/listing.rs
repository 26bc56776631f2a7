use contacts_shared::{
    error::ServiceError,
    records::{items_to_users, SecondaryIndex},
    responses,
    store::RecordStore,
    types::User,
};
use lambda_http::{http::StatusCode, Body, Response};

/// What a listing request asks for, resolved from its query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    All,
    Sorted,
    ByName(String),
    Unresolved,
}

impl ListQuery {
    /// `sorted=true` takes precedence over `name`
    pub fn from_params(sorted: Option<&str>, name: Option<&str>) -> Self {
        if sorted == Some("true") {
            return ListQuery::Sorted;
        }

        match name {
            Some(name) if !name.is_empty() => ListQuery::ByName(name.to_string()),
            _ => ListQuery::Unresolved,
        }
    }
}

/// List users for a resolved query
pub async fn list_users(
    store: &dyn RecordStore,
    query: ListQuery,
) -> Result<Response<Body>, ServiceError> {
    let items = match query {
        ListQuery::All | ListQuery::Sorted => store.scan().await?,
        ListQuery::ByName(ref name) => {
            // First-name matches then last-name matches; a user matching both appears twice
            let mut items = store.query_index(SecondaryIndex::FirstName, name).await?;
            items.extend(store.query_index(SecondaryIndex::LastName, name).await?);
            items
        }
        ListQuery::Unresolved => {
            return Ok(responses::text(StatusCode::BAD_REQUEST, "cannot resolve query")?);
        }
    };

    let mut users = match items_to_users(&items) {
        Ok(users) => users,
        Err(e) => {
            tracing::error!("Failed to decode listed users: {}", e);
            return Ok(responses::text(
                StatusCode::INTERNAL_SERVER_ERROR,
                "unmarshal error from db response to struct",
            )?);
        }
    };

    if query == ListQuery::Sorted {
        sort_by_name(&mut users);
    }

    tracing::info!("Listing {} users for {:?}", users.len(), query);
    respond(&users)
}

/// Ascending by first name, then last name. Stable, so full ties keep store order.
pub fn sort_by_name(users: &mut [User]) {
    users.sort_by(|a, b| {
        a.first_name
            .cmp(&b.first_name)
            .then_with(|| a.last_name.cmp(&b.last_name))
    });
}

fn respond(users: &[User]) -> Result<Response<Body>, ServiceError> {
    if users.is_empty() {
        return Ok(responses::text(
            StatusCode::NOT_FOUND,
            "no user found with given queries",
        )?);
    }

    match responses::encode(users) {
        Some(body) => Ok(responses::json_body(StatusCode::OK, body)?),
        None => Ok(responses::text(
            StatusCode::INTERNAL_SERVER_ERROR,
            "could not marshal list of users",
        )?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, first: &str, last: &str) -> User {
        User {
            user_id: id.into(),
            first_name: first.into(),
            last_name: last.into(),
            address: "1 Rd".into(),
            mobile_number: "555".into(),
            email_address: format!("{}@x.com", id),
        }
    }

    fn ids(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.user_id.as_str()).collect()
    }

    #[test]
    fn test_query_resolution() {
        assert_eq!(ListQuery::from_params(Some("true"), Some("Ann")), ListQuery::Sorted);
        assert_eq!(
            ListQuery::from_params(Some("false"), Some("Ann")),
            ListQuery::ByName("Ann".into())
        );
        assert_eq!(ListQuery::from_params(None, Some("")), ListQuery::Unresolved);
        assert_eq!(ListQuery::from_params(Some("TRUE"), None), ListQuery::Unresolved);
        assert_eq!(ListQuery::from_params(None, None), ListQuery::Unresolved);
    }

    #[test]
    fn test_sort_by_first_then_last_name() {
        let mut users = vec![
            user("u1", "Cat", "Adams"),
            user("u2", "Ann", "Zed"),
            user("u3", "Ann", "Lee"),
            user("u4", "Bob", "Lee"),
        ];
        sort_by_name(&mut users);
        assert_eq!(ids(&users), vec!["u3", "u2", "u4", "u1"]);
    }

    #[test]
    fn test_sort_keeps_store_order_for_full_ties() {
        let mut users = vec![
            user("u9", "Ann", "Lee"),
            user("u1", "Ann", "Lee"),
            user("u5", "Ann", "Kim"),
            user("u3", "Ann", "Lee"),
        ];
        sort_by_name(&mut users);
        assert_eq!(ids(&users), vec!["u5", "u9", "u1", "u3"]);
    }

    #[test]
    fn test_sort_is_byte_order() {
        let mut users = vec![user("u1", "ann", "Lee"), user("u2", "Bob", "Lee")];
        sort_by_name(&mut users);
        assert_eq!(ids(&users), vec!["u2", "u1"]);
    }
}
