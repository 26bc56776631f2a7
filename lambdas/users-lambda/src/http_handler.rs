use contacts_shared::{responses, AppState};
use lambda_http::{Body, Error, Request, RequestExt, Response};
use std::sync::Arc;

use crate::listing::{self, ListQuery};

/// Main Lambda handler - resolves the listing query from the query string
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!(
        "Users lambda invoked - Method: {} Path: {}",
        event.method(),
        event.uri().path()
    );

    let query = match event.query_string_parameters_ref() {
        None => ListQuery::All,
        Some(params) => ListQuery::from_params(params.first("sorted"), params.first("name")),
    };

    responses::finish(listing::list_users(state.store.as_ref(), query).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::AttributeValue;
    use contacts_shared::{memory::MemoryStore, records::user_to_item, types::User};
    use lambda_http::http;
    use std::collections::HashMap;

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

    fn request(query: &[(&str, &str)]) -> Request {
        let request = http::Request::builder()
            .method(http::Method::GET)
            .uri("/users")
            .body(Body::Empty)
            .unwrap();
        if query.is_empty() {
            return request;
        }

        let params: HashMap<String, String> = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        request.with_query_string_parameters(params)
    }

    fn listed(resp: &Response<Body>) -> Vec<User> {
        serde_json::from_slice(resp.body()).unwrap()
    }

    fn ids(users: &[User]) -> Vec<&str> {
        users.iter().map(|u| u.user_id.as_str()).collect()
    }

    fn body_string(resp: &Response<Body>) -> String {
        String::from_utf8(resp.body().to_vec()).unwrap()
    }

    fn seeded() -> Arc<AppState> {
        AppState::new(MemoryStore::with_users([
            user("u1", "Cat", "Ann"),
            user("u2", "Ann", "Zed"),
            user("u3", "Ann", "Ann"),
            user("u4", "Bob", "Lee"),
            user("u5", "Ann", "Zed"),
        ]))
    }

    #[tokio::test]
    async fn test_lists_every_user_once() {
        let resp = function_handler(request(&[]), seeded()).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(ids(&listed(&resp)), vec!["u1", "u2", "u3", "u4", "u5"]);
    }

    #[tokio::test]
    async fn test_empty_store_is_not_found() {
        let state = AppState::new(MemoryStore::new());

        let resp = function_handler(request(&[]), state).await.unwrap();
        assert_eq!(resp.status(), 404);
        assert_eq!(body_string(&resp), "no user found with given queries");
    }

    #[tokio::test]
    async fn test_sorted_listing() {
        let resp = function_handler(request(&[("sorted", "true")]), seeded())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        let users = listed(&resp);
        assert_eq!(ids(&users), vec!["u3", "u2", "u5", "u4", "u1"]);
        assert!(users.windows(2).all(|pair| {
            (&pair[0].first_name, &pair[0].last_name) <= (&pair[1].first_name, &pair[1].last_name)
        }));
    }

    #[tokio::test]
    async fn test_name_search_keeps_duplicates() {
        let resp = function_handler(request(&[("name", "Ann")]), seeded())
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);

        // first-name matches, then last-name matches
        assert_eq!(ids(&listed(&resp)), vec!["u2", "u3", "u5", "u1", "u3"]);
    }

    #[tokio::test]
    async fn test_name_search_without_matches() {
        let resp = function_handler(request(&[("name", "Nobody")]), seeded())
            .await
            .unwrap();
        assert_eq!(resp.status(), 404);
        assert_eq!(body_string(&resp), "no user found with given queries");
    }

    #[tokio::test]
    async fn test_unresolved_queries() {
        for query in [
            vec![("name", "")],
            vec![("sorted", "false")],
            vec![("page", "2")],
        ] {
            let resp = function_handler(request(&query), seeded()).await.unwrap();
            assert_eq!(resp.status(), 400, "query {:?}", query);
            assert_eq!(body_string(&resp), "cannot resolve query");
        }
    }

    #[tokio::test]
    async fn test_corrupt_item_is_server_error() {
        let store = MemoryStore::with_users([user("u1", "Ann", "Lee")]);
        let mut item = user_to_item(&user("u2", "Bob", "Lee"));
        item.insert("lastName".into(), AttributeValue::Bool(true));
        store.insert_raw(item).await;

        let resp = function_handler(request(&[]), AppState::new(store))
            .await
            .unwrap();
        assert_eq!(resp.status(), 500);
        assert_eq!(body_string(&resp), "unmarshal error from db response to struct");
    }

    #[tokio::test]
    async fn test_store_failure_returns_bad_gateway() {
        let store = MemoryStore::new();
        store.set_unavailable(true).await;

        let resp = function_handler(request(&[("sorted", "true")]), AppState::new(store))
            .await
            .unwrap();
        assert_eq!(resp.status(), 502);
        let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(body["error"], "record store request failed");
    }
}
