use lambda_http::{
    http::{self, StatusCode},
    Body, Response,
};
use serde::Serialize;

use crate::error::ServiceError;

/// Plain text response, the shape every status message uses
pub fn text(status: StatusCode, message: impl Into<String>) -> Result<Response<Body>, http::Error> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(message.into()))
}

/// JSON response from an already encoded body
pub fn json_body(status: StatusCode, body: String) -> Result<Response<Body>, http::Error> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::from(body))
}

/// Encode `value` as JSON, or `None` if serialization fails
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(body) => Some(body),
        Err(e) => {
            tracing::error!("Failed to encode response body: {}", e);
            None
        }
    }
}

/// `{"error": ...}` body used for store failures
pub fn error_json(status: StatusCode, message: &str) -> Result<Response<Body>, http::Error> {
    json_body(status, serde_json::json!({ "error": message }).to_string())
}

/// Turn an operation result into what the lambda runtime expects.
///
/// Store failures become a 502 with a JSON error body; a response that could
/// not be built fails the invocation.
pub fn finish(
    result: Result<Response<Body>, ServiceError>,
) -> Result<Response<Body>, lambda_http::Error> {
    match result {
        Ok(resp) => Ok(resp),
        Err(ServiceError::Store(e)) => {
            tracing::error!("Record store request failed: {}", e);
            let resp = error_json(StatusCode::BAD_GATEWAY, "record store request failed")
                .map_err(Box::new)?;
            Ok(resp)
        }
        Err(ServiceError::Http(e)) => Err(e.into()),
    }
}
