//! Extractor that runs an endpoint's declared rules before the handler.

use crate::errors::AppError;
use crate::validation::{RequestInput, RequestRules, evaluate};
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderMap, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Validated, typed payload for the rule set `R`.
///
/// Path parameters are read only when `R` declares a path rule, and the body only
/// when it declares a body rule, so an endpoint with path rules alone never looks
/// at its body. An empty body, or one not sent as JSON, counts as an object with
/// no fields. If any rule fails, the handler is not called and the request is
/// answered with [`AppError::Validation`].
///
/// ```ignore
/// async fn get_product(ValidatedRequest(id): ValidatedRequest<ProductIdRules>) -> String {
///     format!("Product {id}")
/// }
/// ```
pub struct ValidatedRequest<R: RequestRules>(pub R::Output);

impl<R, S> FromRequest<S> for ValidatedRequest<R>
where
    R: RequestRules,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, raw_body) = req.into_parts();

        let path = if R::reads_path() {
            match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state).await {
                Ok(Path(params)) => params,
                // Undecodable segments are left out so the path rules report them
                Err(e) => {
                    tracing::debug!("Path parameters not decodable: {}", e.body_text());
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        let body = if R::reads_body() {
            let is_json = has_json_content_type(&parts.headers);
            let bytes = Bytes::from_request(Request::from_parts(parts, raw_body), state)
                .await
                .map_err(IntoResponse::into_response)?;
            parse_body(&bytes, is_json).map_err(IntoResponse::into_response)?
        } else {
            Value::Object(Map::new())
        };

        let input = RequestInput::new(path, body);
        let errors = evaluate(R::RULES, &input);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors).into_response());
        }

        R::extract(&input)
            .map(ValidatedRequest)
            .map_err(IntoResponse::into_response)
    }
}

/// `application/json` or any `application/*+json` type, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn parse_body(bytes: &[u8], is_json: bool) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    if !is_json {
        tracing::debug!("Ignoring request body that is not declared as JSON");
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|e| AppError::InvalidJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Check, Location, Rule};
    use axum::{
        Json, Router,
        body::Body,
        http::{Method, StatusCode},
        routing::{patch, post},
    };
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    struct IdOnly;

    impl RequestRules for IdOnly {
        const RULES: &'static [Rule] = &[Rule::path("id", Check::IsInteger, "Invalid ID")];
        type Output = i32;

        fn extract(input: &RequestInput) -> Result<i32, AppError> {
            input.integer(Location::Path, "id")
        }
    }

    struct Priced;

    impl RequestRules for Priced {
        const RULES: &'static [Rule] = &[
            Rule::body("name", Check::NonEmptyString, "name required"),
            Rule::body("price", Check::IsPositive, "bad price"),
        ];
        type Output = (String, f64);

        fn extract(input: &RequestInput) -> Result<(String, f64), AppError> {
            Ok((
                input.string(Location::Body, "name")?,
                input.number(Location::Body, "price")?,
            ))
        }
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/items/{id}",
                patch(|ValidatedRequest(id): ValidatedRequest<IdOnly>| async move {
                    Json(json!({ "id": id }))
                }),
            )
            .route(
                "/items",
                post(
                    |ValidatedRequest((name, price)): ValidatedRequest<Priced>| async move {
                        Json(json!({ "name": name, "price": price }))
                    },
                ),
            )
    }

    async fn send_raw(method: Method, uri: &str, content_type: &str, body: Body) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", content_type)
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn send_as(
        method: Method,
        uri: &str,
        content_type: &str,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let response = send_raw(method, uri, content_type, Body::from(body)).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn send(method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
        send_as(method, uri, "application/json", body).await
    }

    #[tokio::test]
    async fn test_path_rules_pass() {
        let (status, body) = send(Method::PATCH, "/items/12", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 12}));
    }

    #[tokio::test]
    async fn test_path_only_rules_ignore_garbage_body() {
        let (status, _) = send(Method::PATCH, "/items/12", "this is not json").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_path_param() {
        let (status, body) = send(Method::PATCH, "/items/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"errors": [{"field": "id", "message": "Invalid ID"}]}));
    }

    #[tokio::test]
    async fn test_body_rules_collect_all_errors() {
        let (status, body) = send(Method::POST, "/items", r#"{"name": " ", "price": -1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_body_reports_missing_fields() {
        let (status, body) = send(Method::POST, "/items", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"errors": [
                {"field": "name", "message": "name required"},
                {"field": "price", "message": "bad price"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_malformed_json_body() {
        let (status, body) = send(Method::POST, "/items", "{\"name\":").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_valid_body_is_extracted() {
        let (status, body) = send(Method::POST, "/items", r#"{"name": "Mouse", "price": "25"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"name": "Mouse", "price": 25.0}));
    }

    #[tokio::test]
    async fn test_undecodable_path_param_is_invalid_id() {
        let (status, body) = send(Method::PATCH, "/items/%FF", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"errors": [{"field": "id", "message": "Invalid ID"}]}));
    }

    #[tokio::test]
    async fn test_non_json_body_has_no_fields() {
        let (status, body) = send_as(
            Method::POST,
            "/items",
            "text/plain",
            r#"{"name": "Mouse", "price": 25}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"errors": [
                {"field": "name", "message": "name required"},
                {"field": "price", "message": "bad price"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_json_content_type_with_parameters() {
        let (status, body) = send_as(
            Method::POST,
            "/items",
            "application/json; charset=utf-8",
            r#"{"name": "Mouse", "price": 25}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"name": "Mouse", "price": 25.0}));
    }

    #[tokio::test]
    async fn test_oversized_body_keeps_rejection_status() {
        let body = Body::from(vec![b' '; 3 * 1024 * 1024]);
        let response = send_raw(Method::POST, "/items", "application/json", body).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_json_content_type_detection() {
        let headers = |value: &'static str| {
            let mut map = HeaderMap::new();
            map.insert(CONTENT_TYPE, value.parse().unwrap());
            map
        };

        assert!(has_json_content_type(&headers("application/json")));
        assert!(has_json_content_type(&headers("Application/JSON; charset=utf-8")));
        assert!(has_json_content_type(&headers("application/merge-patch+json")));
        assert!(!has_json_content_type(&headers("text/plain")));
        assert!(!has_json_content_type(&headers("application/x-www-form-urlencoded")));
        assert!(!has_json_content_type(&HeaderMap::new()));
    }
}
