/*
 * Responsibility
 * - /hello-world: greeting without authentication
 * - `?name=` picks who to greet (default "World")
 */
use axum::response::Response;

use crate::api::v1::dto::greeting::GreetingResponse;
use crate::edge::RequestContext;
use crate::error::FunctionError;
use crate::middleware::cors;

const DEFAULT_NAME: &str = "World";

pub async fn hello_world(ctx: RequestContext) -> Result<Response, FunctionError> {
    let name = ctx
        .query_param("name")
        .unwrap_or_else(|| DEFAULT_NAME.to_string());

    Ok(cors::json(GreetingResponse {
        message: format!("Hello, {name}!"),
    }))
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, http::Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::api::v1::routes;
    use crate::test_support::{FakeIdentityBackend, StubUpstream, test_state};

    async fn greet(uri: &str, auth: Option<&str>) -> (FakeIdentityBackend, Value) {
        let backend = FakeIdentityBackend::no_user();
        let state = test_state(&backend, StubUpstream::ok("{}"));
        let app: Router = routes(&state).with_state(state);

        let mut req = Request::builder().uri(uri);
        if let Some(auth) = auth {
            req = req.header("authorization", auth);
        }
        let res = app.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(res.headers()["access-control-allow-origin"], "*");

        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (backend, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn defaults_to_world() {
        let (_, body) = greet("/hello-world", None).await;
        assert_eq!(body, json!({"message": "Hello, World!"}));
    }

    #[tokio::test]
    async fn greets_by_name() {
        let (_, body) = greet("/hello-world?name=Ada", None).await;
        assert_eq!(body, json!({"message": "Hello, Ada!"}));
    }

    #[tokio::test]
    async fn ignores_credentials() {
        let (backend, body) = greet("/hello-world?name=Ada", Some("Bearer whatever")).await;
        assert_eq!(body, json!({"message": "Hello, Ada!"}));
        assert_eq!(backend.calls(), 0);
    }
}
