//! Organization lookup for branding
//!
//! Best effort only: every failure (transport, HTTP status, payload shape)
//! collapses to `None`. Nothing is cached, retried, logged or published.

use serde_json::Value;

use crate::client::{ClientContext, ME_PATH};

/// Resolve the signed-in user's organization id, or `None`.
///
/// Sends one `GET /me` through `ctx` and reads `organizationId` from the
/// response. Only a 2xx response carrying a JSON object whose
/// `organizationId` is an integral number yields `Some`.
pub async fn resolve_organization_id(ctx: &ClientContext) -> Option<i64> {
    let response = ctx.get(ME_PATH).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }

    let body: Value = response.json().await.ok()?;
    organization_id_from(&body)
}

fn organization_id_from(body: &Value) -> Option<i64> {
    let value = body.as_object()?.get("organizationId")?;

    if let Some(id) = value.as_i64() {
        return Some(id);
    }

    // Integral floats such as `42.0` still count; fractions and values
    // outside i64 do not
    let id = value.as_f64()?;
    let in_range = id >= i64::MIN as f64 && id < i64::MAX as f64;
    if id.is_finite() && id.fract() == 0.0 && in_range {
        Some(id as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::client::StaticCredentials;

    fn context(base: String, token: Option<&str>) -> ClientContext {
        ClientContext::new(
            base,
            Arc::new(StaticCredentials::new(token.map(str::to_string))),
            None,
        )
        .unwrap()
    }

    async fn resolve_with(status: usize, body: &str) -> Option<i64> {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/api/v1/me")
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let ctx = context(format!("{}/api/v1", server.url()), Some("tok"));
        resolve_organization_id(&ctx).await
    }

    #[tokio::test]
    async fn test_returns_integer_org_id() {
        assert_eq!(resolve_with(200, r#"{"organizationId":42}"#).await, Some(42));
    }

    #[tokio::test]
    async fn test_returns_each_integer_unchanged() {
        for id in [0_i64, 1, 7, 1_000_000, -3, i64::MAX] {
            let body = json!({ "organizationId": id }).to_string();
            assert_eq!(resolve_with(200, &body).await, Some(id), "id {}", id);
        }
    }

    #[tokio::test]
    async fn test_ignores_other_fields() {
        let body = r#"{"id":"u1","email":"a@b.c","organizationId":9,"extra":[1,2]}"#;
        assert_eq!(resolve_with(200, body).await, Some(9));
    }

    #[tokio::test]
    async fn test_missing_field_is_none() {
        assert_eq!(resolve_with(200, r#"{"id":"u1"}"#).await, None);
    }

    #[tokio::test]
    async fn test_null_field_is_none() {
        assert_eq!(resolve_with(200, r#"{"organizationId":null}"#).await, None);
    }

    #[tokio::test]
    async fn test_string_field_is_none() {
        assert_eq!(resolve_with(200, r#"{"organizationId":"abc"}"#).await, None);
        assert_eq!(resolve_with(200, r#"{"organizationId":"42"}"#).await, None);
    }

    #[tokio::test]
    async fn test_non_numeric_values_are_none() {
        for body in [
            r#"{"organizationId":true}"#,
            r#"{"organizationId":{"id":1}}"#,
            r#"{"organizationId":[42]}"#,
            r#"{"organizationId":42.5}"#,
            r#"{"organizationId":1e300}"#,
        ] {
            assert_eq!(resolve_with(200, body).await, None, "body {}", body);
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_none() {
        assert_eq!(resolve_with(200, "not json").await, None);
        assert_eq!(resolve_with(200, "").await, None);
        assert_eq!(resolve_with(200, "[42]").await, None);
        assert_eq!(resolve_with(200, "42").await, None);
    }

    #[tokio::test]
    async fn test_server_error_is_none() {
        assert_eq!(resolve_with(500, r#"{"organizationId":42}"#).await, None);
    }

    #[tokio::test]
    async fn test_any_non_success_status_is_none() {
        for status in [301, 400, 401, 403, 404, 429, 502, 503] {
            assert_eq!(
                resolve_with(status, r#"{"organizationId":42}"#).await,
                None,
                "status {}",
                status
            );
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_none() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let ctx = context(format!("http://127.0.0.1:{}/api/v1", port), None);
        assert_eq!(resolve_organization_id(&ctx).await, None);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_none() {
        let ctx = context("http://acctctl-test.invalid/api/v1".to_string(), None);
        assert_eq!(resolve_organization_id(&ctx).await, None);
    }

    #[tokio::test]
    async fn test_sends_bearer_only_with_token() {
        let mut server = mockito::Server::new_async().await;
        let with_token = server
            .mock("GET", "/api/v1/me")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_body(r#"{"organizationId":1}"#)
            .expect(1)
            .create_async()
            .await;

        let ctx = context(format!("{}/api/v1", server.url()), Some("tok"));
        assert_eq!(resolve_organization_id(&ctx).await, Some(1));
        with_token.assert_async().await;

        let mut server = mockito::Server::new_async().await;
        let without_token = server
            .mock("GET", "/api/v1/me")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"organizationId":2}"#)
            .expect(1)
            .create_async()
            .await;

        let ctx = context(format!("{}/api/v1", server.url()), None);
        assert_eq!(resolve_organization_id(&ctx).await, Some(2));
        without_token.assert_async().await;
    }

    #[tokio::test]
    async fn test_sends_session_cookie() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/me")
            .match_header("cookie", "session=xyz")
            .with_status(200)
            .with_body(r#"{"organizationId":5}"#)
            .create_async()
            .await;

        let ctx = ClientContext::new(
            format!("{}/api/v1", server.url()),
            Arc::new(StaticCredentials::new(None)),
            Some("session=xyz"),
        )
        .unwrap();

        assert_eq!(resolve_organization_id(&ctx).await, Some(5));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_each_call_issues_one_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/me")
            .with_status(200)
            .with_body(r#"{"organizationId":3}"#)
            .expect(2)
            .create_async()
            .await;

        let ctx = context(format!("{}/api/v1", server.url()), None);
        assert_eq!(resolve_organization_id(&ctx).await, Some(3));
        assert_eq!(resolve_organization_id(&ctx).await, Some(3));
        mock.assert_async().await;
    }

    #[test]
    fn test_organization_id_from_value() {
        assert_eq!(organization_id_from(&json!({"organizationId": 42})), Some(42));
        assert_eq!(organization_id_from(&json!({"organizationId": 42.0})), Some(42));
        assert_eq!(organization_id_from(&json!({"organizationId": u64::MAX})), None);
        assert_eq!(organization_id_from(&json!({"organizationId": "abc"})), None);
        assert_eq!(organization_id_from(&json!(null)), None);
    }
}
