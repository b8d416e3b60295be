use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::envelope::{ApiEnvelope, ApiFailure};
use super::error::TransportError;
use super::request::{ApiRequest, HttpMethod, MultipartPart, PreparedRequest, RawResponse, RequestBody};
use super::transport::GlooTransport;
use crate::config::AppConfig;

/// Sends a prepared request and returns the raw exchange.
///
/// Implemented by [`GlooTransport`] in the browser and by in-memory doubles in tests.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient<T = GlooTransport> {
    base_url: String,
    tunnel_header: String,
    token: Option<String>,
    transport: T,
}

impl ApiClient<GlooTransport> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.api_base_url, &config.tunnel_header, GlooTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: &str, tunnel_header: &str, transport: T) -> Self {
        Self {
            base_url: base_url.to_string(),
            tunnel_header: tunnel_header.to_string(),
            token: None,
            transport,
        }
    }

    /// Bearer token attached to every request; `None` sends anonymous requests.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        let mut url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(q);
        }
        url
    }

    pub fn prepare(&self, request: ApiRequest) -> PreparedRequest {
        let mut headers = vec![(self.tunnel_header.clone(), "true".to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        if matches!(request.body, RequestBody::Json(_)) {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        PreparedRequest {
            method: request.method,
            url: self.url(&request.path, request.query.as_deref()),
            headers,
            body: request.body,
            abort_signal: request.abort_signal,
        }
    }

    /// Sends `request` and decodes a 2xx body into `R`.
    pub async fn send<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiEnvelope<R> {
        let prepared = self.prepare(request);
        let method = prepared.method;
        let url = prepared.url.clone();

        match self.transport.send(prepared).await {
            Ok(raw) => {
                let envelope = interpret(raw);
                if let ApiEnvelope::Failure(f) = &envelope {
                    log::error!("{} {} failed: {}", method.as_str(), url, f.message);
                }
                envelope
            }
            Err(TransportError::Aborted) => {
                log::debug!("{} {} aborted", method.as_str(), url);
                ApiFailure::transport(TransportError::Aborted.to_string()).into()
            }
            Err(e) => {
                log::error!("{} {} failed: {}", method.as_str(), url, e);
                ApiFailure::transport(e.to_string()).into()
            }
        }
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiEnvelope<R> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn get_with<R, Q>(&self, path: &str, query: &Q) -> ApiEnvelope<R>
    where
        R: DeserializeOwned,
        Q: Serialize,
    {
        match ApiRequest::get(path).with_query(query) {
            Ok(request) => self.send(request).await,
            Err(e) => {
                log::error!("GET {} query encoding failed: {}", path, e);
                ApiFailure::transport(format!("Failed to encode query: {}", e)).into()
            }
        }
    }

    pub async fn post<R, B>(&self, path: &str, body: &B) -> ApiEnvelope<R>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        self.send_json(HttpMethod::Post, path, body).await
    }

    pub async fn patch<R, B>(&self, path: &str, body: &B) -> ApiEnvelope<R>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        self.send_json(HttpMethod::Patch, path, body).await
    }

    pub async fn put<R, B>(&self, path: &str, body: &B) -> ApiEnvelope<R>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        self.send_json(HttpMethod::Put, path, body).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> ApiEnvelope<R> {
        self.send(ApiRequest::delete(path)).await
    }

    /// `multipart/form-data` POST, used for image uploads.
    pub async fn upload<R: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<MultipartPart>,
    ) -> ApiEnvelope<R> {
        self.send(ApiRequest::new(HttpMethod::Post, path).with_multipart(parts))
            .await
    }

    async fn send_json<R, B>(&self, method: HttpMethod, path: &str, body: &B) -> ApiEnvelope<R>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        match serde_json::to_value(body) {
            Ok(json) => self.send(ApiRequest::new(method, path).with_json(json)).await,
            Err(e) => {
                log::error!("{} {} body encoding failed: {}", method.as_str(), path, e);
                ApiFailure::transport(format!("Failed to serialize request: {}", e)).into()
            }
        }
    }
}

fn parse_body(body: &str) -> Result<Value, serde_json::Error> {
    if body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(body)
    }
}

/// Turns a completed exchange into an envelope.
fn interpret<R: DeserializeOwned>(raw: RawResponse) -> ApiEnvelope<R> {
    let parsed = parse_body(&raw.body);

    if !raw.is_success() {
        let data = parsed.ok().filter(|v| !v.is_null());
        let message = data
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed: {} {}", raw.status, raw.status_text));
        return ApiFailure::http(raw.status, raw.status_text, message)
            .with_data(data)
            .into();
    }

    let decoded = parsed.and_then(serde_json::from_value::<R>);
    match decoded {
        Ok(response) => ApiEnvelope::Success { response },
        Err(e) => ApiFailure::http(
            raw.status,
            raw.status_text,
            format!("Failed to parse response: {}", e),
        )
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::StubTransport;
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn client(transport: StubTransport) -> ApiClient<StubTransport> {
        ApiClient::new("https://api.petcaart.com/", "ngrok-skip-browser-warning", transport)
    }

    #[test]
    fn test_url_joining() {
        let c = client(StubTransport::ok(json!(null)));
        assert_eq!(c.url("/api/brand", None), "https://api.petcaart.com/api/brand");
        assert_eq!(
            c.url("api/brand", Some("page=1")),
            "https://api.petcaart.com/api/brand?page=1"
        );
        assert_eq!(
            c.url("api/brand?x=1", Some("page=1")),
            "https://api.petcaart.com/api/brand?x=1&page=1"
        );
    }

    #[test]
    fn test_headers_injected() {
        let c = client(StubTransport::ok(json!(null))).with_token(Some("tok".into()));
        let prepared = c.prepare(ApiRequest::get("api/users").with_json(json!({})));
        assert_eq!(prepared.header("ngrok-skip-browser-warning"), Some("true"));
        assert_eq!(prepared.header("authorization"), Some("Bearer tok"));
        assert_eq!(prepared.header("content-type"), Some("application/json"));

        let anonymous = client(StubTransport::ok(json!(null))).with_token(Some(String::new()));
        assert_eq!(anonymous.prepare(ApiRequest::get("x")).header("Authorization"), None);
    }

    #[test]
    fn test_success_envelope() {
        let c = client(StubTransport::ok(json!({ "data": [1, 2] })));
        let env: ApiEnvelope<Value> = block_on(c.get("api/brand"));
        assert_eq!(env.into_result().unwrap(), json!({ "data": [1, 2] }));
    }

    #[test]
    fn test_network_failure_is_normalized() {
        let transport = StubTransport::failing(TransportError::Network("connection refused".into()));
        let c = client(transport);
        let env: ApiEnvelope<Value> = block_on(c.post("api/coupon", &json!({ "code": "PAWS10" })));
        assert!(env.error());
        let shape = serde_json::to_value(&env).unwrap();
        assert_eq!(shape["success"], json!(false));
        assert_eq!(shape["error"], json!(true));
        assert!(shape.get("status").is_none());
    }

    #[test]
    fn test_http_error_carries_server_message() {
        let c = client(StubTransport::status(422, json!({ "message": "Code already used" })));
        let env: ApiEnvelope<Value> = block_on(c.patch("api/coupon/1", &json!({})));
        let failure = env.into_result().unwrap_err();
        assert_eq!(failure.status, Some(422));
        assert_eq!(failure.message, "Code already used");
        assert_eq!(failure.data, Some(json!({ "message": "Code already used" })));
    }

    #[test]
    fn test_undecodable_body() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Strict {
            count: u32,
        }
        let c = client(StubTransport::ok(json!({ "count": "many" })));
        let env: ApiEnvelope<Strict> = block_on(c.get("api/x"));
        let failure = env.into_result().unwrap_err();
        assert_eq!(failure.status, Some(200));
        assert!(failure.message.starts_with("Failed to parse response"));
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        let c = client(StubTransport::raw(204, ""));
        let env: ApiEnvelope<Value> = block_on(c.delete("api/brand/9"));
        assert_eq!(env.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn test_query_and_method_forwarded() {
        let transport = StubTransport::ok(json!([]));
        let c = client(transport.clone());
        let _: ApiEnvelope<Value> = block_on(c.get_with("api/products", &BTreeMap::from([("page", 3)])));
        let seen = transport.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(seen[0].url, "https://api.petcaart.com/api/products?page=3");
    }

    #[test]
    fn test_upload_sends_multipart() {
        let transport = StubTransport::ok(json!({ "url": "x.png" }));
        let c = client(transport.clone());
        let parts = vec![
            MultipartPart::text("alt", "Dog bed"),
            MultipartPart::file("image", "bed.png", "image/png", vec![1, 2, 3]),
        ];
        let env: ApiEnvelope<Value> = block_on(c.upload("api/banner/upload", parts.clone()));
        assert!(env.success());
        let seen = transport.requests();
        assert_eq!(seen[0].body, RequestBody::Multipart(parts));
        assert_eq!(seen[0].header("Content-Type"), None);
    }
}
