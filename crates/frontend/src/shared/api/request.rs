use serde::Serialize;
use serde_json::Value;
use web_sys::AbortSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartPart {
    pub name: String,
    pub value: PartValue,
}

impl MultipartPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PartValue::Text(value.into()),
        }
    }

    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                bytes,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<MultipartPart>),
}

/// A request relative to the API base url.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    /// Already-encoded query string, without the leading `?`.
    pub query: Option<String>,
    pub body: RequestBody,
    pub abort_signal: Option<AbortSignal>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: RequestBody::Empty,
            abort_signal: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn with_multipart(mut self, parts: Vec<MultipartPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Encodes `query` with `serde_qs`; empty results leave the url bare.
    pub fn with_query<Q: Serialize>(mut self, query: &Q) -> Result<Self, serde_qs::Error> {
        let encoded = serde_qs::to_string(query)?;
        self.query = if encoded.is_empty() {
            None
        } else {
            Some(encoded)
        };
        Ok(self)
    }

    pub fn with_abort_signal(mut self, signal: Option<AbortSignal>) -> Self {
        self.abort_signal = signal;
        self
    }
}

/// A request with its final url and headers, ready for a [`super::Transport`].
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub abort_signal: Option<AbortSignal>,
}

impl PreparedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status line and body text of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Query {
        page: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        search: Option<String>,
    }

    #[test]
    fn test_query_encoding() {
        let req = ApiRequest::get("api/brand")
            .with_query(&Query {
                page: 2,
                search: Some("whiskas".into()),
            })
            .unwrap();
        assert_eq!(req.query.as_deref(), Some("page=2&search=whiskas"));
    }

    #[test]
    fn test_empty_query_is_dropped() {
        #[derive(Serialize)]
        struct Nothing {}
        let req = ApiRequest::get("api/brand").with_query(&Nothing {}).unwrap();
        assert_eq!(req.query, None);
    }
}
