use serde::Serialize;
use serde_json::Value;

/// Failure half of the envelope. Always carries `success: false, error: true`
/// so callers can branch on flags instead of catching anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiFailure {
    pub success: bool,
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiFailure {
    /// Failure without an HTTP status (network, abort, encoding).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: true,
            status: None,
            status_text: None,
            message: message.into(),
            data: None,
        }
    }

    pub fn http(status: u16, status_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            status_text: Some(status_text.into()),
            ..Self::transport(message)
        }
    }

    pub fn with_data(mut self, data: Option<Value>) -> Self {
        self.data = data;
        self
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

/// Normalised result of every API call: `{ response }` or an [`ApiFailure`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Success { response: T },
    Failure(ApiFailure),
}

impl<T> ApiEnvelope<T> {
    pub fn success(&self) -> bool {
        matches!(self, ApiEnvelope::Success { .. })
    }

    pub fn error(&self) -> bool {
        !self.success()
    }

    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            ApiEnvelope::Failure(f) => Some(f),
            ApiEnvelope::Success { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<T, ApiFailure> {
        match self {
            ApiEnvelope::Success { response } => Ok(response),
            ApiEnvelope::Failure(f) => Err(f),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        match self {
            ApiEnvelope::Success { response } => ApiEnvelope::Success {
                response: f(response),
            },
            ApiEnvelope::Failure(failure) => ApiEnvelope::Failure(failure),
        }
    }

    /// Post-processes a successful body; a rejected body becomes a failure
    /// without HTTP status.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, String>) -> ApiEnvelope<U> {
        match self {
            ApiEnvelope::Success { response } => match f(response) {
                Ok(response) => ApiEnvelope::Success { response },
                Err(message) => ApiFailure::transport(message).into(),
            },
            ApiEnvelope::Failure(failure) => ApiEnvelope::Failure(failure),
        }
    }
}

impl<T> From<ApiFailure> for ApiEnvelope<T> {
    fn from(failure: ApiFailure) -> Self {
        ApiEnvelope::Failure(failure)
    }
}
