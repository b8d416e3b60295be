//! HTTP access to the Pet Caart REST API.
//!
//! Every call goes through [`ApiClient`], which injects the tunnel-bypass and
//! bearer headers and folds every outcome into an [`ApiEnvelope`]; nothing in
//! this module returns a transport error to a screen.

pub mod client;
pub mod envelope;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{ApiClient, Transport};
pub use envelope::{ApiEnvelope, ApiFailure};
pub use error::TransportError;
pub use request::{ApiRequest, HttpMethod, MultipartPart, PartValue, RequestBody};
pub use transport::GlooTransport;

#[cfg(test)]
pub mod testing {
    //! In-memory [`Transport`] doubles for client-level tests.

    use super::error::TransportError;
    use super::request::{PreparedRequest, RawResponse};
    use super::Transport;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Reply = Rc<dyn Fn(&PreparedRequest) -> Result<RawResponse, TransportError>>;

    /// Records every request and answers with a fixed reply function.
    #[derive(Clone)]
    pub struct StubTransport {
        seen: Rc<RefCell<Vec<PreparedRequest>>>,
        reply: Reply,
    }

    impl StubTransport {
        pub fn with(
            reply: impl Fn(&PreparedRequest) -> Result<RawResponse, TransportError> + 'static,
        ) -> Self {
            Self {
                seen: Rc::new(RefCell::new(Vec::new())),
                reply: Rc::new(reply),
            }
        }

        pub fn raw(status: u16, body: &str) -> Self {
            let body = body.to_string();
            Self::with(move |_| {
                Ok(RawResponse {
                    status,
                    status_text: status_text(status).to_string(),
                    body: body.clone(),
                })
            })
        }

        pub fn status(status: u16, body: Value) -> Self {
            Self::raw(status, &body.to_string())
        }

        pub fn ok(body: Value) -> Self {
            Self::status(200, body)
        }

        pub fn failing(error: TransportError) -> Self {
            Self::with(move |_| Err(error.clone()))
        }

        pub fn requests(&self) -> Vec<PreparedRequest> {
            self.seen.borrow().clone()
        }
    }

    pub fn status_text(status: u16) -> &'static str {
        match status {
            200 => "OK",
            204 => "No Content",
            401 => "Unauthorized",
            404 => "Not Found",
            422 => "Unprocessable Entity",
            500 => "Internal Server Error",
            _ => "",
        }
    }

    impl Transport for StubTransport {
        async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
            let reply = (self.reply)(&request);
            self.seen.borrow_mut().push(request);
            reply
        }
    }
}
