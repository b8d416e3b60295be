//! Browser transport over `gloo-net` (the Fetch API).

use gloo_net::http::{Request, RequestBuilder};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use super::client::Transport;
use super::error::TransportError;
use super::request::{HttpMethod, MultipartPart, PartValue, PreparedRequest, RawResponse, RequestBody};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn js_error(e: JsValue) -> TransportError {
    TransportError::Request(format!("{:?}", e))
}

fn form_data(parts: &[MultipartPart]) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(js_error)?;
    for part in parts {
        match &part.value {
            PartValue::Text(text) => form.append_with_str(&part.name, text).map_err(js_error)?,
            PartValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let array = js_sys::Uint8Array::from(bytes.as_slice());
                let blob_parts = js_sys::Array::of1(&array);
                let properties = BlobPropertyBag::new();
                properties.set_type(content_type);
                let blob = Blob::new_with_u8_array_sequence_and_options(&blob_parts, &properties)
                    .map_err(js_error)?;
                form.append_with_blob_and_filename(&part.name, &blob, file_name)
                    .map_err(js_error)?;
            }
        }
    }
    Ok(form)
}

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Patch => Request::patch(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

impl Transport for GlooTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, TransportError> {
        let mut req = builder(request.method, &request.url);
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        req = req.abort_signal(request.abort_signal.as_ref());

        // Multipart bodies must not carry an explicit Content-Type: the browser adds the boundary.
        let built = match &request.body {
            RequestBody::Empty => req.build(),
            RequestBody::Json(value) => req.body(value.to_string()),
            RequestBody::Multipart(parts) => req.body(form_data(parts)?),
        }
        .map_err(|e| TransportError::Request(e.to_string()))?;

        let response = match built.send().await {
            Ok(r) => r,
            Err(_) if request.abort_signal.as_ref().is_some_and(|s| s.aborted()) => {
                return Err(TransportError::Aborted)
            }
            Err(e) => return Err(TransportError::Network(e.to_string())),
        };

        let status = response.status();
        let status_text = response.status_text();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(RawResponse {
            status,
            status_text,
            body,
        })
    }
}
