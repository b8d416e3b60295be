use contracts::domain::page_section::{PageLayout, PageSection, SaveLayoutRequest};
use serde_json::Value;

use crate::shared::api::{ApiClient, ApiEnvelope, Transport};

/// `api/page-config/<page>`
pub fn layout_path(page: &str) -> String {
    format!("api/page-config/{}", urlencoding::encode(page))
}

pub async fn fetch_layout<T: Transport>(client: &ApiClient<T>, page: &str) -> ApiEnvelope<PageLayout> {
    client
        .get::<Value>(&layout_path(page))
        .await
        .and_then(|body| {
            let doc = body.get("data").filter(|d| d.is_object()).cloned().unwrap_or(body);
            serde_json::from_value::<PageLayout>(doc).map_err(|e| format!("Failed to parse layout: {}", e))
        })
}

/// Persists the order of `sections`; only keys and positions are sent.
pub async fn save_layout<T: Transport>(
    client: &ApiClient<T>,
    page: &str,
    sections: &[PageSection],
) -> ApiEnvelope<Value> {
    client
        .patch(&layout_path(page), &SaveLayoutRequest::from_sections(sections))
        .await
}
