//! Fetch hooks shared by every list and document screen.

use contracts::domain::resource::ResourceKind;
use contracts::shared::list_page::{unwrap_document, ListPage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use web_sys::AbortController;

use crate::shared::api::{ApiEnvelope, ApiRequest};
use crate::shared::grid::{ColumnSort, PaginationState};
use crate::system::auth::use_session;

/// What the list screen asks the server for. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub per_page: usize,
    pub sort: Option<ColumnSort>,
    pub search: String,
}

impl ListQuery {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page,
            sort: None,
            search: String::new(),
        }
    }

    /// Moves `page` back to the last page when the row total no longer
    /// reaches it, e.g. after every row of the last page was deleted.
    /// Returns whether the page changed.
    pub fn clamp_to_total(&mut self, total_rows: usize) -> bool {
        let last = PaginationState::from_total(self.page, total_rows, self.per_page).total_pages;
        if self.page > last {
            self.page = last;
            true
        } else {
            false
        }
    }

    /// Query-string parameters. Sorting is only sent to resources that sort
    /// on the server; the others sort the loaded page locally.
    pub fn params(&self, server_sort: bool) -> ListParams {
        let sort = self.sort.as_ref().filter(|_| server_sort);
        let search = self.search.trim();
        ListParams {
            page: self.page.max(1),
            limit: self.per_page.max(1),
            sort_by: sort.map(|s| s.id.clone()),
            order: sort.map(|s| s.direction().as_str()),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: usize,
    pub limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Reactive handle returned by [`use_list_resource`].
#[derive(Clone, Copy)]
pub struct ListResource {
    pub data: RwSignal<ListPage<Value>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    reload: RwSignal<u64>,
}

impl ListResource {
    pub fn refetch(&self) {
        self.reload.update(|n| *n += 1);
    }
}

/// Turns a list response into a page using the resource's unwrap path.
pub fn list_page_from(kind: ResourceKind, envelope: ApiEnvelope<Value>) -> Result<ListPage<Value>, String> {
    let body = envelope.into_result().map_err(|f| f.message)?;
    ListPage::from_body(&body, &kind.list_path()).map_err(|e| e.to_string())
}

/// Loads `kind` whenever `query` changes or `refetch` is called.
///
/// Each load supersedes the previous one: the older request is aborted and
/// its response, if it still arrives, is ignored.
pub fn use_list_resource(kind: ResourceKind, query: Signal<ListQuery>) -> ListResource {
    let session = use_session();
    let resource = ListResource {
        data: RwSignal::new(ListPage::empty()),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
        reload: RwSignal::new(0),
    };
    let generation = StoredValue::new(0u64);
    let in_flight: StoredValue<Option<AbortController>, LocalStorage> = StoredValue::new_local(None);

    Effect::new(move |_| {
        let params = query.with(|q| q.params(kind.sorts_on_server()));
        resource.reload.track();

        generation.update_value(|g| *g += 1);
        let current = generation.get_value();

        in_flight.update_value(|slot| {
            if let Some(previous) = slot.take() {
                previous.abort();
            }
            *slot = AbortController::new().ok();
        });
        let signal = in_flight.with_value(|slot| slot.as_ref().map(AbortController::signal));

        resource.loading.set(true);
        resource.error.set(None);
        let client = session.client();

        spawn_local(async move {
            let envelope: ApiEnvelope<Value> = match ApiRequest::get(kind.endpoint()).with_query(&params) {
                Ok(request) => client.send(request.with_abort_signal(signal)).await,
                Err(e) => {
                    resource.error.set(Some(format!("Failed to encode query: {}", e)));
                    resource.loading.set(false);
                    return;
                }
            };
            if generation.try_get_value() != Some(current) {
                return;
            }
            session.observe(&envelope);
            match list_page_from(kind, envelope) {
                Ok(page) => resource.data.set(page),
                Err(message) => resource.error.set(Some(message)),
            }
            resource.loading.set(false);
        });
    });

    resource
}

/// Reactive handle returned by [`use_api_value`].
pub struct ApiValue<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    reload: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for ApiValue<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ApiValue<T> {}

impl<T: Send + Sync + 'static> ApiValue<T> {
    pub fn refetch(&self) {
        self.reload.update(|n| *n += 1);
    }
}

/// Loads one JSON document from `path` (relative to the API base).
/// `pointer` selects the document inside the body, `""` for the whole body.
pub fn use_api_value<T>(path: Signal<String>, pointer: &'static str) -> ApiValue<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let session = use_session();
    let value = ApiValue {
        data: RwSignal::new(None),
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
        reload: RwSignal::new(0),
    };

    Effect::new(move |_| {
        let path = path.get();
        value.reload.track();
        value.loading.set(true);
        value.error.set(None);
        let client = session.client();

        spawn_local(async move {
            let envelope: ApiEnvelope<Value> = client.get(&path).await;
            session.observe(&envelope);
            let decoded = envelope.into_result().map_err(|f| f.message).and_then(|body| {
                let doc = unwrap_document(&body, pointer)
                    .ok_or_else(|| format!("Response has no value at `{}`", pointer))?;
                serde_json::from_value::<T>(doc).map_err(|e| format!("Failed to parse response: {}", e))
            });
            match decoded {
                Ok(doc) => value.data.set(Some(doc)),
                Err(message) => value.error.set(Some(message)),
            }
            value.loading.set(false);
        });
    });

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::ApiFailure;
    use serde_json::json;

    #[test]
    fn test_params_for_server_sorted_resource() {
        let query = ListQuery {
            page: 2,
            per_page: 25,
            sort: Some(ColumnSort {
                id: "price".into(),
                desc: true,
            }),
            search: " whiskas ".into(),
        };
        assert_eq!(
            serde_qs::to_string(&query.params(true)).unwrap(),
            "page=2&limit=25&sortBy=price&order=desc&search=whiskas"
        );
    }

    #[test]
    fn test_params_without_server_sort() {
        let mut query = ListQuery::new(10);
        query.sort = Some(ColumnSort {
            id: "total".into(),
            desc: false,
        });
        assert_eq!(serde_qs::to_string(&query.params(false)).unwrap(), "page=1&limit=10");
    }

    #[test]
    fn test_list_page_uses_resource_path() {
        let body = json!({ "data": { "data": [{ "_id": "p1" }], "total": 41 } });
        let page = list_page_from(ResourceKind::Products, ApiEnvelope::Success { response: body }).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 41);

        let err = list_page_from(ResourceKind::Products, ApiEnvelope::Success { response: json!({}) });
        assert!(err.is_err());

        let failed = list_page_from(
            ResourceKind::Brands,
            ApiFailure::http(500, "Internal Server Error", "boom").into(),
        );
        assert_eq!(failed, Err("boom".to_string()));
    }

    #[test]
    fn test_page_clamped_after_rows_shrink() {
        let mut query = ListQuery::new(10);
        query.page = 3;
        assert!(query.clamp_to_total(20));
        assert_eq!(query.page, 2);
        assert_eq!(serde_qs::to_string(&query.params(true)).unwrap(), "page=2&limit=10");

        assert!(!query.clamp_to_total(20));
        assert!(query.clamp_to_total(0));
        assert_eq!(query.page, 1);
    }
}
