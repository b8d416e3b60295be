use contracts::domain::resource::ResourceKind;
use serde_json::Value;

use crate::shared::api::{ApiClient, ApiFailure, Transport};

/// Outcome of deleting a batch of records one by one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkDeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, ApiFailure)>,
}

impl BulkDeleteReport {
    pub fn summary(&self, kind: ResourceKind) -> String {
        let noun = kind.title().to_lowercase();
        match (self.deleted.len(), self.failed.len()) {
            (n, 0) => format!("Deleted {} {}", n, noun),
            (0, f) => format!("Could not delete {} {}", f, noun),
            (n, f) => format!("Deleted {} {}, {} failed", n, noun, f),
        }
    }

    pub fn first_unauthorized(&self) -> Option<&ApiFailure> {
        self.failed
            .iter()
            .map(|(_, f)| f)
            .find(|f| f.is_unauthorized())
    }
}

/// DELETE <endpoint>/<id> for every id, in order. A failed delete does not
/// stop the rest of the batch.
pub async fn bulk_delete<T: Transport>(
    client: &ApiClient<T>,
    kind: ResourceKind,
    ids: &[String],
) -> BulkDeleteReport {
    let mut report = BulkDeleteReport::default();
    for id in ids {
        match client.delete::<Value>(&kind.item_endpoint(id)).await.into_result() {
            Ok(_) => report.deleted.push(id.clone()),
            Err(failure) => report.failed.push((id.clone(), failure)),
        }
    }
    log::info!(
        "Bulk delete on {}: {} deleted, {} failed",
        kind.endpoint(),
        report.deleted.len(),
        report.failed.len()
    );
    report
}
