use contracts::usecases::push_notification::{
    DispatchReport, Platform, PushDraft, PushRequest, RecipientsByPlatform,
};
use serde_json::Value;

use crate::shared::api::{ApiClient, ApiFailure, Transport};

/// Sends `draft` to every platform that has recipients, one request per
/// platform. Platforms without tokens are skipped and do not count as
/// attempted.
pub async fn dispatch_push<T: Transport>(
    client: &ApiClient<T>,
    draft: &PushDraft,
    recipients: &RecipientsByPlatform,
) -> (DispatchReport, Vec<ApiFailure>) {
    let mut report = DispatchReport::default();
    let mut failures = Vec::new();

    for platform in Platform::ALL {
        let tokens = recipients.tokens(platform);
        if tokens.is_empty() {
            continue;
        }
        report.attempted.push(platform);
        let body = PushRequest::new(draft, tokens.to_vec());
        match client.post::<Value, _>(platform.endpoint(), &body).await.into_result() {
            Ok(_) => log::info!("Push sent to {} {} devices", tokens.len(), platform),
            Err(failure) => {
                log::warn!("Push to {} failed: {}", platform, failure.message);
                report.failed.push(platform);
                failures.push(failure);
            }
        }
    }

    (report, failures)
}

/// Toast text for a finished dispatch.
pub fn report_message(report: &DispatchReport, skipped: usize) -> String {
    if !report.is_success() {
        return "No selected customer has a registered device".to_string();
    }
    let names = |platforms: &[Platform]| {
        platforms
            .iter()
            .map(Platform::to_string)
            .collect::<Vec<_>>()
            .join(" and ")
    };
    let mut message = if report.failed.is_empty() {
        format!("Notification sent to {}", names(&report.attempted))
    } else if report.delivered().is_empty() {
        format!("Notification failed for {}", names(&report.failed))
    } else {
        format!(
            "Notification sent to {}, failed for {}",
            names(&report.delivered()),
            names(&report.failed)
        )
    };
    if skipped > 0 {
        message.push_str(&format!(" ({} without a device skipped)", skipped));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::request::RawResponse;
    use crate::shared::api::testing::{status_text, StubTransport};
    use crate::shared::api::RequestBody;
    use futures::executor::block_on;
    use serde_json::json;

    fn draft() -> PushDraft {
        PushDraft {
            title: "Weekend sale".into(),
            body: "Flat 20% off on treats".into(),
            image: None,
        }
    }

    #[test]
    fn test_one_platform_failing() {
        let transport = StubTransport::with(|req| {
            let status = if req.url.ends_with("/ios") { 500 } else { 200 };
            Ok(RawResponse {
                status,
                status_text: status_text(status).to_string(),
                body: json!({ "message": "APNs unavailable" }).to_string(),
            })
        });
        let client = ApiClient::new("https://api.petcaart.com", "ngrok-skip-browser-warning", transport.clone());
        let recipients = RecipientsByPlatform {
            android: vec!["a1".into(), "a2".into()],
            ios: vec!["i1".into()],
            skipped: 0,
        };

        let (report, failures) = block_on(dispatch_push(&client, &draft(), &recipients));
        assert!(report.is_success());
        assert_eq!(report.attempted, vec![Platform::Android, Platform::Ios]);
        assert_eq!(report.failed, vec![Platform::Ios]);
        assert_eq!(failures[0].message, "APNs unavailable");
        assert_eq!(
            report_message(&report, 0),
            "Notification sent to Android, failed for iOS"
        );

        let seen = transport.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].url, "https://api.petcaart.com/api/notification/android");
        match &seen[0].body {
            RequestBody::Json(body) => assert_eq!(body["tokens"], json!(["a1", "a2"])),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn test_empty_platform_skipped() {
        let transport = StubTransport::ok(json!({ "success": true }));
        let client = ApiClient::new("https://api.petcaart.com", "ngrok-skip-browser-warning", transport.clone());
        let recipients = RecipientsByPlatform {
            android: vec![],
            ios: vec!["i1".into()],
            skipped: 3,
        };

        let (report, failures) = block_on(dispatch_push(&client, &draft(), &recipients));
        assert_eq!(report.attempted, vec![Platform::Ios]);
        assert!(failures.is_empty());
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(
            report_message(&report, 3),
            "Notification sent to iOS (3 without a device skipped)"
        );
    }

    #[test]
    fn test_nothing_to_send() {
        let transport = StubTransport::ok(json!(null));
        let client = ApiClient::new("https://api.petcaart.com", "ngrok-skip-browser-warning", transport.clone());
        let (report, _) = block_on(dispatch_push(&client, &draft(), &RecipientsByPlatform::default()));
        assert!(!report.is_success());
        assert!(transport.requests().is_empty());
    }
}
