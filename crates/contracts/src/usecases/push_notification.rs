//! Bulk push-notification dispatch to customer devices.
//!
//! The backend exposes one endpoint per platform, so recipients are split by
//! platform and each group is sent independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Ios];

    pub fn endpoint(&self) -> &'static str {
        match self {
            Platform::Android => "api/notification/android",
            Platform::Ios => "api/notification/ios",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "android" => Some(Platform::Android),
            "ios" | "iphone" | "apple" => Some(Platform::Ios),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "iOS"),
        }
    }
}

/// What the operator typed into the notification form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushDraft {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PushDraft {
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }
}

/// Body of `POST api/notification/{android,ios}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub tokens: Vec<String>,
}

impl PushRequest {
    pub fn new(draft: &PushDraft, tokens: Vec<String>) -> Self {
        Self {
            title: draft.title.trim().to_string(),
            body: draft.body.trim().to_string(),
            image: draft.image.clone().filter(|s| !s.trim().is_empty()),
            tokens,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientsByPlatform {
    pub android: Vec<String>,
    pub ios: Vec<String>,
    /// Rows without a device token or with an unknown platform.
    pub skipped: usize,
}

impl RecipientsByPlatform {
    pub fn tokens(&self, platform: Platform) -> &[String] {
        match platform {
            Platform::Android => &self.android,
            Platform::Ios => &self.ios,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.android.is_empty() && self.ios.is_empty()
    }
}

fn string_field<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| row.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// Splits customer rows by device platform. Duplicate tokens are sent once.
pub fn split_by_platform<'a>(rows: impl IntoIterator<Item = &'a Value>) -> RecipientsByPlatform {
    let mut out = RecipientsByPlatform::default();
    for row in rows {
        let token = string_field(row, &["fcmToken", "deviceToken"]);
        let platform = string_field(row, &["platform", "deviceType"]).and_then(Platform::parse);
        let (Some(token), Some(platform)) = (token, platform) else {
            out.skipped += 1;
            continue;
        };
        let bucket = match platform {
            Platform::Android => &mut out.android,
            Platform::Ios => &mut out.ios,
        };
        if !bucket.iter().any(|t| t == token) {
            bucket.push(token.to_string());
        }
    }
    out
}

/// Outcome of a dispatch across both platforms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: Vec<Platform>,
    pub failed: Vec<Platform>,
}

impl DispatchReport {
    /// At least one platform request went out.
    pub fn is_success(&self) -> bool {
        !self.attempted.is_empty()
    }

    pub fn delivered(&self) -> Vec<Platform> {
        self.attempted
            .iter()
            .copied()
            .filter(|p| !self.failed.contains(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_by_platform() {
        let rows = vec![
            json!({ "_id": "1", "fcmToken": "a1", "platform": "android" }),
            json!({ "_id": "2", "deviceToken": "i1", "deviceType": "iOS" }),
            json!({ "_id": "3", "fcmToken": "a1", "platform": "Android" }),
            json!({ "_id": "4", "platform": "android" }),
            json!({ "_id": "5", "fcmToken": "w1", "platform": "web" }),
        ];
        let split = split_by_platform(&rows);
        assert_eq!(split.android, vec!["a1".to_string()]);
        assert_eq!(split.ios, vec!["i1".to_string()]);
        assert_eq!(split.skipped, 2);
    }

    #[test]
    fn test_request_trims_draft() {
        let draft = PushDraft {
            title: " Sale ".into(),
            body: "50% off kibble".into(),
            image: Some("  ".into()),
        };
        assert!(draft.is_complete());
        let req = PushRequest::new(&draft, vec!["t".into()]);
        assert_eq!(req.title, "Sale");
        assert_eq!(req.image, None);
    }

    #[test]
    fn test_report_success_when_any_attempted() {
        let report = DispatchReport {
            attempted: vec![Platform::Android, Platform::Ios],
            failed: vec![Platform::Ios],
        };
        assert!(report.is_success());
        assert_eq!(report.delivered(), vec![Platform::Android]);
        assert!(!DispatchReport::default().is_success());
    }
}
