use serde::{Deserialize, Serialize};

/// A named block of the storefront home page (or another configurable page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSection {
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub position: u32,
    #[serde(default = "default_visible", rename = "isVisible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// Body of `GET api/page-config/:page`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default)]
    pub page: String,
    #[serde(default)]
    pub sections: Vec<PageSection>,
}

/// Single entry of the save payload: only the order is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPosition {
    pub key: String,
    pub position: u32,
}

/// Body of `PATCH api/page-config/:page`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveLayoutRequest {
    pub sections: Vec<SectionPosition>,
}

impl SaveLayoutRequest {
    pub fn from_sections(sections: &[PageSection]) -> Self {
        Self {
            sections: sections
                .iter()
                .map(|s| SectionPosition {
                    key: s.key.clone(),
                    position: s.position,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_defaults() {
        let layout: PageLayout =
            serde_json::from_str(r#"{"sections":[{"key":"hero","position":2}]}"#).unwrap();
        assert_eq!(layout.page, "");
        assert!(layout.sections[0].visible);
        assert_eq!(layout.sections[0].title, "");
    }

    #[test]
    fn test_save_request_keeps_only_order() {
        let sections = vec![PageSection {
            key: "brands".into(),
            title: "Top brands".into(),
            position: 1,
            visible: false,
        }];
        let json = serde_json::to_value(SaveLayoutRequest::from_sections(&sections)).unwrap();
        assert_eq!(json, serde_json::json!({ "sections": [{ "key": "brands", "position": 1 }] }));
    }
}
