use serde::{Deserialize, Serialize};

/// A résumé as read from the input JSON.
///
/// Field names match the JSON keys and are exposed to templates unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub contact_info: Vec<ContactInfo>,
    /// Kept in input order. `Section::id` never reorders them.
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Text,
    Email,
    Link,
}

impl ContactKind {
    pub const ALL: [&'static str; 3] = ["text", "email", "link"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
    pub content: Vec<ContentItem>,
}

/// One entry within a section: a job, a degree, a project.
///
/// Optional fields are omitted from the template context entirely when absent,
/// so `{% if item.period %}` is false rather than rendering a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<String>>,
}

impl Resume {
    pub fn content_item_count(&self) -> usize {
        self.sections.iter().map(|s| s.content.len()).sum()
    }
}
