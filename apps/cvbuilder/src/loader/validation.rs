//! Schema validation over the raw JSON document.
//!
//! Runs before typed deserialization so every problem is reported with a
//! path into the document (`sections[1].content[0].name`) instead of serde's
//! first-failure message. All issues are collected; nothing short-circuits.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::ContactKind;

const CONTENT_ITEM_KEYS: &[&str] = &["name", "period", "title", "bullets"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Paths of every offending field, in document order.
    #[cfg(test)]
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }

    fn push(&mut self, path: &str, reason: impl Into<String>) {
        self.issues.push(FieldIssue {
            path: path.to_string(),
            reason: reason.into(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}: {}", issue.path, issue.reason)?;
        }
        Ok(())
    }
}

/// Validates a parsed résumé document, collecting every violation.
///
/// Required: `name` (non-empty string), `contact_info` (array of
/// `{type, info}`), `sections` (array of `{id, label, content}`).
/// Optional: `summary` (string). Content items accept only `name`,
/// `period`, `title` and `bullets`.
pub fn validate_document(doc: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(root) = doc.as_object() else {
        report.push("$", format!("expected an object, found {}", type_name(doc)));
        return report;
    };

    if let Some(name) = required(root, "name", "name", &mut report) {
        check_string(name, "name", true, &mut report);
    }

    if let Some(summary) = root.get("summary") {
        check_string(summary, "summary", false, &mut report);
    }

    if let Some(contacts) = required(root, "contact_info", "contact_info", &mut report) {
        for_each_object(contacts, "contact_info", &mut report, validate_contact);
    }

    if let Some(sections) = required(root, "sections", "sections", &mut report) {
        for_each_object(sections, "sections", &mut report, validate_section);
    }

    report
}

fn validate_contact(obj: &Map<String, Value>, path: &str, report: &mut ValidationReport) {
    let kind_path = format!("{path}.type");
    if let Some(kind) = required(obj, "type", &kind_path, report) {
        match kind.as_str() {
            Some(s) if ContactKind::ALL.contains(&s) => {}
            Some(s) => report.push(
                &kind_path,
                format!("'{s}' is not one of {}", ContactKind::ALL.join(", ")),
            ),
            None => report.push(
                &kind_path,
                format!("expected a string, found {}", type_name(kind)),
            ),
        }
    }

    let info_path = format!("{path}.info");
    if let Some(info) = required(obj, "info", &info_path, report) {
        check_string(info, &info_path, true, report);
    }
}

fn validate_section(obj: &Map<String, Value>, path: &str, report: &mut ValidationReport) {
    let id_path = format!("{path}.id");
    if let Some(id) = required(obj, "id", &id_path, report) {
        check_string(id, &id_path, false, report);
    }

    let label_path = format!("{path}.label");
    if let Some(label) = required(obj, "label", &label_path, report) {
        check_string(label, &label_path, true, report);
    }

    let content_path = format!("{path}.content");
    if let Some(content) = required(obj, "content", &content_path, report) {
        for_each_object(content, &content_path, report, validate_content_item);
    }
}

fn validate_content_item(obj: &Map<String, Value>, path: &str, report: &mut ValidationReport) {
    let name_path = format!("{path}.name");
    if let Some(name) = required(obj, "name", &name_path, report) {
        check_string(name, &name_path, true, report);
    }

    for key in ["period", "title"] {
        if let Some(v) = obj.get(key) {
            check_string(v, &format!("{path}.{key}"), false, report);
        }
    }

    if let Some(bullets) = obj.get("bullets") {
        let bullets_path = format!("{path}.bullets");
        match bullets.as_array() {
            Some(items) => {
                for (i, b) in items.iter().enumerate() {
                    check_string(b, &format!("{bullets_path}[{i}]"), false, report);
                }
            }
            None => report.push(
                &bullets_path,
                format!("expected an array, found {}", type_name(bullets)),
            ),
        }
    }

    for key in obj.keys() {
        if !CONTENT_ITEM_KEYS.contains(&key.as_str()) {
            report.push(&format!("{path}.{key}"), "unknown field");
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
    report: &mut ValidationReport,
) -> Option<&'a Value> {
    let value = obj.get(key);
    if value.is_none() {
        report.push(path, "required field is missing");
    }
    value
}

fn check_string(value: &Value, path: &str, non_empty: bool, report: &mut ValidationReport) {
    match value.as_str() {
        Some(s) if non_empty && s.is_empty() => report.push(path, "must not be empty"),
        Some(_) => {}
        None => report.push(path, format!("expected a string, found {}", type_name(value))),
    }
}

/// Checks `value` is an array of objects and runs `check` on each element.
fn for_each_object(
    value: &Value,
    path: &str,
    report: &mut ValidationReport,
    check: fn(&Map<String, Value>, &str, &mut ValidationReport),
) {
    let Some(items) = value.as_array() else {
        report.push(path, format!("expected an array, found {}", type_name(value)));
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let item_path = format!("{path}[{i}]");
        match item.as_object() {
            Some(obj) => check(obj, &item_path, report),
            None => report.push(
                &item_path,
                format!("expected an object, found {}", type_name(item)),
            ),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
