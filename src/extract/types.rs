//! Extraction result types
//!
//! Response shapes mirror the JSON contract of the original service,
//! including its camelCase field names.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One metadata entry, reduced from the richer pdffigures2 sidecar object.
///
/// Exactly these three fields survive the reduction; a field missing from
/// the sidecar is serialized as null rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureMetadata {
    pub name: Option<String>,
    pub caption: Option<String>,
    #[serde(rename = "renderURL")]
    pub render_url: Option<String>,
}

/// Successful single-PDF extraction
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub success: bool,
    #[serde(rename = "totalFigures")]
    pub total_figures: usize,
    pub figures: Vec<String>,
    pub metadata: Vec<FigureMetadata>,
    pub message: String,
}

/// Successful directory batch run. Unlike the single-file path, no output
/// enumeration or metadata reduction happens here.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub success: bool,
    pub message: String,
}

/// Successful visualization run
#[derive(Debug, Clone, Serialize)]
pub struct VisualizationReport {
    pub success: bool,
    pub message: String,
    pub output: String,
}

/// Reduce raw sidecar objects to the three public fields, preserving order
/// and dropping everything else.
pub fn reduce_metadata(raw: &[Value]) -> Vec<FigureMetadata> {
    raw.iter()
        .map(|item| FigureMetadata {
            name: string_field(item, "name"),
            caption: string_field(item, "caption"),
            render_url: string_field(item, "renderURL"),
        })
        .collect()
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reduction_keeps_order_and_drops_extra_fields() {
        let raw = vec![
            json!({
                "name": "Figure 2",
                "caption": "Second",
                "renderURL": "/out/figures/paper-Figure2-1.png",
                "regionBoundary": {"x1": 0, "y1": 0},
                "page": 3,
            }),
            json!({
                "name": "Figure 1",
                "caption": "First",
                "renderURL": "/out/figures/paper-Figure1-1.png",
                "figType": "Figure",
            }),
        ];

        let reduced = reduce_metadata(&raw);
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].name.as_deref(), Some("Figure 2"));
        assert_eq!(reduced[1].name.as_deref(), Some("Figure 1"));

        let serialized = serde_json::to_value(&reduced[0]).unwrap();
        assert_eq!(
            serialized.as_object().unwrap().keys().collect::<Vec<_>>(),
            vec!["name", "caption", "renderURL"]
        );
    }

    #[test]
    fn missing_fields_become_null_not_errors() {
        let raw = vec![json!({"caption": "orphan caption"})];
        let reduced = reduce_metadata(&raw);

        assert_eq!(reduced[0].name, None);
        assert_eq!(reduced[0].caption.as_deref(), Some("orphan caption"));
        assert_eq!(reduced[0].render_url, None);

        let serialized = serde_json::to_value(&reduced[0]).unwrap();
        assert!(serialized["name"].is_null());
        assert!(serialized["renderURL"].is_null());
    }

    #[test]
    fn report_serializes_with_camel_case_contract() {
        let report = ExtractionReport {
            success: true,
            total_figures: 1,
            figures: vec!["paper-Figure1-1.png".into()],
            metadata: vec![],
            message: "Figures extracted successfully.".into(),
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["totalFigures"], 1);
        assert_eq!(value["success"], true);
    }
}
