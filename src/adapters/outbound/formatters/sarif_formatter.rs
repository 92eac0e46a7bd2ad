use crate::inspection::domain::{Finding, ScanResultRow};
use crate::ports::outbound::AnalysisFormatter;
use crate::shared::Result;
use serde::Serialize;

const SARIF_SCHEMA: &str = "https://json.schemastore.org/sarif-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

#[derive(Debug, Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Debug, Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct Tool {
    driver: Driver,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Driver {
    name: &'static str,
    version: &'static str,
    information_uri: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: &'static str,
    message: Message,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<Location>,
}

#[derive(Debug, Serialize)]
struct Message {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<Region>,
}

#[derive(Debug, Serialize)]
struct ArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    start_line: u32,
}

/// SarifFormatter adapter rendering diff-scan findings as a SARIF 2.1.0 log
pub struct SarifFormatter;

impl SarifFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Maps free-form severities onto SARIF result levels
    fn level(severity: &str) -> &'static str {
        match severity.to_ascii_lowercase().as_str() {
            "critical" | "high" | "error" => "error",
            "medium" | "moderate" | "warning" => "warning",
            _ => "note",
        }
    }

    fn rule_id(title: &str) -> String {
        let id: String = title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        let id = id.trim_matches('-').to_string();
        if id.is_empty() {
            "kusari-finding".to_string()
        } else {
            id
        }
    }

    fn to_result(finding: &Finding) -> SarifResult {
        let text = if finding.description.is_empty() {
            finding.title.clone()
        } else {
            format!("{}: {}", finding.title, finding.description)
        };
        let locations = finding
            .file
            .iter()
            .map(|file| Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation { uri: file.clone() },
                    region: finding.line.map(|start_line| Region { start_line }),
                },
            })
            .collect();

        SarifResult {
            rule_id: Self::rule_id(&finding.title),
            level: Self::level(&finding.severity),
            message: Message { text },
            locations,
        }
    }
}

impl Default for SarifFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisFormatter for SarifFormatter {
    fn format(&self, row: &ScanResultRow) -> Result<String> {
        let analysis = row
            .analysis
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Scan result contains no findings to render as SARIF"))?;

        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: Driver {
                        name: "kusari-inspector",
                        version: env!("CARGO_PKG_VERSION"),
                        information_uri: "https://www.kusari.dev",
                    },
                },
                results: analysis.findings.iter().map(Self::to_result).collect(),
            }],
        };
        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::domain::{ScanStatus, SecurityAnalysis};

    fn row_with(findings: Vec<Finding>) -> ScanResultRow {
        ScanResultRow {
            status: ScanStatus::Success,
            status_meta: String::new(),
            updated_at: 1,
            analysis: Some(SecurityAnalysis {
                recommendation: "Needs review".to_string(),
                justification: String::new(),
                findings,
            }),
            health_report: None,
        }
    }

    #[test]
    fn test_sarif_structure() {
        let output = SarifFormatter::new()
            .format(&row_with(vec![Finding {
                title: "SQL Injection".to_string(),
                severity: "High".to_string(),
                description: "Unsanitized input".to_string(),
                file: Some("src/db.rs".to_string()),
                line: Some(42),
            }]))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["version"], "2.1.0");
        let result = &json["runs"][0]["results"][0];
        assert_eq!(result["ruleId"], "sql-injection");
        assert_eq!(result["level"], "error");
        assert_eq!(result["message"]["text"], "SQL Injection: Unsanitized input");
        let location = &result["locations"][0]["physicalLocation"];
        assert_eq!(location["artifactLocation"]["uri"], "src/db.rs");
        assert_eq!(location["region"]["startLine"], 42);
    }

    #[test]
    fn test_finding_without_file_has_no_locations() {
        let output = SarifFormatter::new()
            .format(&row_with(vec![Finding {
                title: "Note".to_string(),
                severity: "low".to_string(),
                ..Default::default()
            }]))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let result = &json["runs"][0]["results"][0];
        assert_eq!(result["level"], "note");
        assert!(result.get("locations").is_none());
    }

    #[test]
    fn test_levels() {
        assert_eq!(SarifFormatter::level("CRITICAL"), "error");
        assert_eq!(SarifFormatter::level("medium"), "warning");
        assert_eq!(SarifFormatter::level("info"), "note");
    }

    #[test]
    fn test_missing_analysis_is_error() {
        let mut row = row_with(Vec::new());
        row.analysis = None;
        assert!(SarifFormatter::new().format(&row).is_err());
    }
}
