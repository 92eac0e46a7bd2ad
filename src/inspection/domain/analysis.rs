use serde::{Deserialize, Serialize};

/// Status of a repository scan on the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    #[serde(alias = "started", alias = "pending")]
    Queued,
    Processing,
    Success,
    Failed,
}

impl ScanStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ScanStatus::Success | ScanStatus::Failed)
    }

    pub fn description(self) -> &'static str {
        match self {
            ScanStatus::Queued => "Waiting in queue...",
            ScanStatus::Processing => "Analyzing...",
            ScanStatus::Success => "Analysis complete",
            ScanStatus::Failed => "Analysis failed",
        }
    }
}

/// One finding reported by a diff analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Finding {
    pub title: String,
    pub severity: String,
    pub description: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

/// Result of a diff analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityAnalysis {
    pub recommendation: String,
    pub justification: String,
    pub findings: Vec<Finding>,
}

/// One section of a full-scan health report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthSection {
    pub name: String,
    pub score: Option<f64>,
    pub summary: String,
    pub items: Vec<String>,
}

/// Multi-section report produced by a full (risk-check) scan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthReport {
    pub overall_score: Option<f64>,
    pub summary: String,
    pub sections: Vec<HealthSection>,
}

/// A row of `GET /inspector/result/user?sortKey=...`
///
/// Several rows can exist for one sort key; the most recently updated wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResultRow {
    pub status: ScanStatus,
    #[serde(default)]
    pub status_meta: String,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub analysis: Option<SecurityAnalysis>,
    #[serde(default)]
    pub health_report: Option<HealthReport>,
}

impl ScanResultRow {
    pub fn latest(rows: Vec<ScanResultRow>) -> Option<ScanResultRow> {
        rows.into_iter().max_by_key(|row| row.updated_at)
    }
}
