use serde::{Deserialize, Serialize};

/// Ingestion state of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestionStatus {
    #[serde(alias = "queued", alias = "pending")]
    Started,
    Processing,
    Success,
    Failed,
}

impl IngestionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, IngestionStatus::Success | IngestionStatus::Failed)
    }

    fn rank(self) -> u8 {
        match self {
            IngestionStatus::Started => 0,
            IngestionStatus::Processing => 1,
            IngestionStatus::Success | IngestionStatus::Failed => 2,
        }
    }
}

impl std::fmt::Display for IngestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            IngestionStatus::Started => "started",
            IngestionStatus::Processing => "processing",
            IngestionStatus::Success => "success",
            IngestionStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Latest known status of one document plus the user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionRecord {
    pub status: IngestionStatus,
    #[serde(default)]
    pub message: String,
}

impl IngestionRecord {
    pub fn started() -> Self {
        Self {
            status: IngestionStatus::Started,
            message: String::new(),
        }
    }

    /// Applies a newer observation, overwriting status and message.
    ///
    /// Returns `true` when the status value changed. Observations that would move
    /// the record backwards, or away from a terminal state, are ignored.
    pub fn observe(&mut self, status: IngestionStatus, message: String) -> bool {
        if self.status.is_terminal() || status.rank() < self.status.rank() {
            return false;
        }
        let changed = self.status != status;
        self.status = status;
        self.message = message;
        changed
    }
}
