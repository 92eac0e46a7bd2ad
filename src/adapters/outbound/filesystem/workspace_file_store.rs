use crate::inspection::domain::WorkspaceSelection;
use crate::ports::outbound::WorkspaceStore;
use crate::shared::security::{ensure_private_dir, write_private_file};
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

const WORKSPACE_FILE_NAME: &str = "workspace.json";

/// WorkspaceFileStore adapter keeping the active selection in
/// `<state_dir>/workspace.json` as a single JSON object
pub struct WorkspaceFileStore {
    state_dir: PathBuf,
}

impl WorkspaceFileStore {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.state_dir.join(WORKSPACE_FILE_NAME)
    }
}

impl WorkspaceStore for WorkspaceFileStore {
    fn load_workspace(
        &self,
        platform_url: &str,
        auth_endpoint: &str,
    ) -> Result<Option<WorkspaceSelection>> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        // A selection that no longer parses is re-resolved rather than fatal
        let selection: WorkspaceSelection = match serde_json::from_str(&content) {
            Ok(selection) => selection,
            Err(e) => {
                tracing::warn!("ignoring unreadable workspace file {}: {e}", path.display());
                return Ok(None);
            }
        };

        if selection.matches_scope(platform_url, auth_endpoint) {
            Ok(Some(selection))
        } else {
            tracing::debug!(
                stored_platform = %selection.platform_url,
                "stored workspace belongs to a different platform"
            );
            Ok(None)
        }
    }

    fn save_workspace(&self, selection: &WorkspaceSelection) -> Result<()> {
        let path = self.path();
        ensure_private_dir(&self.state_dir)
            .with_context(|| format!("Failed to create {}", self.state_dir.display()))?;
        let json = serde_json::to_vec_pretty(selection)?;
        write_private_file(&path, &json)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn clear_workspace(&self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                Err(e).with_context(|| format!("Failed to remove {}", path.display()))
            }
            _ => Ok(()),
        }
    }
}
