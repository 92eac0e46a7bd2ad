use kusari_cli::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock WorkspaceStore holding at most one selection, scoped like the real file
#[derive(Default, Clone)]
pub struct MockWorkspaceStore {
    selection: Arc<Mutex<Option<WorkspaceSelection>>>,
}

impl MockWorkspaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(selection: WorkspaceSelection) -> Self {
        Self {
            selection: Arc::new(Mutex::new(Some(selection))),
        }
    }

    pub fn saved(&self) -> Option<WorkspaceSelection> {
        self.selection.lock().unwrap().clone()
    }
}

impl WorkspaceStore for MockWorkspaceStore {
    fn load_workspace(
        &self,
        platform_url: &str,
        auth_endpoint: &str,
    ) -> Result<Option<WorkspaceSelection>> {
        Ok(self
            .saved()
            .filter(|s| s.matches_scope(platform_url, auth_endpoint)))
    }

    fn save_workspace(&self, selection: &WorkspaceSelection) -> Result<()> {
        *self.selection.lock().unwrap() = Some(selection.clone());
        Ok(())
    }

    fn clear_workspace(&self) -> Result<()> {
        *self.selection.lock().unwrap() = None;
        Ok(())
    }
}
