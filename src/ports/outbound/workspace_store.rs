use crate::inspection::domain::WorkspaceSelection;
use crate::shared::Result;

/// WorkspaceStore port for the single active workspace selection
pub trait WorkspaceStore: Send + Sync {
    /// Loads the stored selection if it was made against the same
    /// `(platform_url, auth_endpoint)` pair; anything else reads as `None`
    fn load_workspace(
        &self,
        platform_url: &str,
        auth_endpoint: &str,
    ) -> Result<Option<WorkspaceSelection>>;

    /// Replaces the stored selection
    fn save_workspace(&self, selection: &WorkspaceSelection) -> Result<()>;

    /// Forgets the stored selection
    fn clear_workspace(&self) -> Result<()>;
}
