use crate::shared::Result;
use std::path::{Path, PathBuf};

/// VersionControl port for querying a local working copy
pub trait VersionControl {
    /// Tracked files plus untracked files not excluded by ignore rules,
    /// relative to `dir`, sorted and de-duplicated
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Fails with `InvalidRevision` unless `rev` names a commit
    fn verify_revision(&self, dir: &Path, rev: &str) -> Result<()>;

    /// Binary-safe patch of the working tree against `rev`
    fn diff(&self, dir: &Path, rev: &str) -> Result<Vec<u8>>;

    fn current_branch(&self, dir: &Path) -> Result<String>;

    /// URL of the `origin` remote, `None` when it is not configured
    fn remote_url(&self, dir: &Path) -> Result<Option<String>>;

    /// Whether the working tree has uncommitted changes
    fn is_dirty(&self, dir: &Path) -> Result<bool>;
}
