use crate::inspection::domain::{
    BundleMetadata, ScanType, BUNDLE_FILE_NAME, METADATA_FILE_NAME, PATCH_FILE_NAME,
};
use crate::inspection::services::MonorepoDetector;
use crate::ports::outbound::{BundleEntry, BundleWriter, ProgressReporter, VersionControl};
use crate::shared::error::KusariError;
use crate::shared::Result;
use std::path::{Component, Path, PathBuf};

/// Working directory the CLI may leave inside a repository; never archived
pub const WORK_DIR_NAME: &str = "kusari-dir";

/// A packaged repository ready for upload
#[derive(Debug, Clone)]
pub struct Bundle {
    pub path: PathBuf,
    pub size: u64,
    pub metadata: BundleMetadata,
}

/// Checks that `dir` is an existing directory with a `.git` subdirectory and
/// returns its canonical path
pub fn validate_repository(dir: &Path) -> Result<PathBuf> {
    let canonical = dir
        .canonicalize()
        .map_err(|e| KusariError::InvalidDirectory {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
    if !canonical.is_dir() {
        return Err(KusariError::InvalidDirectory {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        }
        .into());
    }
    if !canonical.join(".git").exists() {
        return Err(KusariError::NotGitRepository { path: canonical }.into());
    }
    Ok(canonical)
}

/// Drops paths inside `.git` or the CLI working directory
fn is_archivable(path: &Path) -> bool {
    !path.components().any(|c| {
        matches!(c, Component::Normal(name) if name == ".git" || name == WORK_DIR_NAME)
    })
}

/// BuildBundleUseCase - turns a working copy into an upload-ready archive
///
/// # Type Parameters
/// * `V` - VersionControl implementation
/// * `W` - BundleWriter implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildBundleUseCase<V, W, PR> {
    vcs: V,
    writer: W,
    progress_reporter: PR,
}

impl<V, W, PR> BuildBundleUseCase<V, W, PR>
where
    V: VersionControl,
    W: BundleWriter,
    PR: ProgressReporter,
{
    pub fn new(vcs: V, writer: W, progress_reporter: PR) -> Self {
        Self {
            vcs,
            writer,
            progress_reporter,
        }
    }

    /// Packages `dir` into `<work_dir>/kusari-inspector.tar.bz2`.
    ///
    /// Diff scans need `rev`; they fail on an unknown revision or an empty
    /// diff. Full scans refuse monorepos.
    pub fn execute(
        &self,
        dir: &Path,
        rev: Option<&str>,
        scan_type: ScanType,
        work_dir: &Path,
    ) -> Result<Bundle> {
        let dir = validate_repository(dir)?;
        self.progress_reporter
            .report(&format!("📦 Packaging {}", dir.display()));

        let files: Vec<PathBuf> = self
            .vcs
            .list_files(&dir)?
            .into_iter()
            .filter(|p| is_archivable(p))
            .collect();

        let (patch, rev) = match scan_type {
            ScanType::Full => {
                let report = MonorepoDetector::analyze(&files);
                if report.is_monorepo() {
                    return Err(KusariError::MonorepoDetected {
                        path: dir,
                        details: report.describe(),
                    }
                    .into());
                }
                (None, None)
            }
            ScanType::Diff => {
                let rev = rev.ok_or_else(|| anyhow::anyhow!("A diff scan needs a revision"))?;
                self.vcs.verify_revision(&dir, rev)?;
                let patch = self.vcs.diff(&dir, rev)?;
                if patch.is_empty() {
                    return Err(KusariError::EmptyDiff {
                        rev: rev.to_string(),
                    }
                    .into());
                }
                (Some(patch), Some(rev.to_string()))
            }
        };

        let metadata = BundleMetadata {
            patch_name: patch.as_ref().map(|_| PATCH_FILE_NAME.to_string()),
            current_branch: self.vcs.current_branch(&dir)?,
            dir_name: dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            diff_cmd: rev.as_deref().map(BundleMetadata::diff_args),
            rev,
            remote: self.vcs.remote_url(&dir)?.unwrap_or_default(),
            git_dirty: self.vcs.is_dirty(&dir)?,
            scan_type,
        };
        let metadata_json = serde_json::to_vec_pretty(&metadata)?;

        let mut extras = vec![BundleEntry {
            name: METADATA_FILE_NAME,
            contents: &metadata_json,
        }];
        if let Some(patch) = &patch {
            extras.push(BundleEntry {
                name: PATCH_FILE_NAME,
                contents: patch,
            });
        }

        let path = work_dir.join(BUNDLE_FILE_NAME);
        let size = self.writer.write_bundle(&dir, &files, &extras, &path)?;
        tracing::debug!(files = files.len(), size, "bundle ready");
        self.progress_reporter.report(&format!(
            "✅ Packaged {} file(s) ({} bytes)",
            files.len(),
            size
        ));

        Ok(Bundle {
            path,
            size,
            metadata,
        })
    }
}
