use crate::ports::outbound::{BundleEntry, BundleWriter};
use crate::shared::Result;
use anyhow::Context;
use bzip2::write::BzEncoder;
use bzip2::Compression;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// TarBz2Writer adapter writing a tar archive through a bzip2 encoder
///
/// Symlinks are dereferenced so the archive carries file contents. Listed
/// paths that vanished or are not regular files are skipped.
pub struct TarBz2Writer;

impl TarBz2Writer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TarBz2Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleWriter for TarBz2Writer {
    fn write_bundle(
        &self,
        root: &Path,
        files: &[PathBuf],
        extras: &[BundleEntry<'_>],
        destination: &Path,
    ) -> Result<u64> {
        let file = File::create(destination)
            .with_context(|| format!("Failed to create {}", destination.display()))?;
        let mut builder = tar::Builder::new(BzEncoder::new(file, Compression::default()));
        builder.follow_symlinks(true);

        let mut archived = 0usize;
        for relative in files {
            let full_path = root.join(relative);
            match fs::metadata(&full_path) {
                Ok(metadata) if metadata.is_file() => {}
                _ => {
                    tracing::debug!(path = %relative.display(), "skipping non-file entry");
                    continue;
                }
            }
            builder
                .append_path_with_name(&full_path, relative)
                .with_context(|| format!("Failed to archive {}", relative.display()))?;
            archived += 1;
        }

        for extra in extras {
            let mut header = tar::Header::new_gnu();
            header.set_size(extra.contents.len() as u64);
            header.set_mode(0o644);
            header.set_mtime(chrono::Utc::now().timestamp().max(0) as u64);
            header.set_cksum();
            builder
                .append_data(&mut header, extra.name, extra.contents)
                .with_context(|| format!("Failed to archive {}", extra.name))?;
        }

        builder.into_inner()?.finish()?;
        let size = fs::metadata(destination)?.len();
        tracing::debug!(archived, extras = extras.len(), size, "bundle written");
        Ok(size)
    }
}
