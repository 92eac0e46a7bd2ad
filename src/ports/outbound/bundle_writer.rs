use crate::shared::Result;
use std::path::{Path, PathBuf};

/// An in-memory file appended to a bundle after the repository files
pub struct BundleEntry<'a> {
    pub name: &'a str,
    pub contents: &'a [u8],
}

/// BundleWriter port for producing the compressed upload archive
pub trait BundleWriter {
    /// Archives `files` (relative to `root`) followed by `extras` into
    /// `destination` and returns the size of the written archive in bytes
    fn write_bundle(
        &self,
        root: &Path,
        files: &[PathBuf],
        extras: &[BundleEntry<'_>],
        destination: &Path,
    ) -> Result<u64>;
}
