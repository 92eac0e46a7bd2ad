use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Maximum size of a document accepted for upload (100 MB)
pub const MAX_UPLOAD_SIZE: u64 = 100 * 1024 * 1024;

/// Reads a document that is about to be uploaded to the platform
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected rather than its
/// target, and refuses anything that is not a regular file or exceeds
/// [`MAX_UPLOAD_SIZE`] before any bytes are read.
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist or its metadata cannot be read
/// - The path is a symbolic link or not a regular file
/// - The file is larger than the upload limit
pub fn read_upload_document(path: &Path) -> Result<Vec<u8>> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to read metadata for {}", path.display()))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, uploading symbolic links is not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_UPLOAD_SIZE)?;

    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Creates `dir` (and parents) and restricts it to the owner (0700 on Unix)
pub fn ensure_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Writes `contents` to `path` readable and writable by the owner only (0600 on Unix)
///
/// The data goes to a sibling temporary file first and is renamed into place,
/// so a reader never observes a half-written file.
pub fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    std::io::Write::write_all(&mut tmp, contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_read_upload_document_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("sbom.json");
        fs::write(&file_path, "{}").unwrap();

        let bytes = read_upload_document(&file_path).unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[test]
    fn test_read_upload_document_nonexistent() {
        let path = PathBuf::from("/nonexistent/sbom.json");
        assert!(read_upload_document(&path).is_err());
    }

    #[test]
    fn test_read_upload_document_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_upload_document(temp_dir.path());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_upload_document_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        let link = temp_dir.path().join("link.json");
        fs::write(&target, "{}").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = read_upload_document(&link);
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/file.txt");
        let result = validate_file_size(MAX_UPLOAD_SIZE + 1, &path, MAX_UPLOAD_SIZE);
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[cfg(unix)]
    #[test]
    fn test_private_dir_and_file_modes() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("state");
        ensure_private_dir(&dir).unwrap();
        let file = dir.join("tokens.json");
        write_private_file(&file, b"{}").unwrap();

        let dir_mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);
        assert_eq!(file_mode, 0o600);
        assert_eq!(fs::read(&file).unwrap(), b"{}");
    }
}
