use crate::inspection::domain::Token;
use crate::ports::outbound::CredentialStore;
use crate::shared::error::AuthError;
use crate::shared::security::{ensure_private_dir, write_private_file};
use crate::shared::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const TOKENS_FILE_NAME: &str = "tokens.json";
const UNREADABLE_SUFFIX: &str = "unreadable";

/// CredentialFileStore adapter keeping tokens in `<state_dir>/tokens.json`
///
/// The file holds a JSON object mapping provider name to token. The directory
/// is created with mode 0700 and the file written with mode 0600. A file that
/// cannot be parsed is moved to `tokens.json.unreadable` before a save
/// replaces it.
///
/// Saving is a read-modify-write of the whole map and is not locked against
/// other `kusari` processes writing at the same time.
pub struct CredentialFileStore {
    state_dir: PathBuf,
}

impl CredentialFileStore {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.state_dir.join(TOKENS_FILE_NAME)
    }

    fn storage_error(path: &Path, details: impl ToString) -> anyhow::Error {
        AuthError::TokenStorage {
            path: path.to_path_buf(),
            details: details.to_string(),
        }
        .into()
    }

    fn read_all(&self) -> Result<BTreeMap<String, Token>> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(Self::storage_error(&path, e)),
        };
        serde_json::from_str(&content).map_err(|e| {
            AuthError::InvalidToken(format!("{} is not valid: {}", path.display(), e)).into()
        })
    }

    /// Moves an unparsable token file out of the way so its contents survive the next save
    fn set_aside_unreadable(&self) -> Result<PathBuf> {
        let path = self.path();
        let backup = path.with_extension(format!("json.{UNREADABLE_SUFFIX}"));
        fs::rename(&path, &backup).map_err(|e| Self::storage_error(&path, e))?;
        Ok(backup)
    }
}

impl CredentialStore for CredentialFileStore {
    fn save_token(&self, token: &Token, provider: &str) -> Result<()> {
        let path = self.path();
        ensure_private_dir(&self.state_dir).map_err(|e| Self::storage_error(&path, e))?;

        let mut tokens = match self.read_all() {
            Ok(tokens) => tokens,
            Err(e) if matches!(e.downcast_ref::<AuthError>(), Some(AuthError::InvalidToken(_))) => {
                let backup = self.set_aside_unreadable()?;
                tracing::warn!(
                    backup = %backup.display(),
                    "token store was unreadable and has been set aside: {e}"
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        tokens.insert(provider.to_string(), token.clone());

        let json = serde_json::to_vec_pretty(&tokens)?;
        write_private_file(&path, &json).map_err(|e| Self::storage_error(&path, e))?;
        tracing::debug!(provider, path = %path.display(), "token saved");
        Ok(())
    }

    fn load_token(&self, provider: &str) -> Result<Option<Token>> {
        Ok(self.read_all()?.remove(provider))
    }

    fn clear_tokens(&self) -> Result<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::storage_error(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn token(value: &str) -> Token {
        Token::new(value.to_string(), Some("refresh".to_string()), None)
    }

    #[test]
    fn test_load_from_missing_store_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialFileStore::new(temp_dir.path().join("state"));
        assert!(store.load_token("kusari").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialFileStore::new(temp_dir.path().join("state"));
        store.save_token(&token("abc"), "kusari").unwrap();

        assert_eq!(store.load_token("kusari").unwrap(), Some(token("abc")));
        assert!(store.load_token("other").unwrap().is_none());
    }

    #[test]
    fn test_save_keeps_other_providers() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialFileStore::new(temp_dir.path().to_path_buf());
        store.save_token(&token("one"), "first").unwrap();
        store.save_token(&token("two"), "second").unwrap();
        store.save_token(&token("three"), "first").unwrap();

        assert_eq!(store.load_token("first").unwrap(), Some(token("three")));
        assert_eq!(store.load_token("second").unwrap(), Some(token("two")));
    }

    #[test]
    fn test_clear_tokens() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialFileStore::new(temp_dir.path().to_path_buf());
        store.save_token(&token("abc"), "kusari").unwrap();
        store.clear_tokens().unwrap();
        assert!(store.load_token("kusari").unwrap().is_none());
        // clearing twice is fine
        store.clear_tokens().unwrap();
    }

    #[test]
    fn test_corrupt_store_is_invalid_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialFileStore::new(temp_dir.path().to_path_buf());
        fs::write(store.path(), "not json").unwrap();

        let err = store.load_token("kusari").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_save_sets_aside_unreadable_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialFileStore::new(temp_dir.path().to_path_buf());
        fs::write(store.path(), r#"{"other": {"access_token": "keep-me""#).unwrap();

        store.save_token(&token("abc"), "kusari").unwrap();

        assert_eq!(store.load_token("kusari").unwrap(), Some(token("abc")));
        let backup = temp_dir.path().join("tokens.json.unreadable");
        assert_eq!(
            fs::read_to_string(backup).unwrap(),
            r#"{"other": {"access_token": "keep-me""#
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_save_fails_when_store_cannot_be_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialFileStore::new(temp_dir.path().to_path_buf());
        store.save_token(&token("one"), "first").unwrap();
        // A directory in place of the file reads as an I/O error, not a parse error
        fs::remove_file(store.path()).unwrap();
        fs::create_dir(store.path()).unwrap();

        let err = store.save_token(&token("two"), "second").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::TokenStorage { .. })
        ));
        assert!(!temp_dir.path().join("tokens.json.unreadable").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_store_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join("state");
        let store = CredentialFileStore::new(state_dir.clone());
        store.save_token(&token("abc"), "kusari").unwrap();

        let dir_mode = fs::metadata(&state_dir).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode, 0o700);
        assert_eq!(file_mode, 0o600);
    }
}
