use crate::ports::outbound::VersionControl;
use crate::shared::error::KusariError;
use crate::shared::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// GitCli adapter running `git -C <dir> ...` subprocesses
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    fn output(&self, dir: &Path, args: &[&str]) -> Result<Output> {
        tracing::debug!(dir = %dir.display(), "git {}", args.join(" "));
        Command::new(&self.program)
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .map_err(|e| {
                KusariError::GitCommand {
                    command: args.join(" "),
                    details: e.to_string(),
                }
                .into()
            })
    }

    /// Runs git and returns stdout, failing on a non-zero exit status
    fn run(&self, dir: &Path, args: &[&str]) -> Result<Vec<u8>> {
        let output = self.output(dir, args)?;
        if !output.status.success() {
            return Err(KusariError::GitCommand {
                command: args.join(" "),
                details: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(output.stdout)
    }

    fn run_text(&self, dir: &Path, args: &[&str]) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.run(dir, args)?).trim().to_string())
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

fn split_nul(stdout: &[u8]) -> impl Iterator<Item = PathBuf> + '_ {
    stdout
        .split(|b| *b == 0)
        .filter(|entry| !entry.is_empty())
        .map(|entry| PathBuf::from(String::from_utf8_lossy(entry).into_owned()))
}

impl VersionControl for GitCli {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let tracked = self.run(dir, &["ls-files", "-z"])?;
        let untracked = self.run(dir, &["ls-files", "-z", "--others", "--exclude-standard"])?;

        let files: BTreeSet<PathBuf> = split_nul(&tracked).chain(split_nul(&untracked)).collect();
        Ok(files.into_iter().collect())
    }

    fn verify_revision(&self, dir: &Path, rev: &str) -> Result<()> {
        let spec = format!("{rev}^{{commit}}");
        let output = self.output(dir, &["rev-parse", "--verify", "--quiet", &spec])?;
        if output.status.success() {
            Ok(())
        } else {
            Err(KusariError::InvalidRevision {
                rev: rev.to_string(),
            }
            .into())
        }
    }

    fn diff(&self, dir: &Path, rev: &str) -> Result<Vec<u8>> {
        self.run(dir, &["diff", "--binary", rev])
    }

    fn current_branch(&self, dir: &Path) -> Result<String> {
        self.run_text(dir, &["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn remote_url(&self, dir: &Path) -> Result<Option<String>> {
        // exits 1 when the key is unset
        let output = self.output(dir, &["config", "--get", "remote.origin.url"])?;
        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(url).filter(|u| output.status.success() && !u.is_empty()))
    }

    fn is_dirty(&self, dir: &Path) -> Result<bool> {
        Ok(!self.run(dir, &["status", "--porcelain"])?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    fn init_repo() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        git(dir, &["init", "-q", "-b", "main"]);
        git(dir, &["config", "user.email", "dev@example.com"]);
        git(dir, &["config", "user.name", "Dev"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        fs::write(dir.join(".gitignore"), "*.log\n").unwrap();
        fs::write(dir.join("main.rs"), "fn main() {}\n").unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "-q", "-m", "initial"]);
        temp_dir
    }

    #[test]
    fn test_list_files_respects_ignore_rules() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        fs::write(repo.path().join("debug.log"), "noise").unwrap();
        fs::write(repo.path().join("new.rs"), "// new").unwrap();

        let files = GitCli::new().list_files(repo.path()).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from(".gitignore"),
                PathBuf::from("main.rs"),
                PathBuf::from("new.rs")
            ]
        );
    }

    #[test]
    fn test_verify_revision() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let cli = GitCli::new();
        assert!(cli.verify_revision(repo.path(), "HEAD").is_ok());

        let err = cli.verify_revision(repo.path(), "no-such-branch").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<KusariError>(),
            Some(KusariError::InvalidRevision { .. })
        ));
    }

    #[test]
    fn test_diff_and_dirty_state() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let cli = GitCli::new();
        assert!(!cli.is_dirty(repo.path()).unwrap());
        assert!(cli.diff(repo.path(), "HEAD").unwrap().is_empty());

        fs::write(repo.path().join("main.rs"), "fn main() { println!(); }\n").unwrap();
        assert!(cli.is_dirty(repo.path()).unwrap());
        let patch = String::from_utf8(cli.diff(repo.path(), "HEAD").unwrap()).unwrap();
        assert!(patch.contains("println"));
    }

    #[test]
    fn test_branch_and_missing_remote() {
        if !git_available() {
            return;
        }
        let repo = init_repo();
        let cli = GitCli::new();
        assert_eq!(cli.current_branch(repo.path()).unwrap(), "main");
        assert_eq!(cli.remote_url(repo.path()).unwrap(), None);

        git(
            repo.path(),
            &["remote", "add", "origin", "https://example.com/repo.git"],
        );
        assert_eq!(
            cli.remote_url(repo.path()).unwrap(),
            Some("https://example.com/repo.git".to_string())
        );
    }
}
