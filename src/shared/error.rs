use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - analysis passed, no blocked packages
    Success = 0,
    /// The analysis failed or a blocked package was found
    ChecksFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
    /// Interrupted by the user (Ctrl-C)
    Interrupted = 130,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ChecksFailed => write!(f, "Checks Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::Interrupted => write!(f, "Interrupted (130)"),
        }
    }
}

/// Authentication and credential errors.
///
/// All of these are fatal to the current command and carry remediation text.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The browser flow failed: provider error, state mismatch, missing code, timeout
    #[error("Authentication failed: {0}\n\n💡 Hint: Run `kusari auth login` again")]
    AuthFlow(String),

    #[error("Failed to access credential file: {path}\nDetails: {details}\n\n💡 Hint: Check permissions on the kusari state directory")]
    TokenStorage { path: PathBuf, details: String },

    #[error("Your session has expired\n\n💡 Hint: Run `kusari auth login` again")]
    TokenExpired,

    #[error("No valid credentials found: {0}\n\n💡 Hint: Run `kusari auth login` first")]
    InvalidToken(String),

    /// The platform refused the bearer token with 401 or 403
    #[error("The platform rejected your session (status {status})\n\n💡 Hint: Run `kusari auth login` again")]
    SessionRejected { status: u16 },

    #[error("Network error while authenticating: {0}\n\n💡 Hint: Check your internet connection")]
    Network(String),
}

/// Errors returned by presign and blob upload requests
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Upload failed: unauthorized (401)\n\n💡 Hint: Run `kusari auth login` again")]
    Unauthorized,

    #[error("Upload failed: forbidden (403), try logging in again")]
    Forbidden,

    #[error("Upload rejected (400): {body}")]
    BadRequest { body: String },

    #[error("Upload failed: unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Terminal outcomes of polling that are not success
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Analysis failed: {message}")]
    Failed { message: String },

    #[error("Timed out waiting for results after {attempts} attempt(s)\n\n💡 Hint: Results will be available later at {check_url}")]
    TimedOut { attempts: u32, check_url: String },
}

/// Input and repository validation errors
#[derive(Debug, Error)]
pub enum KusariError {
    #[error("Invalid directory: {path}\nReason: {reason}\n\n💡 Hint: Please specify a git repository directory")]
    InvalidDirectory { path: PathBuf, reason: String },

    #[error("{path} is not a git repository (no .git directory)\n\n💡 Hint: Run the command from the root of a git checkout")]
    NotGitRepository { path: PathBuf },

    #[error("Revision '{rev}' does not resolve to a commit\n\n💡 Hint: Use a branch name, tag or commit SHA that exists locally")]
    InvalidRevision { rev: String },

    #[error("No changes found between the working tree and '{rev}'\n\n💡 Hint: Make sure there are changes to analyze")]
    EmptyDiff { rev: String },

    #[error("Monorepo detected in {path}: {details}\n\n💡 Hint: Run the risk check on each sub-project individually")]
    MonorepoDetected { path: PathBuf, details: String },

    #[error("No workspace is available for this account\n\n💡 Hint: Log in via the console at {console_url} to create one")]
    NoWorkspace { console_url: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWrite { path: PathBuf, details: String },

    #[error("Git command failed: git {command}\nDetails: {details}")]
    GitCommand { command: String, details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ChecksFailed.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::ChecksFailed), "Checks Failed (1)");
    }

    #[test]
    fn test_auth_flow_display_carries_remediation() {
        let error = AuthError::AuthFlow("state mismatch".to_string());
        let display = error.to_string();
        assert!(display.contains("state mismatch"));
        assert!(display.contains("kusari auth login"));
    }

    #[test]
    fn test_token_storage_display() {
        let error = AuthError::TokenStorage {
            path: PathBuf::from("/home/u/.kusari/tokens.json"),
            details: "Permission denied".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("tokens.json"));
        assert!(display.contains("Permission denied"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_forbidden_message() {
        assert!(UploadError::Forbidden
            .to_string()
            .contains("try logging in again"));
    }

    #[test]
    fn test_session_rejected_suggests_login() {
        let display = AuthError::SessionRejected { status: 401 }.to_string();
        assert!(display.contains("status 401"));
        assert!(display.contains("kusari auth login"));
    }

    #[test]
    fn test_timed_out_mentions_check_url() {
        let error = PollError::TimedOut {
            attempts: 10,
            check_url: "https://console.example/result".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("10 attempt(s)"));
        assert!(display.contains("https://console.example/result"));
    }

    #[test]
    fn test_monorepo_display() {
        let error = KusariError::MonorepoDetected {
            path: PathBuf::from("/repo"),
            details: "2 projects".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Monorepo detected"));
        assert!(display.contains("sub-project"));
    }
}
