/// Filesystem adapters for local state and output files
mod credential_file_store;
mod file_writer;
mod workspace_file_store;

pub use credential_file_store::CredentialFileStore;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use workspace_file_store::WorkspaceFileStore;
