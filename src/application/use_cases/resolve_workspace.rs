use crate::inspection::domain::WorkspaceSelection;
use crate::ports::outbound::{ProgressReporter, UserDirectory, WorkspacePrompt, WorkspaceStore};
use crate::shared::error::KusariError;
use crate::shared::Result;

/// Platform coordinates a selection is scoped to
#[derive(Debug, Clone)]
pub struct PlatformScope<'a> {
    pub platform_url: &'a str,
    pub auth_endpoint: &'a str,
    pub console_url: &'a str,
}

/// ResolveWorkspaceUseCase - decides which workspace and tenant a command uses
pub struct ResolveWorkspaceUseCase<S, D, P, PR> {
    store: S,
    directory: D,
    prompt: P,
    progress_reporter: PR,
}

impl<S, D, P, PR> ResolveWorkspaceUseCase<S, D, P, PR>
where
    S: WorkspaceStore,
    D: UserDirectory,
    P: WorkspacePrompt,
    PR: ProgressReporter,
{
    pub fn new(store: S, directory: D, prompt: P, progress_reporter: PR) -> Self {
        Self {
            store,
            directory,
            prompt,
            progress_reporter,
        }
    }

    /// Reuses the stored selection for `scope`, otherwise fetches the user's
    /// workspaces and picks one. The result is always persisted.
    ///
    /// One candidate is taken as is; `non_interactive` sessions take the first
    /// candidate; everyone else is prompted.
    pub async fn execute(
        &self,
        scope: &PlatformScope<'_>,
        non_interactive: bool,
    ) -> Result<WorkspaceSelection> {
        if let Some(selection) = self
            .store
            .load_workspace(scope.platform_url, scope.auth_endpoint)?
        {
            tracing::debug!(workspace = %selection.id, tenant = %selection.tenant, "using stored workspace");
            return Ok(selection);
        }

        let mut candidates = self.directory.fetch_user_info().await?.candidates();
        if candidates.is_empty() {
            return Err(KusariError::NoWorkspace {
                console_url: scope.console_url.to_string(),
            }
            .into());
        }

        let index = if candidates.len() == 1 || non_interactive {
            0
        } else {
            self.prompt.choose(&candidates).await?
        };
        if index >= candidates.len() {
            anyhow::bail!("Workspace selection {} is out of range", index + 1);
        }
        let chosen = candidates.swap_remove(index);
        self.progress_reporter
            .report(&format!("🏢 Using workspace {}", chosen));

        let selection =
            WorkspaceSelection::from_candidate(chosen, scope.platform_url, scope.auth_endpoint);
        self.store.save_workspace(&selection)?;
        Ok(selection)
    }
}
