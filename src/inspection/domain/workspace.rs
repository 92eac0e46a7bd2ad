use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A workspace as returned by the platform's user-info endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    #[serde(default)]
    pub description: String,
}

/// Response body of `GET {platformUrl}/user`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
    #[serde(default)]
    pub workspace_tenants: HashMap<String, Vec<String>>,
}

/// One selectable (workspace, tenant) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceCandidate {
    pub workspace: Workspace,
    pub tenant: String,
}

impl std::fmt::Display for WorkspaceCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.workspace.description.is_empty() {
            write!(f, "{} (tenant: {})", self.workspace.id, self.tenant)
        } else {
            write!(
                f,
                "{} (tenant: {})",
                self.workspace.description, self.tenant
            )
        }
    }
}

impl UserInfo {
    /// Flattens workspaces and their tenants into selectable pairs, keeping the
    /// order in which the platform listed the workspaces.
    ///
    /// Workspaces without any tenant cannot be routed to and are skipped.
    pub fn candidates(&self) -> Vec<WorkspaceCandidate> {
        self.workspaces
            .iter()
            .flat_map(|workspace| {
                self.workspace_tenants
                    .get(&workspace.id)
                    .into_iter()
                    .flatten()
                    .map(move |tenant| WorkspaceCandidate {
                        workspace: workspace.clone(),
                        tenant: tenant.clone(),
                    })
            })
            .collect()
    }
}

/// The workspace/tenant the CLI currently operates against
///
/// Scoped by `(platform_url, auth_endpoint)`: a stored selection made against
/// a different platform is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSelection {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub tenant: String,
    pub platform_url: String,
    pub auth_endpoint: String,
}

impl WorkspaceSelection {
    pub fn from_candidate(
        candidate: WorkspaceCandidate,
        platform_url: &str,
        auth_endpoint: &str,
    ) -> Self {
        Self {
            id: candidate.workspace.id,
            description: candidate.workspace.description,
            tenant: candidate.tenant,
            platform_url: platform_url.to_string(),
            auth_endpoint: auth_endpoint.to_string(),
        }
    }

    pub fn matches_scope(&self, platform_url: &str, auth_endpoint: &str) -> bool {
        self.platform_url == platform_url && self.auth_endpoint == auth_endpoint
    }
}
