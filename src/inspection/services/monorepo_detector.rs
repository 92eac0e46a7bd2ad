use std::collections::BTreeSet;
use std::path::Path;

/// Files at the repository root that mean a workspace manager is in charge
const WORKSPACE_CONFIG_FILES: &[&str] = &[
    "pnpm-workspace.yaml",
    "lerna.json",
    "nx.json",
    "turbo.json",
    "rush.json",
    "go.work",
];

/// Directory-name fragments that never hold a real sub-project
const EXCLUDED_DIR_FRAGMENTS: &[&str] = &[
    "doc",
    "test",
    "fixture",
    "example",
    "sample",
    "generated",
    "vendor",
    "node_modules",
];

/// Project ecosystems recognised by their manifest file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ecosystem {
    Npm,
    Go,
    Cargo,
    Maven,
    Gradle,
    Python,
    Ruby,
    Php,
    DotNet,
}

impl Ecosystem {
    fn from_manifest(file_name: &str) -> Option<Self> {
        let ecosystem = match file_name {
            "package.json" => Ecosystem::Npm,
            "go.mod" => Ecosystem::Go,
            "Cargo.toml" => Ecosystem::Cargo,
            "pom.xml" => Ecosystem::Maven,
            "build.gradle" | "build.gradle.kts" => Ecosystem::Gradle,
            "pyproject.toml" | "setup.py" | "requirements.txt" => Ecosystem::Python,
            "Gemfile" => Ecosystem::Ruby,
            "composer.json" => Ecosystem::Php,
            name if name.ends_with(".csproj") => Ecosystem::DotNet,
            _ => return None,
        };
        Some(ecosystem)
    }
}

/// What the heuristic found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonorepoReport {
    pub workspace_configs: Vec<String>,
    /// One entry per (ecosystem, directory) below the root
    pub sub_projects: Vec<(Ecosystem, String)>,
}

impl MonorepoReport {
    pub fn is_monorepo(&self) -> bool {
        !self.workspace_configs.is_empty() || self.sub_projects.len() >= 2
    }

    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.workspace_configs.is_empty() {
            parts.push(format!(
                "workspace configuration found ({})",
                self.workspace_configs.join(", ")
            ));
        }
        if self.sub_projects.len() >= 2 {
            let dirs: Vec<String> = self
                .sub_projects
                .iter()
                .map(|(ecosystem, dir)| format!("{dir} ({ecosystem:?})"))
                .collect();
            parts.push(format!(
                "{} sub-projects found: {}",
                self.sub_projects.len(),
                dirs.join(", ")
            ));
        }
        parts.join("; ")
    }
}

/// Detects monorepos from the repository's file list (paths relative to the root)
pub struct MonorepoDetector;

impl MonorepoDetector {
    pub fn analyze<P: AsRef<Path>>(files: &[P]) -> MonorepoReport {
        let mut workspace_configs = BTreeSet::new();
        let mut sub_projects = BTreeSet::new();

        for file in files {
            let path = file.as_ref();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let parent = path.parent().unwrap_or_else(|| Path::new(""));

            if parent.as_os_str().is_empty() {
                if WORKSPACE_CONFIG_FILES.contains(&file_name) {
                    workspace_configs.insert(file_name.to_string());
                }
                continue;
            }

            if Self::is_excluded(parent) {
                continue;
            }
            if let Some(ecosystem) = Ecosystem::from_manifest(file_name) {
                sub_projects.insert((ecosystem, parent.to_string_lossy().replace('\\', "/")));
            }
        }

        MonorepoReport {
            workspace_configs: workspace_configs.into_iter().collect(),
            sub_projects: sub_projects.into_iter().collect(),
        }
    }

    fn is_excluded(dir: &Path) -> bool {
        dir.components().any(|component| {
            let name = component.as_os_str().to_string_lossy().to_lowercase();
            name.starts_with('.')
                || EXCLUDED_DIR_FRAGMENTS
                    .iter()
                    .any(|fragment| name.contains(fragment))
        })
    }
}
