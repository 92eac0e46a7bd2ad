use async_trait::async_trait;
use kusari_cli::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct CatalogEntry {
    ids: SoftwareIds,
    /// Lookups answered with NotFound before the ids appear
    pending_lookups: usize,
    check: BlockedCheck,
}

/// Mock SoftwareCatalog keyed by SBOM subject
#[derive(Default, Clone)]
pub struct MockSoftwareCatalog {
    entries: Arc<Mutex<HashMap<String, CatalogEntry>>>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockSoftwareCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_software(self, subject: &str, pending_lookups: usize, check: BlockedCheck) -> Self {
        {
            let mut entries = self.entries.lock().unwrap();
            let id = entries.len() + 1;
            entries.insert(
                subject.to_string(),
                CatalogEntry {
                    ids: SoftwareIds {
                        software_id: format!("sw-{id}"),
                        sbom_id: format!("sbom-{id}"),
                    },
                    pending_lookups,
                    check,
                },
            );
        }
        self
    }

    /// Subjects in lookup order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl SoftwareCatalog for MockSoftwareCatalog {
    async fn lookup_software_ids(&self, subject: &str, _uri: &str) -> Result<SoftwareLookup> {
        self.lookups.lock().unwrap().push(subject.to_string());
        let mut entries = self.entries.lock().unwrap();
        let Some(entry) = entries.get_mut(subject) else {
            return Ok(SoftwareLookup::NotFound);
        };
        if entry.pending_lookups > 0 {
            entry.pending_lookups -= 1;
            return Ok(SoftwareLookup::NotFound);
        }
        Ok(SoftwareLookup::Ready(entry.ids.clone()))
    }

    async fn check_blocked_packages(&self, ids: &SoftwareIds) -> Result<BlockedCheck> {
        let entries = self.entries.lock().unwrap();
        entries
            .values()
            .find(|entry| &entry.ids == ids)
            .map(|entry| entry.check.clone())
            .ok_or_else(|| anyhow::anyhow!("unknown software {}", ids.software_id))
    }
}
