use async_trait::async_trait;
use kusari_cli::prelude::*;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock ScanStatusSource replaying scripted statuses
///
/// Once the script runs out the last status repeats.
#[derive(Clone)]
pub struct MockScanStatusSource {
    script: Arc<Mutex<VecDeque<ScanStatus>>>,
    last: Arc<Mutex<Option<ScanStatus>>>,
    status_meta: String,
    rejected_with: Option<u16>,
    calls: Arc<AtomicUsize>,
}

impl MockScanStatusSource {
    pub fn new(script: &[ScanStatus]) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.iter().copied().collect())),
            last: Arc::default(),
            status_meta: String::new(),
            rejected_with: None,
            calls: Arc::default(),
        }
    }

    pub fn with_status_meta(mut self, meta: &str) -> Self {
        self.status_meta = meta.to_string();
        self
    }

    /// Every request fails as if the platform refused the session
    pub fn rejecting(status: u16) -> Self {
        Self {
            rejected_with: Some(status),
            ..Self::new(&[])
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn row(&self, status: ScanStatus, call: usize) -> ScanResultRow {
        let analysis = (status == ScanStatus::Success).then(|| {
            serde_json::from_str(
                r#"{"recommendation": "Approved", "justification": "No issues", "findings": []}"#,
            )
            .unwrap()
        });
        ScanResultRow {
            status,
            status_meta: self.status_meta.clone(),
            updated_at: call as i64,
            analysis,
            health_report: None,
        }
    }
}

#[async_trait]
impl ScanStatusSource for MockScanStatusSource {
    async fn fetch_scan_results(&self, _sort_key: &str) -> Result<Option<Vec<ScanResultRow>>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(status) = self.rejected_with {
            return Err(AuthError::SessionRejected { status }.into());
        }
        let next = self.script.lock().unwrap().pop_front();
        let status = {
            let mut last = self.last.lock().unwrap();
            if next.is_some() {
                *last = next;
            }
            *last
        };
        Ok(status.map(|status| vec![self.row(status, call)]))
    }
}
