use crate::models::{VmId, VmRecord, VmStatus, DEFAULT_RESTART_DELAY_MS};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Authoritative in-memory collection of VM records.
///
/// Commands are keyed by id and touch only the matching record. An unknown
/// id is a silent no-op for every command: the console only ever issues
/// commands against ids it just displayed, so absence is not a fault.
#[derive(Clone)]
pub struct VmRegistry {
    records: Arc<RwLock<Vec<VmRecord>>>,
    restart_delay: Duration,
}

impl VmRegistry {
    pub fn new(seed: Vec<VmRecord>) -> Self {
        Self::with_restart_delay(seed, Duration::from_millis(DEFAULT_RESTART_DELAY_MS))
    }

    pub fn with_restart_delay(seed: Vec<VmRecord>, restart_delay: Duration) -> Self {
        Self {
            records: Arc::new(RwLock::new(seed)),
            restart_delay,
        }
    }

    /// Snapshot of the collection in insertion order.
    pub async fn list(&self) -> Vec<VmRecord> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: VmId) -> Option<VmRecord> {
        self.records.read().await.iter().find(|vm| vm.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Sets the record to `Running`. Already-running records are rewritten
    /// in place, which is observably a no-op.
    pub async fn start(&self, id: VmId) {
        self.set_status(id, VmStatus::Running).await;
    }

    pub async fn stop(&self, id: VmId) {
        self.set_status(id, VmStatus::Stopped).await;
    }

    /// Two-phase restart: the record goes `Restarting` immediately, then a
    /// one-shot task marks it `Running` after the configured delay.
    ///
    /// The completion re-resolves the id against the live collection when it
    /// fires, so a delete during the window wins and the completion becomes
    /// a no-op. Restarts are not cancelable: a second restart on the same id
    /// schedules a second independent completion, and whichever fires last
    /// is the last writer (both set `Running`, so the outcome converges).
    pub async fn restart(&self, id: VmId) {
        if !self.set_status(id, VmStatus::Restarting).await {
            return;
        }

        let records = self.records.clone();
        let delay = self.restart_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut records = records.write().await;
            match records.iter_mut().find(|vm| vm.id == id) {
                Some(vm) => {
                    vm.status = VmStatus::Running;
                    debug!(%id, "restart completed");
                }
                None => debug!(%id, "restart completion for a deleted VM, ignored"),
            }
        });
    }

    /// Removes the matching record permanently, leaving the relative order
    /// of the rest untouched.
    pub async fn delete(&self, id: VmId) {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|vm| vm.id != id);
        if records.len() < before {
            debug!(%id, "deleted");
        } else {
            debug!(%id, "delete ignored, no such record");
        }
    }

    async fn set_status(&self, id: VmId, status: VmStatus) -> bool {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|vm| vm.id == id) {
            Some(vm) => {
                vm.status = status;
                debug!(%id, %status, "status updated");
                true
            }
            None => {
                debug!(%id, %status, "command ignored, no such record");
                false
            }
        }
    }
}
