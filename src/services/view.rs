use crate::models::{StatusFilter, VmId, VmRecord};
use crate::services::nav::NavChannel;
use crate::services::registry::VmRegistry;
use std::sync::Arc;
use tracing::{debug, warn};

/// The active status predicate, kept in sync with the navigational channel:
/// the external value is adopted once at construction, and every filter
/// change is pushed back out.
pub struct FilterView {
    filter: StatusFilter,
    nav: Arc<dyn NavChannel>,
}

impl FilterView {
    pub fn new(nav: Arc<dyn NavChannel>) -> Self {
        let filter = match nav.read_status() {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(%err, "falling back to the unfiltered view");
                StatusFilter::All
            }),
            None => StatusFilter::All,
        };
        debug!(%filter, "filter view initialized");
        Self { filter, nav }
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.nav.write_status(filter.as_query_value());
        debug!(%filter, "filter changed");
    }

    /// Pure derivation of the visible subset. Preserves input order and
    /// never reorders; the caller recomputes this from the live registry
    /// after every mutation rather than patching a cached list.
    pub fn derive(records: &[VmRecord], filter: StatusFilter) -> Vec<VmRecord> {
        records
            .iter()
            .filter(|vm| filter.matches(vm.status))
            .cloned()
            .collect()
    }
}

/// The command surface a presentation layer drives: lifecycle commands
/// delegate to the registry, and the visible list is re-derived from live
/// state on every read.
pub struct Console {
    registry: VmRegistry,
    view: FilterView,
}

impl Console {
    pub fn new(registry: VmRegistry, nav: Arc<dyn NavChannel>) -> Self {
        Self {
            registry,
            view: FilterView::new(nav),
        }
    }

    pub fn registry(&self) -> &VmRegistry {
        &self.registry
    }

    pub fn filter(&self) -> StatusFilter {
        self.view.filter()
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.view.set_filter(filter);
    }

    /// The full registry snapshot, regardless of filter.
    pub async fn records(&self) -> Vec<VmRecord> {
        self.registry.list().await
    }

    /// The filtered list as the presentation layer should render it.
    pub async fn visible(&self) -> Vec<VmRecord> {
        FilterView::derive(&self.registry.list().await, self.view.filter())
    }

    pub async fn start(&self, id: VmId) {
        self.registry.start(id).await;
    }

    pub async fn stop(&self, id: VmId) {
        self.registry.stop(id).await;
    }

    pub async fn restart(&self, id: VmId) {
        self.registry.restart(id).await;
    }

    pub async fn delete(&self, id: VmId) {
        self.registry.delete(id).await;
    }
}
