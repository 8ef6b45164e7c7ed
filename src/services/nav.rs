use std::sync::RwLock;
use tracing::debug;

/// Read/write access to the single navigational `status` key.
///
/// The real routing layer is an external collaborator; this trait is the
/// seam it plugs into. Writing `None` removes the key so the base path
/// stays clean.
pub trait NavChannel: Send + Sync {
    fn read_status(&self) -> Option<String>;
    fn write_status(&self, value: Option<&str>);
}

/// In-memory stand-in for the address bar, used by the CLI frontend and
/// the tests.
pub struct QueryBar {
    base_path: String,
    status: RwLock<Option<String>>,
}

impl QueryBar {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            status: RwLock::new(None),
        }
    }

    pub fn with_status(base_path: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            status: RwLock::new(Some(status.into())),
        }
    }

    /// The current location: the base path, with `?status=<value>` appended
    /// when the key is set.
    pub fn href(&self) -> String {
        match self.status.read().expect("query bar lock poisoned").as_deref() {
            Some(value) => format!("{}?status={}", self.base_path, value),
            None => self.base_path.clone(),
        }
    }
}

impl NavChannel for QueryBar {
    fn read_status(&self) -> Option<String> {
        self.status.read().expect("query bar lock poisoned").clone()
    }

    fn write_status(&self, value: Option<&str>) {
        debug!(?value, "navigational status updated");
        *self.status.write().expect("query bar lock poisoned") = value.map(str::to_string);
    }
}
