use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stable identity of a VM record. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VmId(pub u32);

impl fmt::Display for VmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VmStatus {
    Running,
    Stopped,
    Restarting,
}

impl fmt::Display for VmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VmStatus::Running => "Running",
            VmStatus::Stopped => "Stopped",
            VmStatus::Restarting => "Restarting",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
#[error("unrecognized status filter: {0:?}")]
pub struct FilterParseError(pub String);

/// Selectable view predicate. `Restarting` is a valid record status but not
/// a selectable filter; a record mid-restart only shows up under `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Running,
    Stopped,
}

impl StatusFilter {
    pub fn matches(&self, status: VmStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Running => status == VmStatus::Running,
            StatusFilter::Stopped => status == VmStatus::Stopped,
        }
    }

    /// Wire form for the navigational `status` key. `All` maps to no key.
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Running => Some("Running"),
            StatusFilter::Stopped => Some("Stopped"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "Running" => Ok(StatusFilter::Running),
            "Stopped" => Ok(StatusFilter::Stopped),
            other => Err(FilterParseError(other.to_string())),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value().unwrap_or("all"))
    }
}

/// Lifecycle commands a console can offer for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VmAction {
    Start,
    Stop,
    Restart,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmRecord {
    pub id: VmId,
    pub name: String,
    pub status: VmStatus,
    pub resource_group: String,
    pub location: String,
    pub size: String,
    pub os_type: String,
    pub ip_address: String,
}

impl VmRecord {
    pub fn is_running(&self) -> bool {
        self.status == VmStatus::Running
    }

    /// Actions applicable in the record's current state: start is only
    /// offered while not running, stop only while running.
    pub fn available_actions(&self) -> Vec<VmAction> {
        let mut actions = Vec::with_capacity(3);
        if self.is_running() {
            actions.push(VmAction::Stop);
        } else {
            actions.push(VmAction::Start);
        }
        actions.push(VmAction::Restart);
        actions.push(VmAction::Delete);
        actions
    }
}

/// The pre-populated catalog the registry is seeded with. Creation of new
/// records through the console is not implemented.
pub fn seed_records() -> Vec<VmRecord> {
    vec![
        VmRecord {
            id: VmId(1),
            name: "VM-Prod-01".to_string(),
            status: VmStatus::Running,
            resource_group: "Production".to_string(),
            location: "West Europe".to_string(),
            size: "Standard_D2s_v3".to_string(),
            os_type: "Windows".to_string(),
            ip_address: "10.0.0.1".to_string(),
        },
        VmRecord {
            id: VmId(2),
            name: "VM-Dev-01".to_string(),
            status: VmStatus::Stopped,
            resource_group: "Development".to_string(),
            location: "West Europe".to_string(),
            size: "Standard_B2s".to_string(),
            os_type: "Linux".to_string(),
            ip_address: "10.0.0.2".to_string(),
        },
        VmRecord {
            id: VmId(3),
            name: "VM-Test-01".to_string(),
            status: VmStatus::Running,
            resource_group: "Testing".to_string(),
            location: "West Europe".to_string(),
            size: "Standard_D1s_v3".to_string(),
            os_type: "Windows".to_string(),
            ip_address: "10.0.0.3".to_string(),
        },
    ]
}
