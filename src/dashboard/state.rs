//! Dashboard state snapshots
//!
//! The controller publishes immutable snapshots; the view layer only ever
//! sees a fully built state, never one mid-mutation.

use crate::consts::dashboard as consts;
use crate::dashboard::projection::ProjectRecord;
use crate::reporter::ErrorInfo;
use std::collections::BTreeMap;

/// One consistent view of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Projected record rows, in service order.
    pub records: Vec<ProjectRecord>,
    /// Server rollups merged with derived counts.
    pub aggregates: BTreeMap<String, f64>,
    /// KPI mapping keyed by indicator name.
    pub kpis: BTreeMap<String, f64>,
    /// True from construction until the first load settles, and during
    /// every refresh until its terminal branch commits.
    pub loading: bool,
    /// The failure that produced this snapshot, if any.
    pub last_error: Option<ErrorInfo>,
}

impl DashboardState {
    /// State at controller construction: nothing loaded yet.
    pub fn initial() -> Self {
        Self {
            records: Vec::new(),
            aggregates: Self::empty_aggregates(),
            kpis: BTreeMap::new(),
            loading: true,
            last_error: None,
        }
    }

    /// Terminal state of a successful load.
    pub fn populated(
        records: Vec<ProjectRecord>,
        aggregates: BTreeMap<String, f64>,
        kpis: BTreeMap<String, f64>,
    ) -> Self {
        Self {
            records,
            aggregates,
            kpis,
            loading: false,
            last_error: None,
        }
    }

    /// Terminal state of a failed load: every dataset reset to its empty
    /// default, regardless of which fetches succeeded.
    pub fn reset(error: ErrorInfo) -> Self {
        Self {
            records: Vec::new(),
            aggregates: Self::empty_aggregates(),
            kpis: BTreeMap::new(),
            loading: false,
            last_error: Some(error),
        }
    }

    /// Zero-valued derived counts, so consumers can always read them.
    pub fn empty_aggregates() -> BTreeMap<String, f64> {
        BTreeMap::from([
            (consts::TOTAL_PROJECTS.to_string(), 0.0),
            (consts::ACTIVE_PROJECTS.to_string(), 0.0),
            (consts::INACTIVE_PROJECTS.to_string(), 0.0),
            (consts::PROJECTS_WITH_TASKS.to_string(), 0.0),
        ])
    }
}
