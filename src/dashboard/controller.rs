//! Dashboard state controller
//!
//! Owns the load/refresh protocol for one dashboard view: all fetches for a
//! load are issued concurrently, the snapshot swap is atomic, and overlapping
//! loads are superseded so only the newest result is ever committed.

use crate::actions::{ActionRequest, NavigationService, ViewMode};
use crate::consts::dashboard as consts;
use crate::dashboard::projection;
use crate::dashboard::state::DashboardState;
use crate::logging::LogLevel;
use crate::orm::DataService;
use crate::orm::error::DataServiceError;
use crate::orm::records::{DomainTerm, RawRecord};
use crate::reporter::{ErrorInfo, ErrorReporter, ReportPhase};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};

/// What one controller instance loads and navigates over.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Model backing the record list.
    pub record_model: String,
    /// Analytics model answering the aggregate fetch.
    pub analytics_model: String,
    /// Filter applied to the record fetch.
    pub record_filter: Vec<DomainTerm>,
    /// Field projection of the record fetch.
    pub record_fields: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            record_model: consts::RECORD_MODEL.to_string(),
            analytics_model: consts::REPORTING_MODEL.to_string(),
            record_filter: Vec::new(),
            record_fields: consts::PROJECTED_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

/// Per-view controller publishing immutable [`DashboardState`] snapshots.
pub struct DashboardController {
    data: Arc<dyn DataService>,
    navigation: Arc<dyn NavigationService>,
    reporter: ErrorReporter,
    config: DashboardConfig,
    state: watch::Sender<Arc<DashboardState>>,
    /// Sequence token of the most recently started load. A load's result is
    /// committed only while its token is still the newest one.
    load_seq: AtomicU64,
    /// Serializes snapshot publication against the token check.
    commit_gate: Mutex<()>,
}

impl DashboardController {
    pub fn new(
        data: Arc<dyn DataService>,
        navigation: Arc<dyn NavigationService>,
        reporter: ErrorReporter,
        config: DashboardConfig,
    ) -> Self {
        let (state, _) = watch::channel(Arc::new(DashboardState::initial()));
        Self {
            data,
            navigation,
            reporter,
            config,
            state,
            load_seq: AtomicU64::new(0),
            commit_gate: Mutex::new(()),
        }
    }

    /// Read-only reactive view of the dashboard state.
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardState>> {
        self.state.subscribe()
    }

    /// The latest committed snapshot.
    pub fn current_state(&self) -> Arc<DashboardState> {
        self.state.borrow().clone()
    }

    /// First load of a freshly constructed controller. The caller awaits
    /// this before rendering.
    pub async fn initialize(&self) {
        self.load_dashboard_data().await;
    }

    /// Re-run the load; safe while a previous load is still in flight.
    pub async fn refresh(&self) {
        self.load_dashboard_data().await;
    }

    /// Fetch aggregates, KPIs and records concurrently and commit one
    /// consistent snapshot once all of them have settled.
    pub async fn load_dashboard_data(&self) {
        let seq = self.begin_load().await;

        let (aggregates, kpis, records) = tokio::join!(
            self.data.fetch_aggregates(&self.config.analytics_model),
            self.data.fetch_kpis(),
            self.data.fetch_records(
                &self.config.record_model,
                &self.config.record_filter,
                &self.config.record_fields,
            ),
        );

        let snapshot = self.build_snapshot(aggregates, kpis, records);
        self.commit(seq, snapshot).await;
    }

    /// Forward a navigation request; failures degrade to a logged no-op.
    pub async fn dispatch_navigation(&self, action: ActionRequest) {
        if let Err(err) = self.navigation.dispatch(action).await {
            self.reporter
                .report(ReportPhase::Navigation, err.log_level(), err.to_string());
        }
    }

    /// Open a single record in form view.
    pub async fn open_record(&self, record_id: i64) {
        let action = ActionRequest::window(&self.config.record_model, &self.config.record_model)
            .with_record(record_id)
            .with_views(&[ViewMode::Form]);
        self.dispatch_navigation(action).await;
    }

    /// Open the list of `related_model` rows linked to a record through
    /// `link_field`, with the link preset for newly created rows.
    pub async fn open_related_list(&self, record_id: i64, related_model: &str, link_field: &str) {
        let action = ActionRequest::window(related_model, related_model)
            .with_views(&[ViewMode::List, ViewMode::Form])
            .with_domain(vec![DomainTerm::eq(link_field, record_id)])
            .with_context_default(link_field, record_id);
        self.dispatch_navigation(action).await;
    }

    /// Take the next sequence token and republish the previous data with
    /// `loading = true`, unless a newer load already started.
    async fn begin_load(&self) -> u64 {
        let seq = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let _gate = self.commit_gate.lock().await;
        if self.load_seq.load(Ordering::SeqCst) == seq {
            let previous = self.state.borrow().as_ref().clone();
            self.state.send_replace(Arc::new(DashboardState {
                loading: true,
                ..previous
            }));
        }
        seq
    }

    /// Commit a settled load unless it has been superseded.
    async fn commit(&self, seq: u64, snapshot: DashboardState) {
        let _gate = self.commit_gate.lock().await;
        if self.load_seq.load(Ordering::SeqCst) != seq {
            log::debug!("discarding superseded dashboard load result");
            return;
        }
        self.state.send_replace(Arc::new(snapshot));
    }

    /// Turn the three settled fetches into one terminal snapshot: fully
    /// populated on success, fully reset on any failure.
    fn build_snapshot(
        &self,
        aggregates: Result<BTreeMap<String, f64>, DataServiceError>,
        kpis: Result<BTreeMap<String, f64>, DataServiceError>,
        records: Result<Vec<RawRecord>, DataServiceError>,
    ) -> DashboardState {
        let mut first_failure: Option<ErrorInfo> = None;
        let mut capture = |phase: ReportPhase, err: &DataServiceError| {
            let info = self.reporter.report(phase, err.log_level(), err.to_string());
            first_failure.get_or_insert(info);
        };
        if let Err(err) = &aggregates {
            capture(ReportPhase::Aggregates, err);
        }
        if let Err(err) = &kpis {
            capture(ReportPhase::Kpis, err);
        }
        if let Err(err) = &records {
            capture(ReportPhase::Records, err);
        }

        match (aggregates, kpis, records, first_failure) {
            (Ok(server), Ok(kpis), Ok(raw), None) => {
                let records = projection::project_records(raw);
                let aggregates = projection::derived_aggregates(&records, server);
                DashboardState::populated(records, aggregates, kpis)
            }
            (_, _, _, Some(failure)) => DashboardState::reset(failure),
            (_, _, _, None) => DashboardState::reset(self.reporter.report(
                ReportPhase::Records,
                LogLevel::Error,
                "load settled inconsistently".to_string(),
            )),
        }
    }
}
