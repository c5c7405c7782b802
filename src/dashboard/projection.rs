//! Record projection and derived aggregates
//!
//! Raw rows become display-ready records here: relational labels are
//! resolved once at load time, with fixed placeholders for absent relations.

use crate::consts::dashboard as consts;
use crate::orm::records::{RawRecord, RelationRef};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Display-ready projection of one backing record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub id: i64,
    pub display_name: String,
    pub customer: String,
    pub manager: String,
    pub stage: String,
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    pub active: bool,
    pub task_count: u32,
    pub task_count_with_subtasks: u32,
}

fn label_or(relation: &Option<RelationRef>, placeholder: &str) -> String {
    relation
        .as_ref()
        .map(|r| r.display_name.clone())
        .unwrap_or_else(|| placeholder.to_string())
}

impl From<RawRecord> for ProjectRecord {
    fn from(raw: RawRecord) -> Self {
        Self {
            id: raw.id,
            display_name: raw.name.clone(),
            customer: label_or(&raw.partner_id, consts::NO_CUSTOMER_LABEL),
            manager: label_or(&raw.user_id, consts::NO_MANAGER_LABEL),
            stage: label_or(&raw.stage_id, consts::NO_STAGE_LABEL),
            date_start: raw.date_start,
            date_end: raw.date_end,
            active: raw.active,
            task_count: raw.task_count,
            task_count_with_subtasks: raw.task_count_with_subtasks,
        }
    }
}

/// Project a fetched record list, preserving order.
pub fn project_records(raw: Vec<RawRecord>) -> Vec<ProjectRecord> {
    raw.into_iter().map(ProjectRecord::from).collect()
}

/// Count-based rollups computed from the projected records, merged over the
/// server-provided aggregates. Derived keys win on collision.
pub fn derived_aggregates(
    records: &[ProjectRecord],
    server: BTreeMap<String, f64>,
) -> BTreeMap<String, f64> {
    let mut aggregates = server;
    aggregates.insert(consts::TOTAL_PROJECTS.to_string(), records.len() as f64);
    aggregates.insert(
        consts::ACTIVE_PROJECTS.to_string(),
        records.iter().filter(|r| r.active).count() as f64,
    );
    aggregates.insert(
        consts::INACTIVE_PROJECTS.to_string(),
        records.iter().filter(|r| !r.active).count() as f64,
    );
    aggregates.insert(
        consts::PROJECTS_WITH_TASKS.to_string(),
        records.iter().filter(|r| r.task_count > 0).count() as f64,
    );
    aggregates
}
