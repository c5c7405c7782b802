//! Navigation service contract
//!
//! Actions are declarative descriptions of where the host should navigate;
//! the dispatcher performs the actual routing. The dashboard never inspects
//! the outcome beyond success or failure.

use crate::actions::error::NavigationError;
use crate::orm::records::DomainTerm;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub(crate) mod client;
pub use client::ActionClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// How the host should interpret the action.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    /// Open a window over a model (list/form/graph views).
    Window,
    /// Invoke a client-side action by tag.
    Client,
}

/// View modes a window action may present, in preference order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    List,
    Form,
    Kanban,
    Graph,
    Pivot,
}

/// Where the routed view is displayed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisplayTarget {
    Current,
    New,
}

/// A declarative navigation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub name: String,
    pub target_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,
    pub view_modes: Vec<ViewMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter_domain: Vec<DomainTerm>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub default_context: BTreeMap<String, Value>,
    pub display_target: DisplayTarget,
}

impl ActionRequest {
    /// A window action over `model`, displayed in the current tab.
    pub fn window(name: &str, model: &str) -> Self {
        Self {
            kind: ActionKind::Window,
            name: name.to_string(),
            target_model: model.to_string(),
            record_id: None,
            view_modes: Vec::new(),
            filter_domain: Vec::new(),
            default_context: BTreeMap::new(),
            display_target: DisplayTarget::Current,
        }
    }

    pub fn with_record(mut self, record_id: i64) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn with_views(mut self, views: &[ViewMode]) -> Self {
        self.view_modes = views.to_vec();
        self
    }

    pub fn with_domain(mut self, filter: Vec<DomainTerm>) -> Self {
        self.filter_domain = filter;
        self
    }

    /// Preset `default_<field>` in the context of the routed view.
    pub fn with_context_default(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.default_context
            .insert(format!("default_{field}"), value.into());
        self
    }

    pub fn in_new_window(mut self) -> Self {
        self.display_target = DisplayTarget::New;
        self
    }
}

/// The host application's navigation/action dispatcher.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait NavigationService: Send + Sync {
    /// Route the host to the described action.
    async fn dispatch(&self, action: ActionRequest) -> Result<(), NavigationError>;
}
