pub mod dashboard {
    //! Dashboard Configuration Constants
    //!
    //! Model names, projected fields and placeholder labels used by the
    //! dashboard state controller.

    // =============================================================================
    // MODEL NAMES
    // =============================================================================

    /// Backing model for the project record list.
    pub const RECORD_MODEL: &str = "project.project";

    /// Analytics model exposing server-side rollups and KPIs.
    pub const REPORTING_MODEL: &str = "project.reporting.dashboard";

    /// Related task model opened from a record row.
    pub const TASK_MODEL: &str = "project.task";

    /// Method returning precomputed dashboard rollups.
    pub const AGGREGATES_METHOD: &str = "get_dashboard_data";

    /// Method returning the KPI mapping.
    pub const KPIS_METHOD: &str = "get_project_kpis";

    /// Generic record-list method with a filter and a field projection.
    pub const SEARCH_READ_METHOD: &str = "search_read";

    // =============================================================================
    // RECORD PROJECTION
    // =============================================================================

    /// Fields requested for each projected record.
    pub const PROJECTED_FIELDS: [&str; 9] = [
        "name",
        "partner_id",
        "user_id",
        "date_start",
        "date",
        "stage_id",
        "active",
        "task_count",
        "task_count_with_subtasks",
    ];

    /// Label shown when a record has no customer relation.
    pub const NO_CUSTOMER_LABEL: &str = "No Customer";

    /// Label shown when a record has no assigned manager.
    pub const NO_MANAGER_LABEL: &str = "No Manager";

    /// Label shown when a record has no stage.
    pub const NO_STAGE_LABEL: &str = "No Stage";

    // =============================================================================
    // DERIVED AGGREGATE KEYS
    // =============================================================================

    pub const TOTAL_PROJECTS: &str = "total_projects";
    pub const ACTIVE_PROJECTS: &str = "active_projects";
    pub const INACTIVE_PROJECTS: &str = "inactive_projects";
    pub const PROJECTS_WITH_TASKS: &str = "projects_with_tasks";
}

pub mod http {
    //! HTTP client configuration shared by the service clients.

    use std::time::Duration;

    /// Connect timeout for host service requests (seconds).
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Overall request timeout for host service requests (seconds).
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Call-style RPC endpoint of the object-relational service.
    pub const CALL_ENDPOINT: &str = "web/dataset/call_kw";

    /// Endpoint of the navigation/action dispatcher.
    pub const ACTION_ENDPOINT: &str = "web/action/dispatch";

    pub const fn connect_timeout() -> Duration {
        Duration::from_secs(CONNECT_TIMEOUT_SECS)
    }

    pub const fn request_timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

pub mod dom {
    //! Document tree configuration.

    /// Capacity of the structural-mutation broadcast channel. A subscriber
    /// that falls further behind than this rescans the whole tree, which
    /// replays the effect of the missed batches.
    pub const MUTATION_QUEUE_SIZE: usize = 64;
}

pub mod toggle {
    //! Visibility-toggle enhancement configuration.

    /// Selector matching toggle elements anywhere in the observed subtree.
    pub const TOGGLE_SELECTOR: &str = "span.o_toggle_password";

    /// Glyph shown while the associated input is masked.
    pub const GLYPH_MASKED: &str = "\u{1F441}\u{FE0F}";

    /// Glyph shown while the associated input is revealed.
    pub const GLYPH_REVEALED: &str = "\u{1F648}";
}
