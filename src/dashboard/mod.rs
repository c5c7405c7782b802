//! Dashboard state management
//!
//! One controller per dashboard view: it loads aggregates, KPIs and record
//! projections concurrently, and hands the view layer immutable snapshots
//! over a watch channel.

pub mod controller;
pub mod projection;
pub mod state;

pub use controller::{DashboardConfig, DashboardController};
pub use projection::ProjectRecord;
pub use state::DashboardState;
