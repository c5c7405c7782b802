//! Project dashboard client
//!
//! Presentation-layer plumbing for a host application's project dashboards:
//! an async state controller that loads aggregates, KPIs and record lists
//! from the host's object-relational service, and a document enhancement
//! watcher that keeps visibility-toggle behavior bound across a mutating
//! document tree. Rendering is left to the embedding view layer, which
//! consumes read-only state snapshots through a watch channel.

pub mod actions;
pub mod consts;
pub mod dashboard;
pub mod dom;
pub mod environment;
pub mod format;
pub mod logging;
pub mod orm;
pub mod reporter;
pub mod watcher;
