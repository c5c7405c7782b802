use crate::orm::error::DataServiceError;
use crate::orm::records::{DomainTerm, RawRecord};
use std::collections::BTreeMap;

pub(crate) mod client;
pub use client::OrmClient;
pub mod error;
pub mod records;

#[cfg(test)]
use mockall::automock;

/// The host application's object-relational service, as consumed by the
/// dashboard controller. All calls are fallible transport operations.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataService: Send + Sync {
    /// Fetch precomputed dashboard rollups from an analytics model.
    async fn fetch_aggregates(&self, model: &str)
    -> Result<BTreeMap<String, f64>, DataServiceError>;

    /// Fetch the KPI mapping.
    async fn fetch_kpis(&self) -> Result<BTreeMap<String, f64>, DataServiceError>;

    /// Fetch a filtered record list with the given field projection.
    async fn fetch_records(
        &self,
        model: &str,
        filter: &[DomainTerm],
        fields: &[String],
    ) -> Result<Vec<RawRecord>, DataServiceError>;
}
