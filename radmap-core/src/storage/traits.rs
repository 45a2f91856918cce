use crate::common::error::Result;
use crate::domain::{Batch, SampleCall};
use async_trait::async_trait;

/// Read-side contract the viewer pages are built on.
///
/// Implementations surface failures as typed errors and the viewer
/// propagates them unchanged; no retries happen at this layer.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Total samples in a batch. Drives grid sizing only, independent of
    /// how many samples returned a genotype.
    async fn sample_count(&self, batch_id: i64) -> Result<i64>;

    /// Observed genotypes joined with any manual corrections for one
    /// catalog locus, ordered by ascending sample id.
    async fn locus_calls(&self, batch_id: i64, catalog_id: i64) -> Result<Vec<SampleCall>>;

    /// Catalog loci recorded for a batch; feeds the export receipt's
    /// estimate.
    async fn locus_count(&self, batch_id: i64) -> Result<i64>;

    /// Known batches, oldest first.
    async fn batches(&self) -> Result<Vec<Batch>>;
}
