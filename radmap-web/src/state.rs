use radmap_core::export::ExportRunner;
use radmap_core::layout::GridLayout;
use radmap_core::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub exporter: Arc<dyn ExportRunner>,
    /// Database name forwarded to export jobs.
    pub database: String,
    pub layout: GridLayout,
}
