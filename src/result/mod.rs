//! Clustering results: queries over a converged run and log export.

pub mod cluster_result;
pub mod export;
pub mod result_log;

use std::io::Write;

use crate::types::{Art2aResult, Component};

pub use cluster_result::ClusterResult;
pub use export::ExportReport;
pub use result_log::ResultLog;

/// Query contract of a clustering result, independent of numeric precision.
pub trait ClusteringResult {
    /// Component type of the clustered vectors.
    type Value: Component;

    fn vigilance_parameter(&self) -> Self::Value;
    fn number_of_epochs(&self) -> usize;
    fn number_of_detected_clusters(&self) -> usize;
    fn cluster_view(&self) -> &[Option<usize>];
    fn cluster_indices(&self, cluster: usize) -> Art2aResult<Vec<usize>>;
    fn cluster_representative(&self, cluster: usize) -> Art2aResult<usize>;
    fn angle_between_clusters(&self, a: usize, b: usize) -> Art2aResult<Self::Value>;
    fn export_to_text_files(
        &self,
        result_sink: Option<&mut dyn Write>,
        process_sink: Option<&mut dyn Write>,
    ) -> Art2aResult<ExportReport>;
}
