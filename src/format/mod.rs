//! Text formats: matrix input and result summaries.

pub mod reader;
pub mod summary;

pub use reader::MatrixReader;
pub use summary::{ClusterSummary, ResultSummary};
