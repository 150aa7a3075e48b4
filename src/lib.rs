//! ART-2A clustering: unsupervised, vigilance-controlled online clustering of
//! non-negative feature vectors such as molecular fingerprints.
//!
//! A [`ClusteringEngine`] presents the rows of a data matrix in seeded random
//! order, epoch after epoch, until a full pass reassigns nothing. The converged
//! state is frozen into a [`ClusterResult`] that answers membership,
//! representative and inter-cluster angle queries and exports its logs.

pub mod cli;
pub mod engine;
pub mod format;
pub mod result;
pub mod types;

// Re-export commonly used types at the crate root
pub use engine::{ClusterStore, ClusteringEngine, EngineState, PermutationGenerator};
pub use format::{ClusterSummary, MatrixReader, ResultSummary};
pub use result::{ClusterResult, ClusteringResult, ExportReport, ResultLog};
pub use types::{
    load_config, Art2aConfig, Art2aError, Art2aResult, Component, DEFAULT_LEARNING_RATE,
    DEFAULT_MAX_EPOCHS, DEFAULT_SEED,
};
