//! The clustering pipeline: normalization, epoch permutations and the cluster
//! store, driven by the ART-2A engine.

pub mod clustering;
pub mod normalize;
pub mod permutation;
pub mod store;

pub use clustering::{ClusteringEngine, EngineState};
pub use normalize::{is_null, normalize};
pub use permutation::PermutationGenerator;
pub use store::ClusterStore;
