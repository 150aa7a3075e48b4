//! Cluster store: the growable arena of cluster weight vectors plus the
//! per-input cluster assignment.

use crate::types::{dot, Component};

use super::normalize::normalize_in_place;

/// Weight vectors indexed by cluster number, and the cluster view.
///
/// Operations are unchecked: callers pass normalized vectors and valid indices.
#[derive(Debug, Clone)]
pub struct ClusterStore<T: Component> {
    /// cluster_index -> unit weight vector.
    clusters: Vec<Vec<T>>,
    /// input_index -> assigned cluster, `None` while unclassified.
    view: Vec<Option<usize>>,
}

impl<T: Component> ClusterStore<T> {
    /// Create an empty store for `input_count` inputs.
    pub fn new(input_count: usize) -> Self {
        Self {
            clusters: Vec::new(),
            view: vec![None; input_count],
        }
    }

    /// Drop all clusters and mark every input unclassified.
    pub fn reset(&mut self, input_count: usize) {
        self.clusters.clear();
        self.view.clear();
        self.view.resize(input_count, None);
    }

    /// Append a copy of `vector` as a new cluster and return its index.
    pub fn create_cluster(&mut self, vector: &[T]) -> usize {
        self.clusters.push(vector.to_vec());
        self.clusters.len() - 1
    }

    /// Move the weight vector of `cluster_index` toward `vector` and renormalize:
    /// `w = normalize(rate * x + (1 - rate) * w)`.
    pub fn update_cluster(&mut self, cluster_index: usize, vector: &[T], learning_rate: T) {
        let keep = T::ONE - learning_rate;
        let weights = &mut self.clusters[cluster_index];
        for (w, &x) in weights.iter_mut().zip(vector) {
            *w = learning_rate * x + keep * *w;
        }
        normalize_in_place(weights);
    }

    /// Record that `input_index` belongs to `cluster_index`.
    pub fn assign(&mut self, input_index: usize, cluster_index: usize) {
        self.view[input_index] = Some(cluster_index);
    }

    /// The cluster currently assigned to `input_index`.
    pub fn assignment(&self, input_index: usize) -> Option<usize> {
        self.view[input_index]
    }

    /// Find the cluster whose weight vector has the highest dot product with
    /// `vector`. Lower indices win ties. Returns `None` when no cluster exists.
    pub fn best_match(&self, vector: &[T]) -> Option<(usize, T)> {
        let mut best: Option<(usize, T)> = None;
        for (i, weights) in self.clusters.iter().enumerate() {
            let sim = dot(vector, weights);
            match best {
                Some((_, best_sim)) if sim <= best_sim => {}
                _ => best = Some((i, sim)),
            }
        }
        best
    }

    /// Number of clusters created so far.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Weight vector of a cluster.
    pub fn cluster_vector(&self, cluster_index: usize) -> &[T] {
        &self.clusters[cluster_index]
    }

    /// Current assignment of every input.
    pub fn cluster_view(&self) -> &[Option<usize>] {
        &self.view
    }

    /// Consume the store, returning (weight vectors, cluster view).
    pub fn into_parts(self) -> (Vec<Vec<T>>, Vec<Option<usize>>) {
        (self.clusters, self.view)
    }
}
