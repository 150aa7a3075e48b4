//! The ART-2A clustering engine: epoch loop, vigilance test and convergence.

use crate::result::cluster_result::ResultParts;
use crate::result::{ClusterResult, ResultLog};
use crate::types::{now_timestamp, Art2aConfig, Art2aError, Art2aResult, Component};

use super::normalize::normalize;
use super::permutation::PermutationGenerator;
use super::store::ClusterStore;

/// Lifecycle of a clustering run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineState {
    /// No run has been prepared yet.
    Uninitialized,
    /// Epoch `epoch` (zero based) is being presented.
    Running { epoch: usize },
    /// A full epoch produced no reassignment.
    Converged { epochs: usize },
    /// The epoch budget ran out before the assignment stabilized.
    Failed { epochs: usize, reason: String },
}

/// Clusters the rows of a data matrix with ART-2A.
///
/// The engine owns the input matrix. Each call to
/// [`ClusteringEngine::cluster_result`] is an independent, deterministic run
/// for the given seed.
pub struct ClusteringEngine<T: Component> {
    config: Art2aConfig,
    vigilance: T,
    learning_rate: T,
    /// The input rows as supplied.
    data: Vec<Vec<T>>,
    /// Unit-length rows, `None` for null vectors.
    normalized: Vec<Option<Vec<T>>>,
    store: ClusterStore<T>,
    state: EngineState,
}

impl<T: Component> ClusteringEngine<T> {
    /// Validate the configuration and the matrix and create an engine.
    ///
    /// Rows must share a non-zero dimensionality and contain only finite,
    /// non-negative components. At least one row must be non-null.
    pub fn new(data: Vec<Vec<T>>, config: Art2aConfig) -> Art2aResult<Self> {
        config.validate()?;
        validate_matrix(&data)?;

        let normalized: Vec<Option<Vec<T>>> = data.iter().map(|row| normalize(row)).collect();
        if normalized.iter().all(Option::is_none) {
            return Err(Art2aError::NoClusterableVectors);
        }

        Ok(Self {
            vigilance: T::from_f64(config.vigilance),
            learning_rate: T::from_f64(config.learning_rate),
            store: ClusterStore::new(data.len()),
            config,
            data,
            normalized,
            state: EngineState::Uninitialized,
        })
    }

    pub fn config(&self) -> &Art2aConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Number of input rows.
    pub fn vector_count(&self) -> usize {
        self.data.len()
    }

    /// Number of components per row.
    pub fn dimension(&self) -> usize {
        self.data[0].len()
    }

    /// Reset the cluster store to empty and every input to unclassified.
    pub fn initialize_matrices(&mut self) {
        self.store.reset(self.data.len());
        self.state = EngineState::Running { epoch: 0 };
    }

    /// The presentation order a run seeded with `seed` uses in its first epoch.
    pub fn randomize_vector_indices(&self, seed: u64) -> Vec<usize> {
        PermutationGenerator::new(seed).next_permutation(self.data.len())
    }

    /// Run the clustering to convergence.
    ///
    /// With `export_results` the returned result carries process and result
    /// logs for [`ClusterResult::export_to_text_files`]. Exhausting the epoch
    /// budget yields [`Art2aError::ConvergenceFailure`].
    pub fn cluster_result(
        &mut self,
        export_results: bool,
        seed: u64,
    ) -> Art2aResult<ClusterResult<T>> {
        self.initialize_matrices();
        let n = self.data.len();
        let mut process_log = export_results.then(ResultLog::new);
        if let Some(log) = process_log.as_mut() {
            self.write_header(log, seed);
        }

        let mut permutations = PermutationGenerator::new(seed);
        let mut previous_view = self.store.cluster_view().to_vec();

        for epoch in 0..self.config.max_epochs {
            self.state = EngineState::Running { epoch };
            let order = permutations.next_permutation(n);
            self.present_epoch(&order);

            let view = self.store.cluster_view();
            let changed = view
                .iter()
                .zip(&previous_view)
                .filter(|(now, before)| now != before)
                .count();
            log::debug!(
                "Epoch {}: {} clusters, {} assignments changed",
                epoch + 1,
                self.store.cluster_count(),
                changed
            );
            if let Some(log) = process_log.as_mut() {
                log.push(format!(
                    "Epoch {}: {} clusters, {} assignments changed",
                    epoch + 1,
                    self.store.cluster_count(),
                    changed
                ));
            }

            if changed == 0 {
                return self.package(epoch + 1, process_log);
            }
            previous_view.clear();
            previous_view.extend_from_slice(view);
        }

        let epochs = self.config.max_epochs;
        log::warn!(
            "ART-2A clustering did not converge within {} epochs (vigilance {})",
            epochs,
            self.config.vigilance
        );
        self.state = EngineState::Failed {
            epochs,
            reason: format!(
                "cluster assignment still changing after {} epochs",
                epochs
            ),
        };
        Err(Art2aError::ConvergenceFailure { epochs })
    }

    /// Present every input once, in `order`.
    fn present_epoch(&mut self, order: &[usize]) {
        for &input in order {
            let Some(vector) = self.normalized[input].as_deref() else {
                continue;
            };
            let cluster = match self.store.best_match(vector) {
                Some((winner, similarity)) if similarity >= self.vigilance => {
                    self.store
                        .update_cluster(winner, vector, self.learning_rate);
                    winner
                }
                _ => self.store.create_cluster(vector),
            };
            self.store.assign(input, cluster);
        }
    }

    /// Freeze the converged store into a [`ClusterResult`].
    fn package(
        &mut self,
        epochs: usize,
        mut process_log: Option<ResultLog>,
    ) -> Art2aResult<ClusterResult<T>> {
        let store = std::mem::replace(&mut self.store, ClusterStore::new(self.data.len()));
        let (clusters, view) = store.into_parts();
        let (clusters, view) = drop_empty_clusters(clusters, view);
        self.state = EngineState::Converged { epochs };

        log::info!(
            "ART-2A clustering converged after {} epochs with {} clusters",
            epochs,
            clusters.len()
        );
        if let Some(log) = process_log.as_mut() {
            log.push(format!(
                "Converged after {} epochs with {} clusters",
                epochs,
                clusters.len()
            ));
            for (input, cluster) in view.iter().enumerate() {
                match cluster {
                    Some(c) => log.push(format!("Input vector {}: cluster {}", input, c)),
                    None => log.push(format!("Input vector {}: null vector, unclassified", input)),
                }
            }
        }

        ClusterResult::new(ResultParts {
            vigilance: self.vigilance,
            epochs,
            clusters,
            view,
            data: self.data.clone(),
            process_log,
        })
    }

    fn write_header(&self, log: &mut ResultLog, seed: u64) {
        log.push(format!("ART-2A clustering process started {}", now_timestamp()));
        log.push(format!(
            "Precision: {}, input vectors: {}, components: {}",
            T::NAME,
            self.data.len(),
            self.dimension()
        ));
        log.push(format!(
            "Vigilance parameter: {}, learning rate: {}, maximum epochs: {}, seed: {}",
            self.config.vigilance, self.config.learning_rate, self.config.max_epochs, seed
        ));
        let nulls = self.normalized.iter().filter(|v| v.is_none()).count();
        if nulls > 0 {
            log.push(format!("Null vectors excluded from clustering: {}", nulls));
        }
    }
}

fn validate_matrix<T: Component>(data: &[Vec<T>]) -> Art2aResult<()> {
    let expected = match data.first() {
        Some(row) if !row.is_empty() => row.len(),
        _ => return Err(Art2aError::EmptyMatrix),
    };
    for (row, values) in data.iter().enumerate() {
        if values.len() != expected {
            return Err(Art2aError::DimensionMismatch {
                row,
                expected,
                got: values.len(),
            });
        }
        for (column, &x) in values.iter().enumerate() {
            if !x.is_finite() {
                return Err(Art2aError::NonFiniteComponent { row, column });
            }
            if x < T::ZERO {
                return Err(Art2aError::NegativeComponent { row, column });
            }
        }
    }
    Ok(())
}

/// Remove clusters that lost every member during later epochs and renumber
/// the view. Remaining clusters keep their relative order.
fn drop_empty_clusters<T: Component>(
    clusters: Vec<Vec<T>>,
    view: Vec<Option<usize>>,
) -> (Vec<Vec<T>>, Vec<Option<usize>>) {
    let mut sizes = vec![0usize; clusters.len()];
    for &c in view.iter().flatten() {
        sizes[c] += 1;
    }
    if sizes.iter().all(|&s| s > 0) {
        return (clusters, view);
    }

    let mut remap = vec![None; clusters.len()];
    let mut kept = Vec::with_capacity(clusters.len());
    for (old, weights) in clusters.into_iter().enumerate() {
        if sizes[old] > 0 {
            remap[old] = Some(kept.len());
            kept.push(weights);
        }
    }
    log::debug!(
        "Dropped {} clusters without members",
        sizes.iter().filter(|&&s| s == 0).count()
    );
    let view = view.into_iter().map(|c| c.and_then(|c| remap[c])).collect();
    (kept, view)
}
