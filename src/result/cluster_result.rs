//! Immutable view over a converged clustering run, with lazily memoized
//! representatives and inter-cluster angles.

use std::io::Write;
use std::path::Path;
use std::sync::OnceLock;

use crate::format::summary::ResultSummary;
use crate::types::{dot, Art2aError, Art2aResult, Component};

use super::export::{export_log, export_log_to_path, ExportReport, LogKind};
use super::result_log::ResultLog;
use super::ClusteringResult;

/// Raw state handed over by the engine at convergence.
pub(crate) struct ResultParts<T: Component> {
    pub vigilance: T,
    pub epochs: usize,
    pub clusters: Vec<Vec<T>>,
    pub view: Vec<Option<usize>>,
    pub data: Vec<Vec<T>>,
    pub process_log: Option<ResultLog>,
}

/// Result of a converged ART-2A run.
///
/// Everything except the two caches is fixed at construction. Cache slots are
/// filled at most once, so the result can be shared between threads.
#[derive(Debug)]
pub struct ClusterResult<T: Component> {
    vigilance: T,
    epochs: usize,
    /// cluster_index -> final unit weight vector.
    clusters: Vec<Vec<T>>,
    /// input_index -> cluster, `None` for null vectors.
    view: Vec<Option<usize>>,
    /// The clustered input rows.
    data: Vec<Vec<T>>,
    /// cluster_index -> number of members.
    sizes: Vec<usize>,
    representatives: Vec<OnceLock<usize>>,
    /// Upper triangle of the angle matrix, one slot per unordered pair.
    angles: Vec<OnceLock<T>>,
    process_log: Option<ResultLog>,
    result_log: Option<ResultLog>,
}

impl<T: Component> ClusterResult<T> {
    pub(crate) fn new(parts: ResultParts<T>) -> Art2aResult<Self> {
        let ResultParts {
            vigilance,
            epochs,
            clusters,
            view,
            data,
            process_log,
        } = parts;

        if !(vigilance > T::ZERO && vigilance < T::ONE) {
            return Err(Art2aError::InvalidVigilance(vigilance.to_f64()));
        }
        if epochs == 0 {
            return Err(Art2aError::InvalidEpochBudget(epochs));
        }
        let count = clusters.len();
        if count == 0 {
            return Err(Art2aError::NoClusterableVectors);
        }

        let mut sizes = vec![0usize; count];
        for &cluster in view.iter().flatten() {
            if cluster >= count {
                return Err(Art2aError::InvalidClusterNumber { cluster, count });
            }
            sizes[cluster] += 1;
        }
        if let Some(empty) = sizes.iter().position(|&s| s == 0) {
            return Err(Art2aError::Config(format!("cluster {} has no members", empty)));
        }

        let exported = process_log.is_some();
        let mut result = Self {
            vigilance,
            epochs,
            clusters,
            view,
            data,
            sizes,
            representatives: (0..count).map(|_| OnceLock::new()).collect(),
            angles: (0..count * count.saturating_sub(1) / 2)
                .map(|_| OnceLock::new())
                .collect(),
            process_log,
            result_log: None,
        };

        if exported {
            let mut log = ResultLog::new();
            log.extend(ResultSummary::from_result(&result)?.to_lines());
            result.result_log = Some(log);
        }
        Ok(result)
    }

    pub fn vigilance_parameter(&self) -> T {
        self.vigilance
    }

    pub fn number_of_epochs(&self) -> usize {
        self.epochs
    }

    pub fn number_of_detected_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Cluster assignment per input row, `None` for null vectors.
    pub fn cluster_view(&self) -> &[Option<usize>] {
        &self.view
    }

    /// Number of members per cluster.
    pub fn cluster_sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Final weight vector of a cluster.
    pub fn cluster_vector(&self, cluster: usize) -> Art2aResult<&[T]> {
        self.check_cluster(cluster)?;
        Ok(&self.clusters[cluster])
    }

    /// Input rows that were never classified because they are null vectors.
    pub fn unclassified_indices(&self) -> Vec<usize> {
        self.view
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Input indices belonging to `cluster`, ascending.
    pub fn cluster_indices(&self, cluster: usize) -> Art2aResult<Vec<usize>> {
        self.check_cluster(cluster)?;
        let mut indices = Vec::with_capacity(self.sizes[cluster]);
        indices.extend(
            self.view
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == Some(cluster))
                .map(|(i, _)| i),
        );
        Ok(indices)
    }

    /// The member whose input vector has the largest dot product with the
    /// cluster's weight vector. The first member wins ties. Computed once per
    /// cluster.
    pub fn cluster_representative(&self, cluster: usize) -> Art2aResult<usize> {
        self.check_cluster(cluster)?;
        let slot = &self.representatives[cluster];
        if let Some(&index) = slot.get() {
            return Ok(index);
        }
        let members = self.cluster_indices(cluster)?;
        Ok(*slot.get_or_init(|| self.most_aligned_member(cluster, &members)))
    }

    fn most_aligned_member(&self, cluster: usize, members: &[usize]) -> usize {
        let weights = &self.clusters[cluster];
        let mut best = members[0];
        let mut best_score: Option<T> = None;
        for &i in members {
            let score = dot(&self.data[i], weights);
            match best_score {
                Some(s) if score <= s => {}
                _ => {
                    best = i;
                    best_score = Some(score);
                }
            }
        }
        best
    }

    /// Angle in degrees between the weight vectors of two clusters.
    ///
    /// Zero on the diagonal. Off-diagonal values are computed once per
    /// unordered pair and lie in `[0, 90]`.
    pub fn angle_between_clusters(&self, a: usize, b: usize) -> Art2aResult<T> {
        self.check_cluster(a)?;
        if a == b {
            return Ok(T::ZERO);
        }
        self.check_cluster(b)?;

        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let slot = &self.angles[self.pair_slot(lo, hi)];
        Ok(*slot.get_or_init(|| {
            let cos = dot(&self.clusters[lo], &self.clusters[hi]).clamp_to(T::ZERO, T::ONE);
            let degrees = cos.acos() * T::from_f64(180.0 / std::f64::consts::PI);
            degrees.clamp_to(T::ZERO, T::from_f64(90.0))
        }))
    }

    /// Position of the pair `(lo, hi)`, `lo < hi`, in the upper-triangle cache.
    fn pair_slot(&self, lo: usize, hi: usize) -> usize {
        let n = self.clusters.len();
        lo * n - lo * (lo + 1) / 2 + (hi - lo - 1)
    }

    /// Process log, present when export was requested.
    pub fn process_log(&self) -> Option<&ResultLog> {
        self.process_log.as_ref()
    }

    /// Result log, present when export was requested.
    pub fn result_log(&self) -> Option<&ResultLog> {
        self.result_log.as_ref()
    }

    /// Write both logs line by line.
    ///
    /// Missing sinks and results built without logs are errors. I/O failures
    /// are reported in the returned [`ExportReport`].
    pub fn export_to_text_files(
        &self,
        result_sink: Option<&mut dyn Write>,
        process_sink: Option<&mut dyn Write>,
    ) -> Art2aResult<ExportReport> {
        let result_sink = result_sink.ok_or(Art2aError::MissingSink("result"))?;
        let process_sink = process_sink.ok_or(Art2aError::MissingSink("process"))?;
        let (result_log, process_log) = self.logs()?;

        let mut report = ExportReport::default();
        export_log(result_log, result_sink, LogKind::Result, &mut report);
        export_log(process_log, process_sink, LogKind::Process, &mut report);
        Ok(report)
    }

    /// Create both files and write the logs into them.
    pub fn export_to_paths(
        &self,
        result_path: &Path,
        process_path: &Path,
    ) -> Art2aResult<ExportReport> {
        let (result_log, process_log) = self.logs()?;

        let mut report = ExportReport::default();
        export_log_to_path(result_log, result_path, LogKind::Result, &mut report);
        export_log_to_path(process_log, process_path, LogKind::Process, &mut report);
        Ok(report)
    }

    fn logs(&self) -> Art2aResult<(&ResultLog, &ResultLog)> {
        match (&self.result_log, &self.process_log) {
            (Some(r), Some(p)) => Ok((r, p)),
            _ => Err(Art2aError::ExportNotRequested),
        }
    }

    fn check_cluster(&self, cluster: usize) -> Art2aResult<()> {
        let count = self.clusters.len();
        if cluster >= count {
            return Err(Art2aError::InvalidClusterNumber { cluster, count });
        }
        Ok(())
    }
}

impl<T: Component> ClusteringResult for ClusterResult<T> {
    type Value = T;

    fn vigilance_parameter(&self) -> T {
        ClusterResult::vigilance_parameter(self)
    }

    fn number_of_epochs(&self) -> usize {
        ClusterResult::number_of_epochs(self)
    }

    fn number_of_detected_clusters(&self) -> usize {
        ClusterResult::number_of_detected_clusters(self)
    }

    fn cluster_view(&self) -> &[Option<usize>] {
        ClusterResult::cluster_view(self)
    }

    fn cluster_indices(&self, cluster: usize) -> Art2aResult<Vec<usize>> {
        ClusterResult::cluster_indices(self, cluster)
    }

    fn cluster_representative(&self, cluster: usize) -> Art2aResult<usize> {
        ClusterResult::cluster_representative(self, cluster)
    }

    fn angle_between_clusters(&self, a: usize, b: usize) -> Art2aResult<T> {
        ClusterResult::angle_between_clusters(self, a, b)
    }

    fn export_to_text_files(
        &self,
        result_sink: Option<&mut dyn Write>,
        process_sink: Option<&mut dyn Write>,
    ) -> Art2aResult<ExportReport> {
        ClusterResult::export_to_text_files(self, result_sink, process_sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(exported: bool) -> ResultParts<f64> {
        ResultParts {
            vigilance: 0.5,
            epochs: 2,
            clusters: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.6, 0.8]],
            view: vec![Some(0), None, Some(1), Some(0), Some(2)],
            data: vec![
                vec![2.0, 0.1],
                vec![0.0, 0.0],
                vec![0.0, 3.0],
                vec![1.0, 0.0],
                vec![0.6, 0.8],
            ],
            process_log: exported.then(ResultLog::new),
        }
    }

    #[test]
    fn test_sizes_exclude_unclassified() {
        let result = ClusterResult::new(parts(false)).unwrap();
        assert_eq!(result.cluster_sizes(), &[2, 1, 1]);
        assert_eq!(result.unclassified_indices(), vec![1]);
    }

    #[test]
    fn test_rejects_empty_cluster_and_bad_view() {
        let mut p = parts(false);
        p.view = vec![Some(0), None, Some(0), Some(0), Some(2)];
        assert!(ClusterResult::new(p).is_err());

        let mut p = parts(false);
        p.view[0] = Some(7);
        assert!(matches!(
            ClusterResult::new(p),
            Err(Art2aError::InvalidClusterNumber { cluster: 7, count: 3 })
        ));

        let mut p = parts(false);
        p.vigilance = 1.0;
        assert!(matches!(
            ClusterResult::new(p),
            Err(Art2aError::InvalidVigilance(_))
        ));
    }

    #[test]
    fn test_representative_scores_raw_input_rows() {
        let result = ClusterResult::new(parts(false)).unwrap();
        // Row 0 scores 2.0 against (1, 0), row 3 only 1.0.
        assert_eq!(result.cluster_representative(0).unwrap(), 0);
        assert_eq!(result.cluster_representative(0).unwrap(), 0);
    }

    #[test]
    fn test_representative_prefers_longer_member() {
        let mut p = parts(false);
        p.clusters = vec![vec![0.980, 0.199]];
        p.view = vec![Some(0), Some(0), Some(0)];
        p.data = vec![vec![10.0, 3.0], vec![1.0, 0.2], vec![1.0, 0.25]];
        let result = ClusterResult::new(p).unwrap();
        // Row 1 is the best aligned, but row 0 has the largest dot product.
        assert_eq!(result.cluster_representative(0).unwrap(), 0);
    }

    #[test]
    fn test_representative_first_member_wins_tie() {
        let mut p = parts(false);
        p.clusters = vec![vec![1.0, 0.0]];
        p.view = vec![Some(0), Some(0), Some(0)];
        p.data = vec![vec![1.0, 0.0], vec![2.0, 0.5], vec![2.0, 0.0]];
        let result = ClusterResult::new(p).unwrap();
        assert_eq!(result.cluster_representative(0).unwrap(), 1);
    }

    #[test]
    fn test_angles() {
        let result = ClusterResult::new(parts(false)).unwrap();
        assert_eq!(result.angle_between_clusters(1, 1).unwrap(), 0.0);
        let a = result.angle_between_clusters(0, 1).unwrap();
        assert!((a - 90.0).abs() < 1e-9);
        let b = result.angle_between_clusters(2, 0).unwrap();
        assert_eq!(b, result.angle_between_clusters(0, 2).unwrap());
        assert!((b - 0.6f64.acos().to_degrees()).abs() < 1e-9);
        assert!(result.angle_between_clusters(0, 3).is_err());
        assert!(result.angle_between_clusters(3, 3).is_err());
    }

    #[test]
    fn test_pair_slots_are_distinct() {
        let result = ClusterResult::new(parts(false)).unwrap();
        let slots = [
            result.pair_slot(0, 1),
            result.pair_slot(0, 2),
            result.pair_slot(1, 2),
        ];
        assert_eq!(slots, [0, 1, 2]);
    }

    #[test]
    fn test_export_requires_logs() {
        let result = ClusterResult::new(parts(false)).unwrap();
        let mut a = Vec::new();
        let mut b = Vec::new();
        assert!(matches!(
            result.export_to_text_files(Some(&mut a), Some(&mut b)),
            Err(Art2aError::ExportNotRequested)
        ));
    }

    #[test]
    fn test_export_requires_sinks() {
        let result = ClusterResult::new(parts(true)).unwrap();
        let mut a = Vec::new();
        assert!(matches!(
            result.export_to_text_files(Some(&mut a), None),
            Err(Art2aError::MissingSink("process"))
        ));
        assert!(matches!(
            result.export_to_text_files(None, Some(&mut a)),
            Err(Art2aError::MissingSink("result"))
        ));
    }
}
