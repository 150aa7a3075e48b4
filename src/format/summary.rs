//! Serializable summary of a clustering result, used for the result log and
//! for CLI output.

use serde::Serialize;

use crate::result::ClusteringResult;
use crate::types::{Art2aResult, Component};

/// One cluster in a [`ResultSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub index: usize,
    pub size: usize,
    pub representative: usize,
    pub members: Vec<usize>,
}

/// Everything a caller usually wants to know about a converged run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub precision: &'static str,
    pub vigilance: f64,
    pub epochs: usize,
    pub cluster_count: usize,
    pub clusters: Vec<ClusterSummary>,
    /// Indices of null vectors that were not clustered.
    pub unclassified: Vec<usize>,
    /// Full symmetric angle matrix in degrees.
    pub angles: Vec<Vec<f64>>,
}

impl ResultSummary {
    /// Collect a summary by querying `result`.
    pub fn from_result<R: ClusteringResult + ?Sized>(result: &R) -> Art2aResult<Self> {
        let count = result.number_of_detected_clusters();

        let mut clusters = Vec::with_capacity(count);
        for index in 0..count {
            let members = result.cluster_indices(index)?;
            clusters.push(ClusterSummary {
                index,
                size: members.len(),
                representative: result.cluster_representative(index)?,
                members,
            });
        }

        let mut angles = vec![vec![0.0; count]; count];
        for a in 0..count {
            for b in (a + 1)..count {
                let angle = result.angle_between_clusters(a, b)?.to_f64();
                angles[a][b] = angle;
                angles[b][a] = angle;
            }
        }

        let unclassified = result
            .cluster_view()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
            .collect();

        Ok(Self {
            precision: <R::Value as Component>::NAME,
            vigilance: result.vigilance_parameter().to_f64(),
            epochs: result.number_of_epochs(),
            cluster_count: count,
            clusters,
            unclassified,
            angles,
        })
    }

    /// Render as human-readable lines.
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("ART-2A clustering result ({} precision)", self.precision),
            format!("Vigilance parameter: {}", self.vigilance),
            format!("Number of epochs: {}", self.epochs),
            format!("Number of detected clusters: {}", self.cluster_count),
        ];
        if !self.unclassified.is_empty() {
            lines.push(format!(
                "Unclassified null vectors: {}",
                join(&self.unclassified)
            ));
        }
        for cluster in &self.clusters {
            lines.push(format!(
                "Cluster {}: size {}, representative {}, members {}",
                cluster.index,
                cluster.size,
                cluster.representative,
                join(&cluster.members)
            ));
        }
        lines.push("Angles between clusters (degrees):".to_string());
        for (i, row) in self.angles.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|a| format!("{:.3}", a)).collect();
            lines.push(format!("Cluster {}: {}", i, cells.join(" ")));
        }
        lines
    }
}

fn join(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
