// THEORY:
// The `pipeline` module is the top-level API for the segmentation engine. It
// encapsulates the full stack (edge scanning, edge ordering, the adaptive
// merge loop, partition read-out) behind a single entry point, so a caller
// hands in a grid and tunables and receives the finished partition.
//
// The merge criterion is the classic adaptive one: an edge (u, v, w) fuses
// its two endpoint components only while w stays below
// min(Int(Cu) + K/|Cu|, Int(Cv) + K/|Cv|). Processing edges in
// non-decreasing weight order is what makes that test meaningful at every
// step: whenever a merge happens, the merging edge is the largest edge the
// resulting component has absorbed, so each component's internal difference
// is exactly the statistic the next test needs.

use crate::core_modules::adjacency::adjacency::{self, Edge};
use crate::core_modules::component_forest::ComponentForest;
use crate::core_modules::error::SegmentationError;
use crate::core_modules::pixel_grid::{PixelGrid, VertexId};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Neighbor-similarity cutoff reproducing the reference behavior.
pub const DEFAULT_SIMILARITY_CUTOFF: f64 = 120.0;
/// Granularity constant K reproducing the reference behavior.
pub const DEFAULT_GRANULARITY: f64 = 5000.0;

/// Configuration for the SegmentationPipeline, allowing for tunable behavior.
#[derive(Debug, Clone)]
pub struct SegmentationConfig {
    /// Edges weighing at or above this value are discarded during graph
    /// construction and never considered for merging.
    pub similarity_cutoff: f64,
    /// Region-size bias K. Larger values favor fewer, larger regions;
    /// smaller values permit finer-grained ones.
    pub granularity: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            similarity_cutoff: DEFAULT_SIMILARITY_CUTOFF,
            granularity: DEFAULT_GRANULARITY,
        }
    }
}

/// The final grouping of every grid cell into disjoint regions. Covers each
/// vertex exactly once; immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// Region label per vertex, assigned compactly in first-vertex order.
    labels: Vec<usize>,
    /// Member vertices per region, indexed by label.
    regions: Vec<Vec<VertexId>>,
}

impl Partition {
    fn from_forest(forest: &mut ComponentForest) -> Result<Self, SegmentationError> {
        let vertex_count = forest.vertex_count();
        let mut label_of_root: HashMap<VertexId, usize> = HashMap::new();
        let mut labels = Vec::with_capacity(vertex_count);
        let mut regions: Vec<Vec<VertexId>> = Vec::new();

        for vertex in 0..vertex_count {
            let root = forest.find(vertex)?;
            let label = *label_of_root.entry(root).or_insert_with(|| {
                regions.push(Vec::new());
                regions.len() - 1
            });
            labels.push(label);
            regions[label].push(vertex);
        }
        Ok(Self { labels, regions })
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    /// Member vertex lists, one per region.
    pub fn regions(&self) -> &[Vec<VertexId>] {
        &self.regions
    }

    /// Region label per vertex.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn label_of(&self, vertex: VertexId) -> Option<usize> {
        self.labels.get(vertex).copied()
    }

    /// True when no merge happened at all and every cell stayed a singleton.
    pub fn is_degenerate(&self) -> bool {
        self.regions.len() == self.labels.len()
    }
}

/// The main, top-level struct for the segmentation engine.
pub struct SegmentationPipeline {
    config: SegmentationConfig,
}

impl SegmentationPipeline {
    pub fn new(config: SegmentationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Runs the full sequence on one grid: scan, order, merge, read out.
    pub fn segment(&self, grid: &PixelGrid) -> Result<Partition, SegmentationError> {
        let edges = adjacency::build_edges(grid, self.config.similarity_cutoff);
        self.partition_edges(grid.vertex_count(), edges)
    }

    /// The ordering and merge phases over a pre-built edge list. The parallel
    /// scanner hands its edges in here; everything past this point is
    /// strictly sequential because each merge decision reads statistics the
    /// previous merge may have updated.
    pub fn partition_edges(
        &self,
        vertex_count: usize,
        mut edges: Vec<Edge>,
    ) -> Result<Partition, SegmentationError> {
        if vertex_count == 0 {
            return Err(SegmentationError::InvalidGrid {
                height: 0,
                width: 0,
            });
        }
        if edges.is_empty() {
            // Valid but degenerate: every cell stays its own region.
            warn!("no edges survived the similarity cutoff; returning an all-singleton partition");
        }

        // Non-decreasing weight order with a positional tie-break, so the
        // outcome does not depend on the sort's stability. Weights are finite
        // by construction.
        edges.sort_by(|a, b| {
            a.weight
                .partial_cmp(&b.weight)
                .unwrap_or(Ordering::Equal)
                .then_with(|| (a.u, a.v).cmp(&(b.u, b.v)))
        });

        let mut forest = ComponentForest::new(vertex_count);
        let mut merges = 0usize;
        for edge in &edges {
            let root_u = forest.find(edge.u)?;
            let root_v = forest.find(edge.v)?;
            if root_u == root_v {
                continue;
            }
            if edge.weight < self.merge_threshold(&mut forest, root_u, root_v)? {
                forest.merge(root_u, root_v, edge.weight)?;
                merges += 1;
            }
            // A rejected edge is never revisited; the two components may
            // still fuse later through a different edge that passes the test.
        }
        debug!(
            "{merges} merges across {} candidate edges for {vertex_count} cells",
            edges.len()
        );

        Partition::from_forest(&mut forest)
    }

    /// The pairwise merge test threshold: the smaller of the two components'
    /// dissimilarity budgets Int(C) + K/|C|.
    fn merge_threshold(
        &self,
        forest: &mut ComponentForest,
        root_u: VertexId,
        root_v: VertexId,
    ) -> Result<f64, SegmentationError> {
        let budget_u = forest.internal_difference(root_u)?
            + self.config.granularity / forest.size_of(root_u)? as f64;
        let budget_v = forest.internal_difference(root_v)?
            + self.config.granularity / forest.size_of(root_v)? as f64;
        Ok(budget_u.min(budget_v))
    }
}
