// THEORY:
// The `ComponentForest` is the stateful heart of the merge phase: a union-find
// over grid vertices that also carries the two statistics the merge criterion
// reads, per component. It is exclusively owned by one segmentation run.
//
// Key architectural principles:
// 1.  **Arena storage**: Four flat arrays indexed by vertex id (parent, rank,
//     size, internal difference). No per-vertex allocation, no global state.
// 2.  **Write-once-merge-only**: Components only ever grow. There is no
//     deletion or rollback; a merged component's statistics derive solely
//     from its two predecessors and the absorbed edge.
// 3.  **Statistics at the root**: `size` and `internal_difference` are only
//     meaningful at a component's canonical root. The accessors resolve any
//     member vertex to its root first.
// 4.  **Boundary validation**: Every public operation rejects vertex ids
//     outside `[0, vertex_count)`; an out-of-range id is a caller bug and is
//     reported as such rather than panicking deep in array indexing.

use crate::core_modules::adjacency::adjacency::Weight;
use crate::core_modules::error::SegmentationError;
use crate::core_modules::pixel_grid::VertexId;

/// Union-find over vertices with per-component size and internal difference.
pub struct ComponentForest {
    parents: Vec<VertexId>,
    ranks: Vec<u32>,
    sizes: Vec<usize>,
    internal_diffs: Vec<Weight>,
}

impl ComponentForest {
    /// Creates a forest of `vertex_count` singleton components: every vertex
    /// its own root, size 1, internal difference 0.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            parents: (0..vertex_count).collect(),
            ranks: vec![0; vertex_count],
            sizes: vec![1; vertex_count],
            internal_diffs: vec![0.0; vertex_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.parents.len()
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<(), SegmentationError> {
        if vertex >= self.parents.len() {
            return Err(SegmentationError::UnknownVertex {
                vertex,
                vertex_count: self.parents.len(),
            });
        }
        Ok(())
    }

    /// Resolves the canonical root for `vertex`, halving paths along the way.
    pub fn find(&mut self, vertex: VertexId) -> Result<VertexId, SegmentationError> {
        self.check_vertex(vertex)?;
        let mut current = vertex;
        while self.parents[current] != current {
            self.parents[current] = self.parents[self.parents[current]];
            current = self.parents[current];
        }
        Ok(current)
    }

    /// Fuses the components containing `u` and `v`, attaching by rank. The
    /// merged component's size is the sum of its predecessors' sizes and its
    /// internal difference becomes `edge_weight`: callers feed edges in
    /// non-decreasing weight order, so the merging edge is the largest the
    /// component has absorbed. A no-op when both vertices already share a
    /// root, which lets duplicate edges pass through harmlessly.
    pub fn merge(
        &mut self,
        u: VertexId,
        v: VertexId,
        edge_weight: Weight,
    ) -> Result<(), SegmentationError> {
        let root_u = self.find(u)?;
        let root_v = self.find(v)?;
        if root_u == root_v {
            return Ok(());
        }

        // Ties keep the first root, so the outcome is deterministic.
        let (winner, loser) = if self.ranks[root_u] >= self.ranks[root_v] {
            (root_u, root_v)
        } else {
            (root_v, root_u)
        };
        self.parents[loser] = winner;
        if self.ranks[root_u] == self.ranks[root_v] {
            self.ranks[winner] += 1;
        }
        self.sizes[winner] += self.sizes[loser];
        self.internal_diffs[winner] = edge_weight;
        Ok(())
    }

    /// Member count of the component containing `vertex`.
    pub fn size_of(&mut self, vertex: VertexId) -> Result<usize, SegmentationError> {
        let root = self.find(vertex)?;
        Ok(self.sizes[root])
    }

    /// Largest edge weight absorbed so far inside the component containing
    /// `vertex`; 0 for a singleton.
    pub fn internal_difference(&mut self, vertex: VertexId) -> Result<Weight, SegmentationError> {
        let root = self.find(vertex)?;
        Ok(self.internal_diffs[root])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_singletons() {
        let mut forest = ComponentForest::new(4);
        for vertex in 0..4 {
            assert_eq!(forest.find(vertex).unwrap(), vertex);
            assert_eq!(forest.size_of(vertex).unwrap(), 1);
            assert_eq!(forest.internal_difference(vertex).unwrap(), 0.0);
        }
    }

    #[test]
    fn merge_combines_sizes_and_records_edge_weight() {
        let mut forest = ComponentForest::new(4);
        forest.merge(0, 1, 2.0).unwrap();
        forest.merge(2, 3, 3.0).unwrap();
        forest.merge(0, 2, 5.0).unwrap();

        let root = forest.find(0).unwrap();
        assert_eq!(forest.find(3).unwrap(), root);
        assert_eq!(forest.size_of(3).unwrap(), 4);
        assert_eq!(forest.internal_difference(1).unwrap(), 5.0);
    }

    #[test]
    fn internal_difference_grows_with_sorted_merges() {
        let mut forest = ComponentForest::new(3);
        forest.merge(0, 1, 1.0).unwrap();
        assert_eq!(forest.internal_difference(0).unwrap(), 1.0);
        forest.merge(1, 2, 4.0).unwrap();
        assert_eq!(forest.internal_difference(2).unwrap(), 4.0);
    }

    #[test]
    fn merge_of_joined_vertices_is_a_no_op() {
        let mut forest = ComponentForest::new(2);
        forest.merge(0, 1, 2.0).unwrap();
        let size_before = forest.size_of(0).unwrap();
        let diff_before = forest.internal_difference(0).unwrap();

        forest.merge(1, 0, 99.0).unwrap();
        assert_eq!(forest.size_of(0).unwrap(), size_before);
        assert_eq!(forest.internal_difference(0).unwrap(), diff_before);
    }

    #[test]
    fn find_is_idempotent() {
        let mut forest = ComponentForest::new(5);
        forest.merge(0, 1, 1.0).unwrap();
        forest.merge(1, 2, 1.5).unwrap();
        forest.merge(2, 3, 2.0).unwrap();

        let root = forest.find(3).unwrap();
        assert_eq!(forest.find(root).unwrap(), root);
        assert_eq!(forest.find(3).unwrap(), root);
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let mut forest = ComponentForest::new(3);
        assert_eq!(
            forest.find(3),
            Err(SegmentationError::UnknownVertex {
                vertex: 3,
                vertex_count: 3
            })
        );
        assert!(forest.merge(0, 7, 1.0).is_err());
        assert!(forest.size_of(5).is_err());
        assert!(forest.internal_difference(4).is_err());
    }
}
