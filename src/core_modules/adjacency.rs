// THEORY:
// The edge scanner is the engine of the graph construction layer. It converts
// a rectangular grid of samples into the weighted undirected graph the merge
// loop consumes, connecting each cell to its surrounding neighbors.
//
// Key architectural principles & algorithm steps:
// 1.  **8-Neighborhood**: Each cell is linked to the 8 cells immediately
//     around it (offsets (-1,-1)..(1,1) excluding (0,0)); offsets that fall
//     outside the grid bounds are skipped.
// 2.  **Combined weight**: An edge's weight is the 5-dimensional Euclidean
//     distance over the two cells' channel triples plus their row/column
//     offsets. The positional terms bias the graph toward spatial locality
//     on top of color similarity, favoring compact regions.
// 3.  **Similarity cutoff**: Edges weighing at or above the cutoff are
//     discarded at construction and never reach the merge loop. This bounds
//     graph density: pairs that dissimilar would never usefully merge.
// 4.  **Canonical direction**: A naive scan visits every unordered pair from
//     both endpoints. Only the visit from the lower vertex id is kept, so the
//     edge list carries each surviving pair exactly once.
// 5.  **Stateless utility**: Pure construction over an immutable grid; the
//     per-row entry point below exists so the scan can be partitioned across
//     workers without any shared mutable state.

use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::pixel_grid::{PixelGrid, VertexId};

pub mod adjacency {
    use super::*;

    pub type Weight = f64;

    /// An undirected link between two grid cells, weighted by combined
    /// color and positional dissimilarity. Immutable once built.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Edge {
        pub u: VertexId,
        pub v: VertexId,
        pub weight: Weight,
    }

    /// Scans the whole grid and returns every edge below the cutoff.
    pub fn build_edges(grid: &PixelGrid, similarity_cutoff: Weight) -> Vec<Edge> {
        let mut edges = Vec::new();
        for row in 0..grid.height() {
            scan_row(grid, row, similarity_cutoff, &mut edges);
        }
        edges
    }

    /// Scans a single row's cells against their neighbors, appending the
    /// surviving edges. Every canonical pair is emitted by the row of its
    /// lower endpoint, so disjoint row bands partition the scan exactly.
    pub fn scan_row(grid: &PixelGrid, row: usize, similarity_cutoff: Weight, edges: &mut Vec<Edge>) {
        let grid_height = grid.height() as i32;
        let grid_width = grid.width() as i32;

        for col in 0..grid.width() {
            let current_vertex = grid.vertex_id(row, col);
            let current_pixel = grid.pixel_at(row, col);

            for d_row in -1..=1 {
                for d_col in -1..=1 {
                    if d_row == 0 && d_col == 0 {
                        continue;
                    }

                    let neighbor_row = row as i32 + d_row;
                    let neighbor_col = col as i32 + d_col;
                    if neighbor_row < 0
                        || neighbor_row >= grid_height
                        || neighbor_col < 0
                        || neighbor_col >= grid_width
                    {
                        continue;
                    }

                    let neighbor_vertex =
                        grid.vertex_id(neighbor_row as usize, neighbor_col as usize);
                    // Keep only the visit from the lower endpoint; the other
                    // direction produces the same unordered pair.
                    if neighbor_vertex <= current_vertex {
                        continue;
                    }

                    let neighbor_pixel = grid.pixel_at(neighbor_row as usize, neighbor_col as usize);
                    let weight =
                        edge_weight(current_pixel, neighbor_pixel, d_row as f64, d_col as f64);
                    if weight < similarity_cutoff {
                        edges.push(Edge {
                            u: current_vertex,
                            v: neighbor_vertex,
                            weight,
                        });
                    }
                }
            }
        }
    }

    /// 5-D Euclidean distance over channels and grid offsets.
    fn edge_weight(a: &Pixel, b: &Pixel, d_row: f64, d_col: f64) -> Weight {
        (a.channel_distance_sq(b) + d_row * d_row + d_col * d_col).sqrt()
    }
}
