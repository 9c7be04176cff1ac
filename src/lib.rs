// THEORY:
// This file is the main entry point for the `mosaic_vision` library crate.
// It exports the `SegmentationPipeline` and its associated data structures
// (`SegmentationConfig`, `Partition`) as the clean, high-level interface for
// the segmentation engine: Felzenszwalb–Huttenlocher-style graph clustering
// over a pixel-adjacency graph, with an adaptive per-region merge threshold.
//
// The internal modules (`core_modules`) hold the building blocks: the grid
// container, the neighborhood edge scanner, and the union-find forest that
// tracks evolving regions. The `visualizer` module is a thin rendering
// collaborator around the finished partition.

pub mod core_modules;
pub mod parallel_pipeline;
pub mod pipeline;
pub mod visualizer;
