use crate::core_modules::adjacency::adjacency::{self, Edge};
use crate::core_modules::error::SegmentationError;
use crate::core_modules::pixel_grid::PixelGrid;
use crate::pipeline::{Partition, SegmentationConfig, SegmentationPipeline};
use log::debug;
use std::sync::Arc;

/// Runs the read-only edge-scanning phase across a pool of workers, one
/// contiguous band of rows per task, then hands the combined edge list to
/// the strictly sequential merge phase. Only the scan is parallel: every
/// merge decision reads component statistics the previous merge may have
/// updated, so that loop cannot be split.
///
/// Bands are concatenated in row order, which makes the edge stream (and
/// therefore the partition) identical to a sequential scan.
pub struct ParallelPipeline {
    inner: SegmentationPipeline,
    workers: usize,
}

impl ParallelPipeline {
    /// One worker per logical CPU.
    pub fn new(config: SegmentationConfig) -> Self {
        Self::with_workers(config, num_cpus::get())
    }

    pub fn with_workers(config: SegmentationConfig, workers: usize) -> Self {
        Self {
            inner: SegmentationPipeline::new(config),
            workers: workers.max(1),
        }
    }

    pub fn config(&self) -> &SegmentationConfig {
        self.inner.config()
    }

    pub async fn segment(&self, grid: Arc<PixelGrid>) -> Result<Partition, SegmentationError> {
        let edges = self.build_edges(Arc::clone(&grid)).await;
        self.inner.partition_edges(grid.vertex_count(), edges)
    }

    async fn build_edges(&self, grid: Arc<PixelGrid>) -> Vec<Edge> {
        let height = grid.height();
        let workers = self.workers.min(height);
        let rows_per_band = height.div_ceil(workers);
        let cutoff = self.config().similarity_cutoff;
        debug!("scanning {height} rows across {workers} workers");

        let mut handles = Vec::with_capacity(workers);
        for band in 0..workers {
            let band_start = band * rows_per_band;
            let band_end = ((band + 1) * rows_per_band).min(height);
            if band_start >= band_end {
                continue;
            }
            let grid = Arc::clone(&grid);
            handles.push(tokio::spawn(async move {
                let mut edges = Vec::new();
                for row in band_start..band_end {
                    adjacency::scan_row(&grid, row, cutoff, &mut edges);
                }
                edges
            }));
        }

        let mut edges = Vec::new();
        for band in futures::future::join_all(handles).await {
            // The scan tasks are pure reads over the shared grid; a join
            // failure means one of them panicked.
            let mut band_edges = band.expect("edge-scanning worker panicked");
            edges.append(&mut band_edges);
        }
        edges
    }
}
