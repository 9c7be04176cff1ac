use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use mosaic_vision::core_modules::pixel_grid::PixelGrid;
use mosaic_vision::parallel_pipeline::ParallelPipeline;
use mosaic_vision::pipeline::{
    DEFAULT_GRANULARITY, DEFAULT_SIMILARITY_CUTOFF, SegmentationConfig, SegmentationPipeline,
};
use mosaic_vision::visualizer;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "mosaic_vision", version, about = "Graph-based image segmentation")]
struct Cli {
    /// Input image path
    input: String,
    /// Output path for the colorized region image
    output: String,

    /// Neighbor-similarity cutoff; edges at or above it are discarded
    #[arg(long = "cutoff", default_value_t = DEFAULT_SIMILARITY_CUTOFF)]
    cutoff: f64,
    /// Granularity constant K; larger values favor fewer, larger regions
    #[arg(short = 'k', long = "granularity", default_value_t = DEFAULT_GRANULARITY)]
    granularity: f64,
    /// Workers for the edge-scanning phase (0 = one per logical CPU,
    /// 1 = fully sequential)
    #[arg(long = "threads", default_value_t = 0)]
    threads: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // --- 1. Load & Grid Construction ---
    // Grayscale sources are replicated into all three channels here.
    let decoded = image::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    let grid = PixelGrid::from_rgb_image(&decoded)?;
    info!(
        "loaded {} ({}x{}, {} cells)",
        cli.input,
        width,
        height,
        grid.vertex_count()
    );

    // --- 2. Segmentation ---
    let config = SegmentationConfig {
        similarity_cutoff: cli.cutoff,
        granularity: cli.granularity,
    };
    let partition = if cli.threads == 1 {
        SegmentationPipeline::new(config).segment(&grid)?
    } else {
        let pipeline = if cli.threads == 0 {
            ParallelPipeline::new(config)
        } else {
            ParallelPipeline::with_workers(config, cli.threads)
        };
        pipeline.segment(Arc::new(grid)).await?
    };
    info!("partitioned into {} regions", partition.region_count());

    // --- 3. Visualization & Save ---
    let rendered = visualizer::render_partition(&partition, width, height);
    rendered
        .save(&cli.output)
        .with_context(|| format!("failed to save {}", cli.output))?;
    info!("segmented image saved to {}", cli.output);

    Ok(())
}
