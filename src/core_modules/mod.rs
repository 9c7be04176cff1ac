pub mod adjacency;
pub mod component_forest;
pub mod error;
pub mod pixel;
pub mod pixel_grid;
