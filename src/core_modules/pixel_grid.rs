// THEORY:
// The `PixelGrid` is the validated, rectangular container the rest of the
// engine reads from. Its primary role is to turn loosely structured input
// (decoded image buffers, row lists in tests) into a flat, row-major sample
// store with cheap index arithmetic.
//
// Key architectural principles:
// 1.  **Single validation point**: Every constructor rejects malformed shapes
//     (zero dimension, rows of uneven width) before any pixel is stored, so
//     downstream modules never re-check grid geometry.
// 2.  **Vertex identity**: A cell at (row, col) doubles as graph vertex
//     `row * width + col`. The grid owns this mapping in both directions and
//     everything else (edges, forest, partition) speaks vertex ids only.
// 3.  **Read-only to the core**: The engine borrows the grid immutably; no
//     component ever writes pixels back.

use crate::core_modules::error::SegmentationError;
use crate::core_modules::pixel::pixel::Pixel;
use image::RgbImage;

/// Identifies a grid cell as a graph vertex: `row * width + col`.
pub type VertexId = usize;

/// A validated, row-major rectangular grid of RGB samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    height: usize,
    width: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Builds a grid from explicit rows, verifying that the shape is
    /// rectangular and non-empty.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, SegmentationError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(SegmentationError::InvalidGrid { height, width });
        }
        for (row, samples) in rows.iter().enumerate() {
            if samples.len() != width {
                return Err(SegmentationError::RaggedRow {
                    row,
                    expected: width,
                    actual: samples.len(),
                });
            }
        }

        let mut pixels = Vec::with_capacity(height * width);
        for row in rows {
            pixels.extend(row);
        }
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    /// Builds a grid from a decoded RGB8 buffer. Grayscale sources are
    /// expected to have been replicated into all three channels by the
    /// decoder already.
    pub fn from_rgb_image(image: &RgbImage) -> Result<Self, SegmentationError> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        if height == 0 || width == 0 {
            return Err(SegmentationError::InvalidGrid { height, width });
        }

        let mut pixels = Vec::with_capacity(height * width);
        for sample in image.pixels() {
            pixels.push(Pixel::from(&sample.0[..]));
        }
        Ok(Self {
            height,
            width,
            pixels,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells, which is also the graph's vertex count.
    pub fn vertex_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn pixel_at(&self, row: usize, col: usize) -> &Pixel {
        assert!(
            row < self.height && col < self.width,
            "grid index out of bounds"
        );
        &self.pixels[row * self.width + col]
    }

    pub fn vertex_id(&self, row: usize, col: usize) -> VertexId {
        row * self.width + col
    }

    pub fn position_of(&self, vertex: VertexId) -> (usize, usize) {
        (vertex / self.width, vertex % self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_empty_grid() {
        assert_eq!(
            PixelGrid::from_rows(Vec::new()),
            Err(SegmentationError::InvalidGrid {
                height: 0,
                width: 0
            })
        );
        assert_eq!(
            PixelGrid::from_rows(vec![Vec::new()]),
            Err(SegmentationError::InvalidGrid {
                height: 1,
                width: 0
            })
        );
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![
            vec![Pixel::splat(0), Pixel::splat(0)],
            vec![Pixel::splat(0)],
        ];
        assert_eq!(
            PixelGrid::from_rows(rows),
            Err(SegmentationError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn vertex_id_round_trips_through_position() {
        let rows = vec![vec![Pixel::splat(7); 5]; 3];
        let grid = PixelGrid::from_rows(rows).expect("valid grid");
        assert_eq!(grid.vertex_count(), 15);
        assert_eq!(grid.vertex_id(2, 3), 13);
        assert_eq!(grid.position_of(13), (2, 3));
    }

    #[test]
    fn from_rgb_image_preserves_samples() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(1, 0, image::Rgb([10, 20, 30]));
        let grid = PixelGrid::from_rgb_image(&image).expect("valid grid");
        assert_eq!(grid.pixel_at(0, 1), &Pixel::new(10, 20, 30));
        assert_eq!(grid.pixel_at(0, 0), &Pixel::splat(0));
    }
}
