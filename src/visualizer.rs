// Rendering collaborator: paints a finished partition so regions are visible
// at a glance. Display colors are arbitrary and carry no meaning, so this is
// the one place randomness is allowed; the engine itself stays deterministic.

use crate::pipeline::Partition;
use image::{Rgb, RgbImage};
use rand::Rng;

/// Paints every region of `partition` with its own random display color.
/// The partition must come from a grid with the given dimensions.
pub fn render_partition(partition: &Partition, width: u32, height: u32) -> RgbImage {
    assert_eq!(
        partition.vertex_count(),
        (width as usize) * (height as usize),
        "partition does not match the image dimensions"
    );

    let mut rng = rand::rng();
    let colors: Vec<Rgb<u8>> = (0..partition.region_count())
        .map(|_| Rgb(rng.random::<[u8; 3]>()))
        .collect();

    let mut image = RgbImage::new(width, height);
    for (vertex, &label) in partition.labels().iter().enumerate() {
        let x = (vertex % width as usize) as u32;
        let y = (vertex / width as usize) as u32;
        image.put_pixel(x, y, colors[label]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::core_modules::pixel_grid::PixelGrid;
    use crate::pipeline::{SegmentationConfig, SegmentationPipeline};

    #[test]
    fn regions_render_as_flat_color_areas() {
        let mut rows = vec![vec![Pixel::splat(0); 4]; 2];
        rows.extend(vec![vec![Pixel::splat(255); 4]; 2]);
        let grid = PixelGrid::from_rows(rows).expect("valid grid");
        let partition = SegmentationPipeline::new(SegmentationConfig::default())
            .segment(&grid)
            .expect("segmentation succeeds");

        let image = render_partition(&partition, 4, 4);
        assert_eq!(image.dimensions(), (4, 4));

        // Same region, same color; the two halves may collide only by chance
        // so the invariant checked is within-region uniformity.
        let top = image.get_pixel(0, 0);
        let bottom = image.get_pixel(0, 2);
        for x in 0..4 {
            assert_eq!(image.get_pixel(x, 0), top);
            assert_eq!(image.get_pixel(x, 1), top);
            assert_eq!(image.get_pixel(x, 2), bottom);
            assert_eq!(image.get_pixel(x, 3), bottom);
        }
    }
}
