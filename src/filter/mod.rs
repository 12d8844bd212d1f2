mod color_key;

pub use color_key::ColorKey;

use image::RgbaImage;

/// Pixel counts gathered during a single pass.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub removed: usize,
}

pub trait Filter {
    /// Rewrites `buffer` in place. Dimensions never change.
    fn transform_buffer(&self, buffer: &mut RgbaImage) -> Stats;
}
