use image::{Pixel, Rgba, RgbaImage};
use rayon::prelude::*;

use super::{Filter, Stats};
use crate::color::{RemovalSet, TRANSPARENT};

/// Replaces every pixel in the removal set with [`TRANSPARENT`].
pub struct ColorKey {
    removal: RemovalSet,
    parallel: bool,
}

impl ColorKey {
    pub fn new(removal: RemovalSet) -> Self {
        Self {
            removal,
            parallel: false,
        }
    }

    /// Split the pass across the current rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn removal(&self) -> &RemovalSet {
        &self.removal
    }

    #[inline]
    fn key_pixel(&self, px: &mut Rgba<u8>) -> bool {
        if self.removal.matches(px) {
            *px = TRANSPARENT;
            true
        } else {
            false
        }
    }
}

impl Filter for ColorKey {
    fn transform_buffer(&self, buffer: &mut RgbaImage) -> Stats {
        let total = buffer.width() as usize * buffer.height() as usize;

        let removed = if self.parallel {
            buffer
                .par_chunks_exact_mut(4)
                .map(|px| self.key_pixel(Rgba::from_slice_mut(px)))
                .filter(|&hit| hit)
                .count()
        } else {
            buffer
                .pixels_mut()
                .map(|px| self.key_pixel(px))
                .filter(|&hit| hit)
                .count()
        };

        Stats { total, removed }
    }
}
