//! Mipmap pyramid construction.
//!
//! Every level below the base is resampled directly from level 0 rather
//! than from the previous level, so filter error does not accumulate down
//! the chain. Levels are independent, which also lets them resample in
//! parallel.

use crate::format::{mip_dimension, mip_level_count, ResizeFilter};
use crate::raster::Raster;
use image::{imageops, RgbaImage};
use rayon::prelude::*;

/// Build the padded level pyramid for a decoded base image.
///
/// With `mipmaps` disabled the pyramid is just the base level. Otherwise it
/// has `floor(log2(max(w, h))) + 1` levels, level `k` sized
/// `max(1, w >> k) x max(1, h >> k)`.
pub fn build_pyramid(base: RgbaImage, mipmaps: bool, filter: ResizeFilter) -> Vec<Raster> {
    let (width, height) = base.dimensions();
    let level_count = if mipmaps {
        mip_level_count(width, height)
    } else {
        1
    };

    let tail: Vec<Raster> = (1..level_count)
        .into_par_iter()
        .map(|level| {
            let resized = imageops::resize(
                &base,
                mip_dimension(width, level),
                mip_dimension(height, level),
                filter.kernel(),
            );
            Raster::from_rgba(&resized)
        })
        .collect();

    let mut levels = Vec::with_capacity(level_count as usize);
    levels.push(Raster::from_rgba(&base));
    levels.extend(tail);
    levels
}
