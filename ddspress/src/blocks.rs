//! Reordering padded rasters into 4x4 pixel tiles.
//!
//! Block compression consumes 4x4 tiles, so each level's raster is
//! rearranged into a flat buffer of 64-byte tiles in row-major tile order.
//! Tile `(tx, ty)` holds the 16 pixels at source coordinates
//! `(tx*4 + u, ty*4 + v)`, row-major within the tile.

use crate::raster::Raster;
use crate::ERROR_FILE_INDEX;

/// Bytes in one 4x4 RGBA8 tile.
pub const TILE_BYTES: usize = 64;

/// One mipmap level as a sequence of 4x4 tiles.
#[derive(Debug, Clone)]
pub struct BlockGrid {
    width_blocks: u32,
    height_blocks: u32,
    tiles: Vec<u8>,
}

impl BlockGrid {
    /// Rearrange a padded raster into tile order.
    pub fn from_raster(raster: &Raster) -> Self {
        let width_blocks = raster.padded_width() / 4;
        let height_blocks = raster.padded_height() / 4;
        let stride = raster.padded_width() as usize * 4;
        let data = raster.data();

        let mut tiles = Vec::with_capacity((width_blocks * height_blocks) as usize * TILE_BYTES);
        for ty in 0..height_blocks {
            for tx in 0..width_blocks {
                for v in 0..4 {
                    let row = (ty * 4 + v) as usize * stride + (tx * 4) as usize * 4;
                    tiles.extend_from_slice(&data[row..row + 16]);
                }
            }
        }

        Self {
            width_blocks,
            height_blocks,
            tiles,
        }
    }

    pub fn width_blocks(&self) -> u32 {
        self.width_blocks
    }

    pub fn height_blocks(&self) -> u32 {
        self.height_blocks
    }

    /// Total number of 4x4 tiles in this level.
    pub fn block_count(&self) -> usize {
        (self.width_blocks * self.height_blocks) as usize
    }

    /// The tile buffer, `block_count() * 64` bytes.
    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Rebuild the padded raster bytes this grid was built from.
    pub fn flatten(&self) -> Vec<u8> {
        let stride = self.width_blocks as usize * 16;
        let mut out = vec![0u8; stride * self.height_blocks as usize * 4];

        for (tile_index, tile) in self.tiles.chunks_exact(TILE_BYTES).enumerate() {
            let tx = tile_index % self.width_blocks as usize;
            let ty = tile_index / self.width_blocks as usize;
            for v in 0..4 {
                let dst = (ty * 4 + v) * stride + tx * 16;
                out[dst..dst + 16].copy_from_slice(&tile[v * 16..v * 16 + 16]);
            }
        }

        out
    }
}

/// Work unit produced by the reblock stage.
#[derive(Debug)]
pub struct BlockImage {
    pub file_index: usize,
    pub levels: Vec<BlockGrid>,
}

impl BlockImage {
    pub fn error() -> Self {
        Self {
            file_index: ERROR_FILE_INDEX,
            levels: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.file_index == ERROR_FILE_INDEX
    }
}
