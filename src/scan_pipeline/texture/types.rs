//! Post-processed texture types

use ndarray::Array2;

/// 8-bit grayscale texture, same shape as the frame it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedTexture {
    data: Array2<u8>,
}

impl ProcessedTexture {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    /// Width of the image in pixels
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Height of the image in pixels
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.data.get((row, col)).copied()
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.data
    }

    pub fn into_inner(self) -> Array2<u8> {
        self.data
    }

    /// Row-major copy of the pixels, as image encoders expect.
    pub fn to_row_major_vec(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }
}
