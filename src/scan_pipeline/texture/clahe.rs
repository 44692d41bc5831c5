//! Contrast limited adaptive histogram equalization for 8-bit images.
//!
//! The image is split into `tiles_x × tiles_y` tiles (padded by reflection
//! when the size is not a tile multiple). Each tile gets a clipped,
//! redistributed histogram and a CDF lookup table; every output pixel is a
//! bilinear blend of the four nearest tile tables.

use ndarray::Array2;
use tracing::debug;

use super::tone_map::saturate_u8;

const HIST_SIZE: usize = 256;

type Lut = [u8; HIST_SIZE];

/// Equalizes `image` and returns the result; the input is left untouched.
///
/// `clip_limit <= 0` disables histogram clipping. Both tile counts must be non-zero.
pub fn equalize(image: &Array2<u8>, clip_limit: f64, tiles_x: usize, tiles_y: usize) -> Array2<u8> {
    let (height, width) = image.dim();
    if width == 0 || height == 0 || tiles_x == 0 || tiles_y == 0 {
        return image.clone();
    }

    let tile_width = round_up(width, tiles_x) / tiles_x;
    let tile_height = round_up(height, tiles_y) / tiles_y;
    let tile_area = tile_width * tile_height;

    let clip = if clip_limit > 0.0 {
        ((clip_limit * tile_area as f64 / HIST_SIZE as f64) as usize).max(1)
    } else {
        0
    };
    debug!(tile_width, tile_height, clip, "Computing CLAHE lookup tables");

    let lut_scale = u8::MAX as f64 / tile_area as f64;
    let mut luts: Vec<Lut> = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let mut hist = [0usize; HIST_SIZE];
            for y in ty * tile_height..(ty + 1) * tile_height {
                let sy = reflect_101(y, height);
                for x in tx * tile_width..(tx + 1) * tile_width {
                    let sx = reflect_101(x, width);
                    hist[image[[sy, sx]] as usize] += 1;
                }
            }

            if clip > 0 {
                clip_histogram(&mut hist, clip);
            }

            let mut lut = [0u8; HIST_SIZE];
            let mut sum = 0usize;
            for (entry, count) in lut.iter_mut().zip(hist.iter()) {
                sum += count;
                *entry = saturate_u8(sum as f64 * lut_scale);
            }
            luts.push(lut);
        }
    }

    let x_weights: Vec<TileWeight> = (0..width)
        .map(|x| TileWeight::new(x, tile_width, tiles_x))
        .collect();
    let y_weights: Vec<TileWeight> = (0..height)
        .map(|y| TileWeight::new(y, tile_height, tiles_y))
        .collect();

    Array2::from_shape_fn((height, width), |(y, x)| {
        let wy = &y_weights[y];
        let wx = &x_weights[x];
        let value = image[[y, x]] as usize;

        let lut = |ty: usize, tx: usize| luts[ty * tiles_x + tx][value] as f64;
        let top = lut(wy.first, wx.first) * (1.0 - wx.alpha) + lut(wy.first, wx.second) * wx.alpha;
        let bottom =
            lut(wy.second, wx.first) * (1.0 - wx.alpha) + lut(wy.second, wx.second) * wx.alpha;

        saturate_u8(top * (1.0 - wy.alpha) + bottom * wy.alpha)
    })
}

/// Neighbouring tile indices along one axis and the blend factor toward the second.
struct TileWeight {
    first: usize,
    second: usize,
    alpha: f64,
}

impl TileWeight {
    fn new(position: usize, tile_size: usize, tiles: usize) -> Self {
        let f = position as f64 / tile_size as f64 - 0.5;
        let lower = f.floor();
        let alpha = f - lower;
        let lower = lower as isize;

        Self {
            first: lower.max(0) as usize,
            second: ((lower + 1) as usize).min(tiles - 1),
            alpha,
        }
    }
}

/// Caps every bin at `limit` and spreads the excess over the whole histogram.
fn clip_histogram(hist: &mut [usize; HIST_SIZE], limit: usize) {
    let mut clipped = 0;
    for bin in hist.iter_mut() {
        if *bin > limit {
            clipped += *bin - limit;
            *bin = limit;
        }
    }

    let batch = clipped / HIST_SIZE;
    let mut residual = clipped - batch * HIST_SIZE;
    for bin in hist.iter_mut() {
        *bin += batch;
    }

    if residual != 0 {
        let step = (HIST_SIZE / residual).max(1);
        let mut i = 0;
        while i < HIST_SIZE && residual > 0 {
            hist[i] += 1;
            i += step;
            residual -= 1;
        }
    }
}

fn round_up(value: usize, multiple: usize) -> usize {
    value.div_ceil(multiple) * multiple
}

/// Mirror index past the end without repeating the edge sample (`abc|ba`).
fn reflect_101(index: usize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let m = index % period;
    if m < len { m } else { period - m }
}
