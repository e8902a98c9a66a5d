use log::trace;

use crate::{
    error::{PngError, Result},
    filters::Filter,
    pixel::{Pixel, PixelGrid},
};

/// Bytes per pixel, and the distance back to the same channel of the previous pixel.
pub(crate) const CHANNELS: usize = 3;

const fn scanline_size(width: usize) -> usize {
    width * CHANNELS + 1
}

/// Size of the decompressed image data for a `width` x `height` image, if it fits in memory.
pub(crate) fn image_data_size(width: usize, height: usize) -> Option<usize> {
    width
        .checked_mul(CHANNELS)?
        .checked_add(1)?
        .checked_mul(height)
}

/// Undoes `filter` on one scanline (tag byte already removed).
///
/// `upper` is the previous row after reconstruction, all zeroes for the first row.
pub fn reconstruct_row(filter: Filter, current: &[u8], upper: &[u8]) -> Vec<u8> {
    let mut row = Vec::with_capacity(current.len());
    for (i, &x) in current.iter().enumerate() {
        let a = if i >= CHANNELS { row[i - CHANNELS] } else { 0 };
        let b = upper[i];
        let c = if i >= CHANNELS { upper[i - CHANNELS] } else { 0 };
        row.push(filter.reconstruct(x, a, b, c));
    }
    row
}

/// Applies `filter` to one row of channel bytes. `upper` is the unfiltered row above.
pub fn filter_row(filter: Filter, current: &[u8], upper: &[u8]) -> Vec<u8> {
    current
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let a = if i >= CHANNELS { current[i - CHANNELS] } else { 0 };
            let c = if i >= CHANNELS { upper[i - CHANNELS] } else { 0 };
            filter.filter(x, a, upper[i], c)
        })
        .collect()
}

/// Turns decompressed image data back into pixels.
///
/// Rows are reconstructed strictly in order since each one predicts from the row above.
pub fn reconstruct_scanlines(data: &[u8], width: usize, height: usize) -> Result<PixelGrid> {
    match image_data_size(width, height) {
        Some(size) if data.len() >= size => {}
        _ => return Err(PngError::TruncatedScanlineData),
    }
    let row_length = scanline_size(width);
    let mut upper_row = vec![];
    let mut grid = PixelGrid::default();
    for (y, scanline) in data.chunks(row_length).enumerate() {
        if scanline.len() < row_length {
            return Err(PngError::TruncatedScanlineData);
        }
        // zeroes above the first row, a no-op afterwards
        upper_row.resize(row_length - 1, 0);
        let filter = Filter::try_from(scanline[0])?;
        trace!("Row {y} uses {filter:?}");
        let row = reconstruct_row(filter, &scanline[1..], &upper_row);
        grid.push_row(row.chunks(CHANNELS).map(Pixel::from_channels).collect());
        upper_row = row;
    }
    match grid.height() {
        rows if rows < height => Err(PngError::TruncatedScanlineData),
        rows if rows > height => Err(PngError::DimensionMismatch {
            expected: height,
            actual: rows,
        }),
        _ => Ok(grid),
    }
}

/// Scanlines for `grid`, every row tagged and filtered with `filter`.
pub fn filter_scanlines(grid: &PixelGrid, filter: Filter) -> Vec<u8> {
    let width = grid.width();
    let mut data = Vec::with_capacity(scanline_size(width) * grid.height());
    let mut upper_row = vec![0; width * CHANNELS];
    for row in grid.rows() {
        let current: Vec<u8> = row.iter().flat_map(Pixel::channels).collect();
        data.push(filter as u8);
        data.extend(filter_row(filter, &current, &upper_row));
        upper_row = current;
    }
    data
}

/// A copy of `grid` where only channel `(option + 2) % 3` keeps its values.
///
/// Channels `option % 3` and `(option + 1) % 3` are cleared, so 0 keeps blue,
/// 1 keeps red and 2 keeps green.
pub fn isolate_channel(grid: &PixelGrid, option: usize) -> PixelGrid {
    let option = option % CHANNELS;
    let cleared = [option, (option + 1) % CHANNELS];
    grid.map_pixels(|pixel| pixel.without_channel(cleared[0]).without_channel(cleared[1]))
}

/// Scanlines written by the encoder: one channel isolated, no prediction.
pub fn encode_scanlines(grid: &PixelGrid, option: usize) -> Vec<u8> {
    filter_scanlines(&isolate_channel(grid, option), Filter::None)
}
