use log::info;

use crate::{
    chunks::{idat::IDATChunk, iend::IENDChunk, ihdr::ImageHeader, WritableChunk, SIGNATURE},
    compression::compress_data,
    error::{PngError, Result},
    pixel::PixelGrid,
    scanlines::encode_scanlines,
};

/// Signature, IHDR, a single IDAT holding `image_data`, then IEND.
pub(crate) fn assemble_container(header: &ImageHeader, image_data: &[u8]) -> Result<Vec<u8>> {
    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(header.to_bytes()?);
    bytes.extend(IDATChunk { data: image_data }.to_bytes()?);
    bytes.extend(IENDChunk.to_bytes()?);
    Ok(bytes)
}

pub(crate) fn encode_pixels(
    header: &ImageHeader,
    grid: &PixelGrid,
    option: usize,
) -> Result<Vec<u8>> {
    if grid.height() != header.height as usize {
        return Err(PngError::DimensionMismatch {
            expected: header.height as usize,
            actual: grid.height(),
        });
    }
    if grid.width() != header.width as usize {
        return Err(PngError::DimensionMismatch {
            expected: header.width as usize,
            actual: grid.width(),
        });
    }
    let compressed = compress_data(&encode_scanlines(grid, option));
    info!(
        "Encoded {}x{} image, {} bytes of image data",
        header.width,
        header.height,
        compressed.len()
    );
    assemble_container(header, &compressed)
}
