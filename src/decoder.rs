use std::marker::PhantomData;

use log::info;
use nom::{bytes::complete::tag, IResult};

use crate::{
    chunks::{collect_image_data, ihdr::parse_ihdr, ihdr::ImageHeader, SIGNATURE},
    compression::decompress_data,
    error::{PngError, Result},
    pixel::PixelGrid,
    scanlines::reconstruct_scanlines,
};

/// Walks a container in order: signature, then IHDR, then image data.
pub struct PNGDecoder<'a, State>(&'a [u8], PhantomData<State>);

pub struct Start;
pub struct Chunks;

impl<'a> PNGDecoder<'a, Start> {
    pub fn new(data: &'a [u8]) -> Result<Self> {
        parse_signature(data).map_err(|_| PngError::InvalidSignature)?;
        Ok(Self(data, PhantomData))
    }

    pub fn parse_ihdr(self) -> Result<(PNGDecoder<'a, Chunks>, ImageHeader)> {
        let header = parse_ihdr(self.0)?;
        Ok((PNGDecoder(self.0, PhantomData), header))
    }
}

impl<'a> PNGDecoder<'a, Chunks> {
    /// Compressed image data from every IDAT chunk, concatenated.
    pub fn read_image_data(self) -> Result<Vec<u8>> {
        collect_image_data(self.0, crate::chunks::IHDR_END)
    }
}

/// Inflates the concatenated IDAT data and defilters it into pixels.
pub(crate) fn decode_pixels(compressed_data: &[u8], header: &ImageHeader) -> Result<PixelGrid> {
    header.check_supported()?;
    let data = decompress_data(compressed_data)?;
    let grid = reconstruct_scanlines(&data, header.width as usize, header.height as usize)?;
    info!("Decoded {}x{} image", grid.width(), grid.height());
    Ok(grid)
}

fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}
