use std::borrow::Cow;

use super::{parse_chunk, ChunkType, WritableChunk, SIGNATURE};
use crate::error::{PngError, Result};

pub(crate) const HEADER: &[u8; 4] = b"IHDR";

/// Size of the IHDR payload.
pub const HEADER_LENGTH: usize = 13;

pub const BIT_DEPTH: u8 = 8;
pub const TRUECOLOR: u8 = 2;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: u8,
}
impl ImageHeader {
    /// 8-bit, non-interlaced RGB.
    pub fn truecolor(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: BIT_DEPTH,
            color_type: TRUECOLOR,
            ..Self::default()
        }
    }

    pub fn parse(bytes: &[u8; HEADER_LENGTH]) -> Self {
        Self {
            width: u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            height: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            bit_depth: bytes[8],
            color_type: bytes[9],
            compression_method: bytes[10],
            filter_method: bytes[11],
            interlace_method: bytes[12],
        }
    }

    pub fn serialize(&self) -> [u8; HEADER_LENGTH] {
        let mut bytes = [0; HEADER_LENGTH];
        bytes[0..4].copy_from_slice(&self.width.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.height.to_be_bytes());
        bytes[8..].copy_from_slice(&[
            self.bit_depth,
            self.color_type,
            self.compression_method,
            self.filter_method,
            self.interlace_method,
        ]);
        bytes
    }

    /// Only 8-bit, non-interlaced truecolor images with nonzero dimensions are decoded.
    pub fn check_supported(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PngError::UnsupportedLayout(format!(
                "{}x{} image",
                self.width, self.height
            )));
        }
        if self.bit_depth != BIT_DEPTH {
            return Err(PngError::UnsupportedLayout(format!(
                "bit depth {}",
                self.bit_depth
            )));
        }
        if self.color_type != TRUECOLOR {
            return Err(PngError::UnsupportedLayout(format!(
                "color type {}",
                self.color_type
            )));
        }
        if self.interlace_method != 0 {
            return Err(PngError::UnsupportedLayout(format!(
                "interlace method {}",
                self.interlace_method
            )));
        }
        Ok(())
    }
}
impl WritableChunk for ImageHeader {
    const HEADER: &'static [u8; 4] = HEADER;

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.serialize().to_vec())
    }
}

/// Reads the IHDR chunk that must directly follow the signature.
pub(crate) fn parse_ihdr(container: &[u8]) -> Result<ImageHeader> {
    let after_signature = container
        .get(SIGNATURE.len()..)
        .ok_or_else(|| PngError::malformed("missing IHDR chunk"))?;
    let (_, chunk) = parse_chunk(after_signature)?;
    if chunk.chunk_type != ChunkType::IHDR {
        return Err(PngError::malformed("missing IHDR chunk"));
    }
    let data: &[u8; HEADER_LENGTH] = chunk.data.try_into().map_err(|_| {
        PngError::MalformedContainer(format!("IHDR chunk holds {} bytes", chunk.data.len()))
    })?;
    Ok(ImageHeader::parse(data))
}
