use std::borrow::Cow;

use log::{debug, warn};
use nom::{
    bytes::complete::take, combinator::map, number::complete::be_u32, sequence::tuple, IResult,
};

use crate::{crc::calculate_crc, error::PngError, error::Result};

pub(crate) mod idat;
pub(crate) mod iend;
pub(crate) mod ihdr;

pub const SIGNATURE: [u8; 8] = *b"\x89PNG\x0d\x0a\x1a\x0a";

/// Length, type and checksum fields wrapped around every chunk's data.
pub(crate) const FRAME_LENGTH: usize = 12;

/// Offset of the first chunk after IHDR: signature plus the fixed-size IHDR chunk.
pub(crate) const IHDR_END: usize = SIGNATURE.len() + FRAME_LENGTH + ihdr::HEADER_LENGTH;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChunkType {
    IHDR,
    IDAT,
    IEND,
    Ancillary([u8; 4]),
}
impl From<[u8; 4]> for ChunkType {
    fn from(value: [u8; 4]) -> Self {
        match &value {
            ihdr::HEADER => Self::IHDR,
            idat::HEADER => Self::IDAT,
            iend::HEADER => Self::IEND,
            _ => Self::Ancillary(value),
        }
    }
}

#[derive(Debug)]
pub(crate) struct RawChunk<'a> {
    pub(crate) chunk_type: ChunkType,
    pub(crate) data: &'a [u8],
    /// Read from the stream, never checked.
    pub(crate) declared_crc: u32,
}

pub(crate) trait WritableChunk {
    const HEADER: &'static [u8; 4];

    fn data(&self) -> Cow<'_, [u8]>;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        frame_chunk(Self::HEADER, &self.data())
    }
}

fn chunk_length(data_length: usize) -> Result<u32> {
    u32::try_from(data_length).map_err(|_| PngError::ChunkTooLarge(data_length))
}

/// Length, type, data, then the CRC over type and data. Integers are big-endian.
pub(crate) fn frame_chunk(chunk_type: &[u8; 4], data: &[u8]) -> Result<Vec<u8>> {
    let length = chunk_length(data.len())?;
    let mut bytes = Vec::with_capacity(data.len() + FRAME_LENGTH);
    bytes.extend(length.to_be_bytes());
    bytes.extend(chunk_type);
    bytes.extend(data);
    bytes.extend(calculate_crc(chunk_type, data).to_be_bytes());
    Ok(bytes)
}

fn chunk_header(input: &[u8]) -> IResult<&[u8], (u32, [u8; 4])> {
    tuple((
        be_u32,
        map(take(4usize), |t: &[u8]| [t[0], t[1], t[2], t[3]]),
    ))(input)
}

fn chunk_body(input: &[u8], length: u32) -> IResult<&[u8], &[u8]> {
    take(length)(input)
}

fn chunk_crc(input: &[u8]) -> IResult<&[u8], u32> {
    be_u32(input)
}

pub(crate) fn parse_chunk(input: &[u8]) -> Result<(&[u8], RawChunk<'_>)> {
    let (rest, (length, chunk_type)) =
        chunk_header(input).map_err(|_| PngError::malformed("truncated chunk header"))?;
    let (rest, data) =
        chunk_body(rest, length).map_err(|_| PngError::malformed("truncated chunk body"))?;
    let (rest, declared_crc) =
        chunk_crc(rest).map_err(|_| PngError::malformed("truncated chunk checksum"))?;
    Ok((
        rest,
        RawChunk {
            chunk_type: chunk_type.into(),
            data,
            declared_crc,
        },
    ))
}

pub(crate) fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

/// Yields chunks until IEND, the end of the input, or the first malformed chunk.
pub(crate) struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<RawChunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.source.is_empty() {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                if chunk.chunk_type == ChunkType::IEND {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Concatenates the data of every IDAT chunk from `start` up to IEND.
///
/// Other chunk types are skipped. Any chunk that doesn't fit in the remaining
/// bytes fails the whole walk.
pub(crate) fn collect_image_data(container: &[u8], start: usize) -> Result<Vec<u8>> {
    let source = container
        .get(start..)
        .ok_or_else(|| PngError::malformed("missing IHDR chunk"))?;
    let mut image_data = vec![];
    let mut reached_end = false;
    for chunk in iter_chunks(source) {
        let chunk = chunk?;
        match chunk.chunk_type {
            ChunkType::IDAT => image_data.extend_from_slice(chunk.data),
            ChunkType::IEND => reached_end = true,
            ChunkType::IHDR => debug!("Skipping repeated IHDR chunk"),
            ChunkType::Ancillary(tag) => debug!(
                "Skipping {} chunk of {} bytes (crc {:08x})",
                String::from_utf8_lossy(&tag),
                chunk.data.len(),
                chunk.declared_crc
            ),
        }
    }
    if reached_end {
        debug!("Reached IEND after {} bytes of image data", image_data.len());
    } else {
        warn!("Container ended without an IEND chunk");
    }
    Ok(image_data)
}
