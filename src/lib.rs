mod chunks;
mod compression;
mod crc;
mod decoder;
mod encoder;
mod error;
mod filters;
mod pixel;
mod png;
mod scanlines;

pub use chunks::{ihdr::ImageHeader, SIGNATURE};
pub use compression::COMPRESSION_LEVEL;
pub use decoder::{Chunks, PNGDecoder, Start};
pub use error::{PngError, Result};
pub use filters::Filter;
pub use pixel::{Pixel, PixelGrid};
pub use png::{
    decode_image, encode_image, load_and_validate, parse_header, write_container, Image,
    RawContainer,
};
pub use scanlines::{
    encode_scanlines, filter_row, filter_scanlines, isolate_channel, reconstruct_row,
    reconstruct_scanlines,
};
