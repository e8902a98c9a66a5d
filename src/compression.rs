use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};

use crate::error::Result;

pub const COMPRESSION_LEVEL: u8 = 6;

pub(crate) fn compress_data(data: &[u8]) -> Vec<u8> {
    compress_to_vec_zlib(data, COMPRESSION_LEVEL)
}

pub(crate) fn decompress_data(compressed_data: &[u8]) -> Result<Vec<u8>> {
    Ok(decompress_to_vec_zlib(compressed_data)?)
}
