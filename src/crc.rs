use crc32fast::Hasher;

/// CRC-32 (IEEE) over a chunk's type tag followed by its data.
pub(crate) fn calculate_crc(chunk_type: &[u8; 4], data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    hasher.finalize()
}
