use std::borrow::Cow;

use super::WritableChunk;

pub(crate) const HEADER: &[u8; 4] = b"IEND";

pub(crate) struct IENDChunk;
impl WritableChunk for IENDChunk {
    const HEADER: &'static [u8; 4] = HEADER;

    fn data(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&[])
    }
}
