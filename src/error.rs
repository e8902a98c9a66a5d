use miniz_oxide::inflate::DecompressError;

pub type Result<T> = std::result::Result<T, PngError>;

#[derive(Debug, thiserror::Error)]
pub enum PngError {
    #[error("file not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error on {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("input doesn't start with expected signature")]
    InvalidSignature,
    #[error("malformed container: {0}")]
    MalformedContainer(String),
    #[error("unrecognized filter type {0}")]
    UnrecognizedFilterType(u8),
    #[error("unexpected end of scanline data")]
    TruncatedScanlineData,
    #[error("image data holds {actual} rows but the header declares {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("chunk data of {0} bytes doesn't fit a 32-bit length")]
    ChunkTooLarge(usize),
    #[error("unsupported image layout: {0}")]
    UnsupportedLayout(String),
    #[error("failed to decompress image data")]
    Compression(#[from] DecompressError),
}

impl PngError {
    pub(crate) fn malformed(detail: &str) -> Self {
        Self::MalformedContainer(detail.to_owned())
    }

    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let path = path.display().to_string();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path, source }
        } else {
            Self::Io { path, source }
        }
    }
}
