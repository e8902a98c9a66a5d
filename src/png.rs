use std::path::Path;

use log::{info, warn};

use crate::{
    chunks::{collect_image_data, ihdr::parse_ihdr, ihdr::ImageHeader, IHDR_END, SIGNATURE},
    decoder::{decode_pixels, PNGDecoder},
    encoder::encode_pixels,
    error::{PngError, Result},
    pixel::PixelGrid,
    scanlines::isolate_channel,
};

/// The bytes of a whole PNG file, exactly as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContainer(Vec<u8>);
impl RawContainer {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Whether the data starts with the PNG signature. Nothing else is checked.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(&SIGNATURE)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
impl From<Vec<u8>> for RawContainer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// Reads a whole file. The signature is only reported, see [`RawContainer::is_valid`].
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<RawContainer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| PngError::from_io(path, e))?;
    let container = RawContainer::new(bytes);
    if !container.is_valid() {
        warn!("{} doesn't start with the PNG signature", path.display());
    }
    Ok(container)
}

pub fn parse_header(container: &RawContainer) -> Result<ImageHeader> {
    parse_ihdr(container.as_bytes())
}

pub fn decode_image(container: &RawContainer, header: &ImageHeader) -> Result<PixelGrid> {
    let image_data = collect_image_data(container.as_bytes(), IHDR_END)?;
    decode_pixels(&image_data, header)
}

/// Encodes `grid` with only one channel kept, see [`isolate_channel`].
pub fn encode_image(header: &ImageHeader, grid: &PixelGrid, option: usize) -> Result<Vec<u8>> {
    encode_pixels(header, grid, option)
}

pub fn write_container(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|e| PngError::from_io(path, e))
}

/// A PNG image: where it came from, its header and its pixels.
#[derive(Debug, Clone, Default)]
pub struct Image {
    source: RawContainer,
    header: ImageHeader,
    pixels: PixelGrid,
    info: String,
}

impl Image {
    /// Loads `path` without decoding it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self::from_bytes(
            load_and_validate(path)?.0,
            path.display().to_string(),
        ))
    }

    pub fn from_bytes(bytes: Vec<u8>, info: impl Into<String>) -> Self {
        Self {
            source: RawContainer::new(bytes),
            info: info.into(),
            ..Self::default()
        }
    }

    /// An image built in memory, with no source file.
    pub fn new(header: ImageHeader, pixels: PixelGrid) -> Self {
        Self {
            header,
            pixels,
            info: String::from("generated"),
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.source.is_valid()
    }

    /// Decodes the source bytes into a new image with header and pixels filled in.
    pub fn decode(self) -> Result<Self> {
        let decoder = PNGDecoder::new(self.source.as_bytes())?;
        let (decoder, header) = decoder.parse_ihdr()?;
        let pixels = decode_pixels(&decoder.read_image_data()?, &header)?;
        info!("Decoded {}", self.info);
        Ok(Self {
            header,
            pixels,
            ..self
        })
    }

    pub fn header(&self) -> &ImageHeader {
        &self.header
    }

    pub fn pixels(&self) -> &PixelGrid {
        &self.pixels
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn source(&self) -> &RawContainer {
        &self.source
    }

    /// Replaces the pixels, keeping the header.
    pub fn with_pixels(self, pixels: PixelGrid) -> Self {
        Self { pixels, ..self }
    }

    pub fn isolate_channel(&self, option: usize) -> PixelGrid {
        isolate_channel(&self.pixels, option)
    }

    pub fn encode(&self, option: usize) -> Result<Vec<u8>> {
        encode_image(&self.header, &self.pixels, option)
    }

    pub fn save(&self, path: impl AsRef<Path>, option: usize) -> Result<()> {
        write_container(&self.encode(option)?, path)
    }
}
