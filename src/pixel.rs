use crate::error::{PngError, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}
impl Pixel {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    pub(crate) fn from_channels(channels: &[u8]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }

    /// Copy of this pixel with the channel at `index` (0 = red, 1 = green, 2 = blue) cleared.
    pub(crate) fn without_channel(self, index: usize) -> Self {
        match index {
            0 => Self { red: 0, ..self },
            1 => Self { green: 0, ..self },
            _ => Self { blue: 0, ..self },
        }
    }
}

/// Rows of truecolor pixels, top to bottom. Every row holds the same number of pixels.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct PixelGrid {
    rows: Vec<Vec<Pixel>>,
}
impl PixelGrid {
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(PngError::DimensionMismatch {
                expected: width,
                actual: row.len(),
            });
        }
        Ok(Self { rows })
    }

    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Self {
        Self {
            rows: vec![vec![pixel; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Pixel>] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Callers keep rows the same length.
    pub(crate) fn push_row(&mut self, row: Vec<Pixel>) {
        debug_assert!(self.rows.is_empty() || row.len() == self.width());
        self.rows.push(row);
    }

    pub(crate) fn map_pixels(&self, f: impl Fn(Pixel) -> Pixel) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().copied().map(&f).collect())
                .collect(),
        }
    }

    pub fn into_rows(self) -> Vec<Vec<Pixel>> {
        self.rows
    }
}
