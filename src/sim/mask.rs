//! Per-pixel collision masks
//!
//! A mask is a width x height grid of opaque/transparent bits, built once per
//! sprite. Overlap tests only look at the intersection of the two rectangles,
//! so the cost is bounded by the smaller sprite.

use crate::settings::ConfigError;

/// Alpha values above this count as opaque
pub const ALPHA_THRESHOLD: u8 = 127;

/// Opaque-pixel bitmap for one sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    /// Row-major, `width * height` entries
    bits: Vec<bool>,
}

impl Mask {
    /// Fully opaque rectangle
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![true; (width * height) as usize],
        }
    }

    /// Build a mask from a predicate over local pixel coordinates
    pub fn from_fn(width: u32, height: u32, mut opaque: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(opaque(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    /// Build a mask from a row-major alpha channel
    pub fn from_alpha(width: u32, height: u32, alpha: &[u8]) -> Result<Self, ConfigError> {
        let expected = (width * height) as usize;
        if alpha.len() != expected {
            return Err(ConfigError::MaskSize {
                width,
                height,
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits: alpha.iter().map(|&a| a > ALPHA_THRESHOLD).collect(),
        })
    }

    /// Build a mask from ASCII art: `#` is opaque, anything else is not.
    /// Short rows are padded with transparent pixels.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let height = rows.len() as u32;
        Self::from_fn(width, height, |x, y| {
            rows[y as usize].chars().nth(x as usize) == Some('#')
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the local pixel is opaque (out of range is transparent)
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[(y as u32 * self.width + x as u32) as usize]
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First opaque pixel shared with `other` placed at `offset` relative to
    /// this mask's origin, in this mask's local coordinates.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (dx, dy) = offset;
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i32).min(dx + other.width as i32);
        let y1 = (self.height as i32).min(dy + other.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return Some((x, y));
                }
            }
        }
        None
    }
}
