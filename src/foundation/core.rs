use crate::foundation::error::{TraitmintError, TraitmintResult};

/// Fixed raster size shared by every asset and every generated image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reject zero-sized canvases.
    pub fn validate(self) -> TraitmintResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TraitmintError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Byte length of a tightly packed RGBA8 buffer of this size.
    pub fn rgba8_len(self) -> TraitmintResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| TraitmintError::validation("canvas buffer size overflow"))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 320,
            height: 320,
        }
    }
}

/// 1-based position of a combination in the output batch.
///
/// Doubles as the output file stem and the metadata `tokenId`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ImageNumber(pub u64);

impl ImageNumber {
    /// Image number for the 0-based batch position `idx`.
    pub fn from_index(idx: usize) -> Self {
        Self(idx as u64 + 1)
    }
}

impl std::fmt::Display for ImageNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
