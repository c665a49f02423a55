use std::str::FromStr;

use image::Rgb;
use log::warn;
use ::palette::Srgb;
use thiserror::Error;

use crate::raster::Color;

// Fallback colours, back layer to front, last entry is the sky
pub const DEFAULT_PALETTE: [[u8; 3]; 7] = [
    [195, 157, 224], // light purple
    [158, 98, 204],
    [130, 79, 138],
    [68, 28, 99],
    [49, 7, 82],
    [23, 3, 38], // near black
    [240, 203, 163], // warm tan
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("invalid hex colour `{code}`: {reason}")]
    InvalidHex { code: String, reason: String },
}

// Layer index -> colour. The last entry doubles as the background.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|&c| Rgb(c)).collect(),
        }
    }
}

impl Palette {
    // An empty list yields the default palette
    pub fn from_colors(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    // Use `colors` if it covers every layer, otherwise the default palette
    pub fn for_layers(colors: Option<Vec<Color>>, layer_count: usize) -> Self {
        match colors {
            Some(colors) if colors.len() >= layer_count && !colors.is_empty() => Self { colors },
            Some(colors) => {
                warn!(
                    "palette has {} colours but {} layers need colouring, using default palette",
                    colors.len(),
                    layer_count
                );
                Self::default()
            }
            None => Self::default(),
        }
    }

    // Parse "#rrggbb" / "rrggbb" codes
    pub fn parse_hex<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Color>, PaletteError> {
        codes
            .iter()
            .map(|code| {
                let code = code.as_ref().trim();
                let hex = format!("#{}", code.trim_start_matches('#'));
                let rgb = Srgb::<u8>::from_str(&hex).map_err(|e| PaletteError::InvalidHex {
                    code: code.to_string(),
                    reason: e.to_string(),
                })?;
                let (r, g, b) = rgb.into_components();
                Ok(Rgb([r, g, b]))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    // Wraps around if there are more layers than colours
    pub fn layer_color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    pub fn background(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }
}
