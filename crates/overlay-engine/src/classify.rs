//! Density classification into a fixed five-band visual scale.
//!
//! Classification is presentation metadata only: it is attached to output
//! segments but never feeds back into interval math. Colors live in a
//! [`Palette`] supplied by the caller, so the engine carries no theme state.

use serde::{Deserialize, Serialize};

/// Inclusive upper bounds of bands 1–4; anything above the last bound is band 5.
pub const BAND_UPPER_BOUNDS: [usize; 4] = [2, 4, 6, 9];

/// Counts at or above this use the inverse (light-on-dark) text treatment.
pub const INVERSE_TEXT_THRESHOLD: usize = 5;

/// One of the five density bands, lightest to darkest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum DensityBand {
    Band1,
    Band2,
    Band3,
    Band4,
    Band5,
}

impl DensityBand {
    /// 1-based band number.
    pub fn level(self) -> u8 {
        match self {
            DensityBand::Band1 => 1,
            DensityBand::Band2 => 2,
            DensityBand::Band3 => 3,
            DensityBand::Band4 => 4,
            DensityBand::Band5 => 5,
        }
    }
}

impl From<DensityBand> for u8 {
    fn from(band: DensityBand) -> Self {
        band.level()
    }
}

/// Label text treatment for a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEmphasis {
    #[default]
    Normal,
    /// Light text on a dark fill.
    Inverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub band: DensityBand,
    pub emphasis: TextEmphasis,
}

/// Classify a user count into its band and text emphasis.
pub fn classify_density(count: usize) -> Classification {
    const BANDS: [DensityBand; 4] = [
        DensityBand::Band1,
        DensityBand::Band2,
        DensityBand::Band3,
        DensityBand::Band4,
    ];

    let band = BAND_UPPER_BOUNDS
        .iter()
        .zip(BANDS)
        .find(|(bound, _)| count <= **bound)
        .map(|(_, band)| band)
        .unwrap_or(DensityBand::Band5);

    let emphasis = if count >= INVERSE_TEXT_THRESHOLD {
        TextEmphasis::Inverse
    } else {
        TextEmphasis::Normal
    };

    Classification { band, emphasis }
}

/// Fill and text colors for the density scale.
///
/// Field names follow the calendar theme's JSON shape
/// (`band1..band5`, `textColor`, `textColorInverse`). Missing fields fall back
/// to the built-in scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub band1: String,
    pub band2: String,
    pub band3: String,
    pub band4: String,
    pub band5: String,
    pub text_color: String,
    pub text_color_inverse: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            band1: "#DCFCE7".to_string(),
            band2: "#86EFAC".to_string(),
            band3: "#22C55E".to_string(),
            band4: "#15803D".to_string(),
            band5: "#14532D".to_string(),
            text_color: "#111827".to_string(),
            text_color_inverse: "#FFFFFF".to_string(),
        }
    }
}

impl Palette {
    pub fn fill(&self, band: DensityBand) -> &str {
        match band {
            DensityBand::Band1 => &self.band1,
            DensityBand::Band2 => &self.band2,
            DensityBand::Band3 => &self.band3,
            DensityBand::Band4 => &self.band4,
            DensityBand::Band5 => &self.band5,
        }
    }

    pub fn text(&self, emphasis: TextEmphasis) -> &str {
        match emphasis {
            TextEmphasis::Normal => &self.text_color,
            TextEmphasis::Inverse => &self.text_color_inverse,
        }
    }
}
