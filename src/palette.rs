use std::fmt;
use std::str::FromStr;

use egui::Color32;
use egui::ecolor::Hsva;

/// The fixed set of named colors offered by the toolbar and the overlay swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 6] = [
        PaletteColor::Blue,
        PaletteColor::Red,
        PaletteColor::Green,
        PaletteColor::Yellow,
        PaletteColor::Purple,
        PaletteColor::Orange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Self::Blue => Color32::from_rgb(0x21, 0x96, 0xF3),
            Self::Red => Color32::from_rgb(0xF4, 0x43, 0x36),
            Self::Green => Color32::from_rgb(0x4C, 0xAF, 0x50),
            Self::Yellow => Color32::from_rgb(0xFF, 0xEB, 0x3B),
            Self::Purple => Color32::from_rgb(0x9C, 0x27, 0xB0),
            Self::Orange => Color32::from_rgb(0xFF, 0x98, 0x00),
        }
    }
}

impl FromStr for PaletteColor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The active drawing color: either a palette entry or an arbitrary hex color
/// (as produced by the color wheel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Named(PaletteColor),
    Hex(Color32),
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Named(PaletteColor::Blue)
    }
}

impl ColorChoice {
    /// Parses `"#rrggbb"` / `"#rrggbbaa"` or a palette name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            Color32::from_hex(s).ok().map(Self::Hex)
        } else {
            s.parse::<PaletteColor>().ok().map(Self::Named)
        }
    }

    pub fn resolve(self) -> Color32 {
        match self {
            Self::Named(color) => color.color(),
            Self::Hex(color) => color,
        }
    }

    pub fn palette(self) -> Option<PaletteColor> {
        match self {
            Self::Named(color) => Some(color),
            Self::Hex(_) => None,
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(color) => write!(f, "{color}"),
            Self::Hex(color) => write!(f, "#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b()),
        }
    }
}

/// Color from hue in degrees (wrapped into `[0, 360)`), saturation and value in `[0, 1]`.
pub fn hsv(hue_degrees: f64, saturation: f32, value: f32) -> Color32 {
    let hue = hue_degrees.rem_euclid(360.0) / 360.0;
    Color32::from(Hsva::new(hue as f32, saturation, value, 1.0))
}

pub const CHROME_TEXT: Color32 = Color32::from_rgb(0x33, 0x33, 0x33);
pub const CHROME_BORDER: Color32 = Color32::from_rgb(0xdd, 0xdd, 0xdd);
pub const CHROME_PANEL: Color32 = Color32::from_rgb(0xf0, 0xf0, 0xf0);
pub const CHROME_ACTIVE: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe4);
pub const CHROME_SWATCH_RING: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);
pub const SELECTION_SHADOW: Color32 = Color32::from_rgb(0x21, 0x96, 0xF3);
