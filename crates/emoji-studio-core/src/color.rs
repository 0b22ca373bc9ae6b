use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Swatches offered next to the free-form color inputs.
pub const PRESET_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("purple", "#4A154B"),
    ("blue", "#1264A3"),
    ("red", "#E01E5A"),
    ("green", "#2EB67D"),
    ("yellow", "#FFD700"),
    ("orange", "#FF6B35"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let raw = input.trim();
        if let Some((_, hex)) = PRESET_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
        {
            return Self::parse(hex);
        }
        let hex = raw
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidInput(format!("invalid color {raw:?}")))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidInput(format!("invalid color {raw:?}")));
        }
        let nibble = |idx: usize| u8::from_str_radix(&hex[idx..idx + 1], 16).unwrap_or(0) * 17;
        let byte = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).unwrap_or(0);
        match hex.len() {
            3 => Ok(Self::rgb(nibble(0), nibble(1), nibble(2))),
            6 => Ok(Self::rgb(byte(0), byte(2), byte(4))),
            8 => Ok(Self::rgba(byte(0), byte(2), byte(4), byte(6))),
            _ => Err(Error::InvalidInput(format!("invalid color {raw:?}"))),
        }
    }

    /// `hsl(hue, saturation%, lightness%)` with fractional saturation and lightness.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_byte(r), to_byte(g), to_byte(b))
    }

    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance in [0, 1] using the sRGB coefficients.
    pub fn luminance(self) -> f32 {
        (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0
    }

    pub fn contrasting(self) -> Self {
        if self.luminance() > 0.5 {
            Color::BLACK
        } else {
            Color::WHITE
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "{}", self.hex())
        } else {
            write!(f, "{}{:02X}", self.hex(), self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}
