use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Color definition (RGB values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse color from hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> ConfigResult<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ConfigError::Validation(format!(
                "Color must be 6 hex digits, got {hex:?}"
            )));
        }

        let component = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| {
                ConfigError::Validation(format!("Invalid {name} component in {hex:?}"))
            })
        };

        Ok(Self::new(
            component(0..2, "red")?,
            component(2..4, "green")?,
            component(4..6, "blue")?,
        ))
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> ConfigResult<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Colors used to draw the tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeSettings {
    /// Fill for red nodes
    pub red: Color,
    /// Fill for black nodes
    pub black: Color,
    /// Parent-child edges
    pub edge: Color,
    /// Node labels and status text
    pub text: Color,
    /// Error messages in the status line
    pub error: Color,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            red: Color::new(0xD0, 0x30, 0x30),
            black: Color::new(0x80, 0x80, 0x80),
            edge: Color::new(0x60, 0x60, 0x60),
            text: Color::new(0xFF, 0xFF, 0xFF),
            error: Color::new(0xFF, 0x55, 0x55),
        }
    }
}
