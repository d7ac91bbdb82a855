use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Swatches offered by the color picker before any team preset is chosen.
pub const BASIC_COLOR_PALETTE: [&str; 14] = [
    "#000000", "#808080", "#FFFFFF", "#CC0000", "#FF6600", "#0033A0", "#660000", "#7BAFD4",
    "#00CC00", "#FF8C00", "#660099", "#CC3366", "#CCCC00", "#154733",
];

/// `#RRGGBB` color. The original spelling is kept so a stored value reads
/// back exactly as it was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        if is_valid_hex_color(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ConfigError::InvalidColor {
                value: raw.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn to_srgb_u8(&self) -> [u8; 3] {
        let digits = &self.0.as_bytes()[1..];
        let channel = |offset: usize| (nibble(digits[offset]) << 4) | nibble(digits[offset + 1]);
        [channel(0), channel(2), channel(4)]
    }

    pub fn to_srgb_f32(&self) -> [f32; 3] {
        let [r, g, b] = self.to_srgb_u8();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    pub(crate) fn from_static(raw: &'static str) -> Self {
        debug_assert!(is_valid_hex_color(raw), "builtin color must be valid: {raw}");
        Self(raw.to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_hex_color(value.as_str()) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidColor { value })
        }
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

pub fn is_valid_hex_color(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
}

fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}
