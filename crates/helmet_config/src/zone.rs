use std::fmt;

use serde::{Deserialize, Serialize};

/// Customizable region of the helmet model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Shell,
    Facemask,
    Chinstrap,
    Padding,
    Hardware,
}

impl Zone {
    /// Display order used by the control panel and the export schema.
    pub const ORDERED: [Zone; 5] = [
        Zone::Shell,
        Zone::Facemask,
        Zone::Chinstrap,
        Zone::Padding,
        Zone::Hardware,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Shell => "shell",
            Zone::Facemask => "facemask",
            Zone::Chinstrap => "chinstrap",
            Zone::Padding => "padding",
            Zone::Hardware => "hardware",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "shell" => Some(Zone::Shell),
            "facemask" | "face_mask" | "face-mask" => Some(Zone::Facemask),
            "chinstrap" | "chin_strap" | "chin-strap" => Some(Zone::Chinstrap),
            "padding" => Some(Zone::Padding),
            "hardware" => Some(Zone::Hardware),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Zone::Shell => "Shell",
            Zone::Facemask => "Facemask",
            Zone::Chinstrap => "Chinstrap",
            Zone::Padding => "Padding",
            Zone::Hardware => "Hardware",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Zone::Shell => "Main helmet shell body",
            Zone::Facemask => "Face protection bars",
            Zone::Chinstrap => "Chin retention strap",
            Zone::Padding => "Interior padding (visible areas)",
            Zone::Hardware => "Screws, clips, and fasteners",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
