use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::zone::Zone;

pub const DEFAULT_PATTERN_INTENSITY: f32 = 0.5;
pub const DEFAULT_PATTERN_COLOR: &str = "#FFFFFF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    None,
    StripeSingle,
    StripeDouble,
    CamoWoodland,
    CamoDigital,
    CamoUrban,
    CamoDesert,
    CamoNavy,
    CamoTiger,
    CamoMulticam,
    CamoCarbon,
    Tiger,
    Ram,
    Wolverine,
    Leopard,
    Jaguar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    Stripes,
    Animals,
    Camo,
}

/// How a pattern reaches the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    None,
    /// Curve-driven tube geometry over the shell.
    Stripe { count: u8 },
    /// Texture swap on the shell material.
    Texture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTextureSet {
    pub albedo: &'static str,
    pub normal: Option<&'static str>,
    pub roughness: Option<&'static str>,
}

impl PatternTextureSet {
    const fn pbr(albedo: &'static str, normal: &'static str, roughness: &'static str) -> Self {
        Self {
            albedo,
            normal: Some(normal),
            roughness: Some(roughness),
        }
    }

    const fn albedo_only(albedo: &'static str) -> Self {
        Self {
            albedo,
            normal: None,
            roughness: None,
        }
    }
}

impl PatternType {
    pub const ALL: [PatternType; 16] = [
        PatternType::None,
        PatternType::StripeSingle,
        PatternType::StripeDouble,
        PatternType::CamoWoodland,
        PatternType::CamoDigital,
        PatternType::CamoUrban,
        PatternType::CamoDesert,
        PatternType::CamoNavy,
        PatternType::CamoTiger,
        PatternType::CamoMulticam,
        PatternType::CamoCarbon,
        PatternType::Tiger,
        PatternType::Ram,
        PatternType::Wolverine,
        PatternType::Leopard,
        PatternType::Jaguar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::None => "none",
            PatternType::StripeSingle => "stripe_single",
            PatternType::StripeDouble => "stripe_double",
            PatternType::CamoWoodland => "camo_woodland",
            PatternType::CamoDigital => "camo_digital",
            PatternType::CamoUrban => "camo_urban",
            PatternType::CamoDesert => "camo_desert",
            PatternType::CamoNavy => "camo_navy",
            PatternType::CamoTiger => "camo_tiger",
            PatternType::CamoMulticam => "camo_multicam",
            PatternType::CamoCarbon => "camo_carbon",
            PatternType::Tiger => "tiger",
            PatternType::Ram => "ram",
            PatternType::Wolverine => "wolverine",
            PatternType::Leopard => "leopard",
            PatternType::Jaguar => "jaguar",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "camo" => return Some(PatternType::CamoWoodland),
            "tiger_stripe" => return Some(PatternType::CamoTiger),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.as_str() == normalized)
    }

    pub fn label(self) -> &'static str {
        match self {
            PatternType::None => "None",
            PatternType::StripeSingle => "Single Stripe",
            PatternType::StripeDouble => "Double Stripe",
            PatternType::CamoWoodland => "Camo White",
            PatternType::CamoDigital => "Carbon Fiber",
            PatternType::CamoUrban => "Urban",
            PatternType::CamoDesert => "Desert",
            PatternType::CamoNavy => "Navy",
            PatternType::CamoTiger => "Tiger Stripe",
            PatternType::CamoMulticam => "Multicam",
            PatternType::CamoCarbon => "Carbon Fiber Alt",
            PatternType::Tiger => "Tiger",
            PatternType::Ram => "Ram",
            PatternType::Wolverine => "Wolverine",
            PatternType::Leopard => "Leopard",
            PatternType::Jaguar => "Jaguar",
        }
    }

    pub fn category(self) -> Option<PatternCategory> {
        match self {
            PatternType::None => None,
            PatternType::StripeSingle | PatternType::StripeDouble => Some(PatternCategory::Stripes),
            PatternType::Tiger
            | PatternType::Ram
            | PatternType::Wolverine
            | PatternType::Leopard
            | PatternType::Jaguar => Some(PatternCategory::Animals),
            _ => Some(PatternCategory::Camo),
        }
    }

    pub fn kind(self) -> PatternKind {
        match self {
            PatternType::None => PatternKind::None,
            PatternType::StripeSingle => PatternKind::Stripe { count: 1 },
            PatternType::StripeDouble => PatternKind::Stripe { count: 2 },
            _ => PatternKind::Texture,
        }
    }

    pub fn texture_set(self) -> Option<PatternTextureSet> {
        let set = match self {
            PatternType::None | PatternType::StripeSingle | PatternType::StripeDouble => {
                return None
            }
            PatternType::CamoWoodland => PatternTextureSet::pbr(
                "pattern-textures/camo-white-pattern-albedo-2k.png",
                "pattern-textures/camo-white-pattern-normal-2k.png",
                "pattern-textures/camo-white-pattern-roughness-2k.png",
            ),
            PatternType::CamoDigital => {
                PatternTextureSet::albedo_only("pattern-textures/carbon-fiber-matcap-1k.png")
            }
            PatternType::CamoUrban => PatternTextureSet::pbr(
                "camo-pbr/urban/albedo.png",
                "camo-pbr/urban/normal.png",
                "camo-pbr/urban/roughness.png",
            ),
            PatternType::CamoDesert => PatternTextureSet::pbr(
                "camo-pbr/desert/albedo.png",
                "camo-pbr/desert/normal.png",
                "camo-pbr/desert/roughness.png",
            ),
            PatternType::CamoNavy => PatternTextureSet::pbr(
                "camo-pbr/navy/albedo.png",
                "camo-pbr/navy/normal.png",
                "camo-pbr/navy/roughness.png",
            ),
            PatternType::CamoTiger => PatternTextureSet::pbr(
                "camo-pbr/tiger/albedo.png",
                "camo-pbr/tiger/normal.png",
                "camo-pbr/tiger/roughness.png",
            ),
            PatternType::CamoMulticam => PatternTextureSet::pbr(
                "camo-pbr/multicam/albedo.png",
                "camo-pbr/multicam/normal.png",
                "camo-pbr/multicam/roughness.png",
            ),
            PatternType::CamoCarbon => PatternTextureSet::pbr(
                "camo-pbr/carbon/albedo.png",
                "camo-pbr/carbon/normal.png",
                "camo-pbr/carbon/roughness.png",
            ),
            PatternType::Tiger => PatternTextureSet::albedo_only("patterns/types/tiger.png"),
            PatternType::Ram => PatternTextureSet::albedo_only("patterns/types/ram.png"),
            PatternType::Wolverine => {
                PatternTextureSet::albedo_only("patterns/types/wolverine.png")
            }
            PatternType::Leopard => PatternTextureSet::albedo_only("patterns/types/leopard.png"),
            PatternType::Jaguar => PatternTextureSet::albedo_only("patterns/types/jaguar.png"),
        };
        Some(set)
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 3] = [
        PatternCategory::Stripes,
        PatternCategory::Animals,
        PatternCategory::Camo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PatternCategory::Stripes => "Stripes",
            PatternCategory::Animals => "Animals",
            PatternCategory::Camo => "Camo",
        }
    }

    pub fn types(self) -> impl Iterator<Item = PatternType> {
        PatternType::ALL
            .into_iter()
            .filter(move |pattern| pattern.category() == Some(self))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternConfig {
    pub pattern_type: PatternType,
    pub intensity: f32,
    pub apply_to_zones: BTreeSet<Zone>,
    pub color: HexColor,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            pattern_type: PatternType::None,
            intensity: DEFAULT_PATTERN_INTENSITY,
            apply_to_zones: BTreeSet::new(),
            color: HexColor::from_static(DEFAULT_PATTERN_COLOR),
        }
    }
}

impl PatternConfig {
    pub fn is_active(&self) -> bool {
        self.pattern_type != PatternType::None
    }

    pub fn opacity(&self) -> f32 {
        self.intensity.clamp(0.0, 1.0)
    }

    /// Texture patterns land on the shell when no zone was picked explicitly.
    pub fn texture_zones(&self) -> BTreeSet<Zone> {
        if self.apply_to_zones.is_empty() {
            BTreeSet::from([Zone::Shell])
        } else {
            self.apply_to_zones.clone()
        }
    }
}

/// What the overlay renderer has to do to go from one pattern state to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTransition {
    Unchanged,
    Clear,
    Rebuild,
    MaterialOnly,
}

pub fn overlay_transition(previous: &PatternConfig, next: &PatternConfig) -> OverlayTransition {
    if !next.is_active() {
        return if previous.is_active() {
            OverlayTransition::Clear
        } else {
            OverlayTransition::Unchanged
        };
    }
    if previous.pattern_type != next.pattern_type
        || (next.pattern_type.kind() == PatternKind::Texture
            && previous.apply_to_zones != next.apply_to_zones)
    {
        return OverlayTransition::Rebuild;
    }
    if previous.color != next.color || previous.intensity.to_bits() != next.intensity.to_bits() {
        return OverlayTransition::MaterialOnly;
    }
    OverlayTransition::Unchanged
}
