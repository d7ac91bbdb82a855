use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Surface treatment selectable per zone.
///
/// The five core finishes come first; the rest form the premium set. Ids used
/// by the older shared preset library are still accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishId {
    Glossy,
    Matte,
    Chrome,
    #[serde(alias = "brushed_metal", alias = "brushed-metal")]
    Brushed,
    Satin,
    #[serde(alias = "pearl")]
    PearlCoat,
    SatinAutomotive,
    #[serde(alias = "metallic_paint", alias = "metallic-paint")]
    MetallicFlake,
    WetClearcoat,
    #[serde(alias = "anodized")]
    AnodizedMetal,
    BrushedTitanium,
    WeatheredMetal,
    #[serde(alias = "carbon-fiber")]
    CarbonFiber,
    RubberizedSofttouch,
    CeramicGloss,
    FrostedPolycarbonate,
    HolographicFoil,
    Glow,
}

impl FinishId {
    pub const CORE: [FinishId; 5] = [
        FinishId::Glossy,
        FinishId::Matte,
        FinishId::Chrome,
        FinishId::Brushed,
        FinishId::Satin,
    ];

    pub const ALL: [FinishId; 18] = [
        FinishId::Glossy,
        FinishId::Matte,
        FinishId::Chrome,
        FinishId::Brushed,
        FinishId::Satin,
        FinishId::PearlCoat,
        FinishId::SatinAutomotive,
        FinishId::MetallicFlake,
        FinishId::WetClearcoat,
        FinishId::AnodizedMetal,
        FinishId::BrushedTitanium,
        FinishId::WeatheredMetal,
        FinishId::CarbonFiber,
        FinishId::RubberizedSofttouch,
        FinishId::CeramicGloss,
        FinishId::FrostedPolycarbonate,
        FinishId::HolographicFoil,
        FinishId::Glow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FinishId::Glossy => "glossy",
            FinishId::Matte => "matte",
            FinishId::Chrome => "chrome",
            FinishId::Brushed => "brushed",
            FinishId::Satin => "satin",
            FinishId::PearlCoat => "pearl_coat",
            FinishId::SatinAutomotive => "satin_automotive",
            FinishId::MetallicFlake => "metallic_flake",
            FinishId::WetClearcoat => "wet_clearcoat",
            FinishId::AnodizedMetal => "anodized_metal",
            FinishId::BrushedTitanium => "brushed_titanium",
            FinishId::WeatheredMetal => "weathered_metal",
            FinishId::CarbonFiber => "carbon_fiber",
            FinishId::RubberizedSofttouch => "rubberized_softtouch",
            FinishId::CeramicGloss => "ceramic_gloss",
            FinishId::FrostedPolycarbonate => "frosted_polycarbonate",
            FinishId::HolographicFoil => "holographic_foil",
            FinishId::Glow => "glow",
        }
    }

    /// Parses a canonical id or one of the deprecated aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        if let Some(found) = Self::ALL
            .into_iter()
            .find(|finish| finish.as_str() == normalized)
        {
            return Some(found);
        }
        match normalized.as_str() {
            "brushed_metal" | "brushed-metal" => Some(FinishId::Brushed),
            "pearl" => Some(FinishId::PearlCoat),
            "metallic_paint" | "metallic-paint" => Some(FinishId::MetallicFlake),
            "anodized" => Some(FinishId::AnodizedMetal),
            "carbon-fiber" => Some(FinishId::CarbonFiber),
            _ => None,
        }
    }

    pub fn is_premium(self) -> bool {
        !Self::CORE.contains(&self)
    }

    pub fn label(self) -> &'static str {
        match self {
            FinishId::Glossy => "Glossy Plastic",
            FinishId::Matte => "Matte Plastic",
            FinishId::Chrome => "Chrome Mirror",
            FinishId::Brushed => "Brushed Metal",
            FinishId::Satin => "Satin",
            FinishId::PearlCoat => "Pearl Coat",
            FinishId::SatinAutomotive => "Satin Auto",
            FinishId::MetallicFlake => "Metallic Flake",
            FinishId::WetClearcoat => "Wet Clear Coat",
            FinishId::AnodizedMetal => "Anodized Metal",
            FinishId::BrushedTitanium => "Brushed Titanium",
            FinishId::WeatheredMetal => "Weathered Metal",
            FinishId::CarbonFiber => "Carbon Fiber",
            FinishId::RubberizedSofttouch => "Rubberized Soft Touch",
            FinishId::CeramicGloss => "Ceramic Gloss",
            FinishId::FrostedPolycarbonate => "Frosted Polycarbonate",
            FinishId::HolographicFoil => "Holographic Foil",
            FinishId::Glow => "Glow",
        }
    }
}

impl fmt::Display for FinishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishProperties {
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: Option<f32>,
    pub clearcoat_roughness: Option<f32>,
    pub emissive_intensity: Option<f32>,
}

impl FinishProperties {
    const fn pbr(roughness: f32, metalness: f32) -> Self {
        Self {
            roughness,
            metalness,
            clearcoat: None,
            clearcoat_roughness: None,
            emissive_intensity: None,
        }
    }

    const fn coated(
        roughness: f32,
        metalness: f32,
        clearcoat: f32,
        clearcoat_roughness: f32,
    ) -> Self {
        Self {
            roughness,
            metalness,
            clearcoat: Some(clearcoat),
            clearcoat_roughness: Some(clearcoat_roughness),
            emissive_intensity: None,
        }
    }
}

/// Returned for any finish the registry does not know.
pub const DEFAULT_FINISH_PROPERTIES: FinishProperties = FinishProperties::pbr(0.5, 0.5);

const BUILTIN_FINISHES: [(FinishId, FinishProperties); 18] = [
    (FinishId::Glossy, FinishProperties::pbr(0.1, 0.0)),
    (FinishId::Matte, FinishProperties::pbr(0.8, 0.0)),
    (FinishId::Chrome, FinishProperties::pbr(0.05, 1.0)),
    (FinishId::Brushed, FinishProperties::pbr(0.35, 0.9)),
    (FinishId::Satin, FinishProperties::pbr(0.5, 0.1)),
    (FinishId::PearlCoat, FinishProperties::coated(0.2, 0.7, 1.0, 0.05)),
    (
        FinishId::SatinAutomotive,
        FinishProperties::coated(0.6, 0.3, 0.3, 0.4),
    ),
    (FinishId::MetallicFlake, FinishProperties::coated(0.25, 0.8, 0.8, 0.1)),
    (FinishId::WetClearcoat, FinishProperties::coated(0.05, 0.1, 1.0, 0.0)),
    (FinishId::AnodizedMetal, FinishProperties::coated(0.15, 0.95, 0.6, 0.2)),
    (FinishId::BrushedTitanium, FinishProperties::pbr(0.35, 0.9)),
    (FinishId::WeatheredMetal, FinishProperties::pbr(0.65, 0.7)),
    (FinishId::CarbonFiber, FinishProperties::coated(0.3, 0.4, 0.9, 0.1)),
    (FinishId::RubberizedSofttouch, FinishProperties::pbr(0.9, 0.0)),
    (FinishId::CeramicGloss, FinishProperties::coated(0.05, 0.1, 1.0, 0.05)),
    (FinishId::FrostedPolycarbonate, FinishProperties::pbr(0.4, 0.0)),
    (FinishId::HolographicFoil, FinishProperties::coated(0.1, 0.9, 0.5, 0.1)),
    (
        FinishId::Glow,
        FinishProperties {
            roughness: 0.8,
            metalness: 0.0,
            clearcoat: None,
            clearcoat_roughness: None,
            emissive_intensity: Some(1.0),
        },
    ),
];

/// Finish id to PBR parameter table. Built once at startup and read-only
/// afterwards.
#[derive(Clone, Debug)]
pub struct FinishRegistry {
    by_id: BTreeMap<FinishId, FinishProperties>,
}

impl FinishRegistry {
    pub fn builtin() -> Self {
        Self {
            by_id: BUILTIN_FINISHES.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            by_id: BTreeMap::new(),
        }
    }

    pub fn with_entry(mut self, id: FinishId, properties: FinishProperties) -> Self {
        self.by_id.insert(id, properties);
        self
    }

    pub fn lookup(&self, id: FinishId) -> FinishProperties {
        self.by_id
            .get(&id)
            .copied()
            .unwrap_or(DEFAULT_FINISH_PROPERTIES)
    }

    pub fn lookup_name(&self, raw: &str) -> FinishProperties {
        FinishId::parse(raw)
            .map(|id| self.lookup(id))
            .unwrap_or(DEFAULT_FINISH_PROPERTIES)
    }

    pub fn contains(&self, id: FinishId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for FinishRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
