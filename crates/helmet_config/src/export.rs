use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::ConfigError;
use crate::finish::FinishId;
use crate::pattern::{PatternConfig, PatternType, DEFAULT_PATTERN_INTENSITY};
use crate::store::{HelmetConfig, ZoneConfigStore};
use crate::zone::Zone;

pub const EXPORT_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneExport {
    pub color: String,
    pub finish: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternExport {
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub intensity: f32,
    #[serde(default)]
    pub apply_to_zones: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Saved design. Fields stay as plain strings so a file written by another
/// build can still be read and repaired field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmetExportConfig {
    pub version: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub zones: BTreeMap<String, ZoneExport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternExport>,
}

impl HelmetExportConfig {
    pub fn from_store(store: &ZoneConfigStore, timestamp: u64) -> Self {
        let zones = store
            .snapshot()
            .iter()
            .map(|(zone, config)| {
                (
                    zone.as_str().to_string(),
                    ZoneExport {
                        color: config.color.to_string(),
                        finish: config.finish.as_str().to_string(),
                    },
                )
            })
            .collect();
        let pattern = store.pattern();
        Self {
            version: EXPORT_SCHEMA_VERSION.to_string(),
            timestamp,
            zones,
            pattern: Some(PatternExport {
                pattern_type: pattern.pattern_type.as_str().to_string(),
                intensity: pattern.intensity,
                apply_to_zones: pattern
                    .apply_to_zones
                    .iter()
                    .map(|zone| zone.as_str().to_string())
                    .collect(),
                color: Some(pattern.color.to_string()),
            }),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::Serialize {
            reason: err.to_string(),
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|err| ConfigError::Deserialize {
            reason: err.to_string(),
        })
    }

    /// Loads the saved design into `store`. Anything unusable falls back to
    /// the store defaults and is reported in the returned warnings.
    pub fn restore(&self, store: &mut ZoneConfigStore) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.version.split('.').next() != EXPORT_SCHEMA_VERSION.split('.').next() {
            warnings.push(format!(
                "export version {} differs from {}, reading best effort",
                self.version, EXPORT_SCHEMA_VERSION
            ));
        }

        let config = self.restore_zones(store.defaults(), &mut warnings);
        store.load_config(config);

        let pattern = match &self.pattern {
            Some(saved) => restore_pattern(saved, &mut warnings),
            None => PatternConfig::default(),
        };
        store.load_pattern(pattern);
        warnings
    }

    fn restore_zones(&self, defaults: &HelmetConfig, warnings: &mut Vec<String>) -> HelmetConfig {
        let mut config = defaults.clone();
        for key in self.zones.keys() {
            if Zone::parse(key).is_none() {
                warnings.push(format!("ignoring unknown zone {key}"));
            }
        }
        for zone in Zone::ORDERED {
            let Some(saved) = self
                .zones
                .iter()
                .find(|(key, _)| Zone::parse(key) == Some(zone))
                .map(|(_, saved)| saved)
            else {
                warnings.push(format!("zone {zone} missing, keeping default"));
                continue;
            };
            let target = config.get_mut(zone);
            match HexColor::parse(saved.color.as_str()) {
                Ok(color) => target.color = color,
                Err(err) => warnings.push(format!("zone {zone}: {err}, keeping default color")),
            }
            match FinishId::parse(saved.finish.as_str()) {
                Some(finish) => target.finish = finish,
                None => warnings.push(format!(
                    "zone {zone}: unknown finish {}, using {}",
                    saved.finish, target.finish
                )),
            }
        }
        config
    }
}

fn restore_pattern(saved: &PatternExport, warnings: &mut Vec<String>) -> PatternConfig {
    let mut pattern = PatternConfig::default();
    match PatternType::parse(saved.pattern_type.as_str()) {
        Some(pattern_type) => pattern.pattern_type = pattern_type,
        None => warnings.push(format!(
            "unknown pattern type {}, pattern cleared",
            saved.pattern_type
        )),
    }
    if saved.intensity.is_finite() {
        pattern.intensity = saved.intensity.clamp(0.0, 1.0);
    } else {
        warnings.push(format!(
            "pattern intensity {} invalid, using {DEFAULT_PATTERN_INTENSITY}",
            saved.intensity
        ));
    }
    let mut zones = BTreeSet::new();
    for raw in &saved.apply_to_zones {
        match Zone::parse(raw) {
            Some(zone) => {
                zones.insert(zone);
            }
            None => warnings.push(format!("pattern zone {raw} unknown, skipped")),
        }
    }
    pattern.apply_to_zones = zones;
    if let Some(raw) = &saved.color {
        match HexColor::parse(raw) {
            Ok(color) => pattern.color = color,
            Err(err) => warnings.push(format!("pattern {err}, keeping default color")),
        }
    }
    pattern
}
