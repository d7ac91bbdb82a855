use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::ConfigError;
use crate::finish::FinishId;
use crate::pattern::{PatternConfig, PatternType};
use crate::zone::Zone;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub color: HexColor,
    pub finish: FinishId,
}

impl ZoneConfig {
    fn builtin(color: &'static str, finish: FinishId) -> Self {
        Self {
            color: HexColor::from_static(color),
            finish,
        }
    }
}

/// One configuration per zone. Kept as named fields so a zone can never be
/// missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmetConfig {
    pub shell: ZoneConfig,
    pub facemask: ZoneConfig,
    pub chinstrap: ZoneConfig,
    pub padding: ZoneConfig,
    pub hardware: ZoneConfig,
}

impl Default for HelmetConfig {
    fn default() -> Self {
        Self {
            shell: ZoneConfig::builtin("#FFFFFF", FinishId::Glossy),
            facemask: ZoneConfig::builtin("#7F7F7F", FinishId::Brushed),
            chinstrap: ZoneConfig::builtin("#1C1C1C", FinishId::Matte),
            padding: ZoneConfig::builtin("#333333", FinishId::Matte),
            hardware: ZoneConfig::builtin("#C0C0C0", FinishId::Chrome),
        }
    }
}

impl HelmetConfig {
    pub fn get(&self, zone: Zone) -> &ZoneConfig {
        match zone {
            Zone::Shell => &self.shell,
            Zone::Facemask => &self.facemask,
            Zone::Chinstrap => &self.chinstrap,
            Zone::Padding => &self.padding,
            Zone::Hardware => &self.hardware,
        }
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut ZoneConfig {
        match zone {
            Zone::Shell => &mut self.shell,
            Zone::Facemask => &mut self.facemask,
            Zone::Chinstrap => &mut self.chinstrap,
            Zone::Padding => &mut self.padding,
            Zone::Hardware => &mut self.hardware,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, &ZoneConfig)> {
        Zone::ORDERED.into_iter().map(move |zone| (zone, self.get(zone)))
    }
}

/// Delivered to subscribers after a write has been committed.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigChange {
    Color { zone: Zone, color: HexColor },
    Finish { zone: Zone, finish: FinishId },
    ActiveZone(Zone),
    Pattern,
    Reset,
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ConfigChange) + Send + Sync>;

/// Single source of truth for the customizer state.
///
/// Every committed write bumps [`ZoneConfigStore::revision`] and notifies
/// subscribers in registration order before returning. Rejected writes leave
/// state, revision and subscribers untouched.
pub struct ZoneConfigStore {
    config: HelmetConfig,
    defaults: HelmetConfig,
    active_zone: Zone,
    pattern: PatternConfig,
    revision: u64,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl fmt::Debug for ZoneConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoneConfigStore")
            .field("config", &self.config)
            .field("active_zone", &self.active_zone)
            .field("pattern", &self.pattern)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for ZoneConfigStore {
    fn default() -> Self {
        Self::with_defaults(HelmetConfig::default())
    }
}

impl ZoneConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: HelmetConfig) -> Self {
        Self {
            config: defaults.clone(),
            defaults,
            active_zone: Zone::Shell,
            pattern: PatternConfig::default(),
            revision: 0,
            next_subscription: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn set_color(&mut self, zone: Zone, raw: &str) -> Result<(), ConfigError> {
        let color = HexColor::parse(raw)?;
        self.config.get_mut(zone).color = color.clone();
        self.commit(ConfigChange::Color { zone, color });
        Ok(())
    }

    pub fn set_finish(&mut self, zone: Zone, finish: FinishId) {
        self.config.get_mut(zone).finish = finish;
        self.commit(ConfigChange::Finish { zone, finish });
    }

    pub fn config(&self, zone: Zone) -> ZoneConfig {
        self.config.get(zone).clone()
    }

    pub fn snapshot(&self) -> &HelmetConfig {
        &self.config
    }

    pub fn defaults(&self) -> &HelmetConfig {
        &self.defaults
    }

    pub fn reset_to_defaults(&mut self) {
        self.config = self.defaults.clone();
        self.active_zone = Zone::Shell;
        self.pattern = PatternConfig::default();
        self.commit(ConfigChange::Reset);
    }

    pub fn active_zone(&self) -> Zone {
        self.active_zone
    }

    pub fn set_active_zone(&mut self, zone: Zone) {
        self.active_zone = zone;
        self.commit(ConfigChange::ActiveZone(zone));
    }

    pub fn pattern(&self) -> &PatternConfig {
        &self.pattern
    }

    /// Selects a pattern while keeping the stripe color and zone selection.
    pub fn set_pattern(
        &mut self,
        pattern_type: PatternType,
        intensity: f32,
    ) -> Result<(), ConfigError> {
        let intensity = checked_intensity(intensity)?;
        self.pattern.pattern_type = pattern_type;
        self.pattern.intensity = intensity;
        self.commit(ConfigChange::Pattern);
        Ok(())
    }

    pub fn set_pattern_intensity(&mut self, intensity: f32) -> Result<(), ConfigError> {
        let intensity = checked_intensity(intensity)?;
        self.pattern.intensity = intensity;
        self.commit(ConfigChange::Pattern);
        Ok(())
    }

    pub fn set_pattern_color(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.pattern.color = HexColor::parse(raw)?;
        self.commit(ConfigChange::Pattern);
        Ok(())
    }

    pub fn toggle_pattern_zone(&mut self, zone: Zone) {
        if !self.pattern.apply_to_zones.remove(&zone) {
            self.pattern.apply_to_zones.insert(zone);
        }
        self.commit(ConfigChange::Pattern);
    }

    pub fn clear_pattern(&mut self) {
        self.pattern = PatternConfig::default();
        self.commit(ConfigChange::Pattern);
    }

    /// Replaces every zone at once, e.g. after restoring a saved design.
    pub fn load_config(&mut self, config: HelmetConfig) {
        self.config = config;
        self.commit(ConfigChange::Loaded);
    }

    pub(crate) fn load_pattern(&mut self, pattern: PatternConfig) {
        self.pattern = pattern;
        self.commit(ConfigChange::Pattern);
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ConfigChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn commit(&mut self, change: ConfigChange) {
        self.revision = self.revision.wrapping_add(1);
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&change);
        }
    }
}

fn checked_intensity(value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value.clamp(0.0, 1.0))
    } else {
        Err(ConfigError::OutOfRange {
            field: "pattern.intensity",
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_store() -> (ZoneConfigStore, Arc<Mutex<Vec<ConfigChange>>>) {
        let mut store = ZoneConfigStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |change| sink.lock().expect("lock").push(change.clone()));
        (store, seen)
    }

    #[test]
    fn defaults_match_stock_helmet() {
        let store = ZoneConfigStore::new();
        assert_eq!(store.config(Zone::Shell).color.as_str(), "#FFFFFF");
        assert_eq!(store.config(Zone::Shell).finish, FinishId::Glossy);
        assert_eq!(store.config(Zone::Facemask).finish, FinishId::Brushed);
        assert_eq!(store.config(Zone::Chinstrap).color.as_str(), "#1C1C1C");
        assert_eq!(store.config(Zone::Padding).finish, FinishId::Matte);
        assert_eq!(store.config(Zone::Hardware).finish, FinishId::Chrome);
        assert_eq!(store.active_zone(), Zone::Shell);
        assert!(!store.pattern().is_active());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn committed_write_notifies_and_bumps_revision() {
        let (mut store, seen) = recording_store();
        store.set_color(Zone::Padding, "#112233").expect("valid color");
        store.set_finish(Zone::Padding, FinishId::CarbonFiber);

        assert_eq!(store.revision(), 2);
        let seen = seen.lock().expect("lock");
        assert_eq!(
            *seen,
            vec![
                ConfigChange::Color {
                    zone: Zone::Padding,
                    color: HexColor::parse("#112233").expect("color"),
                },
                ConfigChange::Finish {
                    zone: Zone::Padding,
                    finish: FinishId::CarbonFiber,
                },
            ]
        );
    }

    #[test]
    fn rejected_write_is_silent() {
        let (mut store, seen) = recording_store();
        let before = store.config(Zone::Facemask);
        let err = store
            .set_color(Zone::Facemask, "#12345")
            .expect_err("short color");
        assert_eq!(
            err,
            ConfigError::InvalidColor {
                value: "#12345".to_string()
            }
        );
        assert_eq!(store.config(Zone::Facemask), before);
        assert_eq!(store.revision(), 0);
        assert!(seen.lock().expect("lock").is_empty());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let (mut store, seen) = recording_store();
        store.set_active_zone(Zone::Hardware);
        let extra = store.subscribe(|_| {});
        assert!(store.unsubscribe(extra));
        assert!(!store.unsubscribe(extra));
        assert_eq!(seen.lock().expect("lock").len(), 1);
        assert_eq!(store.active_zone(), Zone::Hardware);
    }

    #[test]
    fn reset_clears_pattern_and_active_zone() {
        let mut store = ZoneConfigStore::new();
        store.set_active_zone(Zone::Chinstrap);
        store
            .set_pattern(PatternType::StripeDouble, 0.8)
            .expect("pattern");
        store.toggle_pattern_zone(Zone::Shell);
        store.set_color(Zone::Shell, "#0033A0").expect("color");

        store.reset_to_defaults();

        assert_eq!(store.snapshot(), store.defaults());
        assert_eq!(store.active_zone(), Zone::Shell);
        assert_eq!(*store.pattern(), PatternConfig::default());
    }

    #[test]
    fn pattern_intensity_is_clamped_and_rejects_nan() {
        let mut store = ZoneConfigStore::new();
        store
            .set_pattern(PatternType::StripeSingle, 1.7)
            .expect("clamped");
        assert!((store.pattern().intensity - 1.0).abs() < f32::EPSILON);

        let revision = store.revision();
        assert!(store.set_pattern_intensity(f32::NAN).is_err());
        assert_eq!(store.revision(), revision);
        assert!((store.pattern().intensity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn toggle_pattern_zone_flips_membership() {
        let mut store = ZoneConfigStore::new();
        store.toggle_pattern_zone(Zone::Facemask);
        assert!(store.pattern().apply_to_zones.contains(&Zone::Facemask));
        store.toggle_pattern_zone(Zone::Facemask);
        assert!(store.pattern().apply_to_zones.is_empty());
    }

    #[test]
    fn set_pattern_keeps_stripe_color() {
        let mut store = ZoneConfigStore::new();
        store.set_pattern_color("#CC0000").expect("color");
        store
            .set_pattern(PatternType::StripeSingle, 0.3)
            .expect("pattern");
        assert_eq!(store.pattern().color.as_str(), "#CC0000");
        store.clear_pattern();
        assert_eq!(store.pattern().color.as_str(), "#FFFFFF");
    }

    #[test]
    fn custom_defaults_drive_reset() {
        let mut defaults = HelmetConfig::default();
        defaults.shell.color = HexColor::parse("#000000").expect("black");
        let mut store = ZoneConfigStore::with_defaults(defaults);
        store.set_color(Zone::Shell, "#FFFFFF").expect("white");
        store.reset_to_defaults();
        assert_eq!(store.config(Zone::Shell).color.as_str(), "#000000");
    }
}
