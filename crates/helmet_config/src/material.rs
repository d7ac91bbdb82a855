use crate::finish::{FinishId, FinishRegistry};
use crate::store::ZoneConfig;
use crate::zone::Zone;

pub const DEFAULT_ENV_MAP_INTENSITY: f32 = 1.0;

/// Per-finish adjustments layered on top of the registry values.
///
/// `None` keeps whatever the registry produced for that field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishOverride {
    pub roughness: Option<f32>,
    pub metalness: Option<f32>,
    pub clearcoat: Option<f32>,
    pub clearcoat_roughness: Option<f32>,
    pub env_map_intensity: f32,
}

impl FinishOverride {
    pub const NONE: FinishOverride = FinishOverride {
        roughness: None,
        metalness: None,
        clearcoat: None,
        clearcoat_roughness: None,
        env_map_intensity: DEFAULT_ENV_MAP_INTENSITY,
    };

    const fn env(env_map_intensity: f32) -> Self {
        Self {
            env_map_intensity,
            ..Self::NONE
        }
    }
}

const FINISH_OVERRIDES: [(FinishId, FinishOverride); 5] = [
    (
        FinishId::Glossy,
        FinishOverride {
            clearcoat: Some(0.5),
            clearcoat_roughness: Some(0.1),
            ..FinishOverride::env(1.5)
        },
    ),
    (
        FinishId::Matte,
        FinishOverride {
            roughness: Some(0.9),
            metalness: Some(0.0),
            ..FinishOverride::env(0.4)
        },
    ),
    (
        FinishId::Chrome,
        FinishOverride {
            roughness: Some(0.0),
            metalness: Some(1.0),
            ..FinishOverride::env(2.0)
        },
    ),
    (FinishId::Brushed, FinishOverride::env(1.3)),
    (
        FinishId::Satin,
        FinishOverride {
            clearcoat: Some(0.2),
            clearcoat_roughness: Some(0.3),
            ..FinishOverride::env(0.9)
        },
    ),
];

pub fn finish_override(id: FinishId) -> FinishOverride {
    FINISH_OVERRIDES
        .iter()
        .find(|(finish, _)| *finish == id)
        .map(|(_, delta)| *delta)
        .unwrap_or(FinishOverride::NONE)
}

/// Final values written onto a mesh material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub base_color_srgb: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub env_map_intensity: f32,
    pub emissive_intensity: f32,
}

/// Engine-side material handle the synthesizer writes into.
pub trait MaterialTarget {
    fn set_base_color_srgb(&mut self, rgb: [f32; 3]);
    fn set_roughness(&mut self, value: f32);
    fn set_metalness(&mut self, value: f32);
    fn set_clearcoat(&mut self, value: f32, roughness: f32);
    fn set_env_map_intensity(&mut self, value: f32);
    fn set_emissive_intensity(&mut self, value: f32);
    fn mark_dirty(&mut self);
}

#[derive(Clone, Debug, Default)]
pub struct MaterialSynthesizer {
    registry: FinishRegistry,
}

impl MaterialSynthesizer {
    pub fn new(registry: FinishRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &FinishRegistry {
        &self.registry
    }

    pub fn synthesize(&self, config: &ZoneConfig) -> MaterialParams {
        let props = self.registry.lookup(config.finish);
        let delta = finish_override(config.finish);
        MaterialParams {
            base_color_srgb: config.color.to_srgb_f32(),
            roughness: delta.roughness.unwrap_or(props.roughness).clamp(0.0, 1.0),
            metalness: delta.metalness.unwrap_or(props.metalness).clamp(0.0, 1.0),
            clearcoat: delta
                .clearcoat
                .or(props.clearcoat)
                .unwrap_or(0.0)
                .clamp(0.0, 1.0),
            clearcoat_roughness: delta
                .clearcoat_roughness
                .or(props.clearcoat_roughness)
                .unwrap_or(0.0)
                .clamp(0.0, 1.0),
            env_map_intensity: delta.env_map_intensity,
            emissive_intensity: props.emissive_intensity.unwrap_or(0.0).max(0.0),
        }
    }

    /// Writes the zone's configuration onto every object and returns how
    /// many were updated. `zone` only identifies the caller's batch; the
    /// objects are expected to be pre-resolved.
    pub fn apply<'a, T, I>(&self, _zone: Zone, objects: I, config: &ZoneConfig) -> usize
    where
        T: MaterialTarget + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut T>,
    {
        let params = self.synthesize(config);
        let mut written = 0;
        for target in objects {
            write_params(target, &params);
            written += 1;
        }
        written
    }
}

pub fn write_params<T: MaterialTarget + ?Sized>(target: &mut T, params: &MaterialParams) {
    target.set_base_color_srgb(params.base_color_srgb);
    target.set_roughness(params.roughness);
    target.set_metalness(params.metalness);
    target.set_clearcoat(params.clearcoat, params.clearcoat_roughness);
    target.set_env_map_intensity(params.env_map_intensity);
    target.set_emissive_intensity(params.emissive_intensity);
    target.mark_dirty();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::finish::FinishProperties;

    #[derive(Debug, Default)]
    struct RecordedMaterial {
        color: [f32; 3],
        roughness: f32,
        metalness: f32,
        clearcoat: f32,
        clearcoat_roughness: f32,
        env: f32,
        emissive: f32,
        dirty_marks: usize,
    }

    impl MaterialTarget for RecordedMaterial {
        fn set_base_color_srgb(&mut self, rgb: [f32; 3]) {
            self.color = rgb;
        }
        fn set_roughness(&mut self, value: f32) {
            self.roughness = value;
        }
        fn set_metalness(&mut self, value: f32) {
            self.metalness = value;
        }
        fn set_clearcoat(&mut self, value: f32, roughness: f32) {
            self.clearcoat = value;
            self.clearcoat_roughness = roughness;
        }
        fn set_env_map_intensity(&mut self, value: f32) {
            self.env = value;
        }
        fn set_emissive_intensity(&mut self, value: f32) {
            self.emissive = value;
        }
        fn mark_dirty(&mut self) {
            self.dirty_marks += 1;
        }
    }

    fn zone_config(color: &str, finish: FinishId) -> ZoneConfig {
        ZoneConfig {
            color: HexColor::parse(color).expect("color"),
            finish,
        }
    }

    #[test]
    fn chrome_override_wins_over_prior_state_and_registry() {
        let synthesizer = MaterialSynthesizer::default();
        let mut objects = vec![
            RecordedMaterial {
                roughness: 0.7,
                metalness: 0.2,
                ..RecordedMaterial::default()
            },
            RecordedMaterial {
                roughness: 1.0,
                metalness: 0.0,
                clearcoat: 0.9,
                ..RecordedMaterial::default()
            },
        ];

        let written = synthesizer.apply(
            Zone::Hardware,
            objects.iter_mut(),
            &zone_config("#C0C0C0", FinishId::Chrome),
        );

        assert_eq!(written, 2);
        for object in &objects {
            assert!((object.metalness - 1.0).abs() < f32::EPSILON);
            assert!(object.roughness.abs() < f32::EPSILON);
            assert!(object.clearcoat.abs() < f32::EPSILON);
            assert!((object.env - 2.0).abs() < f32::EPSILON);
            assert_eq!(object.dirty_marks, 1);
        }
    }

    #[test]
    fn chrome_override_ignores_custom_registry_values() {
        let registry = FinishRegistry::builtin().with_entry(
            FinishId::Chrome,
            FinishProperties {
                roughness: 0.4,
                metalness: 0.3,
                clearcoat: None,
                clearcoat_roughness: None,
                emissive_intensity: None,
            },
        );
        let params = MaterialSynthesizer::new(registry)
            .synthesize(&zone_config("#FFFFFF", FinishId::Chrome));
        assert!((params.metalness - 1.0).abs() < f32::EPSILON);
        assert!(params.roughness.abs() < f32::EPSILON);
    }

    #[test]
    fn matte_forces_rough_dielectric_surface() {
        let params =
            MaterialSynthesizer::default().synthesize(&zone_config("#1C1C1C", FinishId::Matte));
        assert!((params.roughness - 0.9).abs() < f32::EPSILON);
        assert!(params.metalness.abs() < f32::EPSILON);
        assert!(params.clearcoat.abs() < f32::EPSILON);
        assert!((params.env_map_intensity - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn glossy_and_satin_receive_clearcoat_overrides() {
        let synthesizer = MaterialSynthesizer::default();
        let glossy = synthesizer.synthesize(&zone_config("#FFFFFF", FinishId::Glossy));
        assert!((glossy.roughness - 0.1).abs() < f32::EPSILON);
        assert!((glossy.clearcoat - 0.5).abs() < f32::EPSILON);
        assert!((glossy.clearcoat_roughness - 0.1).abs() < f32::EPSILON);
        assert!((glossy.env_map_intensity - 1.5).abs() < f32::EPSILON);

        let satin = synthesizer.synthesize(&zone_config("#FFFFFF", FinishId::Satin));
        assert!((satin.clearcoat - 0.2).abs() < f32::EPSILON);
        assert!((satin.clearcoat_roughness - 0.3).abs() < f32::EPSILON);
        assert!((satin.env_map_intensity - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn premium_finishes_keep_registry_values_with_neutral_environment() {
        let synthesizer = MaterialSynthesizer::default();
        let pearl = synthesizer.synthesize(&zone_config("#FFFFFF", FinishId::PearlCoat));
        assert!((pearl.roughness - 0.2).abs() < f32::EPSILON);
        assert!((pearl.metalness - 0.7).abs() < f32::EPSILON);
        assert!((pearl.clearcoat - 1.0).abs() < f32::EPSILON);
        assert!((pearl.env_map_intensity - DEFAULT_ENV_MAP_INTENSITY).abs() < f32::EPSILON);

        let glow = synthesizer.synthesize(&zone_config("#00CC00", FinishId::Glow));
        assert!((glow.emissive_intensity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn override_table_has_unique_entries() {
        for (index, (id, _)) in FINISH_OVERRIDES.iter().enumerate() {
            assert!(
                FINISH_OVERRIDES[index + 1..]
                    .iter()
                    .all(|(other, _)| other != id),
                "{id} listed twice"
            );
        }
        assert_eq!(finish_override(FinishId::CarbonFiber), FinishOverride::NONE);
    }

    #[test]
    fn base_color_follows_zone_color() {
        let params =
            MaterialSynthesizer::default().synthesize(&zone_config("#FF0000", FinishId::Glossy));
        assert_eq!(params.base_color_srgb, [1.0, 0.0, 0.0]);
    }
}
