use bevy::prelude::Resource;

const DEFAULT_MODEL_PATH: &str = "models/helmet_glossy_VERSION_A.glb";
const DEFAULT_SAVE_PATH: &str = "helmet_design.json";
const DEFAULT_STORAGE_KEY: &str = "helmet-customizer-config";
const DEFAULT_ORBIT_MIN_RADIUS: f32 = 4.0;
const DEFAULT_ORBIT_MAX_RADIUS: f32 = 12.0;
const DEFAULT_ORBIT_RADIUS: f32 = 6.0;
const DEFAULT_SHADOWS_ENABLED: bool = true;
const DEFAULT_AMBIENT_BRIGHTNESS: f32 = 400.0;
const DEFAULT_KEY_ILLUMINANCE: f32 = 9_000.0;
const DEFAULT_FILL_LIGHT_RATIO: f32 = 0.35;
const DEFAULT_STRIPE_SAMPLES: usize = 64;
const DEFAULT_STRIPE_RADIAL_SEGMENTS: usize = 12;
const DEFAULT_STRIPE_RADIUS: f32 = 0.04;

#[derive(Clone, Debug, Resource)]
pub(super) struct HelmetViewerConfig {
    pub model_path: String,
    pub zone_map_path: Option<String>,
    pub save_path: String,
    pub storage_key: String,
    pub orbit: OrbitLimits,
    pub lighting: LightingConfig,
    pub stripe: StripeGeometryConfig,
}

impl Default for HelmetViewerConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            zone_map_path: None,
            save_path: DEFAULT_SAVE_PATH.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            orbit: OrbitLimits::default(),
            lighting: LightingConfig::default(),
            stripe: StripeGeometryConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct OrbitLimits {
    pub min_radius: f32,
    pub max_radius: f32,
    pub initial_radius: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_radius: DEFAULT_ORBIT_MIN_RADIUS,
            max_radius: DEFAULT_ORBIT_MAX_RADIUS,
            initial_radius: DEFAULT_ORBIT_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(super) struct LightingConfig {
    pub shadows_enabled: bool,
    pub ambient_brightness: f32,
    pub key_illuminance: f32,
    pub fill_light_ratio: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            shadows_enabled: DEFAULT_SHADOWS_ENABLED,
            ambient_brightness: DEFAULT_AMBIENT_BRIGHTNESS,
            key_illuminance: DEFAULT_KEY_ILLUMINANCE,
            fill_light_ratio: DEFAULT_FILL_LIGHT_RATIO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct StripeGeometryConfig {
    pub samples: usize,
    pub radial_segments: usize,
    pub radius: f32,
}

impl Default for StripeGeometryConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_STRIPE_SAMPLES,
            radial_segments: DEFAULT_STRIPE_RADIAL_SEGMENTS,
            radius: DEFAULT_STRIPE_RADIUS,
        }
    }
}

pub(super) fn resolve_helmet_viewer_config() -> HelmetViewerConfig {
    load_helmet_viewer_config_from(|key| std::env::var(key).ok())
}

pub(super) fn headless_requested() -> bool {
    headless_requested_from(|key| std::env::var(key).ok())
}

fn headless_requested_from<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("HELMET_VIEWER_HEADLESS") {
        Some(raw) => parse_bool_value(raw.as_str()).unwrap_or(true),
        None => false,
    }
}

fn load_helmet_viewer_config_from<F>(lookup: F) -> HelmetViewerConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = HelmetViewerConfig::default();
    if let Some(value) = parse_non_empty(&lookup, "HELMET_VIEWER_MODEL") {
        config.model_path = value;
    }
    config.zone_map_path = parse_non_empty(&lookup, "HELMET_VIEWER_ZONE_MAP");
    if let Some(value) = parse_non_empty(&lookup, "HELMET_VIEWER_SAVE_PATH") {
        config.save_path = value;
    }
    if let Some(value) = parse_non_empty(&lookup, "HELMET_VIEWER_STORAGE_KEY") {
        config.storage_key = value;
    }

    if let Some(value) = parse_f32(&lookup, "HELMET_VIEWER_ORBIT_MIN_RADIUS") {
        if value.is_finite() && value > 0.0 {
            config.orbit.min_radius = value;
        }
    }
    if let Some(value) = parse_f32(&lookup, "HELMET_VIEWER_ORBIT_MAX_RADIUS") {
        if value.is_finite() && value > 0.0 {
            config.orbit.max_radius = value;
        }
    }
    if let Some(value) = parse_f32(&lookup, "HELMET_VIEWER_ORBIT_RADIUS") {
        if value.is_finite() && value > 0.0 {
            config.orbit.initial_radius = value;
        }
    }
    if config.orbit.max_radius <= config.orbit.min_radius {
        config.orbit.max_radius = config.orbit.min_radius + 1.0;
    }
    config.orbit.initial_radius = config
        .orbit
        .initial_radius
        .clamp(config.orbit.min_radius, config.orbit.max_radius);

    if let Some(value) = parse_bool(&lookup, "HELMET_VIEWER_SHADOWS_ENABLED") {
        config.lighting.shadows_enabled = value;
    }
    if let Some(value) = parse_f32(&lookup, "HELMET_VIEWER_AMBIENT_BRIGHTNESS") {
        if value.is_finite() && value >= 0.0 {
            config.lighting.ambient_brightness = value;
        }
    }
    if let Some(value) = parse_f32(&lookup, "HELMET_VIEWER_KEY_ILLUMINANCE") {
        if value.is_finite() && value > 0.0 {
            config.lighting.key_illuminance = value;
        }
    }
    if let Some(value) = parse_f32(&lookup, "HELMET_VIEWER_FILL_LIGHT_RATIO") {
        if value.is_finite() && value >= 0.0 {
            config.lighting.fill_light_ratio = value;
        }
    }

    if let Some(value) = parse_usize(&lookup, "HELMET_VIEWER_STRIPE_SAMPLES") {
        if value >= 2 {
            config.stripe.samples = value;
        }
    }
    if let Some(value) = parse_usize(&lookup, "HELMET_VIEWER_STRIPE_SEGMENTS") {
        if value >= 3 {
            config.stripe.radial_segments = value;
        }
    }
    if let Some(value) = parse_f32(&lookup, "HELMET_VIEWER_STRIPE_RADIUS") {
        if value.is_finite() && value > 0.0 {
            config.stripe.radius = value;
        }
    }
    config
}

fn parse_non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool<F>(lookup: &F, key: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|raw| parse_bool_value(raw.as_str()))
}

fn parse_bool_value(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_f32<F>(lookup: &F, key: &str) -> Option<f32>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|raw| raw.trim().parse::<f32>().ok())
}

fn parse_usize<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|raw| raw.trim().parse::<usize>().ok())
}
