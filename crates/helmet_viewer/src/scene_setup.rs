use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use super::{HelmetViewerConfig, OrbitCamera};

const HELMET_FOCUS: Vec3 = Vec3::new(0.0, 0.0, 0.0);
const INITIAL_YAW: f32 = 0.6;
const INITIAL_PITCH: f32 = -0.25;

#[derive(Component)]
pub(super) struct HelmetCamera;

#[derive(Component)]
pub(super) struct HelmetRoot;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum LightRigRole {
    Key,
    Fill,
}

pub(super) fn setup_helmet_scene(
    mut commands: Commands,
    config: Res<HelmetViewerConfig>,
    asset_server: Res<AssetServer>,
) {
    let orbit = initial_orbit(&config);
    let mut camera_transform = Transform::default();
    orbit.apply_to_transform(&mut camera_transform);
    commands.spawn((Camera3d::default(), camera_transform, HelmetCamera, orbit));

    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(0.94, 0.97, 1.0),
        brightness: config.lighting.ambient_brightness,
        affects_lightmapped_meshes: true,
    });

    let (key_illuminance, fill_illuminance) = lighting_illuminance_pair(&config);
    commands.spawn((
        DirectionalLight {
            illuminance: key_illuminance,
            shadows_enabled: config.lighting.shadows_enabled,
            ..default()
        },
        Transform::from_xyz(5.0, 8.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        LightRigRole::Key,
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: fill_illuminance,
            color: Color::srgb(0.78, 0.84, 0.95),
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(-5.0, 3.0, -5.0).looking_at(Vec3::ZERO, Vec3::Y),
        LightRigRole::Fill,
    ));

    info!("loading helmet model {}", config.model_path);
    commands.spawn((
        SceneRoot(
            asset_server.load(GltfAssetLabel::Scene(0).from_asset(config.model_path.clone())),
        ),
        Transform::default(),
        HelmetRoot,
        Name::new("Helmet_Root"),
    ));
}

fn initial_orbit(config: &HelmetViewerConfig) -> OrbitCamera {
    OrbitCamera {
        focus: HELMET_FOCUS,
        radius: config.orbit.initial_radius,
        yaw: INITIAL_YAW,
        pitch: INITIAL_PITCH,
    }
}

fn lighting_illuminance_pair(config: &HelmetViewerConfig) -> (f32, f32) {
    let key = config.lighting.key_illuminance.max(1.0);
    let fill = key * config.lighting.fill_light_ratio.clamp(0.0, 1.0);
    (key, fill)
}
