use super::*;
use bevy::log::LogPlugin;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

fn insert_customizer_resources(app: &mut App, config: HelmetViewerConfig) {
    let persistence = DesignPersistence::new(DesignStorage::from_config(&config));
    app.insert_resource(config)
        .insert_resource(CustomizerState::default())
        .insert_resource(ZoneMapConfig::default())
        .insert_resource(MaterialSynthesis::default())
        .insert_resource(persistence);
}

pub(super) fn run_ui(config: HelmetViewerConfig) {
    let mut app = App::new();
    insert_customizer_resources(&mut app, config);
    app.insert_resource(ZoneBindings::default())
        .insert_resource(PatternOverlayState::default())
        .insert_resource(ControlPanelState::default())
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Helmet Customizer".to_string(),
                resolution: (1200, 800).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_systems(
            Startup,
            (
                load_zone_map_override,
                restore_saved_design,
                setup_helmet_scene,
            ),
        )
        .add_systems(
            Update,
            (
                bind_zone_meshes,
                persist_design_requests,
                sync_zone_materials
                    .after(bind_zone_meshes)
                    .after(persist_design_requests),
                sync_pattern_overlay.after(sync_zone_materials),
                orbit_camera_controls,
            ),
        )
        .add_systems(EguiPrimaryContextPass, render_control_panel_egui)
        .run();
}

pub(super) fn run_headless(config: HelmetViewerConfig) {
    let mut app = App::new();
    insert_customizer_resources(&mut app, config);
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_systems(Startup, (load_zone_map_override, restore_saved_design))
        .add_systems(Update, headless_report)
        .run();
}
