use bevy::prelude::*;
use helmet_config::{MaterialSynthesizer, TeamPresetToggle, ZoneConfigStore, ZoneNameMap};

mod app_bootstrap;
mod camera_controls;
mod config_persistence;
mod control_panel;
mod headless;
mod material_sync;
mod pattern_overlay;
mod scene_setup;
mod viewer_config;
mod zone_binding;

use app_bootstrap::{run_headless, run_ui};
use camera_controls::{orbit_camera_controls, OrbitCamera};
use config_persistence::{
    persist_design_requests, restore_saved_design, DesignPersistence, DesignStorage,
    PersistenceRequest,
};
use control_panel::{render_control_panel_egui, ControlPanelState};
use headless::headless_report;
use material_sync::sync_zone_materials;
use pattern_overlay::{sync_pattern_overlay, PatternOverlayState, PatternStripe};
use scene_setup::{setup_helmet_scene, HelmetCamera};
use viewer_config::{
    headless_requested, resolve_helmet_viewer_config, HelmetViewerConfig, StripeGeometryConfig,
};
use zone_binding::{bind_zone_meshes, load_zone_map_override, ZoneBindings, ZoneMember};

const UI_PANEL_WIDTH: f32 = 340.0;

/// Customizer state shared by the panel, the material sync and persistence.
#[derive(Resource, Debug, Default)]
struct CustomizerState {
    store: ZoneConfigStore,
    team_toggle: TeamPresetToggle,
}

#[derive(Resource, Clone, Debug, Default)]
struct ZoneMapConfig {
    map: ZoneNameMap,
}

#[derive(Resource, Clone, Debug, Default)]
struct MaterialSynthesis {
    synthesizer: MaterialSynthesizer,
}

fn main() {
    let config = resolve_helmet_viewer_config();
    if headless_requested() {
        run_headless(config);
    } else {
        run_ui(config);
    }
}
