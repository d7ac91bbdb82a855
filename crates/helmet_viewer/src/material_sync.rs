use bevy::prelude::*;
use helmet_config::{MaterialTarget, Zone};

use super::{CustomizerState, MaterialSynthesis, ZoneBindings, ZoneMember};

/// `MaterialTarget` view over a Bevy PBR material.
struct StandardMaterialTarget<'a> {
    material: &'a mut StandardMaterial,
}

impl MaterialTarget for StandardMaterialTarget<'_> {
    fn set_base_color_srgb(&mut self, rgb: [f32; 3]) {
        let alpha = self.material.base_color.alpha();
        self.material.base_color = Color::srgba(rgb[0], rgb[1], rgb[2], alpha);
    }

    fn set_roughness(&mut self, value: f32) {
        self.material.perceptual_roughness = value;
    }

    fn set_metalness(&mut self, value: f32) {
        self.material.metallic = value;
    }

    fn set_clearcoat(&mut self, value: f32, roughness: f32) {
        self.material.clearcoat = value;
        self.material.clearcoat_perceptual_roughness = roughness;
    }

    // No per-material environment map here; the intensity scales specular
    // reflectance around the PBR default of 0.5.
    fn set_env_map_intensity(&mut self, value: f32) {
        self.material.reflectance = (0.5 * value).clamp(0.0, 1.0);
    }

    fn set_emissive_intensity(&mut self, value: f32) {
        self.material.emissive = self.material.base_color.to_linear() * value;
    }

    // `Assets::get_mut` already flags the asset as modified.
    fn mark_dirty(&mut self) {}
}

pub(super) fn sync_zone_materials(
    state: Res<CustomizerState>,
    bindings: Res<ZoneBindings>,
    synthesis: Res<MaterialSynthesis>,
    members: Query<(&ZoneMember, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut last_synced: Local<Option<(u64, u64)>>,
) {
    let key = (state.store.revision(), bindings.generation);
    if *last_synced == Some(key) {
        return;
    }
    *last_synced = Some(key);

    let mut written = 0;
    for zone in Zone::ORDERED {
        let config = state.store.snapshot().get(zone);
        for (member, handle) in &members {
            if member.zone != zone {
                continue;
            }
            let Some(material) = materials.get_mut(&handle.0) else {
                continue;
            };
            let mut target = StandardMaterialTarget { material };
            written += synthesis
                .synthesizer
                .apply(zone, [&mut target], config);
        }
    }
    if written > 0 {
        debug!(
            "synced {written} zone materials (revision {}, bindings {})",
            key.0, key.1
        );
    }
}
