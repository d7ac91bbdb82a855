use std::collections::{BTreeMap, BTreeSet, HashSet};

use bevy::gltf::{GltfExtras, GltfMeshExtras};
use bevy::prelude::*;
use helmet_config::{resolve, SceneSnapshot, Zone, ZoneNameMap};

use super::{HelmetViewerConfig, PatternStripe, ZoneMapConfig};

const ZONE_EXTRAS_KEY: &str = "helmet_zone";

/// Zone a mesh entity was bound to. The entity owns a private copy of its
/// material so zones sharing a glTF material can diverge.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ZoneMember {
    pub zone: Zone,
}

/// Marks mesh entities that have already been through zone resolution.
#[derive(Component)]
pub(super) struct ZoneBindingChecked;

#[derive(Resource, Debug, Default)]
pub(super) struct ZoneBindings {
    /// Bumped whenever new meshes join a zone.
    pub generation: u64,
    pub counts: BTreeMap<Zone, usize>,
    warned_missing: BTreeSet<Zone>,
}

impl ZoneBindings {
    pub(super) fn count(&self, zone: Zone) -> usize {
        self.counts.get(&zone).copied().unwrap_or(0)
    }

    fn record(&mut self, zone: Zone, added: usize) {
        *self.counts.entry(zone).or_insert(0) += added;
    }

    fn unwarned_missing(&mut self) -> Vec<Zone> {
        let missing: Vec<Zone> = Zone::ORDERED
            .into_iter()
            .filter(|zone| self.count(*zone) == 0 && !self.warned_missing.contains(zone))
            .collect();
        self.warned_missing.extend(missing.iter().copied());
        missing
    }
}

type UncheckedMesh<'a> = (
    Entity,
    Option<&'a Name>,
    Option<&'a ChildOf>,
    Option<&'a MeshMaterial3d<StandardMaterial>>,
);

type SceneNodeInfo<'a> = (
    Option<&'a Name>,
    Option<&'a ChildOf>,
    Option<&'a GltfExtras>,
    Option<&'a GltfMeshExtras>,
);

#[cfg(not(target_arch = "wasm32"))]
pub(super) fn load_zone_map_override(
    config: Res<HelmetViewerConfig>,
    mut zone_map: ResMut<ZoneMapConfig>,
) {
    let Some(path) = config.zone_map_path.as_deref() else {
        return;
    };
    let loaded = std::fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|raw| ZoneNameMap::from_toml_str(raw.as_str()).map_err(|err| err.to_string()));
    match loaded {
        Ok(map) => {
            info!(
                "zone map override loaded from {path} ({} zones)",
                map.entries().len()
            );
            zone_map.map = map;
        }
        Err(err) => warn!("zone map override {path} ignored: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
pub(super) fn load_zone_map_override(config: Res<HelmetViewerConfig>) {
    if let Some(path) = config.zone_map_path.as_deref() {
        warn!("zone map override {path} is not supported in the browser build");
    }
}

pub(super) fn bind_zone_meshes(
    mut commands: Commands,
    zone_map: Res<ZoneMapConfig>,
    mut bindings: ResMut<ZoneBindings>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    unchecked: Query<
        UncheckedMesh,
        (
            With<Mesh3d>,
            Without<ZoneBindingChecked>,
            Without<PatternStripe>,
        ),
    >,
    nodes: Query<SceneNodeInfo>,
) {
    if unchecked.is_empty() {
        return;
    }

    let mut snapshot = SceneSnapshot::new();
    let mesh_entities: HashSet<Entity> = unchecked.iter().map(|(entity, ..)| entity).collect();

    for (_, _, child_of, _) in unchecked.iter() {
        let Some(parent) = child_of.map(ChildOf::parent) else {
            continue;
        };
        if mesh_entities.contains(&parent) {
            continue;
        }
        if let Ok((name, grand_parent, extras, mesh_extras)) = nodes.get(parent) {
            snapshot.add_group(
                parent,
                name.map(Name::as_str),
                grand_parent.map(ChildOf::parent),
            );
            if let Some(tag) = zone_tag_from_extras(extras, mesh_extras) {
                snapshot.set_zone_tag(parent, tag.as_str());
            }
        }
    }

    for (entity, name, child_of, _) in unchecked.iter() {
        snapshot.add_mesh(entity, name.map(Name::as_str), child_of.map(ChildOf::parent));
        if let Ok((_, _, extras, mesh_extras)) = nodes.get(entity) {
            if let Some(tag) = zone_tag_from_extras(extras, mesh_extras) {
                snapshot.set_zone_tag(entity, tag.as_str());
            }
        }
    }

    let resolution = resolve(&snapshot, &zone_map.map);
    let mut bound = 0;
    for (entity, _, _, material) in unchecked.iter() {
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert(ZoneBindingChecked);
        let Some(zone) = resolution.zone_of(entity) else {
            continue;
        };
        let own_material = material
            .and_then(|handle| materials.get(&handle.0).cloned())
            .unwrap_or_default();
        entity_commands.insert((
            ZoneMember { zone },
            MeshMaterial3d(materials.add(own_material)),
        ));
        bindings.record(zone, 1);
        bound += 1;
    }

    if bound > 0 {
        bindings.generation = bindings.generation.wrapping_add(1);
        debug!(
            "bound {bound} helmet meshes to zones (generation {})",
            bindings.generation
        );
    }
    for zone in bindings.unwarned_missing() {
        warn!("no mesh in the helmet model matches zone {zone}");
    }
}

fn zone_tag_from_extras(
    extras: Option<&GltfExtras>,
    mesh_extras: Option<&GltfMeshExtras>,
) -> Option<String> {
    extras
        .and_then(|extras| zone_tag_from_json(extras.value.as_str()))
        .or_else(|| mesh_extras.and_then(|extras| zone_tag_from_json(extras.value.as_str())))
}

fn zone_tag_from_json(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    value
        .get(ZONE_EXTRAS_KEY)
        .and_then(serde_json::Value::as_str)
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
}
