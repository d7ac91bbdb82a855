use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::zone::Zone;

/// Name fragments that identify one zone's meshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneNameEntry {
    pub zone: Zone,
    pub fragments: Vec<String>,
}

/// Zones in match priority order. The first zone with a fragment contained
/// in a node's candidate name claims the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneNameMap {
    entries: Vec<ZoneNameEntry>,
}

#[derive(Debug, Deserialize)]
struct ZoneNameFile {
    #[serde(default, rename = "zone")]
    zones: Vec<RawZoneEntry>,
}

#[derive(Debug, Deserialize)]
struct RawZoneEntry {
    zone: String,
    fragments: Vec<String>,
}

impl ZoneNameMap {
    /// Hardware and the small parts go first so the broad `Shell` fragment
    /// cannot swallow names like `HardwareShell`.
    pub fn builtin() -> Self {
        let entry = |zone: Zone, fragments: [&str; 3]| ZoneNameEntry {
            zone,
            fragments: fragments.iter().map(|fragment| fragment.to_string()).collect(),
        };
        Self {
            entries: vec![
                entry(Zone::Hardware, ["Hardware_Combined", "Hardware", "hardware"]),
                entry(Zone::Facemask, ["Facemask_Combined", "Facemask", "facemask"]),
                entry(Zone::Chinstrap, ["Chinstrap_Combined", "Chinstrap", "chinstrap"]),
                entry(Zone::Padding, ["Padding_Combined", "Padding", "padding"]),
                entry(Zone::Shell, ["Shell_Combined", "Shell", "shell"]),
            ],
        }
    }

    pub fn from_entries(entries: Vec<ZoneNameEntry>) -> Result<Self, ConfigError> {
        for (index, entry) in entries.iter().enumerate() {
            if entries[..index].iter().any(|other| other.zone == entry.zone) {
                return Err(ConfigError::InvalidZoneMap {
                    reason: format!("zone {} listed more than once", entry.zone),
                });
            }
            if entry.fragments.iter().any(|fragment| fragment.is_empty()) {
                return Err(ConfigError::InvalidZoneMap {
                    reason: format!("zone {} has an empty name fragment", entry.zone),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Parses a `[[zone]]` table list. Order in the file is match priority.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ZoneNameFile =
            toml::from_str(raw).map_err(|err| ConfigError::InvalidZoneMap {
                reason: err.to_string(),
            })?;
        let mut entries = Vec::with_capacity(file.zones.len());
        for raw_entry in file.zones {
            let zone = Zone::parse(raw_entry.zone.as_str()).ok_or(ConfigError::UnknownZone {
                value: raw_entry.zone.clone(),
            })?;
            entries.push(ZoneNameEntry {
                zone,
                fragments: raw_entry.fragments,
            });
        }
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[ZoneNameEntry] {
        &self.entries
    }

    pub fn zone_for_name(&self, candidate: &str) -> Option<Zone> {
        if candidate.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| {
                entry
                    .fragments
                    .iter()
                    .any(|fragment| candidate.contains(fragment.as_str()))
            })
            .map(|entry| entry.zone)
    }
}

impl Default for ZoneNameMap {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Read-only view of a loaded scene graph.
pub trait SceneGraph {
    type Node: Copy + Eq + Hash;

    fn mesh_nodes(&self) -> Vec<Self::Node>;
    fn name(&self, node: Self::Node) -> Option<&str>;
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Zone id authored into the asset, if any.
    fn zone_tag(&self, _node: Self::Node) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone)]
struct SnapshotNode<N> {
    name: Option<String>,
    parent: Option<N>,
    zone_tag: Option<String>,
    is_mesh: bool,
}

/// Owned copy of the parts of a scene graph the resolver reads.
#[derive(Debug, Clone)]
pub struct SceneSnapshot<N> {
    order: Vec<N>,
    nodes: HashMap<N, SnapshotNode<N>>,
}

impl<N: Copy + Eq + Hash> Default for SceneSnapshot<N> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            nodes: HashMap::new(),
        }
    }
}

impl<N: Copy + Eq + Hash> SceneSnapshot<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, id: N, name: Option<&str>, parent: Option<N>) -> &mut Self {
        self.insert(id, name, parent, true)
    }

    /// Non-mesh node, typically a glTF group whose name its children inherit.
    pub fn add_group(&mut self, id: N, name: Option<&str>, parent: Option<N>) -> &mut Self {
        self.insert(id, name, parent, false)
    }

    pub fn set_zone_tag(&mut self, id: N, tag: &str) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.zone_tag = Some(tag.to_string());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, id: N, name: Option<&str>, parent: Option<N>, is_mesh: bool) -> &mut Self {
        let node = SnapshotNode {
            name: name.map(str::to_string),
            parent,
            zone_tag: None,
            is_mesh,
        };
        if self.nodes.insert(id, node).is_none() {
            self.order.push(id);
        }
        self
    }
}

impl<N: Copy + Eq + Hash> SceneGraph for SceneSnapshot<N> {
    type Node = N;

    fn mesh_nodes(&self) -> Vec<N> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.nodes.get(id).is_some_and(|node| node.is_mesh))
            .collect()
    }

    fn name(&self, node: N) -> Option<&str> {
        self.nodes.get(&node).and_then(|node| node.name.as_deref())
    }

    fn parent(&self, node: N) -> Option<N> {
        self.nodes.get(&node).and_then(|node| node.parent)
    }

    fn zone_tag(&self, node: N) -> Option<&str> {
        self.nodes.get(&node).and_then(|node| node.zone_tag.as_deref())
    }
}

/// The node's own name, else its parent's, else empty. Empty names count as
/// absent.
pub fn candidate_name<G: SceneGraph + ?Sized>(graph: &G, node: G::Node) -> String {
    let own = graph.name(node).filter(|name| !name.is_empty());
    let inherited = || {
        graph
            .parent(node)
            .and_then(|parent| graph.name(parent))
            .filter(|name| !name.is_empty())
    };
    own.or_else(inherited).unwrap_or_default().to_string()
}

fn authored_zone<G: SceneGraph + ?Sized>(graph: &G, node: G::Node) -> Option<Zone> {
    graph.zone_tag(node).and_then(Zone::parse).or_else(|| {
        graph
            .parent(node)
            .and_then(|parent| graph.zone_tag(parent))
            .and_then(Zone::parse)
    })
}

#[derive(Debug, Clone)]
pub struct ZoneResolution<N> {
    by_zone: BTreeMap<Zone, Vec<N>>,
    zone_of: HashMap<N, Zone>,
}

impl<N: Copy + Eq + Hash> ZoneResolution<N> {
    pub fn objects(&self, zone: Zone) -> &[N] {
        self.by_zone.get(&zone).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn zone_of(&self, node: N) -> Option<Zone> {
        self.zone_of.get(&node).copied()
    }

    pub fn missing_zones(&self) -> Vec<Zone> {
        Zone::ORDERED
            .into_iter()
            .filter(|zone| self.objects(*zone).is_empty())
            .collect()
    }

    pub fn assigned_count(&self) -> usize {
        self.zone_of.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, &[N])> {
        self.by_zone
            .iter()
            .map(|(zone, nodes)| (*zone, nodes.as_slice()))
    }
}

/// Assigns every mesh node to at most one zone. Nodes that match nothing
/// are left out; zones that match nothing show up in
/// [`ZoneResolution::missing_zones`].
pub fn resolve<G: SceneGraph + ?Sized>(graph: &G, map: &ZoneNameMap) -> ZoneResolution<G::Node> {
    let mut by_zone: BTreeMap<Zone, Vec<G::Node>> = BTreeMap::new();
    let mut zone_of = HashMap::new();
    for node in graph.mesh_nodes() {
        if zone_of.contains_key(&node) {
            continue;
        }
        let zone = authored_zone(graph, node)
            .or_else(|| map.zone_for_name(candidate_name(graph, node).as_str()));
        if let Some(zone) = zone {
            by_zone.entry(zone).or_default().push(node);
            zone_of.insert(node, zone);
        }
    }
    ZoneResolution { by_zone, zone_of }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> SceneSnapshot<u32> {
        let mut scene = SceneSnapshot::new();
        scene
            .add_group(0, Some("Helmet"), None)
            .add_mesh(1, Some("Shell_Combined"), Some(0))
            .add_mesh(2, Some("Facemask_L"), Some(0))
            .add_mesh(3, Some("Chinstrap"), Some(0))
            .add_mesh(4, Some("Unrelated_Prop"), Some(0));
        scene
    }

    #[test]
    fn named_meshes_land_in_exactly_one_zone() {
        let resolution = resolve(&sample_scene(), &ZoneNameMap::builtin());
        assert_eq!(resolution.objects(Zone::Shell), &[1]);
        assert_eq!(resolution.objects(Zone::Facemask), &[2]);
        assert_eq!(resolution.objects(Zone::Chinstrap), &[3]);
        assert_eq!(resolution.zone_of(4), None);
        assert_eq!(resolution.assigned_count(), 3);
        assert_eq!(resolution.missing_zones(), vec![Zone::Padding, Zone::Hardware]);
    }

    #[test]
    fn unnamed_mesh_inherits_parent_name() {
        let mut scene = SceneSnapshot::new();
        scene
            .add_group(10, Some("Padding_Combined"), None)
            .add_mesh(11, Some(""), Some(10))
            .add_mesh(12, None, Some(10))
            .add_mesh(13, None, None);
        assert_eq!(candidate_name(&scene, 11), "Padding_Combined");
        assert_eq!(candidate_name(&scene, 13), "");

        let resolution = resolve(&scene, &ZoneNameMap::builtin());
        assert_eq!(resolution.objects(Zone::Padding), &[11, 12]);
        assert_eq!(resolution.zone_of(13), None);
    }

    #[test]
    fn priority_order_breaks_overlapping_fragments() {
        let mut scene = SceneSnapshot::new();
        scene.add_mesh(1, Some("HardwareShell_Screw"), None);
        let resolution = resolve(&scene, &ZoneNameMap::builtin());
        assert_eq!(resolution.zone_of(1), Some(Zone::Hardware));
        assert!(resolution.objects(Zone::Shell).is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let mut scene = SceneSnapshot::new();
        scene.add_mesh(1, Some("SHELL_outer"), None);
        let resolution = resolve(&scene, &ZoneNameMap::builtin());
        assert_eq!(resolution.zone_of(1), None);
    }

    #[test]
    fn authored_tag_wins_over_name() {
        let mut scene = SceneSnapshot::new();
        scene
            .add_group(0, Some("Shell_Combined"), None)
            .add_mesh(1, Some("Shell_Clip"), Some(0))
            .add_mesh(2, Some("Shell_Bolt"), Some(0))
            .add_mesh(3, Some("Shell_Panel"), Some(0))
            .set_zone_tag(1, "hardware")
            .set_zone_tag(2, "not-a-zone");
        let resolution = resolve(&scene, &ZoneNameMap::builtin());
        assert_eq!(resolution.zone_of(1), Some(Zone::Hardware));
        assert_eq!(resolution.zone_of(2), Some(Zone::Shell));
        assert_eq!(resolution.zone_of(3), Some(Zone::Shell));

        scene.set_zone_tag(0, "padding");
        let retagged = resolve(&scene, &ZoneNameMap::builtin());
        assert_eq!(retagged.zone_of(1), Some(Zone::Hardware));
        assert_eq!(retagged.zone_of(3), Some(Zone::Padding));
    }

    #[test]
    fn toml_map_sets_priority_and_rejects_duplicates() {
        let map = ZoneNameMap::from_toml_str(
            r#"
[[zone]]
zone = "shell"
fragments = ["Body"]

[[zone]]
zone = "facemask"
fragments = ["Cage", "Body_Bar"]
"#,
        )
        .expect("zone map");
        assert_eq!(map.entries().len(), 2);
        assert_eq!(map.zone_for_name("Body_Bar_01"), Some(Zone::Shell));
        assert_eq!(map.zone_for_name("Cage"), Some(Zone::Facemask));
        assert_eq!(map.zone_for_name("Chinstrap"), None);

        let duplicate = ZoneNameMap::from_toml_str(concat!(
            "[[zone]]\nzone = \"shell\"\nfragments = [\"A\"]\n",
            "[[zone]]\nzone = \"shell\"\nfragments = [\"B\"]\n",
        ));
        assert!(matches!(duplicate, Err(ConfigError::InvalidZoneMap { .. })));

        let unknown =
            ZoneNameMap::from_toml_str("[[zone]]\nzone = \"visor\"\nfragments = [\"V\"]\n");
        assert_eq!(
            unknown,
            Err(ConfigError::UnknownZone {
                value: "visor".to_string()
            })
        );
    }

    #[test]
    fn empty_fragment_is_rejected() {
        let result = ZoneNameMap::from_entries(vec![ZoneNameEntry {
            zone: Zone::Shell,
            fragments: vec![String::new()],
        }]);
        assert!(matches!(result, Err(ConfigError::InvalidZoneMap { .. })));
    }
}
