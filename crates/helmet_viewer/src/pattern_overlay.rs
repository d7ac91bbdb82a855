//! Pattern overlay rendering.
//!
//! Stripe patterns are cubic Bézier curves laid over the top of the shell,
//! sampled into a polyline and swept into a tube. Camo and animal patterns
//! are texture swaps on the materials of the zones they apply to.

use std::collections::HashMap;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::prelude::*;
use helmet_config::{overlay_transition, OverlayTransition, PatternConfig, PatternKind, Zone};

use super::{
    CustomizerState, HelmetViewerConfig, StripeGeometryConfig, ZoneBindings, ZoneMember,
};

/// Lateral offset of each stripe of a double stripe, as a fraction of the
/// shell half width.
const DOUBLE_STRIPE_SPACING: f32 = 0.12;
/// Height of the stripe endpoints between the shell center and its top.
const STRIPE_END_HEIGHT: f32 = 0.5;
/// Pulls the endpoints in from the front and back faces of the shell.
const STRIPE_END_INSET: f32 = 0.92;
const STRIPE_ROUGHNESS: f32 = 0.45;

#[derive(Component, Clone, Copy, Debug)]
pub(super) struct PatternStripe;

/// Textures a zone material carried before a texture pattern replaced them.
#[derive(Clone, Debug)]
struct AuthoredTextures {
    base_color: Option<Handle<Image>>,
    normal_map: Option<Handle<Image>>,
}

#[derive(Resource, Debug, Default)]
pub(super) struct PatternOverlayState {
    applied: PatternConfig,
    bindings_generation: u64,
    stripe_material: Option<Handle<StandardMaterial>>,
    replaced_textures: HashMap<AssetId<StandardMaterial>, AuthoredTextures>,
}

/// Axis-aligned bounds of the shell in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct ShellExtent {
    pub min: Vec3,
    pub max: Vec3,
}

impl ShellExtent {
    fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), point| {
            (min.min(point), max.max(point))
        });
        Some(Self { min, max })
    }

    fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    fn half_size(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct CubicStripe {
    pub points: [Vec3; 4],
}

impl CubicStripe {
    pub(super) fn point_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let [p0, p1, p2, p3] = self.points;
        p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t) + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
    }

    /// Evenly spaced in parameter space, endpoints included.
    pub(super) fn sample(&self, samples: usize) -> Vec<Vec3> {
        let samples = samples.max(2);
        (0..samples)
            .map(|index| self.point_at(index as f32 / (samples - 1) as f32))
            .collect()
    }
}

/// Front-to-back curves over the top of the shell. The two inner control
/// points are raised so the curve midpoint clears the shell top by the
/// tube radius.
pub(super) fn stripe_curves(
    extent: &ShellExtent,
    count: u8,
    clearance: f32,
) -> Vec<CubicStripe> {
    let center = extent.center();
    let half = extent.half_size();
    let end_y = center.y + half.y * STRIPE_END_HEIGHT;
    let apex_y = extent.max.y + clearance;
    // B(0.5).y = 0.25 * end_y + 0.75 * control_y
    let control_y = (apex_y - 0.25 * end_y) / 0.75;
    let front_z = center.z + half.z * STRIPE_END_INSET;
    let back_z = center.z - half.z * STRIPE_END_INSET;

    let offsets: Vec<f32> = match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => vec![-DOUBLE_STRIPE_SPACING, DOUBLE_STRIPE_SPACING],
    };
    offsets
        .into_iter()
        .map(|offset| {
            let x = center.x + offset * half.x;
            CubicStripe {
                points: [
                    Vec3::new(x, end_y, front_z),
                    Vec3::new(x, control_y, center.z + half.z * 0.5),
                    Vec3::new(x, control_y, center.z - half.z * 0.5),
                    Vec3::new(x, end_y, back_z),
                ],
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    tangent: Vec3,
    normal: Vec3,
    binormal: Vec3,
}

fn parallel_transport_frames(points: &[Vec3]) -> Vec<Frame> {
    if points.len() < 2 {
        return Vec::new();
    }

    let first_tangent = (points[1] - points[0]).try_normalize().unwrap_or(Vec3::Z);
    let normal = first_tangent.any_orthonormal_vector();
    let mut frames = Vec::with_capacity(points.len());
    frames.push(Frame {
        tangent: first_tangent,
        normal,
        binormal: first_tangent.cross(normal),
    });

    for index in 1..points.len() {
        let previous = frames[index - 1];
        let direction = if index + 1 < points.len() {
            points[index + 1] - points[index - 1]
        } else {
            points[index] - points[index - 1]
        };
        let tangent = direction.try_normalize().unwrap_or(previous.tangent);
        let rotation = Quat::from_rotation_arc(previous.tangent, tangent);
        let normal = (rotation * previous.normal).normalize_or(previous.normal);
        frames.push(Frame {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        });
    }
    frames
}

#[derive(Debug, Default)]
pub(super) struct TubeGeometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Open tube of `radius` around the polyline, one ring per point.
pub(super) fn tube_geometry(
    points: &[Vec3],
    radius: f32,
    radial_segments: usize,
) -> TubeGeometry {
    let segments = radial_segments.max(3);
    let frames = parallel_transport_frames(points);
    let mut geometry = TubeGeometry::default();
    if frames.is_empty() {
        return geometry;
    }

    for (point, frame) in points.iter().zip(&frames) {
        for segment in 0..segments {
            let angle = segment as f32 / segments as f32 * std::f32::consts::TAU;
            let normal = frame.normal * angle.cos() + frame.binormal * angle.sin();
            geometry.positions.push((*point + normal * radius).to_array());
            geometry.normals.push(normal.to_array());
        }
    }

    let ring = segments as u32;
    for row in 0..(points.len() as u32 - 1) {
        for segment in 0..ring {
            let next_segment = (segment + 1) % ring;
            let a = row * ring + segment;
            let b = row * ring + next_segment;
            let c = (row + 1) * ring + segment;
            let d = (row + 1) * ring + next_segment;
            geometry.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    geometry
}

fn tube_mesh(geometry: TubeGeometry) -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, geometry.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, geometry.normals)
        .with_inserted_indices(Indices::U32(geometry.indices))
}

fn stripe_material(pattern: &PatternConfig) -> StandardMaterial {
    let mut material = StandardMaterial {
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: STRIPE_ROUGHNESS,
        double_sided: true,
        cull_mode: None,
        ..default()
    };
    write_stripe_color(&mut material, pattern);
    material
}

fn write_stripe_color(material: &mut StandardMaterial, pattern: &PatternConfig) {
    let [r, g, b] = pattern.color.to_srgb_f32();
    material.base_color = Color::srgba(r, g, b, pattern.opacity());
}

type ZoneMeshItem<'a> = (
    &'a ZoneMember,
    &'a Mesh3d,
    &'a MeshMaterial3d<StandardMaterial>,
    &'a GlobalTransform,
);

fn shell_extent(members: &Query<ZoneMeshItem>, meshes: &Assets<Mesh>) -> Option<ShellExtent> {
    let mut points = Vec::new();
    for (member, mesh, _, transform) in members {
        if member.zone != Zone::Shell {
            continue;
        }
        let Some(mesh) = meshes.get(&mesh.0) else {
            continue;
        };
        if let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        {
            points.extend(
                positions
                    .iter()
                    .map(|position| transform.transform_point(Vec3::from_array(*position))),
            );
        }
    }
    ShellExtent::from_points(points)
}

#[allow(clippy::too_many_arguments)]
pub(super) fn sync_pattern_overlay(
    mut commands: Commands,
    state: Res<CustomizerState>,
    config: Res<HelmetViewerConfig>,
    bindings: Res<ZoneBindings>,
    asset_server: Option<Res<AssetServer>>,
    mut overlay: ResMut<PatternOverlayState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    stripes: Query<Entity, With<PatternStripe>>,
    members: Query<ZoneMeshItem>,
) {
    let next = state.store.pattern();
    let mut transition = overlay_transition(&overlay.applied, next);
    if transition == OverlayTransition::Unchanged
        && overlay.bindings_generation != bindings.generation
        && next.is_active()
    {
        transition = OverlayTransition::Rebuild;
    }

    match transition {
        OverlayTransition::Unchanged => {}
        OverlayTransition::Clear => {
            clear_overlay(&mut commands, &mut overlay, &stripes, &mut materials);
            debug!("pattern overlay cleared");
        }
        OverlayTransition::MaterialOnly => {
            let Some(handle) = overlay.stripe_material.clone() else {
                overlay.applied = next.clone();
                return;
            };
            if let Some(material) = materials.get_mut(&handle) {
                write_stripe_color(material, next);
            }
        }
        OverlayTransition::Rebuild => {
            let built = match next.pattern_type.kind() {
                PatternKind::None => true,
                PatternKind::Stripe { count } => {
                    let Some(extent) = shell_extent(&members, &meshes) else {
                        // Shell not loaded yet; retry next frame.
                        return;
                    };
                    clear_overlay(&mut commands, &mut overlay, &stripes, &mut materials);
                    spawn_stripes(
                        &mut commands,
                        &mut overlay,
                        &mut meshes,
                        &mut materials,
                        &extent,
                        count,
                        next,
                        &config.stripe,
                    );
                    true
                }
                PatternKind::Texture => {
                    clear_overlay(&mut commands, &mut overlay, &stripes, &mut materials);
                    apply_pattern_textures(
                        next,
                        asset_server.as_deref(),
                        &mut overlay,
                        &members,
                        &mut materials,
                    )
                }
            };
            if !built {
                return;
            }
            info!(
                "pattern overlay set to {} at intensity {:.2}",
                next.pattern_type, next.intensity
            );
        }
    }
    overlay.applied = next.clone();
    overlay.bindings_generation = bindings.generation;
}

fn clear_overlay(
    commands: &mut Commands,
    overlay: &mut PatternOverlayState,
    stripes: &Query<Entity, With<PatternStripe>>,
    materials: &mut Assets<StandardMaterial>,
) {
    for entity in stripes {
        commands.entity(entity).despawn();
    }
    if let Some(handle) = overlay.stripe_material.take() {
        materials.remove(&handle);
    }
    for (id, authored) in overlay.replaced_textures.drain() {
        if let Some(material) = materials.get_mut(id) {
            material.base_color_texture = authored.base_color;
            material.normal_map_texture = authored.normal_map;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn spawn_stripes(
    commands: &mut Commands,
    overlay: &mut PatternOverlayState,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    extent: &ShellExtent,
    count: u8,
    pattern: &PatternConfig,
    geometry: &StripeGeometryConfig,
) {
    let material = materials.add(stripe_material(pattern));
    for (index, curve) in stripe_curves(extent, count, geometry.radius)
        .into_iter()
        .enumerate()
    {
        let points = curve.sample(geometry.samples);
        let mesh = tube_mesh(tube_geometry(
            &points,
            geometry.radius,
            geometry.radial_segments,
        ));
        commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material.clone()),
            Transform::default(),
            PatternStripe,
            Name::new(format!("Pattern_Stripe_{index}")),
        ));
    }
    overlay.stripe_material = Some(material);
}

/// Returns false while no member of the target zones is bound yet. Authored
/// textures are kept in `overlay` so the next clear can put them back.
fn apply_pattern_textures(
    pattern: &PatternConfig,
    asset_server: Option<&AssetServer>,
    overlay: &mut PatternOverlayState,
    members: &Query<ZoneMeshItem>,
    materials: &mut Assets<StandardMaterial>,
) -> bool {
    let Some(textures) = pattern.pattern_type.texture_set() else {
        return true;
    };
    let Some(asset_server) = asset_server else {
        warn!(
            "pattern {} needs textures but no asset server is running",
            pattern.pattern_type
        );
        return true;
    };
    let albedo: Handle<Image> = asset_server.load(textures.albedo);
    let normal: Option<Handle<Image>> = textures.normal.map(|path| asset_server.load(path));
    let zones = pattern.texture_zones();
    let mut textured = 0;
    for (member, _, handle, _) in members {
        if !zones.contains(&member.zone) {
            continue;
        }
        let Some(material) = materials.get_mut(&handle.0) else {
            continue;
        };
        overlay
            .replaced_textures
            .entry(handle.0.id())
            .or_insert_with(|| AuthoredTextures {
                base_color: material.base_color_texture.clone(),
                normal_map: material.normal_map_texture.clone(),
            });
        material.base_color_texture = Some(albedo.clone());
        if let Some(normal) = normal.as_ref() {
            material.normal_map_texture = Some(normal.clone());
        }
        textured += 1;
    }
    textured > 0
}
