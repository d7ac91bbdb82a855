#![allow(dead_code)]

use helmet_config::{MaterialTarget, SceneSnapshot};

#[derive(Debug, Clone, Default)]
pub struct FakeMaterial {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub env_intensity: f32,
    pub emissive: f32,
    pub needs_update: bool,
}

impl FakeMaterial {
    pub fn worn() -> Self {
        Self {
            color: [0.2, 0.4, 0.6],
            roughness: 0.75,
            metalness: 0.1,
            clearcoat: 0.8,
            ..Self::default()
        }
    }
}

impl MaterialTarget for FakeMaterial {
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
        self.env_intensity = value;
    }

    fn set_emissive_intensity(&mut self, value: f32) {
        self.emissive = value;
    }

    fn mark_dirty(&mut self) {
        self.needs_update = true;
    }
}

/// Layout of the stock helmet asset: one group per zone with split meshes.
pub fn stock_helmet_scene() -> SceneSnapshot<usize> {
    let mut scene = SceneSnapshot::new();
    scene
        .add_group(0, Some("Helmet_Root"), None)
        .add_mesh(1, Some("Shell_Combined"), Some(0))
        .add_group(2, Some("Facemask_Combined"), Some(0))
        .add_mesh(3, Some(""), Some(2))
        .add_mesh(4, Some("Facemask_R"), Some(2))
        .add_mesh(5, Some("Chinstrap"), Some(0))
        .add_mesh(6, Some("Padding_Combined"), Some(0))
        .add_mesh(7, Some("Hardware_Combined"), Some(0))
        .add_mesh(8, Some("Unrelated_Prop"), Some(0));
    scene
}
