use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::{HelmetCamera, HelmetViewerConfig, UI_PANEL_WIDTH};

const ORBIT_ROTATE_SENSITIVITY: f32 = 0.005;
const ORBIT_PAN_SENSITIVITY: f32 = 0.0015;
const ORBIT_ZOOM_SENSITIVITY: f32 = 0.12;
const ORBIT_PITCH_LIMIT: f32 = 1.45;

/// Camera orbiting the helmet. Yaw turns around +Y, pitch tilts toward the
/// crown and is limited short of the poles.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub(super) struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitCamera {
    fn rotation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::Y, self.yaw) * Quat::from_axis_angle(Vec3::X, self.pitch)
    }

    pub(super) fn apply_to_transform(&self, transform: &mut Transform) {
        transform.translation = self.focus + self.rotation() * Vec3::new(0.0, 0.0, self.radius);
        transform.look_at(self.focus, Vec3::Y);
    }

    fn rotate(&mut self, motion: Vec2) {
        self.yaw -= motion.x * ORBIT_ROTATE_SENSITIVITY;
        self.pitch = (self.pitch - motion.y * ORBIT_ROTATE_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Slides the focus in the camera plane, faster when zoomed out.
    fn pan(&mut self, motion: Vec2) {
        let rotation = self.rotation();
        let scale = self.radius * ORBIT_PAN_SENSITIVITY;
        self.focus += rotation * Vec3::new(-motion.x * scale, motion.y * scale, 0.0);
    }

    fn zoom(&mut self, lines: f32, min_radius: f32, max_radius: f32) {
        self.radius =
            (self.radius * (1.0 - lines * ORBIT_ZOOM_SENSITIVITY)).clamp(min_radius, max_radius);
    }
}

fn scroll_lines(scroll: &AccumulatedMouseScroll) -> f32 {
    match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / MouseScrollUnit::SCROLL_UNIT_CONVERSION_FACTOR,
    }
}

/// The control panel covers the right edge of the window.
fn over_helmet_viewport(window_width: f32, cursor: Vec2) -> bool {
    cursor.x < window_width - UI_PANEL_WIDTH
}

#[allow(clippy::too_many_arguments)]
pub(super) fn orbit_camera_controls(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    config: Res<HelmetViewerConfig>,
    mut egui_contexts: EguiContexts,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform), With<HelmetCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let pointer_on_panel = egui_contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.is_pointer_over_area() || ctx.wants_pointer_input());
    if pointer_on_panel || !over_helmet_viewport(window.width(), cursor) {
        return;
    }

    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let panning = buttons.any_pressed([MouseButton::Right, MouseButton::Middle])
        || (shift && buttons.pressed(MouseButton::Left));
    let rotating = !shift && buttons.pressed(MouseButton::Left);
    let lines = scroll_lines(&scroll);

    let Ok((mut orbit, mut transform)) = cameras.single_mut() else {
        return;
    };
    let before = *orbit;
    if motion.delta != Vec2::ZERO {
        if rotating {
            orbit.rotate(motion.delta);
        } else if panning {
            orbit.pan(motion.delta);
        }
    }
    if lines != 0.0 {
        orbit.zoom(lines, config.orbit.min_radius, config.orbit.max_radius);
    }
    if *orbit != before {
        orbit.apply_to_transform(&mut transform);
    }
}
