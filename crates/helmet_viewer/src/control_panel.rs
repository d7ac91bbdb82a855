use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use helmet_config::{
    ConfigError, FinishId, HexColor, PatternCategory, PatternKind, PatternType, TeamColorPreset,
    TeamPresetToggle, Zone, ZoneConfigStore, BASIC_COLOR_PALETTE, TEAM_PRESETS,
};

use super::{
    CustomizerState, DesignPersistence, PersistenceRequest, ZoneBindings, UI_PANEL_WIDTH,
};

const SWATCH_SIZE: f32 = 22.0;
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 80, 70);
const INFO_COLOR: egui::Color32 = egui::Color32::from_rgb(120, 190, 120);

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum PanelFeedback {
    Info(String),
    Error(String),
}

#[derive(Resource, Debug, Default)]
pub(super) struct ControlPanelState {
    hex_input: String,
    pattern_hex_input: String,
    feedback: Option<PanelFeedback>,
}

#[derive(SystemParam)]
pub(super) struct ControlPanelParams<'w> {
    state: ResMut<'w, CustomizerState>,
    panel: ResMut<'w, ControlPanelState>,
    persistence: ResMut<'w, DesignPersistence>,
    bindings: Res<'w, ZoneBindings>,
}

pub(super) fn render_control_panel_egui(mut contexts: EguiContexts, params: ControlPanelParams) {
    let ControlPanelParams {
        mut state,
        mut panel,
        mut persistence,
        bindings,
    } = params;

    let Ok(context) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("helmet-control-panel")
        .resizable(false)
        .exact_width(UI_PANEL_WIDTH)
        .show(context, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);
            ui.heading("Helmet Customizer");

            egui::ScrollArea::vertical().show(ui, |ui| {
                let CustomizerState { store, team_toggle } = &mut *state;

                render_zone_tabs(ui, store, &bindings);
                ui.separator();
                render_color_section(ui, store, &mut panel);
                ui.separator();
                render_finish_section(ui, store);
                ui.separator();

                ui.label(egui::RichText::new("Team presets").strong());
                ui.horizontal_wrapped(|ui| {
                    for preset in TEAM_PRESETS.iter() {
                        let selected = team_toggle.last_team() == Some(preset.team);
                        let response = ui
                            .add(preset_button(preset, selected))
                            .on_hover_text("Click again to swap shell and facemask");
                        if response.clicked() {
                            panel.feedback = Some(preset_feedback(
                                preset,
                                team_toggle.apply(store, preset),
                            ));
                        }
                    }
                });
                ui.separator();

                render_pattern_section(ui, store, &mut panel);
                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        panel.feedback = Some(reset_design(store, team_toggle));
                    }
                    if ui.button("Save").clicked() {
                        persistence.pending = Some(PersistenceRequest::Save);
                    }
                    if ui.button("Load").clicked() {
                        persistence.pending = Some(PersistenceRequest::Load);
                    }
                });
                ui.small(format!("Storage: {}", persistence.storage.location()));
                if let Some(message) = persistence.last_message.as_deref() {
                    ui.label(message);
                }
                if let Some(feedback) = panel.feedback.as_ref() {
                    match feedback {
                        PanelFeedback::Info(text) => ui.colored_label(INFO_COLOR, text),
                        PanelFeedback::Error(text) => ui.colored_label(ERROR_COLOR, text),
                    };
                }
            });
        });
}

fn render_zone_tabs(ui: &mut egui::Ui, store: &mut ZoneConfigStore, bindings: &ZoneBindings) {
    ui.horizontal_wrapped(|ui| {
        for zone in Zone::ORDERED {
            let label = zone_tab_label(zone, bindings);
            if ui
                .selectable_label(store.active_zone() == zone, label)
                .clicked()
            {
                store.set_active_zone(zone);
            }
        }
    });
    ui.small(store.active_zone().description());
}

fn render_color_section(
    ui: &mut egui::Ui,
    store: &mut ZoneConfigStore,
    panel: &mut ControlPanelState,
) {
    let zone = store.active_zone();
    let current = store.config(zone).color;
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Color").strong());
        ui.add(swatch_button(&current, true));
        ui.monospace(current.as_str());
    });
    if let Some(picked) = palette_row(ui, &current) {
        if store.set_color(zone, picked.as_str()).is_ok() {
            panel.feedback = None;
        }
    }
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut panel.hex_input)
                .hint_text("#RRGGBB")
                .desired_width(90.0),
        );
        let submitted =
            response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
        if ui.button("Apply").clicked() || submitted {
            panel.feedback = Some(apply_hex_input(store, zone, panel.hex_input.as_str()));
        }
    });
}

fn render_finish_section(ui: &mut egui::Ui, store: &mut ZoneConfigStore) {
    let zone = store.active_zone();
    let current = store.config(zone).finish;
    let mut selected = current;
    ui.label(egui::RichText::new("Finish").strong());
    egui::ComboBox::from_id_salt("helmet-finish-selector")
        .selected_text(current.label())
        .width(200.0)
        .show_ui(ui, |ui| {
            let (core, premium) = finish_groups();
            for finish in core {
                ui.selectable_value(&mut selected, finish, finish.label());
            }
            ui.separator();
            for finish in premium {
                ui.selectable_value(&mut selected, finish, finish.label());
            }
        });
    if selected != current {
        store.set_finish(zone, selected);
    }
}

fn render_pattern_section(
    ui: &mut egui::Ui,
    store: &mut ZoneConfigStore,
    panel: &mut ControlPanelState,
) {
    let pattern = store.pattern().clone();
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Pattern").strong());
        ui.label(pattern.pattern_type.label());
        if pattern.is_active() && ui.small_button("Clear").clicked() {
            store.clear_pattern();
        }
    });

    for category in PatternCategory::ALL {
        ui.collapsing(category.label(), |ui| {
            ui.horizontal_wrapped(|ui| {
                for pattern_type in category.types() {
                    let selected = pattern.pattern_type == pattern_type;
                    if ui.selectable_label(selected, pattern_type.label()).clicked() {
                        select_pattern(store, pattern_type, panel);
                    }
                }
            });
        });
    }

    if !pattern.is_active() {
        return;
    }

    if shows_stripe_controls(pattern.pattern_type) {
        let mut intensity = pattern.intensity;
        let slider = ui.add(egui::Slider::new(&mut intensity, 0.0..=1.0).text("Intensity"));
        if slider.changed() {
            if let Err(err) = store.set_pattern_intensity(intensity) {
                panel.feedback = Some(PanelFeedback::Error(err.to_string()));
            }
        }
        ui.horizontal(|ui| {
            ui.label("Stripe color");
            ui.add(swatch_button(&pattern.color, true));
        });
        if let Some(picked) = palette_row(ui, &pattern.color) {
            if store.set_pattern_color(picked.as_str()).is_ok() {
                panel.feedback = None;
            }
        }
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut panel.pattern_hex_input)
                    .hint_text("#RRGGBB")
                    .desired_width(90.0),
            );
            if ui.button("Apply").clicked() {
                let candidate = normalize_hex_input(panel.pattern_hex_input.as_str());
                panel.feedback = Some(match store.set_pattern_color(candidate.as_str()) {
                    Ok(()) => PanelFeedback::Info(format!("Stripe color set to {candidate}")),
                    Err(err) => PanelFeedback::Error(err.to_string()),
                });
            }
        });
    } else {
        ui.label("Apply to zones");
        ui.horizontal_wrapped(|ui| {
            for zone in Zone::ORDERED {
                let mut enabled = pattern.apply_to_zones.contains(&zone);
                if ui.checkbox(&mut enabled, zone.label()).changed() {
                    store.toggle_pattern_zone(zone);
                }
            }
        });
        if pattern.apply_to_zones.is_empty() {
            ui.small("No zone picked: the shell is used");
        }
    }
}

/// Intensity drives stripe opacity only; texture patterns have no blend
/// control, so they get zone toggles instead.
fn shows_stripe_controls(pattern_type: PatternType) -> bool {
    matches!(pattern_type.kind(), PatternKind::Stripe { .. })
}

fn reset_design(store: &mut ZoneConfigStore, toggle: &mut TeamPresetToggle) -> PanelFeedback {
    store.reset_to_defaults();
    *toggle = TeamPresetToggle::default();
    PanelFeedback::Info("Reset to defaults".to_string())
}

fn select_pattern(
    store: &mut ZoneConfigStore,
    pattern_type: PatternType,
    panel: &mut ControlPanelState,
) {
    let intensity = store.pattern().intensity;
    if let Err(err) = store.set_pattern(pattern_type, intensity) {
        panel.feedback = Some(PanelFeedback::Error(err.to_string()));
    }
}

/// Returns the palette entry clicked this frame.
fn palette_row(ui: &mut egui::Ui, current: &HexColor) -> Option<HexColor> {
    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        for raw in BASIC_COLOR_PALETTE {
            let Ok(color) = HexColor::parse(raw) else {
                continue;
            };
            let selected = color.as_str().eq_ignore_ascii_case(current.as_str());
            if ui.add(swatch_button(&color, selected)).on_hover_text(raw).clicked() {
                picked = Some(color);
            }
        }
    });
    picked
}

fn swatch_button(color: &HexColor, selected: bool) -> egui::Button<'static> {
    let button = egui::Button::new("")
        .fill(swatch_color(color))
        .min_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE));
    if selected {
        button.stroke(egui::Stroke::new(2.0, egui::Color32::WHITE))
    } else {
        button
    }
}

fn preset_button(preset: &TeamColorPreset, selected: bool) -> egui::Button<'static> {
    let fill = HexColor::parse(preset.primary)
        .map(|color| swatch_color(&color))
        .unwrap_or(egui::Color32::DARK_GRAY);
    let text = egui::RichText::new(preset.name).color(contrast_text_color(fill));
    egui::Button::new(text)
        .fill(fill)
        .selected(selected)
}

fn preset_feedback(
    preset: &TeamColorPreset,
    outcome: Result<bool, ConfigError>,
) -> PanelFeedback {
    match outcome {
        Ok(true) => PanelFeedback::Info(format!("{} colors swapped", preset.name)),
        Ok(false) => PanelFeedback::Info(format!("{} colors applied", preset.name)),
        Err(err) => PanelFeedback::Error(err.to_string()),
    }
}

fn swatch_color(color: &HexColor) -> egui::Color32 {
    let [r, g, b] = color.to_srgb_u8();
    egui::Color32::from_rgb(r, g, b)
}

fn contrast_text_color(fill: egui::Color32) -> egui::Color32 {
    let luminance =
        0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
    if luminance > 150.0 {
        egui::Color32::BLACK
    } else {
        egui::Color32::WHITE
    }
}

fn zone_tab_label(zone: Zone, bindings: &ZoneBindings) -> String {
    if bindings.generation > 0 && bindings.count(zone) == 0 {
        format!("{} (no mesh)", zone.label())
    } else {
        zone.label().to_string()
    }
}

fn finish_groups() -> (Vec<FinishId>, Vec<FinishId>) {
    FinishId::ALL.into_iter().partition(|finish| !finish.is_premium())
}

/// Accepts `RRGGBB` without the leading `#` and surrounding whitespace.
fn normalize_hex_input(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    }
}

fn apply_hex_input(store: &mut ZoneConfigStore, zone: Zone, raw: &str) -> PanelFeedback {
    let candidate = normalize_hex_input(raw);
    match store.set_color(zone, candidate.as_str()) {
        Ok(()) => PanelFeedback::Info(format!("{} set to {candidate}", zone.label())),
        Err(err) => PanelFeedback::Error(err.to_string()),
    }
}
