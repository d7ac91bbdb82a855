use bevy::prelude::*;
use helmet_config::{MaterialSynthesizer, Zone, ZoneConfigStore};
use serde::Serialize;

use super::{CustomizerState, DesignPersistence, MaterialSynthesis};

#[derive(Debug, Serialize)]
struct ZoneSummary {
    zone: Zone,
    color: String,
    finish: String,
    premium: bool,
    roughness: f32,
    metalness: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PatternSummary {
    #[serde(rename = "type")]
    pattern_type: String,
    intensity: f32,
    apply_to_zones: Vec<Zone>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HeadlessSummary {
    storage: String,
    restore: Option<String>,
    revision: u64,
    zones: Vec<ZoneSummary>,
    pattern: PatternSummary,
}

fn build_headless_summary(
    store: &ZoneConfigStore,
    synthesizer: &MaterialSynthesizer,
    storage: String,
    restore: Option<String>,
) -> HeadlessSummary {
    let zones = store
        .snapshot()
        .iter()
        .map(|(zone, config)| {
            let params = synthesizer.synthesize(config);
            ZoneSummary {
                zone,
                color: config.color.to_string(),
                finish: config.finish.as_str().to_string(),
                premium: config.finish.is_premium(),
                roughness: params.roughness,
                metalness: params.metalness,
            }
        })
        .collect();
    let pattern = store.pattern();
    HeadlessSummary {
        storage,
        restore,
        revision: store.revision(),
        zones,
        pattern: PatternSummary {
            pattern_type: pattern.pattern_type.as_str().to_string(),
            intensity: pattern.intensity,
            apply_to_zones: pattern.apply_to_zones.iter().copied().collect(),
        },
    }
}

pub(super) fn headless_report(
    state: Res<CustomizerState>,
    synthesis: Res<MaterialSynthesis>,
    persistence: Res<DesignPersistence>,
    mut exit: MessageWriter<AppExit>,
) {
    let summary = build_headless_summary(
        &state.store,
        &synthesis.synthesizer,
        persistence.storage.location(),
        persistence.last_message.clone(),
    );
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            error!("could not encode headless summary: {err}");
            exit.write(AppExit::error());
            return;
        }
    }
    info!(
        "headless summary written for {} zones (revision {})",
        summary.zones.len(),
        summary.revision
    );
    exit.write(AppExit::Success);
}

#[cfg(test)]
mod tests {
    use super::*;
    use helmet_config::{FinishId, PatternType};

    #[test]
    fn summary_lists_every_zone_with_synthesized_values() {
        let mut store = ZoneConfigStore::new();
        store.set_finish(Zone::Shell, FinishId::Matte);
        store
            .set_pattern(PatternType::CamoNavy, 0.6)
            .expect("pattern");
        store.toggle_pattern_zone(Zone::Facemask);

        let summary = build_headless_summary(
            &store,
            &MaterialSynthesizer::default(),
            "design.json".to_string(),
            None,
        );
        let value = serde_json::to_value(&summary).expect("json");

        assert_eq!(summary.zones.len(), Zone::ORDERED.len());
        assert_eq!(value["zones"][0]["zone"], "shell");
        assert_eq!(value["zones"][0]["finish"], "matte");
        assert!((summary.zones[0].roughness - 0.9).abs() < f32::EPSILON);
        assert_eq!(value["pattern"]["type"], "camo_navy");
        assert_eq!(value["pattern"]["applyToZones"][0], "facemask");
        assert_eq!(value["revision"], 3);
    }
}
