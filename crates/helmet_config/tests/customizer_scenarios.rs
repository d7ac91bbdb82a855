mod common;

use common::{stock_helmet_scene, FakeMaterial};
use helmet_config::{
    resolve, FinishId, FinishRegistry, HelmetExportConfig, MaterialSynthesizer, PatternType, Zone,
    ZoneConfigStore, ZoneNameMap,
};

fn materials_for(count: usize) -> Vec<FakeMaterial> {
    (0..count).map(|_| FakeMaterial::worn()).collect()
}

#[test]
fn red_chrome_shell_reaches_every_shell_mesh() {
    let mut store = ZoneConfigStore::new();
    store.set_color(Zone::Shell, "#FF0000").expect("red");
    store.set_finish(Zone::Shell, FinishId::Chrome);

    let scene = stock_helmet_scene();
    let resolution = resolve(&scene, &ZoneNameMap::builtin());
    let mut shell = materials_for(resolution.objects(Zone::Shell).len());
    let written = MaterialSynthesizer::default().apply(
        Zone::Shell,
        shell.iter_mut(),
        &store.config(Zone::Shell),
    );

    assert_eq!(written, 1);
    for material in &shell {
        assert_eq!(material.color, [1.0, 0.0, 0.0]);
        assert!((material.metalness - 1.0).abs() < f32::EPSILON);
        assert!(material.roughness.abs() < f32::EPSILON);
        assert!(material.needs_update);
    }
}

#[test]
fn invalid_color_leaves_prior_value() {
    let mut store = ZoneConfigStore::new();
    store.set_color(Zone::Shell, "#0033A0").expect("blue");
    let before = store.config(Zone::Shell);
    assert!(store.set_color(Zone::Shell, "not-a-color").is_err());
    assert_eq!(store.config(Zone::Shell), before);
    assert_eq!(store.config(Zone::Shell).color.as_str(), "#0033A0");
}

#[test]
fn valid_colors_round_trip_with_original_spelling() {
    let mut store = ZoneConfigStore::new();
    for raw in ["#abcdef", "#ABCDEF", "#09aF3c", "#000000"] {
        for zone in Zone::ORDERED {
            store.set_color(zone, raw).expect("valid");
            assert_eq!(store.config(zone).color.as_str(), raw);
        }
    }
}

#[test]
fn reset_is_idempotent() {
    let mut store = ZoneConfigStore::new();
    store.set_color(Zone::Chinstrap, "#FEE123").expect("yellow");
    store.set_finish(Zone::Padding, FinishId::Glow);
    store
        .set_pattern(PatternType::CamoNavy, 0.4)
        .expect("pattern");

    store.reset_to_defaults();
    let once = store.snapshot().clone();
    store.reset_to_defaults();
    assert_eq!(*store.snapshot(), once);
    assert!(!store.pattern().is_active());
}

#[test]
fn registry_lookup_is_total() {
    let registry = FinishRegistry::builtin();
    for id in FinishId::ALL {
        let props = registry.lookup(id);
        assert!((0.0..=1.0).contains(&props.roughness));
        assert!((0.0..=1.0).contains(&props.metalness));
    }
    let unknown = registry.lookup_name("mirror-polish");
    assert!((unknown.roughness - 0.5).abs() < f32::EPSILON);
    assert!((unknown.metalness - 0.5).abs() < f32::EPSILON);
}

#[test]
fn every_zone_renders_after_full_resolution() {
    let store = ZoneConfigStore::new();
    let scene = stock_helmet_scene();
    let resolution = resolve(&scene, &ZoneNameMap::builtin());
    assert!(resolution.missing_zones().is_empty());

    let synthesizer = MaterialSynthesizer::default();
    for zone in Zone::ORDERED {
        let mut materials = materials_for(resolution.objects(zone).len());
        let written = synthesizer.apply(zone, materials.iter_mut(), &store.config(zone));
        assert_eq!(written, resolution.objects(zone).len());
        assert!(materials.iter().all(|material| material.needs_update));
    }
    let matte = {
        let mut padding = materials_for(1);
        synthesizer.apply(Zone::Padding, padding.iter_mut(), &store.config(Zone::Padding));
        padding.remove(0)
    };
    assert!((matte.roughness - 0.9).abs() < f32::EPSILON);
    assert!(matte.clearcoat.abs() < f32::EPSILON);
}

#[test]
fn saved_design_restores_into_fresh_store() {
    let mut original = ZoneConfigStore::new();
    original.set_color(Zone::Facemask, "#FFCB05").expect("maize");
    original.set_finish(Zone::Facemask, FinishId::PearlCoat);
    original
        .set_pattern(PatternType::StripeDouble, 0.65)
        .expect("pattern");
    original.set_pattern_color("#00274C").expect("stripe");

    let raw = HelmetExportConfig::from_store(&original, 42)
        .to_json_pretty()
        .expect("json");
    let mut restored = ZoneConfigStore::new();
    let warnings = HelmetExportConfig::from_json(raw.as_str())
        .expect("parse")
        .restore(&mut restored);

    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(restored.snapshot(), original.snapshot());
    assert_eq!(restored.pattern(), original.pattern());
}
