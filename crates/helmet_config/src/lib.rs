pub mod color;
pub mod error;
pub mod export;
pub mod finish;
pub mod material;
pub mod pattern;
pub mod presets;
pub mod resolver;
pub mod store;
pub mod zone;

pub use color::{HexColor, BASIC_COLOR_PALETTE};
pub use error::ConfigError;
pub use export::{HelmetExportConfig, PatternExport, ZoneExport, EXPORT_SCHEMA_VERSION};
pub use finish::{FinishId, FinishProperties, FinishRegistry, DEFAULT_FINISH_PROPERTIES};
pub use material::{
    finish_override, FinishOverride, MaterialParams, MaterialSynthesizer, MaterialTarget,
    DEFAULT_ENV_MAP_INTENSITY,
};
pub use pattern::{
    overlay_transition, OverlayTransition, PatternCategory, PatternConfig, PatternKind,
    PatternTextureSet, PatternType, DEFAULT_PATTERN_INTENSITY,
};
pub use presets::{find_preset, TeamColorPreset, TeamPresetToggle, TEAM_PRESETS};
pub use resolver::{
    candidate_name, resolve, SceneGraph, SceneSnapshot, ZoneNameEntry, ZoneNameMap,
    ZoneResolution,
};
pub use store::{ConfigChange, HelmetConfig, SubscriptionId, ZoneConfig, ZoneConfigStore};
pub use zone::Zone;
