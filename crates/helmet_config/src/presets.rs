use crate::error::ConfigError;
use crate::store::ZoneConfigStore;
use crate::zone::Zone;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamColorPreset {
    pub name: &'static str,
    pub team: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

const fn preset(
    name: &'static str,
    team: &'static str,
    primary: &'static str,
    secondary: &'static str,
) -> TeamColorPreset {
    TeamColorPreset {
        name,
        team,
        primary,
        secondary,
    }
}

pub const TEAM_PRESETS: [TeamColorPreset; 12] = [
    preset("Clemson Tigers", "clemson", "#FF6600", "#522D80"),
    preset("Alabama Crimson Tide", "alabama", "#9E1B32", "#FFFFFF"),
    preset("Georgia Bulldogs", "georgia", "#BA0C2F", "#000000"),
    preset("Ohio State Buckeyes", "ohio-state", "#BB0000", "#666666"),
    preset("Michigan Wolverines", "michigan", "#00274C", "#FFCB05"),
    preset("LSU Tigers", "lsu", "#461D7C", "#FDD023"),
    preset("Texas Longhorns", "texas", "#BF5700", "#FFFFFF"),
    preset("Oregon Ducks", "oregon", "#154733", "#FEE123"),
    preset("USC Trojans", "usc", "#990000", "#FFCC00"),
    preset("Notre Dame", "notre-dame", "#0C2340", "#C99700"),
    preset("Pitt Panthers", "pitt", "#003594", "#FFB81C"),
    preset("Louisville Cardinals", "louisville", "#AD0000", "#000000"),
];

pub fn find_preset(team: &str) -> Option<&'static TeamColorPreset> {
    TEAM_PRESETS.iter().find(|preset| preset.team == team)
}

/// Remembers the last team applied so a second click on the same team
/// swaps shell and facemask colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamPresetToggle {
    last_team: Option<&'static str>,
}

impl TeamPresetToggle {
    pub fn last_team(&self) -> Option<&'static str> {
        self.last_team
    }

    /// Returns `true` when the colors were swapped.
    pub fn apply(
        &mut self,
        store: &mut ZoneConfigStore,
        preset: &TeamColorPreset,
    ) -> Result<bool, ConfigError> {
        let swap = self.last_team == Some(preset.team);
        let (shell, facemask) = if swap {
            (preset.secondary, preset.primary)
        } else {
            (preset.primary, preset.secondary)
        };
        store.set_color(Zone::Shell, shell)?;
        store.set_color(Zone::Facemask, facemask)?;
        self.last_team = if swap { None } else { Some(preset.team) };
        Ok(swap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::is_valid_hex_color;

    #[test]
    fn presets_carry_valid_unique_colors() {
        for (index, preset) in TEAM_PRESETS.iter().enumerate() {
            assert!(is_valid_hex_color(preset.primary), "{}", preset.name);
            assert!(is_valid_hex_color(preset.secondary), "{}", preset.name);
            assert!(TEAM_PRESETS[index + 1..]
                .iter()
                .all(|other| other.team != preset.team));
        }
    }

    #[test]
    fn second_click_swaps_and_third_click_restores() {
        let mut store = ZoneConfigStore::new();
        let mut toggle = TeamPresetToggle::default();
        let michigan = find_preset("michigan").expect("michigan");

        assert!(!toggle.apply(&mut store, michigan).expect("first"));
        assert_eq!(store.config(Zone::Shell).color.as_str(), "#00274C");
        assert_eq!(store.config(Zone::Facemask).color.as_str(), "#FFCB05");

        assert!(toggle.apply(&mut store, michigan).expect("second"));
        assert_eq!(store.config(Zone::Shell).color.as_str(), "#FFCB05");
        assert_eq!(store.config(Zone::Facemask).color.as_str(), "#00274C");
        assert_eq!(toggle.last_team(), None);

        assert!(!toggle.apply(&mut store, michigan).expect("third"));
        assert_eq!(store.config(Zone::Shell).color.as_str(), "#00274C");
    }

    #[test]
    fn switching_teams_never_swaps() {
        let mut store = ZoneConfigStore::new();
        let mut toggle = TeamPresetToggle::default();
        toggle
            .apply(&mut store, &TEAM_PRESETS[0])
            .expect("clemson");
        let swapped = toggle
            .apply(&mut store, &TEAM_PRESETS[1])
            .expect("alabama");
        assert!(!swapped);
        assert_eq!(store.config(Zone::Shell).color.as_str(), "#9E1B32");
        assert_eq!(toggle.last_team(), Some("alabama"));
    }
}
