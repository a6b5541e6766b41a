//! Planning parameters, loadable from a TOML file and overridable from the CLI or a web request.

use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PlannerError, Result};
use crate::schedule::slot_utils::{default_start, parse_hhmm};

/// Largest team list accepted in one run
pub const MAX_TEAMS: usize = 128;
pub const MAX_PITCHES: u32 = 32;
pub const MAX_MATCHES_PER_TEAM: u32 = 50;
pub const MAX_REST_EVERY: u32 = 50;
/// Upper bound on match and break durations, one full day
pub const MAX_DURATION_MIN: u32 = 24 * 60;

/// Everything the rotation planner needs besides the team list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningConfig {
    /// Kick-off of the first slot, "HH:MM"
    pub start: String,

    /// Number of pitches played in parallel
    pub pitches: u32,

    /// Match length in minutes
    pub match_min: u32,

    /// Changeover between two slots in minutes
    pub break_min: u32,

    pub matches_per_team: u32,

    /// A team that played this many slots in a row sits out the next one
    pub rest_every: u32,

    pub forbid_intra_club: bool,
    pub allow_rematches: bool,
    pub seed: u32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        PlanningConfig {
            start: "10:00".to_string(),
            pitches: 2,
            match_min: 10,
            break_min: 2,
            matches_per_team: 3,
            rest_every: 2,
            forbid_intra_club: true,
            allow_rematches: false,
            seed: 1,
        }
    }
}

impl PlanningConfig {
    /// Parsed start time, falling back to 10:00 when the string is unreadable
    pub fn start_time(&self) -> NaiveTime {
        parse_hhmm(&self.start).unwrap_or_else(|| {
            warn!(start = %self.start, "unreadable start time, using 10:00");
            default_start()
        })
    }

    /// Rejects zero and oversized parameters so one run stays small and bounded
    pub fn validate(&self) -> Result<()> {
        // Lower bounds
        if self.pitches == 0 {
            return Err(invalid("At least one pitch is required"));
        }
        if self.match_min == 0 {
            return Err(invalid("Match duration must be at least 1 minute"));
        }
        if self.matches_per_team == 0 {
            return Err(invalid("Each team must play at least one match"));
        }
        if self.rest_every == 0 {
            return Err(invalid("Rest threshold must be at least 1"));
        }

        // Upper bounds
        if self.pitches > MAX_PITCHES {
            return Err(PlannerError::Validation(format!("At most {} pitches are supported", MAX_PITCHES)));
        }
        if self.matches_per_team > MAX_MATCHES_PER_TEAM {
            return Err(PlannerError::Validation(format!(
                "At most {} matches per team are supported",
                MAX_MATCHES_PER_TEAM
            )));
        }
        if self.rest_every > MAX_REST_EVERY {
            return Err(PlannerError::Validation(format!(
                "Rest threshold must be at most {}",
                MAX_REST_EVERY
            )));
        }
        if self.match_min > MAX_DURATION_MIN || self.break_min > MAX_DURATION_MIN {
            return Err(invalid("Match and break durations must fit in one day"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> PlannerError {
    PlannerError::Validation(message.to_string())
}

/// Reads a planning configuration from a TOML file; missing keys take their defaults
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlanningConfig> {
    let text = std::fs::read_to_string(path)?;
    let config: PlanningConfig = toml::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PlanningConfig = toml::from_str("pitches = 4\nmatchMin = 8\nallowRematches = true\n").unwrap();
        assert_eq!(config.pitches, 4);
        assert_eq!(config.match_min, 8);
        assert!(config.allow_rematches);
        assert_eq!(config.break_min, 2);
        assert_eq!(config.start, "10:00");
    }

    #[test]
    fn bad_start_falls_back_to_ten() {
        let config = PlanningConfig {
            start: "midi".to_string(),
            ..PlanningConfig::default()
        };
        assert_eq!(config.start_time(), default_start());
    }

    #[test]
    fn loads_from_file_and_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("plateau.toml");
        std::fs::write(&good, "start = \"09:30\"\nseed = 42\n").unwrap();
        let config = load_config(&good).unwrap();
        assert_eq!(config.start, "09:30");
        assert_eq!(config.seed, 42);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "pitches = \"two\"\n").unwrap();
        assert!(matches!(load_config(&bad), Err(PlannerError::Config(_))));

        let huge = dir.path().join("huge.toml");
        std::fs::write(&huge, "matchesPerTeam = 4000000000\n").unwrap();
        assert!(matches!(load_config(&huge), Err(PlannerError::Validation(_))));
    }

    #[test]
    fn defaults_are_valid() {
        assert!(PlanningConfig::default().validate().is_ok());
    }

    #[test]
    fn oversized_parameters_are_rejected() {
        let oversized = [
            PlanningConfig { matches_per_team: MAX_MATCHES_PER_TEAM + 1, ..PlanningConfig::default() },
            PlanningConfig { matches_per_team: u32::MAX, ..PlanningConfig::default() },
            PlanningConfig { pitches: MAX_PITCHES + 1, ..PlanningConfig::default() },
            PlanningConfig { rest_every: MAX_REST_EVERY + 1, ..PlanningConfig::default() },
            PlanningConfig { break_min: MAX_DURATION_MIN + 1, ..PlanningConfig::default() },
        ];
        for config in &oversized {
            assert!(config.validate().is_err(), "{:?}", config);
        }

        let at_limit = PlanningConfig {
            matches_per_team: MAX_MATCHES_PER_TEAM,
            pitches: MAX_PITCHES,
            rest_every: MAX_REST_EVERY,
            ..PlanningConfig::default()
        };
        assert!(at_limit.validate().is_ok());
    }
}
