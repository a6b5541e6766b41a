use serde::Deserialize;

use crate::config::{PlanningConfig, MAX_TEAMS};
use crate::error::{PlannerError, Result};
use crate::schedule::slot_utils::parse_hhmm;

/// Planning request from the frontend; omitted fields keep the configured defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningRequest {
    pub teams: String,
    pub start: Option<String>,
    pub pitches: Option<u32>,
    pub match_min: Option<u32>,
    pub break_min: Option<u32>,
    pub matches_per_team: Option<u32>,
    pub rest_every: Option<u32>,
    pub forbid_intra_club: Option<bool>,
    pub allow_rematches: Option<bool>,
    pub seed: Option<u32>,
}

impl PlanningRequest {
    /// Overlays the request on top of `base`
    pub fn apply_to(&self, base: &PlanningConfig) -> PlanningConfig {
        PlanningConfig {
            start: self.start.clone().unwrap_or_else(|| base.start.clone()),
            pitches: self.pitches.unwrap_or(base.pitches),
            match_min: self.match_min.unwrap_or(base.match_min),
            break_min: self.break_min.unwrap_or(base.break_min),
            matches_per_team: self.matches_per_team.unwrap_or(base.matches_per_team),
            rest_every: self.rest_every.unwrap_or(base.rest_every),
            forbid_intra_club: self.forbid_intra_club.unwrap_or(base.forbid_intra_club),
            allow_rematches: self.allow_rematches.unwrap_or(base.allow_rematches),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

fn invalid(message: &str) -> PlannerError {
    PlannerError::Validation(message.to_string())
}

/// Validates a planning request
pub fn validate_request(req: &PlanningRequest) -> Result<()> {
    if req.teams.lines().all(|line| line.trim().is_empty()) {
        return Err(invalid("Team list is required"));
    }
    if req.teams.lines().filter(|line| !line.trim().is_empty()).count() > MAX_TEAMS {
        return Err(PlannerError::Validation(format!("At most {} teams are supported", MAX_TEAMS)));
    }

    if let Some(start) = &req.start {
        if parse_hhmm(start).is_none() {
            return Err(PlannerError::Validation(format!("Invalid start time: {}", start)));
        }
    }

    // Numeric fields are checked once overlaid on the defaults
    req.apply_to(&PlanningConfig::default()).validate()
}
