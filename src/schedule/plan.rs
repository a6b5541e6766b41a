use std::collections::HashMap;
use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PlanningConfig;
use crate::parser::parse_teams;

use super::packer::pack_schedule;
use super::pairing::generate_all_matches;
use super::quota::{count_matches, limit_matches_per_team};
use super::rng::seeded_shuffle;
use super::slot_utils::{fmt_time, slot_start};
use super::types::{GameExport, Match, PlanningExport, Slot, SlotExport, Team};

/// Soft warnings shown next to a plan; none of them prevents a plan from being produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    NotEnoughTeams,
    NoMatchPossible,
    QuotaUnreachable { per_team: u32, teams: usize },
    UnderQuota { labels: Vec<String> },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NotEnoughTeams => write!(f, "Ajoutez au moins 2 équipes."),
            Advisory::NoMatchPossible => write!(f, "Aucun match possible avec ces contraintes."),
            Advisory::QuotaUnreachable { per_team, teams } => write!(
                f,
                "{} matchs par équipe avec {} équipes : quota probablement inatteignable.",
                per_team, teams
            ),
            Advisory::UnderQuota { labels } => {
                write!(f, "Équipes sous le quota : {}.", labels.join(", "))
            }
        }
    }
}

/// How much one team plays over the whole plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLoad {
    pub team_id: u32,
    pub label: String,
    pub matches: u32,
    pub longest_streak: u32,
}

/// Result of one planner run; rebuilt from scratch whenever an input changes
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub config: PlanningConfig,
    pub start: NaiveTime,
    pub teams: Vec<Team>,
    pub candidates: Vec<Match>,
    pub matches: Vec<Match>,
    pub slots: Vec<Slot>,
    pub loads: Vec<TeamLoad>,
    pub advisories: Vec<Advisory>,
}

impl PlanOutcome {
    pub fn slot_time(&self, slot: &Slot) -> NaiveTime {
        slot_start(
            self.start,
            slot.time_index,
            self.config.match_min,
            self.config.break_min,
        )
    }

    /// Shape stored by the planning resource of the backend
    pub fn to_export(&self) -> PlanningExport {
        PlanningExport {
            start: fmt_time(self.start),
            pitches: self.config.pitches,
            match_min: self.config.match_min,
            break_min: self.config.break_min,
            slots: self
                .slots
                .iter()
                .map(|slot| SlotExport {
                    time: fmt_time(self.slot_time(slot)),
                    games: slot
                        .games
                        .iter()
                        .map(|g| GameExport {
                            pitch: g.pitch,
                            a: g.game.a.label.clone(),
                            b: g.game.b.label.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn team_loads(teams: &[Team], matches: &[Match], slots: &[Slot]) -> Vec<TeamLoad> {
    let counts = count_matches(matches);
    let mut longest: HashMap<u32, u32> = HashMap::new();
    let mut current: HashMap<u32, u32> = HashMap::new();

    for slot in slots {
        for team in teams {
            let streak = current.entry(team.id).or_insert(0);
            if slot.has_team(team.id) {
                *streak += 1;
                let best = longest.entry(team.id).or_insert(0);
                *best = (*best).max(*streak);
            } else {
                *streak = 0;
            }
        }
    }

    teams
        .iter()
        .map(|t| TeamLoad {
            team_id: t.id,
            label: t.label.clone(),
            matches: counts.get(&t.id).copied().unwrap_or(0),
            longest_streak: longest.get(&t.id).copied().unwrap_or(0),
        })
        .collect()
}

fn advisories_for(
    teams: &[Team],
    candidates: &[Match],
    loads: &[TeamLoad],
    per_team: u32,
) -> Vec<Advisory> {
    if teams.len() < 2 {
        return vec![Advisory::NotEnoughTeams];
    }
    if candidates.is_empty() {
        return vec![Advisory::NoMatchPossible];
    }

    let mut advisories = Vec::new();
    if per_team as usize >= teams.len() {
        advisories.push(Advisory::QuotaUnreachable {
            per_team,
            teams: teams.len(),
        });
    }
    let labels: Vec<String> = loads
        .iter()
        .filter(|l| l.matches < per_team)
        .map(|l| l.label.clone())
        .collect();
    if !labels.is_empty() {
        advisories.push(Advisory::UnderQuota { labels });
    }
    advisories
}

/// Runs the whole rotation pipeline on freeform team text
pub fn build_plan(text: &str, config: &PlanningConfig) -> PlanOutcome {
    build_plan_for_teams(parse_teams(text), config)
}

/// Pairs, limits, shuffles and packs an already parsed team list.
///
/// Deterministic for a given team list and configuration, seed included.
pub fn build_plan_for_teams(teams: Vec<Team>, config: &PlanningConfig) -> PlanOutcome {
    let candidates = generate_all_matches(&teams, config.forbid_intra_club);
    let limited = limit_matches_per_team(
        &candidates,
        &teams,
        config.matches_per_team,
        config.allow_rematches,
        config.seed,
    );
    let matches = seeded_shuffle(&limited, config.seed);
    let slots = pack_schedule(&matches, config.pitches, config.rest_every);

    let loads = team_loads(&teams, &matches, &slots);
    let advisories = advisories_for(&teams, &candidates, &loads, config.matches_per_team);

    info!(
        teams = teams.len(),
        candidates = candidates.len(),
        matches = matches.len(),
        slots = slots.len(),
        seed = config.seed,
        "plan built"
    );
    for advisory in &advisories {
        warn!("{}", advisory);
    }

    PlanOutcome {
        config: config.clone(),
        start: config.start_time(),
        teams,
        candidates,
        matches,
        slots,
        loads,
        advisories,
    }
}
