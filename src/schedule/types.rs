use serde::{Deserialize, Serialize};

/// A team parsed from one line of the team list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub label: String,
    pub club: String,
    pub team_number: Option<u32>,
}

/// An unordered pairing of two teams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub a: Team,
    pub b: Team,
}

impl Match {
    pub fn new(a: &Team, b: &Team) -> Self {
        Match {
            id: pair_key(a, b),
            a: a.clone(),
            b: b.clone(),
        }
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.a.id == team_id || self.b.id == team_id
    }
}

/// Key shared by every match between the same two teams, in candidate order
pub fn pair_key(a: &Team, b: &Team) -> String {
    format!("{}-{}", a.id, b.id)
}

/// One match placed on a pitch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub pitch: u32,
    #[serde(rename = "match")]
    pub game: Match,
}

/// All games played at the same time; may be empty when every remaining team must rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub time_index: usize,
    pub games: Vec<ScheduledGame>,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn has_team(&self, team_id: u32) -> bool {
        self.games.iter().any(|g| g.game.involves(team_id))
    }
}

/// Planning shape handed to the backend planning resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningExport {
    pub start: String,
    pub pitches: u32,
    pub match_min: u32,
    pub break_min: u32,
    pub slots: Vec<SlotExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotExport {
    pub time: String,
    pub games: Vec<GameExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameExport {
    pub pitch: u32,
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
}
