use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::Result;
use crate::schedule::types::Team;

/// "<club> [U<age> | équipe] <number>", e.g. "RC Lens U9 2" or "Arras équipe 1"
fn category_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^(.*?\S)\s+(?:u\d+\s+|[ée]quipe\s*)?(\d+)$").unwrap())
}

/// "<club><number>" with no separator requirement, e.g. "Lens2"
fn suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(.*?\D)\s*(\d+)$").unwrap())
}

/// Collapses runs of whitespace into single spaces and trims the ends
fn normalize_label(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a label into (club, team number); falls back to the whole label as club
fn split_club_and_number(label: &str) -> (String, Option<u32>) {
    let captures = category_pattern()
        .captures(label)
        .or_else(|| suffix_pattern().captures(label));

    if let Some(caps) = captures {
        let club = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
        let number = caps.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
        if !club.is_empty() {
            if let Some(number) = number {
                return (club.to_string(), Some(number));
            }
        }
    }

    (label.to_string(), None)
}

/// Parses freeform team text, one team per line.
///
/// Empty lines are dropped; ids are 1-based over the remaining lines in order.
/// Never fails: a line without a recognizable number keeps its whole label as club.
pub fn parse_teams(text: &str) -> Vec<Team> {
    let teams: Vec<Team> = text
        .lines()
        .map(normalize_label)
        .filter(|label| !label.is_empty())
        .enumerate()
        .map(|(index, label)| {
            let (club, team_number) = split_club_and_number(&label);
            Team {
                id: index as u32 + 1,
                label,
                club,
                team_number,
            }
        })
        .collect();

    debug!(count = teams.len(), "parsed team list");
    teams
}

/// Loads a team list from a plain text file
pub fn load_teams<P: AsRef<Path>>(path: P) -> Result<Vec<Team>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_teams(&text))
}
