use super::types::{Match, Team};

/// Two teams belong to the same club when both clubs are set and equal ignoring case
pub fn same_club(a: &Team, b: &Team) -> bool {
    !a.club.is_empty() && !b.club.is_empty() && a.club.to_lowercase() == b.club.to_lowercase()
}

/// Every unordered pair of teams once, i-major over the input order
pub fn generate_all_matches(teams: &[Team], forbid_intra_club: bool) -> Vec<Match> {
    let mut matches = Vec::new();
    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            if forbid_intra_club && same_club(a, b) {
                continue;
            }
            matches.push(Match::new(a, b));
        }
    }
    matches
}
