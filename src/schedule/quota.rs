use std::collections::HashMap;

use rand::RngCore;
use tracing::debug;

use super::rng::{shuffle_in_place, Mulberry32};
use super::types::{Match, Team};

/// Number of matches each team id appears in
pub fn count_matches(matches: &[Match]) -> HashMap<u32, u32> {
    let mut counts = HashMap::new();
    for m in matches {
        *counts.entry(m.a.id).or_insert(0) += 1;
        *counts.entry(m.b.id).or_insert(0) += 1;
    }
    counts
}

fn count_of(counts: &HashMap<u32, u32>, team_id: u32) -> u32 {
    counts.get(&team_id).copied().unwrap_or(0)
}

fn unordered(a: u32, b: u32) -> (u32, u32) {
    (a.min(b), a.max(b))
}

/// Orders the candidates of one greedy pass.
///
/// Lowest sum of current counts first, then the smallest gap between the two
/// teams, then a seeded draw. The seeded shuffle beforehand keeps equal keys
/// from favouring the input order.
fn rank_candidates(
    mut candidates: Vec<Match>,
    counts: &HashMap<u32, u32>,
    rng: &mut Mulberry32,
) -> Vec<Match> {
    shuffle_in_place(&mut candidates, rng);

    let mut ranked: Vec<(u32, u32, u32, Match)> = candidates
        .into_iter()
        .map(|m| {
            let ca = count_of(counts, m.a.id);
            let cb = count_of(counts, m.b.id);
            (ca + cb, ca.abs_diff(cb), rng.next_u32(), m)
        })
        .collect();
    ranked.sort_by_key(|(sum, gap, draw, _)| (*sum, *gap, *draw));

    ranked.into_iter().map(|(_, _, _, m)| m).collect()
}

/// Keeps a subset of `all_matches` so that no team plays more than `per_team` matches.
///
/// Greedy heuristic, not an optimal matching: each pass shuffles the remaining
/// candidates, orders them by (sum of counts, count gap, random draw) and accepts
/// every match whose teams are both still under quota, until a pass accepts nothing.
/// With `allow_rematches`, under-quota teams are then topped up with repeat pairings
/// drawn only from pairs present in `all_matches`.
pub fn limit_matches_per_team(
    all_matches: &[Match],
    teams: &[Team],
    per_team: u32,
    allow_rematches: bool,
    seed: u32,
) -> Vec<Match> {
    if per_team == 0 {
        return Vec::new();
    }

    let mut rng = Mulberry32::new(seed);
    let mut counts: HashMap<u32, u32> = teams.iter().map(|t| (t.id, 0)).collect();
    let mut remaining: Vec<Match> = all_matches.to_vec();
    let mut selected: Vec<Match> = Vec::new();

    while !remaining.is_empty() {
        let ranked = rank_candidates(std::mem::take(&mut remaining), &counts, &mut rng);

        // Accept every match whose teams are both still under quota
        let mut accepted = 0usize;
        for m in ranked {
            if count_of(&counts, m.a.id) < per_team && count_of(&counts, m.b.id) < per_team {
                *counts.entry(m.a.id).or_insert(0) += 1;
                *counts.entry(m.b.id).or_insert(0) += 1;
                selected.push(m);
                accepted += 1;
            } else {
                remaining.push(m);
            }
        }

        // Fixed point: a pass that accepts nothing will never accept anything
        if accepted == 0 {
            break;
        }
    }

    debug!(
        candidates = all_matches.len(),
        kept = selected.len(),
        per_team,
        "greedy quota fill done"
    );

    if allow_rematches {
        inject_rematches(all_matches, teams, per_team, &mut counts, &mut selected, &mut rng);
    }

    selected
}

/// Tops up under-quota teams with repeat pairings until quotas are met,
/// no legal opponent is left, or the scan budget runs out.
fn inject_rematches(
    all_matches: &[Match],
    teams: &[Team],
    per_team: u32,
    counts: &mut HashMap<u32, u32>,
    selected: &mut Vec<Match>,
    rng: &mut Mulberry32,
) {
    let pool: HashMap<(u32, u32), &Match> = all_matches
        .iter()
        .map(|m| (unordered(m.a.id, m.b.id), m))
        .collect();

    let mut occurrences: HashMap<String, u32> = HashMap::new();
    for m in selected.iter() {
        let key = m.id.split('#').next().unwrap_or(&m.id).to_string();
        *occurrences.entry(key).or_insert(0) += 1;
    }

    let budget = teams.len() * per_team as usize * 3;
    let mut injected = 0usize;

    for _ in 0..budget {
        // Neediest team first, random among ties
        let under: Vec<&Team> = teams
            .iter()
            .filter(|t| count_of(counts, t.id) < per_team)
            .collect();
        let Some(lowest) = under.iter().map(|t| count_of(counts, t.id)).min() else {
            break;
        };

        let neediest: Vec<&Team> = under
            .iter()
            .copied()
            .filter(|t| count_of(counts, t.id) == lowest)
            .collect();
        let team = neediest[rng.below(neediest.len())];

        // Best opponent: legal in the original pool, lowest count, random among ties
        let opponents: Vec<&Team> = under
            .iter()
            .copied()
            .filter(|o| o.id != team.id && pool.contains_key(&unordered(team.id, o.id)))
            .collect();
        let Some(weakest) = opponents.iter().map(|o| count_of(counts, o.id)).min() else {
            break;
        };
        let best: Vec<&Team> = opponents
            .into_iter()
            .filter(|o| count_of(counts, o.id) == weakest)
            .collect();
        let opponent = best[rng.below(best.len())];

        let Some(original) = pool.get(&unordered(team.id, opponent.id)) else {
            break;
        };
        let seen = occurrences.entry(original.id.clone()).or_insert(0);
        *seen += 1;

        selected.push(Match {
            id: format!("{}#{}", original.id, seen),
            a: original.a.clone(),
            b: original.b.clone(),
        });
        *counts.entry(team.id).or_insert(0) += 1;
        *counts.entry(opponent.id).or_insert(0) += 1;
        injected += 1;
    }

    debug!(injected, "rematch injection done");
}
