use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::types::{Match, ScheduledGame, Slot};

/// Per-team state carried from slot to slot
#[derive(Debug, Default, Clone, Copy)]
struct Streak {
    last_played: Option<usize>,
    consecutive: u32,
}

impl Streak {
    fn played_just_before(&self, time_index: usize) -> bool {
        time_index > 0 && self.last_played == Some(time_index - 1)
    }
}

/// Packs matches into consecutive time slots, at most `pitches` games per slot.
///
/// Each slot favours matches whose teams have rested longest (never-played teams
/// first), never books a team twice in one slot, and benches a team that has
/// already played `rest_every` slots in a row. A slot that cannot take any match
/// is still emitted empty, so the loop always advances and terminates.
pub fn pack_schedule(matches: &[Match], pitches: u32, rest_every: u32) -> Vec<Slot> {
    let pitches = pitches.max(1) as usize;
    let rest_every = rest_every.max(1);

    let mut streaks: HashMap<u32, Streak> = HashMap::new();
    let mut remaining: Vec<Match> = matches.to_vec();
    let mut slots: Vec<Slot> = Vec::new();
    let mut time_index = 0usize;

    while !remaining.is_empty() {
        // Longest-rested teams first; never-played teams sort ahead of everyone
        remaining.sort_by_key(|m| {
            let a = streaks.get(&m.a.id).and_then(|s| s.last_played);
            let b = streaks.get(&m.b.id).and_then(|s| s.last_played);
            a.min(b)
        });

        let must_rest = |team_id: u32| {
            streaks
                .get(&team_id)
                .map(|s| s.played_just_before(time_index) && s.consecutive >= rest_every)
                .unwrap_or(false)
        };

        let mut used: HashSet<u32> = HashSet::new();
        let mut games: Vec<ScheduledGame> = Vec::new();
        let mut leftover: Vec<Match> = Vec::new();

        // Fill pitches in priority order, skipping booked or resting teams
        for m in remaining.drain(..) {
            let fits = games.len() < pitches
                && !used.contains(&m.a.id)
                && !used.contains(&m.b.id)
                && !must_rest(m.a.id)
                && !must_rest(m.b.id);
            if fits {
                used.insert(m.a.id);
                used.insert(m.b.id);
                games.push(ScheduledGame {
                    pitch: games.len() as u32 + 1,
                    game: m,
                });
            } else {
                leftover.push(m);
            }
        }
        remaining = leftover;

        // Update rest streaks for everyone who played this slot
        for team_id in &used {
            let streak = streaks.entry(*team_id).or_default();
            streak.consecutive = if streak.played_just_before(time_index) {
                streak.consecutive + 1
            } else {
                1
            };
            streak.last_played = Some(time_index);
        }

        if games.is_empty() {
            debug!(time_index, waiting = remaining.len(), "slot left empty for rest");
        }

        // An empty slot still advances time
        slots.push(Slot { time_index, games });
        time_index += 1;
    }

    debug!(slots = slots.len(), matches = matches.len(), "packed schedule");
    slots
}
