use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::schedule::{fmt_time, PlanOutcome, Slot};

/// Formats a pairing as "A vs B"
pub fn format_matchup(a: &str, b: &str) -> String {
    format!("{} vs {}", a, b)
}

fn slot_lines(plan: &PlanOutcome, slot: &Slot) -> Vec<String> {
    let time = fmt_time(plan.slot_time(slot));
    if slot.is_empty() {
        return vec![format!("{} [PAUSE]", time)];
    }
    slot.games
        .iter()
        .map(|g| {
            format!(
                "{} Terrain {}: {}",
                time,
                g.pitch,
                format_matchup(&g.game.a.label, &g.game.b.label)
            )
        })
        .collect()
}

/// Writes the agenda to a text file, one game per line: HH:MM Terrain N: A vs B
pub fn write_agenda_to_file<P: AsRef<Path>>(title: &str, plan: &PlanOutcome, path: P) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "** {} **", title)?;
    for slot in &plan.slots {
        for line in slot_lines(plan, slot) {
            writeln!(file, "{}", line)?;
        }
    }

    Ok(())
}

/// Prints the agenda, advisories and per-team load in a readable format
pub fn print_agenda(title: &str, plan: &PlanOutcome) {
    println!("\n=== {} ===", title);
    println!(
        "Teams: {}, possible pairings: {}, matches: {}, slots: {}, pitches: {}, seed: {}",
        plan.teams.len(),
        plan.candidates.len(),
        plan.matches.len(),
        plan.slots.len(),
        plan.config.pitches,
        plan.config.seed
    );

    if !plan.advisories.is_empty() {
        println!("⚠️  Advisories ({}):", plan.advisories.len());
        for advisory in &plan.advisories {
            println!("  - {}", advisory);
        }
    }

    println!("\nAgenda:");
    for slot in &plan.slots {
        for line in slot_lines(plan, slot) {
            println!("  {}", line);
        }
    }

    println!("\nMatches per team:");
    for load in &plan.loads {
        println!(
            "  {} -> {} match(es), longest run {}",
            load.label, load.matches, load.longest_streak
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanningConfig;
    use crate::schedule::build_plan;

    #[test]
    fn matchup_format() {
        assert_eq!(format_matchup("RC Lens 1", "Douai 2"), "RC Lens 1 vs Douai 2");
    }

    #[test]
    fn agenda_file_lists_games_and_pauses() {
        let cfg = PlanningConfig {
            pitches: 1,
            matches_per_team: 2,
            rest_every: 1,
            ..PlanningConfig::default()
        };
        let plan = build_plan("A 1\nA 2\nB 1", &cfg);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.txt");
        write_agenda_to_file("Plateau U9", &plan, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "** Plateau U9 **");
        assert!(lines[1].starts_with("10:00 Terrain 1: "));
        assert_eq!(lines[2], "10:12 [PAUSE]");
        assert!(lines[3].starts_with("10:24 Terrain 1: "));
        assert_eq!(lines.len(), 4);
    }
}
