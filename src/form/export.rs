use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::Result;
use crate::schedule::{fmt_time, PlanOutcome};

pub const CSV_HEADER: [&str; 4] = ["Heure", "Terrain", "Équipe A", "Équipe B"];

/// Writes one CSV row per scheduled game; rest slots produce no row
pub fn write_agenda_csv<W: Write>(plan: &PlanOutcome, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for slot in &plan.slots {
        let time = fmt_time(plan.slot_time(slot));
        for game in &slot.games {
            let pitch = game.pitch.to_string();
            wtr.write_record([
                time.as_str(),
                pitch.as_str(),
                game.game.a.label.as_str(),
                game.game.b.label.as_str(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// CSV export as a string, for download responses
pub fn agenda_csv_string(plan: &PlanOutcome) -> Result<String> {
    let mut buffer = Vec::new();
    write_agenda_csv(plan, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Exports the agenda to a CSV file, replacing any previous export
pub fn export_agenda_csv(plan: &PlanOutcome, csv_path: &Path) -> Result<()> {
    let file = File::create(csv_path)?;
    write_agenda_csv(plan, file)
}

/// Writes the planning shape expected by the backend as pretty JSON
pub fn write_planning_json(plan: &PlanOutcome, json_path: &Path) -> Result<()> {
    let file = File::create(json_path)?;
    serde_json::to_writer_pretty(file, &plan.to_export())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanningConfig;
    use crate::schedule::{build_plan, PlanningExport};

    fn plan() -> PlanOutcome {
        let cfg = PlanningConfig {
            pitches: 2,
            matches_per_team: 1,
            ..PlanningConfig::default()
        };
        build_plan("RC Lens 1\nDouai, FC 1\nArras 1\nLiévin 1", &cfg)
    }

    #[test]
    fn csv_has_header_and_one_row_per_game() {
        let plan = plan();
        let csv = agenda_csv_string(&plan).unwrap();
        let mut reader = csv::ReaderBuilder::new().from_reader(csv.as_bytes());

        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, CSV_HEADER);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), plan.matches.len());
        assert!(rows.iter().all(|r| &r[0] == "10:00"));
        assert!(rows.iter().any(|r| &r[2] == "Douai, FC 1" || &r[3] == "Douai, FC 1"));
    }

    #[test]
    fn json_file_round_trips_into_export_shape() {
        let plan = plan();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planning.json");
        write_planning_json(&plan, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: PlanningExport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, plan.to_export());
    }

    #[test]
    fn csv_file_export_overwrites() {
        let plan = plan();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda.csv");
        std::fs::write(&path, "stale").unwrap();
        export_agenda_csv(&plan, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Heure,Terrain,Équipe A,Équipe B"));
    }
}
