pub mod submission;
pub mod export;

pub use submission::{validate_request, PlanningRequest};
pub use export::{agenda_csv_string, export_agenda_csv, write_planning_json};
