pub mod types;
pub mod rng;
pub mod slot_utils;
pub mod pairing;
pub mod quota;
pub mod packer;
pub mod plan;

pub use types::{PlanningExport, Slot};
pub use slot_utils::fmt_time;
pub use plan::{build_plan, build_plan_for_teams, PlanOutcome};
