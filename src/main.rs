mod config;
mod display;
mod error;
mod form;
mod parser;
mod schedule;
mod web;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{load_config, PlanningConfig};
use display::{print_agenda, write_agenda_to_file};
use form::{export_agenda_csv, write_planning_json};
use parser::load_teams;
use schedule::build_plan_for_teams;
use schedule::rng::seed_from_clock;

#[derive(Parser, Debug)]
#[command(name = "plateau-planner", about = "Rotation planner for youth football plateau days")]
struct Cli {
    /// TOML file with planning defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build an agenda from a team list file
    Plan(PlanArgs),
    /// Serve the planning JSON API
    Web {
        #[arg(long, env = "PLATEAU_PORT", default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Team list, one team per line
    teams: PathBuf,
    /// Kick-off time (HH:MM)
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    pitches: Option<u32>,
    /// Match length in minutes
    #[arg(long)]
    match_min: Option<u32>,
    /// Break between slots in minutes
    #[arg(long)]
    break_min: Option<u32>,
    #[arg(long)]
    per_team: Option<u32>,
    /// Consecutive slots a team may play before sitting one out
    #[arg(long)]
    rest_every: Option<u32>,
    /// Let two teams of the same club meet
    #[arg(long)]
    allow_intra_club: bool,
    /// Top up short team lists with rematches
    #[arg(long)]
    rematches: bool,
    #[arg(long, conflicts_with = "new_seed")]
    seed: Option<u32>,
    /// Draw a fresh seed from the clock
    #[arg(long)]
    new_seed: bool,
    /// CSV export (Heure, Terrain, Équipe A, Équipe B)
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Planning JSON for the backend
    #[arg(long)]
    json: Option<PathBuf>,
    /// Plain text agenda
    #[arg(long)]
    out: Option<PathBuf>,
}

impl PlanArgs {
    fn apply_to(&self, mut config: PlanningConfig) -> PlanningConfig {
        if let Some(start) = &self.start {
            config.start = start.clone();
        }
        config.pitches = self.pitches.unwrap_or(config.pitches);
        config.match_min = self.match_min.unwrap_or(config.match_min);
        config.break_min = self.break_min.unwrap_or(config.break_min);
        config.matches_per_team = self.per_team.unwrap_or(config.matches_per_team);
        config.rest_every = self.rest_every.unwrap_or(config.rest_every);
        if self.allow_intra_club {
            config.forbid_intra_club = false;
        }
        if self.rematches {
            config.allow_rematches = true;
        }
        config.seed = match (self.seed, self.new_seed) {
            (Some(seed), _) => seed,
            (None, true) => seed_from_clock(),
            (None, false) => config.seed,
        };
        config
    }
}

fn run_plan(args: &PlanArgs, base: PlanningConfig) -> anyhow::Result<()> {
    let config = args.apply_to(base);
    config.validate().context("invalid planning parameters")?;

    println!("Loading teams from {}...", args.teams.display());
    let teams = load_teams(&args.teams)
        .with_context(|| format!("reading team list {}", args.teams.display()))?;
    println!("Loaded {} teams", teams.len());

    let plan = build_plan_for_teams(teams, &config);
    print_agenda("Plateau", &plan);

    if let Some(path) = &args.csv {
        export_agenda_csv(&plan, path).with_context(|| format!("writing {}", path.display()))?;
        println!("CSV saved to {}", path.display());
    }
    if let Some(path) = &args.json {
        write_planning_json(&plan, path).with_context(|| format!("writing {}", path.display()))?;
        println!("Planning saved to {}", path.display());
    }
    if let Some(path) = &args.out {
        write_agenda_to_file("Plateau", &plan, path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Agenda saved to {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let base = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading config {}", path.display()))?,
        None => PlanningConfig::default(),
    };

    match cli.command {
        Command::Plan(args) => run_plan(&args, base),
        Command::Web { port } => {
            info!(port, "web mode");
            println!("Access the planner API at http://localhost:{}/api/planning", port);
            web::start_server(port, base).await?;
            Ok(())
        }
    }
}
