//! Agent Select CLI
//!
//! The `agent-select` command runs selection rounds against a scenario file
//! and inspects the resulting audit logs.
//!
//! ## Commands
//!
//! - `select`: rank one batch of a scenario's candidates and record the round
//! - `refresh`: recompute every candidate's cached base score
//! - `audit`: print round summaries from a JSONL audit log

mod scenario;
mod settings;

use std::path::{Path, PathBuf};

use agent_select_core::{
    read_rounds, refresh_base, AuditSink, JsonlAuditSink, RoundSummary, SelectionEngine,
    SelectionOutcome, SelectionRequest, METRICS,
};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn, Level};

use scenario::Scenario;
use settings::Settings;

#[derive(Parser)]
#[command(name = "agent-select")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rank and select agents for work roles", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines and JSON command output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one selection round over a scenario's candidate pool
    Select {
        /// Scenario file (JSON): requirement plus candidates
        #[arg(short, long)]
        scenario: PathBuf,

        /// Settings file (TOML)
        #[arg(short, long, env = "AGENT_SELECT_CONFIG")]
        config: Option<PathBuf>,

        /// Zero-based batch window to offer
        #[arg(short, long, default_value = "0")]
        batch: usize,

        /// Agent id to pick instead of the top-ranked candidate
        #[arg(long = "override")]
        user_override: Option<String>,

        /// Append the round to this JSONL audit log
        #[arg(long)]
        audit_log: Option<PathBuf>,
    },

    /// Recompute every candidate's base score
    Refresh {
        /// Scenario file (JSON)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Settings file (TOML)
        #[arg(short, long, env = "AGENT_SELECT_CONFIG")]
        config: Option<PathBuf>,

        /// Write the refreshed scenario here (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show rounds recorded in a JSONL audit log
    Audit {
        /// Audit log path
        #[arg(short, long)]
        log: PathBuf,

        /// Only the most recent N rounds
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    agent_select_core::init_tracing(cli.json, level);

    let result = match cli.command {
        Commands::Select {
            scenario,
            config,
            batch,
            user_override,
            audit_log,
        } => cmd_select(
            &scenario,
            config.as_deref(),
            batch,
            user_override,
            audit_log.as_deref(),
        ),
        Commands::Refresh {
            scenario,
            config,
            out,
        } => cmd_refresh(&scenario, config.as_deref(), out.as_deref()),
        Commands::Audit { log, limit } => cmd_audit(&log, limit, cli.json),
    };
    METRICS.flush();
    result
}

fn cmd_select(
    scenario_path: &Path,
    config: Option<&Path>,
    batch: usize,
    user_override: Option<String>,
    audit_log: Option<&Path>,
) -> Result<()> {
    let settings = Settings::load(config)?;
    let scenario = Scenario::load(scenario_path)?;
    let now = Utc::now();
    let pool = scenario.profiles(&settings, now)?;

    let mut request = SelectionRequest::new(scenario.requirement.clone()).with_batch(batch);
    request.role = scenario.role().to_string();
    if let Some(agent_id) = user_override {
        request = request.with_override(agent_id);
    }

    let outcome = match audit_log {
        Some(path) => {
            let sink = JsonlAuditSink::open(path)
                .with_context(|| format!("Failed to open audit log {}", path.display()))?;
            run_round(
                SelectionEngine::with_sink(settings.scoring.clone(), sink)?,
                &request,
                &pool,
            )?
        }
        None => run_round(SelectionEngine::new(settings.scoring.clone())?, &request, &pool)?,
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn run_round<S: AuditSink>(
    mut engine: SelectionEngine<S>,
    request: &SelectionRequest,
    pool: &[agent_select_core::AgentProfile],
) -> Result<SelectionOutcome> {
    let now = Utc::now();
    let outcome = engine
        .select_at(request, pool, now)
        .context("Selection round failed (the round was still recorded)")?;
    info!(
        round = outcome.round_sequence,
        selected = outcome.decision.selected_agent_id().unwrap_or("none"),
        "round complete"
    );
    Ok(outcome)
}

fn cmd_refresh(scenario_path: &Path, config: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let settings = Settings::load(config)?;
    let scenario = Scenario::load(scenario_path)?;
    let now = Utc::now();

    let mut profiles = scenario.profiles(&settings, now)?;
    for profile in &mut profiles {
        refresh_base(profile, &settings.base_weights, &settings.cooling, now)
            .with_context(|| format!("Failed to refresh {}", profile.agent_id))?;
    }

    let refreshed = scenario.with_profiles(&profiles);
    let json = serde_json::to_string_pretty(&refreshed)?;
    match out {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), candidates = profiles.len(), "scenario refreshed");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[derive(Serialize)]
struct AuditLine {
    #[serde(flatten)]
    summary: RoundSummary,
    integrity_ok: bool,
}

fn cmd_audit(log: &Path, limit: Option<usize>, json: bool) -> Result<()> {
    let lines = audit_lines(log, limit)?;
    let tampered = lines.iter().filter(|l| !l.integrity_ok).count();

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else if lines.is_empty() {
        println!("No rounds recorded in {}", log.display());
    } else {
        for line in &lines {
            let s = &line.summary;
            let flag = if line.integrity_ok { "" } else { "  [DIGEST MISMATCH]" };
            println!(
                "#{:<5} {:<16} batch {:<3} shortlist {:<3} {}{}",
                s.sequence, s.role, s.batch_index, s.shortlist_size, s.outcome, flag
            );
        }
    }

    if tampered > 0 {
        anyhow::bail!("{tampered} round(s) in {} failed the integrity check", log.display());
    }
    Ok(())
}

fn audit_lines(log: &Path, limit: Option<usize>) -> Result<Vec<AuditLine>> {
    let rounds = read_rounds(log)
        .with_context(|| format!("Failed to read audit log {}", log.display()))?;
    let skip = limit.map_or(0, |n| rounds.len().saturating_sub(n));

    Ok(rounds
        .iter()
        .skip(skip)
        .map(|round| {
            let integrity_ok = match round.verify_integrity() {
                Ok(()) => true,
                Err(e) => {
                    warn!(round = round.sequence, error = %e, "audit round failed integrity check");
                    false
                }
            };
            AuditLine {
                summary: RoundSummary::from_round(round),
                integrity_ok,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const SCENARIO: &str = r#"{
        "requirement": {"role": "reviewer", "skills": ["rust"]},
        "candidates": [
            {"agent_id": "a", "role": "reviewer",
             "static_score": {"performance": 0.9, "brand": 0.9, "recognition": 0.9},
             "capabilities": {"skills": ["rust"]}},
            {"agent_id": "b", "role": "reviewer",
             "static_score": {"performance": 0.4, "brand": 0.4, "recognition": 0.4}}
        ]
    }"#;

    fn write_scenario(dir: &Path) -> PathBuf {
        let path = dir.join("scenario.json");
        std::fs::write(&path, SCENARIO).unwrap();
        path
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_select_parses_override_flag() {
        let cli = Cli::try_parse_from([
            "agent-select",
            "select",
            "--scenario",
            "s.json",
            "--batch",
            "2",
            "--override",
            "agent-7",
        ])
        .unwrap();
        match cli.command {
            Commands::Select {
                batch,
                user_override,
                ..
            } => {
                assert_eq!(batch, 2);
                assert_eq!(user_override.as_deref(), Some("agent-7"));
            }
            _ => panic!("Expected select command"),
        }
    }

    #[test]
    fn test_select_records_rounds_and_audit_reads_them() {
        let dir = tempfile::tempdir().unwrap();
        let scenario = write_scenario(dir.path());
        let log = dir.path().join("audit").join("rounds.jsonl");

        cmd_select(&scenario, None, 0, None, Some(&log)).unwrap();
        cmd_select(&scenario, None, 0, Some("b".to_string()), Some(&log)).unwrap();
        assert!(cmd_select(&scenario, None, 0, Some("zed".to_string()), Some(&log)).is_err());

        let lines = audit_lines(&log, None).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.integrity_ok));
        assert_eq!(lines[0].summary.selected.as_deref(), Some("a"));
        assert_eq!(lines[1].summary.selected.as_deref(), Some("b"));
        assert!(lines[2].summary.outcome.starts_with("override rejected"));

        let tail = audit_lines(&log, Some(1)).unwrap();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].summary.sequence, 3);
    }

    #[test]
    fn test_audit_flags_tampered_round() {
        let dir = tempfile::tempdir().unwrap();
        let scenario = write_scenario(dir.path());
        let log = dir.path().join("rounds.jsonl");
        cmd_select(&scenario, None, 0, None, Some(&log)).unwrap();

        let contents = std::fs::read_to_string(&log).unwrap();
        std::fs::write(&log, contents.replace("\"batch_index\":0", "\"batch_index\":4")).unwrap();

        let lines = audit_lines(&log, None).unwrap();
        assert!(!lines[0].integrity_ok);
        assert!(cmd_audit(&log, None, false).is_err());
    }

    #[test]
    fn test_refresh_writes_bases() {
        let dir = tempfile::tempdir().unwrap();
        let scenario = write_scenario(dir.path());
        let out = dir.path().join("refreshed.json");

        cmd_refresh(&scenario, None, Some(&out)).unwrap();
        let refreshed = Scenario::load(&out).unwrap();
        assert_eq!(refreshed.candidates.len(), 2);
        let base = refreshed.candidates[0].base.unwrap();
        assert!((base.value - 0.9).abs() < 1e-9);
    }
}
