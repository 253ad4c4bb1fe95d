//! Command execution and rendering

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, warn};

use core_kernel::{CalendarDate, WalkthroughId};
use domain_pnf::{
    Answer, ClaimDecisionEngine, ClaimNotificationPeriod, ClaimPeriod, DecisionFlow, DecisionRule,
    FlowState, FlowStep, Outcome,
};

use crate::cli::{Cli, Commands};
use crate::config::CliConfig;

#[derive(Debug, Serialize)]
struct DecideReport {
    outcome: Outcome,
    rule: DecisionRule,
    notification_period: ClaimNotificationPeriod,
}

#[derive(Debug, Serialize)]
struct RelevanceReport {
    filing_date: CalendarDate,
    today: CalendarDate,
    relevant: bool,
}

#[derive(Debug, Serialize)]
struct WalkthroughReport {
    walkthrough_id: WalkthroughId,
    state: FlowState,
    rejected: Vec<String>,
}

/// Runs a parsed command and returns the text to print
pub fn run(cli: Cli, config: &CliConfig) -> Result<String> {
    let engine = ClaimDecisionEngine::new(&config.engine_config(cli.cutover))
        .context("Engine configuration is incomplete")?;
    info!(cutover = %engine.cutover(), "Decision engine ready");

    match cli.command {
        Commands::Decide { last_filing, claim_start, claim_end } => {
            let period = ClaimPeriod::new(claim_start, claim_end)?;
            let decision = engine.evaluate(last_filing, &period)?;
            let report = DecideReport {
                outcome: decision.outcome,
                rule: decision.rule,
                notification_period: decision.notification_period,
            };
            render(cli.json, &report, render_decide)
        }
        Commands::Relevance { filing_date, today } => {
            let today = today.unwrap_or_else(CalendarDate::today);
            let report = RelevanceReport {
                filing_date,
                today,
                relevant: engine.is_filing_relevant(filing_date, today),
            };
            render(cli.json, &report, render_relevance)
        }
        Commands::Walkthrough { answers } => {
            let report = replay(engine, &answers)?;
            render(cli.json, &report, render_walkthrough)
        }
    }
}

fn replay(engine: ClaimDecisionEngine, path: &Path) -> Result<WalkthroughReport> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers from {}", path.display()))?;
    let answers: Vec<Answer> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse answers in {}", path.display()))?;

    let mut flow = DecisionFlow::new(engine);
    let mut rejected = Vec::new();
    for (position, answer) in answers.into_iter().enumerate() {
        match flow.answer(answer) {
            Ok(_) => {}
            Err(e) if e.is_recoverable() => {
                warn!(position, error = %e, "Skipping rejected answer");
                rejected.push(format!("answer {}: {}", position + 1, e));
            }
            Err(e) => bail!("answer {} cannot be applied: {}", position + 1, e),
        }
    }

    Ok(WalkthroughReport {
        walkthrough_id: flow.id(),
        state: *flow.state(),
        rejected,
    })
}

fn render<T: Serialize>(json: bool, report: &T, text: fn(&T) -> String) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(text(report))
    }
}

fn render_decide(report: &DecideReport) -> String {
    format!(
        "Outcome: {}\nRule: {}\nNotification period: {} to {}",
        outcome_label(report.outcome),
        report.rule,
        report.notification_period.start(),
        report.notification_period.end()
    )
}

fn render_relevance(report: &RelevanceReport) -> String {
    let verdict = if report.relevant { "relevant" } else { "not relevant" };
    format!("Filing of {} is {} on {}", report.filing_date, verdict, report.today)
}

fn render_walkthrough(report: &WalkthroughReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Walkthrough: {}", report.walkthrough_id);
    match report.state.step {
        FlowStep::Asking(question) => {
            let _ = write!(out, "Waiting on question {} ({})", question.index() + 1, question);
        }
        FlowStep::Terminal(verdict) => {
            let label = if verdict.requires_pnf() {
                "PNF required"
            } else {
                "No PNF required"
            };
            let _ = write!(out, "Verdict: {}", label);
            if let Some(window) = verdict.notification_period {
                let _ = write!(out, "\nNotification period: {} to {}", window.start(), window.end());
            }
        }
    }
    for line in &report.rejected {
        let _ = write!(out, "\nRejected {}", line);
    }
    out
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::PnfRequired => "PNF required",
        Outcome::NoPnfRequired => "No PNF required",
        Outcome::NeedsFollowUp => "Follow-up question needed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        run(cli, &CliConfig::default())
    }

    #[test]
    fn test_decide_text() {
        let out = run_args(&[
            "pnf-check", "decide",
            "--last-filing", "2021-06-30",
            "--claim-start", "2021-01-01",
            "--claim-end", "2023-12-30",
        ])
        .unwrap();
        assert!(out.contains("Outcome: PNF required"));
        assert!(out.contains("Rule: stale_filing"));
        assert!(out.contains("2021-01-01 to 2024-06-30"));
    }

    #[test]
    fn test_decide_rejects_reversed_period() {
        let result = run_args(&[
            "pnf-check", "decide",
            "--last-filing", "2023-01-01",
            "--claim-start", "2023-12-31",
            "--claim-end", "2023-01-01",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_relevance_json() {
        let out = run_args(&[
            "pnf-check", "--json", "relevance",
            "--filing-date", "2024-03-01",
            "--today", "2024-06-01",
        ])
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["relevant"], true);
    }

    #[test]
    fn test_cutover_override() {
        let out = run_args(&[
            "pnf-check", "--cutover", "2022-01-01", "decide",
            "--last-filing", "2023-01-15",
            "--claim-start", "2021-06-01",
            "--claim-end", "2022-06-30",
        ])
        .unwrap();
        assert!(out.contains("Follow-up question needed"));
    }
}
