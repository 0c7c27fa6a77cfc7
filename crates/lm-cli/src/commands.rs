use std::fs;

use anyhow::Context;
use colored::Colorize;
use lm_merge::{LineMerger, LineSource, MergeConfig, MergeOutcome};
use lm_order::{end_sentinel, forbidden_cost, start_sentinel};
use lm_types::{DocumentSnapshot, Line};
use serde_json::json;
use tracing::info;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let selection = Selection::load(cli.command.selection())?;
    match cli.command {
        Command::Order(_) => cmd_order(&selection, &cli.format),
        Command::Merge(_) => cmd_merge(&selection, &cli.format),
        Command::Matrix(_) => cmd_matrix(&selection, &cli.format),
    }
}

/// A loaded document, the resolved candidate lines, and the merger to run.
struct Selection {
    snapshot: DocumentSnapshot,
    lines: Vec<Line>,
    merger: LineMerger,
}

impl Selection {
    fn load(args: &SelectionArgs) -> anyhow::Result<Self> {
        let json = fs::read_to_string(&args.document)
            .with_context(|| format!("reading {}", args.document.display()))?;
        let snapshot = DocumentSnapshot::from_json(&json)
            .with_context(|| format!("parsing {}", args.document.display()))?;

        let config = match &args.config {
            Some(path) => MergeConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => MergeConfig::default(),
        };

        let lines = snapshot.lines(&args.lines)?;
        info!(part = %snapshot.part, lines = lines.len(), "loaded selection");
        Ok(Self {
            snapshot,
            lines,
            merger: LineMerger::new(config),
        })
    }
}

fn cmd_order(selection: &Selection, format: &OutputFormat) -> anyhow::Result<()> {
    selection.merger.validate(&selection.lines)?;
    let solution = selection.merger.reading_order().solve(&selection.lines)?;
    let ids: Vec<_> = solution.order.iter().map(|&i| selection.lines[i].id).collect();

    match format {
        OutputFormat::Json => {
            let value = json!({ "order": ids, "path_cost": solution.path_cost });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("{} Reading order", "✓".green().bold());
            for (pos, id) in ids.iter().enumerate() {
                println!("  {:>3}. {}", pos + 1, id.to_string().yellow());
            }
            println!("  Path cost: {}", format!("{:.3}", solution.path_cost).cyan());
        }
    }
    Ok(())
}

fn cmd_merge(selection: &Selection, format: &OutputFormat) -> anyhow::Result<()> {
    let outcome = selection
        .merger
        .merge(&selection.lines, &selection.snapshot.context)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => print_outcome(selection, &outcome),
    }
    Ok(())
}

fn print_outcome(selection: &Selection, outcome: &MergeOutcome) {
    let d = &outcome.descriptor;
    let order: Vec<String> = outcome.order.iter().map(|id| id.to_string()).collect();

    println!("{} Merged {} lines", "✓".green().bold(), outcome.consumed.len());
    println!("  Order: {}", order.join(" → ").yellow());
    println!("  Part: {}", d.part);
    if let Some(block) = d.block {
        println!("  Block: {block}");
    }
    if let Some(typology) = d.typology {
        println!("  Typology: {}", typology.to_string().cyan());
    }
    if let Some(script) = &d.script {
        println!("  Script: {script}");
    }
    println!("  Baseline: {} points", d.baseline.len());
    for t in &d.transcriptions {
        let name = selection
            .snapshot
            .context
            .layer(t.layer)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| t.layer.to_string());
        println!("  [{}] {}", name.bold(), t.content);
    }
}

fn cmd_matrix(selection: &Selection, format: &OutputFormat) -> anyhow::Result<()> {
    selection.merger.validate(&selection.lines)?;
    let reading_order = selection.merger.reading_order();
    let matrix = reading_order.cost_matrix(&selection.lines)?;

    match format {
        OutputFormat::Json => {
            let rows: Vec<&[f64]> = matrix.rows().collect();
            let value = json!({
                "labels": matrix_labels(&selection.lines),
                "rows": rows,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let labels = matrix_labels(&selection.lines);
            let forbidden = forbidden_cost(&matrix, selection.lines.len());
            print!("{:>10}", "");
            for label in &labels {
                print!("{:>10}", label.bold());
            }
            println!();
            for (label, row) in labels.iter().zip(matrix.rows()) {
                print!("{:>10}", label.bold());
                for &cost in row {
                    let cell = format_cost(cost, forbidden);
                    if cost >= forbidden {
                        print!("{:>10}", cell.dimmed());
                    } else {
                        print!("{cell:>10}");
                    }
                }
                println!();
            }
        }
    }
    Ok(())
}

/// Row and column labels: one per line, then the two sentinels.
fn matrix_labels(lines: &[Line]) -> Vec<String> {
    let n = lines.len();
    let mut labels: Vec<String> = lines.iter().map(|l| l.id.to_string()).collect();
    labels.resize(end_sentinel(n) + 1, String::new());
    labels[start_sentinel(n)] = "start".into();
    labels[end_sentinel(n)] = "end".into();
    labels
}

fn format_cost(cost: f64, forbidden: f64) -> String {
    if cost >= forbidden {
        "-".into()
    } else {
        format!("{cost:.2}")
    }
}
