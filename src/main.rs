use std::time::Instant;

use clap::Parser;
use tracing::info;

use budget_diet_rs::cli::Cli;
use budget_diet_rs::error::{DietError, Result};
use budget_diet_rs::interface::{display_goals, display_report, Report};
use budget_diet_rs::loader::{load_catalog, load_goals};
use budget_diet_rs::logging::init_logging;
use budget_diet_rs::planner::solve_detailed;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => {}
        Err(DietError::NoFeasibleSolution) => {
            eprintln!("No combination of foods meets the goals within tolerance.");
            eprintln!("Try adding foods or widening --calorie-tolerance / --macro-tolerance.");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let catalog = load_catalog(&cli.foods)?;
    let goals = load_goals(&cli.goals)?;
    let policy = cli.search_policy()?;

    info!(foods = catalog.len(), "catalog loaded");

    if !cli.json {
        display_goals(&goals);
    }

    let mut reports = Vec::new();
    for strategy in cli.strategies(&policy) {
        let policy = policy.with_strategy(strategy);

        let started = Instant::now();
        let solution = solve_detailed(&catalog, &goals, &policy)?;
        let elapsed = started.elapsed();

        info!(
            strategy = strategy.label(),
            steps = solution.stats.steps,
            elapsed_ms = elapsed.as_millis() as u64,
            "solved"
        );

        let report = Report::new(&catalog, &solution, strategy, Some(elapsed));
        if !cli.json {
            display_report(&report);
        }
        reports.push(report);
    }

    if cli.json {
        let output = serde_json::json!({
            "goals": goals,
            "results": reports,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
