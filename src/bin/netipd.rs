//! netipd CLI: run and inspect network IPD evolution experiments
//!
//! Commands:
//!   netipd run     run one experiment, optionally archiving it
//!   netipd sweep   run one config over many seeds and aggregate
//!   netipd verify  run twice and confirm identical histories
//!   netipd show    print an archived run
//!   netipd config  print or write the default config

use netipd_core::metrics::SeedAggregate;
use netipd_core::simulation::{parse_seed_range, run_simulation, sweep_seeds, SimulationConfig};
use netipd_core::strategy::Strategy;
use netipd_core::{GenerationRecord, Result, RunArchive};
use std::env;
use std::process::ExitCode;

fn print_usage() {
    println!(
        r#"
netipd: evolution of cooperation in the iterated prisoner's dilemma on networks

Usage: netipd <command> [options]

Commands:
  run    [config.json|-] [archive.json]   Run one experiment (- = default config)
  sweep  <config.json|-> <seeds>          Run over seeds and print mean/std per generation
  verify [config.json|-]                  Run twice and compare history digests
  show   <archive.json>                   Print an archived run
  config [path]                           Print (or write) the default config
  help                                    Show this message

Examples:
  netipd config my-run.json
  netipd run my-run.json results/run.json
  netipd sweep my-run.json 0-9
  netipd sweep - 0,3,7-9
  RUST_LOG=debug netipd run -
"#
    );
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "sweep" => cmd_sweep(&args[2..]),
        "verify" => cmd_verify(&args[2..]),
        "show" => cmd_show(&args[2..]),
        "config" => cmd_config(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("  Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load a config file, or the defaults for "-" / no argument
fn load_config(arg: Option<&String>) -> Result<SimulationConfig> {
    match arg.map(String::as_str) {
        None | Some("-") => Ok(SimulationConfig::default()),
        Some(path) => {
            let cfg = SimulationConfig::from_file(path)?;
            println!("  Loaded config from {}", path);
            Ok(cfg)
        }
    }
}

fn cmd_run(args: &[String]) -> Result<()> {
    let config = load_config(args.first())?;
    let output = run_simulation(&config)?;

    println!("\n  {}", config.summary());
    print_history(&output.history);
    print_final_distribution(output.history.last());
    println!("  History digest: {}", output.digest.root_hash);

    if let Some(path) = args.get(1) {
        let archive = RunArchive::new(output)?;
        archive.save(path)?;
        println!("  Archived run {} to {}", archive.metadata.run_id, path);
    }
    Ok(())
}

fn cmd_sweep(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        eprintln!("Usage: netipd sweep <config.json|-> <seeds>");
        return Ok(());
    }
    let config = load_config(args.first())?;
    let seeds = parse_seed_range(&args[1])?;
    if seeds.is_empty() {
        eprintln!("  No seeds in '{}'", args[1]);
        return Ok(());
    }

    let aggregate = sweep_seeds(&config, &seeds)?;
    println!("\n  {} | seeds: {:?}", config.summary(), seeds);
    print_aggregate(&aggregate);
    Ok(())
}

fn cmd_verify(args: &[String]) -> Result<()> {
    let config = load_config(args.first())?;
    let first = run_simulation(&config)?;
    let second = run_simulation(&config)?;

    println!("\n  {}", config.summary());
    println!("  Run 1 digest: {}", first.digest.root_hash);
    println!("  Run 2 digest: {}", second.digest.root_hash);
    first.ensure_same_history(&second)?;
    println!("  Reproducible: histories are bit-identical");
    Ok(())
}

fn cmd_show(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        eprintln!("Usage: netipd show <archive.json>");
        return Ok(());
    };
    let archive = RunArchive::load(path)?;
    println!("\n  {}", archive.summary());
    println!("  Created: {}", archive.metadata.created_at.to_rfc3339());
    print_history(&archive.run.history);
    print_final_distribution(archive.run.history.last());
    if !archive.run.node_trace.is_empty() {
        println!("  Node trace: {} rows", archive.run.node_trace.len());
    }
    Ok(())
}

fn cmd_config(args: &[String]) -> Result<()> {
    let config = SimulationConfig::default();
    match args.first() {
        Some(path) => {
            config.to_file(path)?;
            println!("  Wrote default config to {}", path);
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}

fn print_history(history: &[GenerationRecord]) {
    if history.is_empty() {
        println!("  (no generations)");
        return;
    }
    println!(
        "  {:>6} {:>10} {:>10} {:>10} {:>10}",
        "gen", "realized", "strategy", "diversity", "payoff"
    );
    println!("  {}", "-".repeat(50));
    for r in history {
        println!(
            "  {:>6} {:>10.4} {:>10.4} {:>10.4} {:>10.2}",
            r.generation, r.realized_coop_rate, r.strategy_coop_rate, r.diversity, r.avg_payoff
        );
    }
}

fn print_final_distribution(last: Option<&GenerationRecord>) {
    let Some(last) = last else { return };
    println!("\n  Strategy distribution (generation {}):", last.generation);
    for (strategy, share) in Strategy::all().zip(last.strategy_proportions()) {
        println!("    {}  {:>6.1}%", strategy, share * 100.0);
    }
}

fn print_aggregate(rows: &[SeedAggregate]) {
    println!(
        "  {:>6} {:>5} {:>17} {:>17} {:>17} {:>17}",
        "gen", "runs", "realized", "strategy", "diversity", "payoff"
    );
    println!("  {}", "-".repeat(86));
    for r in rows {
        println!(
            "  {:>6} {:>5} {:>8.4} ±{:<7.4} {:>8.4} ±{:<7.4} {:>8.4} ±{:<7.4} {:>8.2} ±{:<7.2}",
            r.generation,
            r.runs,
            r.realized_coop_rate.mean,
            r.realized_coop_rate.std,
            r.strategy_coop_rate.mean,
            r.strategy_coop_rate.std,
            r.diversity.mean,
            r.diversity.std,
            r.avg_payoff.mean,
            r.avg_payoff.std,
        );
    }
}
