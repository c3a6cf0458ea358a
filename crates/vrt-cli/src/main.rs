use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;

use cli::{Cli, Commands};
use config::{LogFormat, LoggingConfig, VrtConfig};
use vrt_algo::{solve_vrptw, CgConfig, CgSolution};

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    // RUST_LOG wins over the configured level, as usual.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match (&logging.filename, logging.format) {
        (Some(path), LogFormat::Full) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file: {}", path.display()))?;
            builder.with_ansi(false).with_writer(Arc::new(file)).init();
        }
        (Some(path), LogFormat::Compact) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file: {}", path.display()))?;
            builder
                .compact()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        (None, LogFormat::Full) => builder.with_writer(std::io::stderr).init(),
        (None, LogFormat::Compact) => builder.compact().with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn solve(
    instance_path: &Path,
    customers: usize,
    cg_config: CgConfig,
    json: bool,
) -> Result<()> {
    let (instance, stats) = vrt_io::load_instance(instance_path, customers)?;
    info!(
        customers = instance.num_customers(),
        arcs = instance.num_arcs(),
        filtered = %format!("{:.1}%", stats.ratio_filtered() * 100.0),
        "instance loaded"
    );

    let solution = solve_vrptw(&instance, &cg_config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print_solution(&solution);
    }
    if !solution.converged {
        warn!(
            iterations = solution.iterations,
            "iteration cap reached; the objective is an upper bound on the LP optimum"
        );
    }
    Ok(())
}

fn print_solution(solution: &CgSolution) {
    println!("{:=<50}", "");
    println!("Master problem solution");
    println!("{:=<50}", "");
    for (name, activity) in &solution.routes {
        let path = activity
            .path
            .iter()
            .map(|node| node.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        println!("{name:>8}  value {:>6.3}  route {path}", activity.value);
    }
    let status = if solution.converged {
        "LP optimal"
    } else {
        "iteration cap reached"
    };
    println!(
        "Objective {:.2} | {} routes | {} columns priced | {status}",
        solution.objective,
        solution.routes.len(),
        solution.iterations
    );
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config: VrtConfig = config::load(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Solve {
            instance,
            customers,
            max_iterations,
            tolerance,
            json,
        } => {
            let cg_config = CgConfig {
                max_iterations: max_iterations.unwrap_or(config.orchestrator.max_iterations),
                tolerance: tolerance.unwrap_or(config.orchestrator.tolerance),
            };
            solve(&instance, customers, cg_config, json)?;
        }
    }
    Ok(())
}
