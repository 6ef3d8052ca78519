use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use flowopt::infrastructure::{read_config, read_network, solve_batch, SolveJob, SolveReport};
use flowopt::{logging, EngineFactory, ObjectiveMode, SolverBackend, SolverConfig};
use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ObjectiveArg {
    MaxProfit,
    MaxFlow,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    Microlp,
    Cbc,
    Highs,
}

impl From<BackendArg> for SolverBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Microlp => SolverBackend::MicroLp,
            BackendArg::Cbc => SolverBackend::CoinCbc,
            BackendArg::Highs => SolverBackend::Highs,
        }
    }
}

/// Solve production network flow problems and print JSON reports
#[derive(Debug, Parser)]
#[command(name = "flowopt", version)]
struct Cli {
    /// Network documents ({"nodes": [...], "arcs": [...]})
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    #[arg(long, value_enum, default_value = "max-profit")]
    objective: ObjectiveArg,

    /// Only count flow into this sink (max-flow objective)
    #[arg(long)]
    sink: Option<String>,

    /// Solver config file (TOML); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Wall-clock limit per network, in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn objective(&self) -> anyhow::Result<ObjectiveMode> {
        match (self.objective, &self.sink) {
            (ObjectiveArg::MaxProfit, None) => Ok(ObjectiveMode::MaxProfit),
            (ObjectiveArg::MaxProfit, Some(_)) => {
                anyhow::bail!("--sink only applies to --objective max-flow")
            }
            (ObjectiveArg::MaxFlow, None) => Ok(ObjectiveMode::MaxFlow),
            (ObjectiveArg::MaxFlow, Some(sink)) => Ok(ObjectiveMode::max_flow_to(sink.clone())),
        }
    }

    fn solver_config(&self) -> anyhow::Result<SolverConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => SolverConfig::default(),
        };
        if let Some(backend) = self.backend {
            config.backend = backend.into();
        }
        if let Some(secs) = self.time_limit {
            config.time_limit_secs = Some(secs);
        }
        config.verbose |= self.verbose;
        Ok(config)
    }
}

/// Solve every readable input. Returns one report per input, in input order,
/// and the number of inputs that could not be read.
async fn run(
    inputs: &[PathBuf],
    objective: &ObjectiveMode,
    config: &SolverConfig,
) -> (Vec<SolveReport>, usize) {
    let mut slots: Vec<Option<SolveReport>> = Vec::with_capacity(inputs.len());
    let mut positions = Vec::new();
    let mut jobs = Vec::new();

    for (position, path) in inputs.iter().enumerate() {
        let source = path.display().to_string();
        match read_network(path) {
            Ok(network) => {
                positions.push(position);
                jobs.push(SolveJob::new(source, network, objective.clone()));
                slots.push(None);
            }
            Err(err) => {
                error!(%err, "skipping input");
                slots.push(Some(SolveReport::invalid(source, err.to_string())));
            }
        }
    }
    let unreadable = slots.iter().filter(|slot| slot.is_some()).count();

    let outcomes = solve_batch(jobs, config).await;
    for (position, (source, outcome)) in positions.into_iter().zip(outcomes) {
        slots[position] = Some(SolveReport::from_outcome(source, outcome));
    }

    (slots.into_iter().flatten().collect(), unreadable)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = cli.solver_config()?;
    let objective = cli.objective()?;
    info!(
        backend = %config.backend,
        available = ?EngineFactory::available(),
        objective = %objective,
        inputs = cli.inputs.len(),
        "starting flowopt"
    );

    let (reports, unreadable) = run(&cli.inputs, &objective, &config).await;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&reports)
    } else {
        serde_json::to_string(&reports)
    }
    .context("failed to serialize reports")?;
    println!("{}", output);

    let solved = reports.iter().filter(|r| r.is_optimal()).count();
    info!(solved, total = reports.len(), "done");

    Ok(if unreadable > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
