use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{arg, ArgMatches, Command};
use tracing::Level;

use cvrp_ga::ga::{EvolutionDriver, GaConfig};
use cvrp_ga::io::{InstanceSource, TextInstanceReader, TextReportSink};

fn cli() -> Command {
    Command::new("cvrp-ga")
        .about("Solves a capacitated vehicle routing instance with a genetic algorithm")
        .arg(arg!(<INSTANCE> "Path to the instance file").value_parser(clap::value_parser!(PathBuf)))
        .arg(
            arg!(--config <PATH> "JSON file with GA parameters")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--population <N> "Population size").value_parser(clap::value_parser!(usize)))
        .arg(
            arg!(--generations <N> "Number of generations")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(arg!(--crossover <P> "Crossover probability").value_parser(clap::value_parser!(f64)))
        .arg(arg!(--mutation <P> "Mutation probability").value_parser(clap::value_parser!(f64)))
        .arg(
            arg!(--swaps <N> "Swaps per mutated chromosome")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--penalty <W> "Cost added per overloaded route")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(arg!(--seed <SEED> "Random seed").value_parser(clap::value_parser!(u64)))
        .arg(
            arg!(--out <PATH> "Write the progress report here instead of stdout")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--json <PATH> "Write the best route plan as JSON")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"log-level" <LEVEL> "trace, debug, info, warn or error")
                .default_value("info")
                .value_parser(clap::value_parser!(Level)),
        )
}

/// Defaults, then the config file, then command-line flags.
fn load_config(matches: &ArgMatches) -> Result<GaConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GaConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GaConfig::default(),
    };

    if let Some(&n) = matches.get_one::<usize>("population") {
        config.population_size = n;
    }
    if let Some(&n) = matches.get_one::<usize>("generations") {
        config.max_generations = n;
    }
    if let Some(&p) = matches.get_one::<f64>("crossover") {
        config.crossover_rate = p;
    }
    if let Some(&p) = matches.get_one::<f64>("mutation") {
        config.mutation_rate = p;
    }
    if let Some(&n) = matches.get_one::<usize>("swaps") {
        config.mutation_swaps = n;
    }
    if let Some(&w) = matches.get_one::<f64>("penalty") {
        config.penalty_weight = w;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(seed);
    }

    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<Level>("log-level")
        .copied()
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let path = matches
        .get_one::<PathBuf>("INSTANCE")
        .context("missing instance path")?;
    let instance = TextInstanceReader::open(path)
        .and_then(InstanceSource::read_instance)
        .with_context(|| format!("loading instance {}", path.display()))?;

    let config = load_config(&matches)?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    tracing::info!(
        customers = instance.num_customers(),
        capacity = instance.capacity(),
        seed,
        "Instance loaded"
    );

    let out: Box<dyn Write> = match matches.get_one::<PathBuf>("out") {
        Some(out) => Box::new(BufWriter::new(
            File::create(out).with_context(|| format!("creating {}", out.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    let mut sink = TextReportSink::new(out);

    let mut rng = u_numflow::random::create_rng(seed);
    let mut driver = EvolutionDriver::new(instance, config)?;

    let started = Instant::now();
    let outcome = driver.run(&mut rng, &mut sink)?;
    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        generations = outcome.generations,
        "Run complete"
    );

    if let Some(json_path) = matches.get_one::<PathBuf>("json") {
        let file =
            File::create(json_path).with_context(|| format!("creating {}", json_path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &outcome.plan)
            .with_context(|| format!("writing {}", json_path.display()))?;
    }

    Ok(())
}
