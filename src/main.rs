use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use swimbots_core::config::{MatingPreference, SimConfig};
use swimbots_core::metrics::init_logging;
use swimbots_core::simulation::Simulation;
use swimbots_core::stats::PopulationStats;
use swimbots_io::codec::encode_pond;
use swimbots_io::history::{save_history, HistoryFile};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of generations to simulate (overrides the config file)
    #[arg(short, long)]
    generations: Option<usize>,

    /// RNG seed (overrides the config file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Mating preference code: 0 random, 1 most segments, 2 fewest segments,
    /// 3 fastest, 4 similar segment count, 5 similar main segment length
    #[arg(short, long, value_parser = parse_preference)]
    preference: Option<MatingPreference>,

    /// Where to write the compressed run history
    #[arg(short, long, default_value = "output/history.json.gz")]
    output: PathBuf,

    /// Also dump the last generation in the text snapshot format
    #[arg(long)]
    final_snapshot: Option<PathBuf>,
}

fn parse_preference(value: &str) -> Result<MatingPreference, String> {
    let code: u8 = value
        .parse()
        .map_err(|_| format!("`{}` is not a preference code", value))?;
    MatingPreference::try_from(code).map_err(|e| e.to_string())
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = SimConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(generations) = args.generations {
        config.run.generations = generations;
    }
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(preference) = args.preference {
        config.behavior.mating_preference = preference;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let generations = config.run.generations;

    let mut simulation = Simulation::new(config.clone())?;
    simulation.run(generations)?;

    let history = simulation.into_history();
    if let Some(last) = history.last() {
        let stats = PopulationStats::from_pond(last);
        tracing::info!(
            population = stats.population,
            food = stats.food_count,
            avg_energy = stats.avg_energy,
            avg_segments = stats.avg_segments,
            avg_speed = stats.avg_translational_movement,
            "Final generation"
        );

        if let Some(path) = &args.final_snapshot {
            std::fs::write(path, encode_pond(last))
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "Final snapshot written");
        }
    }

    save_history(&args.output, &HistoryFile::new(&config, history))
        .with_context(|| format!("saving {}", args.output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("Simulation failed: {:#}", e);
        return Err(e);
    }
    Ok(())
}
