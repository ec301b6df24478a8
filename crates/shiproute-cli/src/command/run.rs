use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use shiproute_evaluator::route_cost::RouteCostEvaluator;
use shiproute_grid::{DecodedPath, GridEnvironment, ObstacleSampler, RouteMap};
use shiproute_training::{
    engine::{EvolutionEngine, GenerationSummary},
    selection::Selector,
};

use crate::{
    model::{route_report::RouteReport, run_config::RunConfig},
    util,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    /// Seed for obstacle sampling and evolution (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON configuration file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Grid width and height
    #[arg(long)]
    grid_size: Option<u32>,
    /// Number of obstacles to place
    #[arg(long)]
    obstacles: Option<usize>,
    #[arg(long)]
    genotype_length: Option<usize>,
    #[arg(long)]
    population_size: Option<usize>,
    /// Number of generations to evolve after the initial population
    #[arg(long)]
    generations: Option<usize>,
    #[arg(long)]
    mutation_rate: Option<f64>,
    #[arg(long)]
    crossover_rate: Option<f64>,
    /// Use tournament selection with this many contestants
    #[arg(long, conflicts_with = "roulette")]
    tournament_size: Option<usize>,
    /// Use fitness-proportionate selection
    #[arg(long)]
    roulette: bool,
    /// Penalty charged per stalled route point
    #[arg(long)]
    stall_penalty: Option<f64>,
    /// Report file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Do not print per-generation statistics
    #[arg(long, short)]
    quiet: bool,
}

impl RunArg {
    fn load_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<RunConfig, _>("configuration", path)?,
            None => RunConfig::default(),
        };
        let grid = &mut config.grid;
        let evolution = &mut config.evolution;
        if let Some(size) = self.grid_size {
            grid.size = size;
        }
        if let Some(count) = self.obstacles {
            grid.obstacle_count = count;
        }
        if let Some(length) = self.genotype_length {
            evolution.genotype_length = length;
        }
        if let Some(size) = self.population_size {
            evolution.population_size = size;
        }
        if let Some(limit) = self.generations {
            evolution.generation_limit = limit;
        }
        if let Some(rate) = self.mutation_rate {
            evolution.mutation_rate = rate;
        }
        if let Some(rate) = self.crossover_rate {
            evolution.crossover_rate = rate;
        }
        if let Some(size) = self.tournament_size {
            evolution.selector = Selector::Tournament { size };
        }
        if self.roulette {
            evolution.selector = Selector::Roulette;
        }
        if let Some(penalty) = self.stall_penalty {
            config.stall_penalty = penalty;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let config = arg.load_config()?;
    anyhow::ensure!(
        config.stall_penalty.is_finite() && config.stall_penalty >= 0.0,
        "stall penalty must be a non-negative finite number, got {}",
        config.stall_penalty
    );
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed {seed}");

    let mut rng = Pcg32::seed_from_u64(seed);
    let env = ObstacleSampler::new(config.grid.size, config.grid.obstacle_count)
        .sample_environment(&mut rng)
        .context("Failed to sample grid environment")?;
    eprintln!(
        "Grid {size}x{size}, {} obstacles, {} -> {}",
        env.obstacles().len(),
        env.start(),
        env.end(),
        size = env.size(),
    );

    let evaluator = RouteCostEvaluator::new(config.stall_penalty);
    let mut engine = EvolutionEngine::new(&env, evaluator, config.evolution, rng)
        .context("Invalid evolution configuration")?;
    while !engine.phase().is_terminated() {
        let summaries = engine.history().len();
        engine.step();
        if !arg.quiet && engine.history().len() > summaries {
            if let Some(summary) = engine.history().last() {
                print_generation(summary);
            }
        }
    }

    let outcome = engine
        .into_outcome()
        .context("Evolution finished without evaluating a generation")?;
    let path = outcome.decoded_path(&env);
    let cost = evaluator.cost(&path);

    eprintln!();
    eprint!("{}", RouteMap::new(&env).with_path(&path));
    eprintln!();
    print_route_summary(&env, outcome.best.generation, outcome.best.fitness, &path);
    eprintln!(
        "  Cost: {:.3} (distance {:.3} + {} penalized points x {})",
        cost.total(),
        cost.distance,
        cost.penalized_points,
        evaluator.stall_penalty(),
    );

    let report = RouteReport {
        solved_at: Utc::now(),
        seed,
        environment: env,
        config: config.evolution,
        stall_penalty: config.stall_penalty,
        best_fitness: outcome.best.fitness,
        best_generation: outcome.best.generation,
        path: path.points().to_vec(),
        genotype: outcome.best.genotype,
        generations: outcome.generations,
    };
    util::write_json(&report, arg.output.as_deref())?;
    if let Some(output) = &arg.output {
        eprintln!("Report saved to {}", output.display());
    }

    Ok(())
}

fn print_generation(summary: &GenerationSummary) {
    let GenerationSummary {
        generation,
        evaluated,
        fitness,
        best_ever_fitness,
    } = summary;
    eprintln!(
        "Generation #{generation:4}: evaluated {evaluated:4}, fitness min {:.6} mean {:.6} max {:.6}, best ever {best_ever_fitness:.6}",
        fitness.min, fitness.mean, fitness.max,
    );
}

pub(crate) fn print_route_summary(
    env: &GridEnvironment,
    generation: usize,
    fitness: f64,
    path: &DecodedPath,
) {
    eprintln!("Best route (found in generation {generation}):");
    eprintln!("  Fitness: {fitness:.6}");
    eprintln!("  Points: {}", path.len());
    eprintln!("  Stalls: {}", path.stall_count());
    eprintln!(
        "  Reaches {} by walking: {}",
        env.end(),
        if path.reaches_end() { "yes" } else { "no" }
    );
}
