use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use shiproute_evaluator::route_cost::RouteCostEvaluator;
use shiproute_grid::{Coordinate, GridEnvironment, ObstacleSampler};
use shiproute_training::{
    config::EvolutionConfig,
    engine::{EvolutionEngine, EvolutionOutcome},
};

fn open_five_by_five() -> GridEnvironment {
    GridEnvironment::new(5, Coordinate::new(0, 0), Coordinate::new(4, 4), []).unwrap()
}

fn reference_config() -> EvolutionConfig {
    EvolutionConfig {
        genotype_length: 20,
        population_size: 50,
        generation_limit: 50,
        mutation_rate: 0.2,
        crossover_rate: 0.3,
        ..Default::default()
    }
}

fn run(env: &GridEnvironment, config: EvolutionConfig, seed: u64) -> EvolutionOutcome {
    EvolutionEngine::with_seed(env, RouteCostEvaluator::default(), config, seed)
        .unwrap()
        .run()
}

#[test]
fn test_search_makes_progress_on_open_grid() {
    let env = open_five_by_five();
    let outcome = run(&env, reference_config(), 42);

    let path = outcome.decoded_path(&env);
    assert_eq!(path.len(), 22);
    let walked_with_start = &path.points()[..path.len() - 1];
    assert!(walked_with_start.windows(2).any(|w| {
        let (from, to) = (w[0], w[1]);
        from.is_adjacent(to) && (to.x > from.x || to.y > from.y)
    }));

    let first = outcome.generations.first().unwrap();
    assert!(outcome.best.fitness >= first.fitness.max);
    assert!(outcome.best.fitness > first.fitness.min);
}

#[test]
fn test_same_seed_same_result() {
    let mut rng = Pcg32::seed_from_u64(99);
    let env = ObstacleSampler::new(12, 20)
        .sample_environment(&mut rng)
        .unwrap();
    let config = EvolutionConfig {
        genotype_length: 40,
        population_size: 31,
        generation_limit: 15,
        ..Default::default()
    };

    let a = run(&env, config, 7);
    let b = run(&env, config, 7);
    assert_eq!(a, b);

    let c = run(&env, config, 8);
    assert_eq!(c.generations.len(), a.generations.len());
}

#[test]
fn test_best_path_shape_on_default_grid() {
    let mut rng = Pcg32::seed_from_u64(1);
    let env = ObstacleSampler::default().sample_environment(&mut rng).unwrap();
    let config = EvolutionConfig {
        population_size: 40,
        generation_limit: 10,
        ..Default::default()
    };
    let outcome = EvolutionEngine::new(&env, RouteCostEvaluator::default(), config, rng)
        .unwrap()
        .run();

    let path = outcome.decoded_path(&env);
    assert_eq!(path.len(), 102);
    assert_eq!(path.start(), Coordinate::new(0, 0));
    assert_eq!(path.end(), Coordinate::new(19, 19));
    assert!(path.walked().iter().all(|c| env.is_valid(*c)));
    assert!(outcome.best.fitness > 0.0 && outcome.best.fitness.is_finite());
}
