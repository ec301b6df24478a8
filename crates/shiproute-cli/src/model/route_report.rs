use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shiproute_grid::{Coordinate, GridEnvironment};
use shiproute_training::{config::EvolutionConfig, engine::GenerationSummary, genotype::Genotype};

/// Saved result of one `run`, readable again by `show`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteReport {
    pub solved_at: DateTime<Utc>,
    pub seed: u64,
    pub environment: GridEnvironment,
    pub config: EvolutionConfig,
    pub stall_penalty: f64,
    pub best_fitness: f64,
    pub best_generation: usize,
    pub genotype: Genotype,
    pub path: Vec<Coordinate>,
    pub generations: Vec<GenerationSummary>,
}
